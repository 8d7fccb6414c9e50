//! Source acquisition via shallow clone
//!
//! Each dependency is fetched with `git clone --depth 1`: only the latest
//! commit's tree, no history. An existing checkout is never updated or
//! overwritten. A failed clone is contained here so one unreachable
//! repository cannot block provisioning of the others.

use std::path::Path;

use tracing::{info, warn};

use crate::presence::is_present;
use crate::runner::CommandRunner;

/// Result of one acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Checkout already on disk; nothing was fetched
    AlreadyPresent,
    Cloned,
    Failed,
}

/// Clone `url` into `dst` unless a checkout is already there
pub fn fetch_source<R: CommandRunner>(runner: &R, url: &str, dst: &Path) -> FetchOutcome {
    if is_present(dst) {
        info!(path = %dst.display(), "skip: checkout already present");
        return FetchOutcome::AlreadyPresent;
    }

    info!(url, path = %dst.display(), "cloning (depth 1)");
    let args = vec![
        "clone".to_string(),
        "--depth".to_string(),
        "1".to_string(),
        url.to_string(),
        dst.to_string_lossy().into_owned(),
    ];

    if runner.run(Path::new("."), "git", &args) {
        FetchOutcome::Cloned
    } else {
        warn!(
            url,
            path = %dst.display(),
            "clone failed; continuing with the remaining dependencies"
        );
        FetchOutcome::Failed
    }
}
