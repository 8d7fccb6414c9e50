//! Build parallelism detection

use std::thread;
use tracing::debug;

/// Parallelism used when the host CPU count cannot be determined
pub const DEFAULT_BUILD_JOBS: usize = 4;

/// Number of parallel jobs for native compile steps
///
/// Detected CPU core count, falling back to [`DEFAULT_BUILD_JOBS`].
pub fn build_jobs() -> usize {
    match thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(e) => {
            debug!(error = %e, fallback = DEFAULT_BUILD_JOBS, "could not detect CPU count");
            DEFAULT_BUILD_JOBS
        }
    }
}
