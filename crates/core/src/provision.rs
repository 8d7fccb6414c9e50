//! The provisioning driver
//!
//! Walks the declared dependency set strictly in order, acquiring each one
//! and bootstrapping the one that needs native artifacts. Failures are
//! contained per dependency: the loop never exits early, so one broken
//! dependency cannot block the rest of the run.

use std::path::Path;

use tracing::info;

use crate::bootstrap::{BootstrapOutcome, bootstrap};
use crate::deps::{DepSpec, Outcome, Report};
use crate::fetch::{FetchOutcome, fetch_source};
use crate::runner::CommandRunner;

/// Provision every declared dependency under `root`
///
/// Sequential and blocking; emits one outcome line per dependency and
/// returns the collected [`Report`] in declaration order.
pub fn provision<R: CommandRunner>(runner: &R, root: &Path, deps: &[DepSpec]) -> Report {
    let mut report = Report::default();

    for dep in deps {
        let target = root.join(&dep.dir);
        let fetched = fetch_source(runner, &dep.url, &target);

        let base = match fetched {
            FetchOutcome::AlreadyPresent => Outcome::AlreadyPresent,
            FetchOutcome::Cloned => Outcome::Acquired,
            FetchOutcome::Failed => Outcome::AcquireFailed,
        };

        // A failed acquisition leaves no checkout to build against, so the
        // bootstrap is skipped and the run moves on.
        let outcome = match (&dep.build, fetched) {
            (Some(recipe), FetchOutcome::AlreadyPresent | FetchOutcome::Cloned) => {
                match bootstrap(runner, &target, recipe) {
                    BootstrapOutcome::Built => Outcome::BuildSucceeded,
                    BootstrapOutcome::AlreadyBuilt => Outcome::AlreadyPresent,
                    // A host without a recipe keeps its acquisition outcome
                    BootstrapOutcome::Unsupported => base,
                    BootstrapOutcome::MissingConfigure
                    | BootstrapOutcome::ConfigureFailed
                    | BootstrapOutcome::CompileFailed
                    | BootstrapOutcome::InstallFailed => Outcome::BuildFailed,
                }
            }
            _ => base,
        };

        info!(dep = %dep.name, outcome = %outcome, path = %target.display(), "dependency processed");
        report.record(&dep.name, outcome);
    }

    report
}
