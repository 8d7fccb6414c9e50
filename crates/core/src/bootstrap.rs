//! From-source bootstrap of the native regex library
//!
//! Brings one cloned checkout from raw source to "installed static library
//! plus headers" under a local prefix. The sequence is strictly ordered and
//! terminal on first failure: each step's output is a precondition for the
//! next, so continuing past a failure would only produce confusing
//! secondary errors.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use depstrap_platform::{Os, build_jobs};

use crate::deps::BuildRecipe;
use crate::presence::is_bootstrapped;
use crate::runner::CommandRunner;

/// Configure entry point expected at the checkout root
const CONFIGURE: &str = "configure";

/// Terminal state of one bootstrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No build recipe configured for this host; skipped as a no-op
    Unsupported,
    /// Install markers already on disk; nothing to do
    AlreadyBuilt,
    /// The checkout has no configure script (corrupt or incompatible clone)
    MissingConfigure,
    ConfigureFailed,
    CompileFailed,
    InstallFailed,
    Built,
}

/// Run the configure/compile/install sequence for `root`
pub fn bootstrap<R: CommandRunner>(
    runner: &R,
    root: &Path,
    recipe: &BuildRecipe,
) -> BootstrapOutcome {
    let host = Os::current();
    if !recipe.supports(host) {
        info!(os = %host, path = %root.display(), "skip: no build recipe for this platform");
        return BootstrapOutcome::Unsupported;
    }

    if is_bootstrapped(root, recipe) {
        info!(path = %root.display(), "skip: already bootstrapped");
        return BootstrapOutcome::AlreadyBuilt;
    }

    if !root.join(CONFIGURE).is_file() {
        warn!(
            path = %root.display(),
            "no configure script in checkout; abandoning bootstrap"
        );
        return BootstrapOutcome::MissingConfigure;
    }

    // The prefix must be absolute: sub-makes resolve a relative one against
    // their own directory.
    let prefix = out_prefix(root);
    let mut configure_args = vec![format!("--prefix={}", prefix.display())];
    configure_args.extend(recipe.configure_flags.iter().cloned());
    if !runner.run(root, "./configure", &configure_args) {
        return BootstrapOutcome::ConfigureFailed;
    }

    let jobs = build_jobs();
    info!(path = %root.display(), jobs, "compiling");
    if !runner.run(root, "make", &[format!("-j{}", jobs)]) {
        return BootstrapOutcome::CompileFailed;
    }

    // Installs the static library and the generated header only; man pages
    // and html docs are skipped.
    let install_args = vec![
        "install-libLTLIBRARIES".to_string(),
        "install-nodist_includeHEADERS".to_string(),
    ];
    if runner.run(root, "make", &install_args) {
        info!(prefix = %prefix.display(), "bootstrap complete");
        BootstrapOutcome::Built
    } else {
        BootstrapOutcome::InstallFailed
    }
}

/// Absolute install prefix (`<root>/out`)
fn out_prefix(root: &Path) -> PathBuf {
    let out = root.join("out");
    std::path::absolute(&out).unwrap_or(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::testutil::RecordingRunner;

    fn recipe() -> BuildRecipe {
        BuildRecipe {
            platforms: vec![Os::current()],
            configure_flags: vec!["--disable-shared".to_string(), "--disable-tests".to_string()],
            include_marker: "out/include/pcre2.h".to_string(),
            lib_markers: vec![
                "out/lib/libpcre2-8.a".to_string(),
                "out/lib64/libpcre2-8.a".to_string(),
            ],
        }
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }

    fn checkout_with_configure() -> TempDir {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), CONFIGURE);
        temp
    }

    #[test]
    fn unsupported_platform_runs_nothing() {
        let temp = checkout_with_configure();
        let runner = RecordingRunner::succeeding();

        let unsupported = BuildRecipe {
            platforms: vec![],
            ..recipe()
        };
        let outcome = bootstrap(&runner, temp.path(), &unsupported);

        assert_eq!(outcome, BootstrapOutcome::Unsupported);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn existing_markers_short_circuit() {
        let temp = checkout_with_configure();
        touch(temp.path(), "out/include/pcre2.h");
        touch(temp.path(), "out/lib/libpcre2-8.a");

        let runner = RecordingRunner::succeeding();
        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::AlreadyBuilt);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn missing_configure_abandons_the_sequence() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::succeeding();

        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::MissingConfigure);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn full_sequence_in_order() {
        let temp = checkout_with_configure();
        let runner = RecordingRunner::succeeding();

        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::Built);
        assert_eq!(runner.programs(), ["./configure", "make", "make"]);

        let calls = runner.calls();

        // Configure: absolute prefix plus the recipe flags
        let prefix = &calls[0].args[0];
        assert!(prefix.starts_with("--prefix="));
        assert!(Path::new(prefix.trim_start_matches("--prefix=")).is_absolute());
        assert!(calls[0].args.contains(&"--disable-shared".to_string()));
        assert!(calls[0].args.contains(&"--disable-tests".to_string()));

        // Compile: parallel make in the checkout
        assert!(calls[1].args[0].starts_with("-j"));
        assert_eq!(calls[1].cwd, temp.path());

        // Install: software components only
        assert_eq!(
            calls[2].args,
            ["install-libLTLIBRARIES", "install-nodist_includeHEADERS"]
        );
    }

    #[test]
    fn configure_failure_stops_the_sequence() {
        let temp = checkout_with_configure();
        let runner = RecordingRunner::new(|inv| inv.program != "./configure");

        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::ConfigureFailed);
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn compile_failure_never_reaches_install() {
        let temp = checkout_with_configure();
        let runner = RecordingRunner::new(|inv| inv.program != "make");

        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::CompileFailed);
        // configure + the failed make; no install invocation follows
        assert_eq!(runner.programs(), ["./configure", "make"]);
    }

    #[test]
    fn install_failure_is_the_final_outcome() {
        let temp = checkout_with_configure();
        let runner = RecordingRunner::new(|inv| {
            !(inv.program == "make" && inv.args.iter().any(|a| a.starts_with("install-")))
        });

        let outcome = bootstrap(&runner, temp.path(), &recipe());

        assert_eq!(outcome, BootstrapOutcome::InstallFailed);
        assert_eq!(runner.call_count(), 3);
    }
}
