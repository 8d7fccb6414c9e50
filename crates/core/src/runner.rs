//! External process execution
//!
//! Every external tool (git, configure, make) is invoked through
//! [`CommandRunner`]. It is the uniform failure-containment boundary: a
//! failed or unlaunchable command is logged and reported as `false`, never
//! raised, so a multi-step sequence above it decides for itself whether to
//! continue.

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

/// Failure-containment boundary for external tools
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, returning true iff the process
    /// exited with status zero
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> bool;
}

/// Runs commands on the host, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> bool {
        debug!(cwd = %cwd.display(), program, ?args, "spawning process");

        match Command::new(program).args(args).current_dir(cwd).status() {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!(
                    cwd = %cwd.display(),
                    program,
                    ?args,
                    code = status.code(),
                    "command exited with failure"
                );
                false
            }
            Err(e) => {
                warn!(
                    cwd = %cwd.display(),
                    program,
                    ?args,
                    error = %e,
                    "failed to launch command"
                );
                false
            }
        }
    }
}
