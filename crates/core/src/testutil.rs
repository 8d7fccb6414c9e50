//! Test doubles shared across core tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::runner::CommandRunner;

/// One recorded [`CommandRunner::run`] invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub cwd: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

/// Recording runner with a scripted result per invocation
///
/// The `on_run` closure decides success or failure for each invocation and
/// may fake the external tool's side effects (creating a checkout, dropping
/// install markers) before the caller observes the result.
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    on_run: Box<dyn Fn(&Invocation) -> bool>,
}

impl RecordingRunner {
    pub fn new(on_run: impl Fn(&Invocation) -> bool + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            on_run: Box::new(on_run),
        }
    }

    /// Runner where every command succeeds and nothing is faked
    pub fn succeeding() -> Self {
        Self::new(|_| true)
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Programs invoked, in order
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> bool {
        let invocation = Invocation {
            cwd: cwd.to_path_buf(),
            program: program.to_string(),
            args: args.to_vec(),
        };
        let ok = (self.on_run)(&invocation);
        self.calls.borrow_mut().push(invocation);
        ok
    }
}
