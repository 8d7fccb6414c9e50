//! depstrap-core: Build-environment provisioning for the compiler tree
//!
//! This crate provides the dependency provisioning orchestrator: presence
//! checks, shallow source acquisition, the native library bootstrap, the
//! best-effort driver loop, and the one-off toolchain source download.

mod bootstrap;
mod deps;
mod error;
mod fetch;
mod presence;
mod provision;
mod runner;
mod toolchain;

pub use bootstrap::{BootstrapOutcome, bootstrap};
pub use deps::{BuildRecipe, DepSpec, Outcome, Report, default_deps};
pub use error::CoreError;
pub use fetch::{FetchOutcome, fetch_source};
pub use presence::{is_bootstrapped, is_present};
pub use provision::provision;
pub use runner::{CommandRunner, SystemRunner};
pub use toolchain::{LLVM_SOURCE_URL, fetch_url, install_toolchain, unpack_tar_xz};

#[cfg(test)]
pub(crate) mod testutil;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
