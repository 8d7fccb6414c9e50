//! Platform detection and host introspection for depstrap
//!
//! This crate provides the host-side facts the provisioning logic needs:
//! - OS and architecture detection
//! - CPU core count for native build parallelism
//! - User information for status output

mod jobs;
mod platform;

pub use jobs::{DEFAULT_BUILD_JOBS, build_jobs};
pub use platform::{Arch, Os, Platform, PlatformInfo};
