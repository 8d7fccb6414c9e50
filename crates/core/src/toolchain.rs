//! Toolchain source download
//!
//! One-off linear sequence: fetch the LLVM source tarball, extract it next
//! to the checkout, delete the tarball. Unlike dependency provisioning this
//! has no partial-failure policy; errors propagate to the caller.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tar::Archive;
use tracing::{debug, info};
use xz2::read::XzDecoder;

use crate::{CoreError, Result};

/// LLVM 12.0.0 source release consumed by the compiler build
pub const LLVM_SOURCE_URL: &str = "https://github.com/llvm/llvm-project/releases/download/llvmorg-12.0.0/llvm-12.0.0.src.tar.xz";

/// Directory the archive unpacks to, used as the idempotence probe
const LLVM_SOURCE_DIR: &str = "llvm-12.0.0.src";

/// Fetch a URL to `dest`, verifying the SHA-256 digest when one is given
pub fn fetch_url(url: &str, dest: &Path, expected_sha256: Option<&str>) -> Result<()> {
    info!(url, "fetching");

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(CoreError::DownloadFailed {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let bytes = response.bytes()?;

    if let Some(expected) = expected_sha256 {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let actual = hex::encode(hasher.finalize());
        if actual != expected {
            return Err(CoreError::DigestMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        debug!(digest = expected, "digest verified");
    }

    let mut file = File::create(dest)?;
    file.write_all(&bytes)?;

    info!(path = %dest.display(), "downloaded");
    Ok(())
}

/// Unpack a `.tar.xz` archive into `dest`
///
/// The archive's own top-level directory is kept; the downstream build
/// points at it explicitly.
pub fn unpack_tar_xz(archive_path: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let file = File::open(archive_path)?;
    let mut archive = Archive::new(XzDecoder::new(BufReader::new(file)));
    archive.unpack(dest)?;

    info!(path = %dest.display(), "unpacked");
    Ok(())
}

/// Download and extract the LLVM sources under `root`
///
/// Skips entirely if `<root>/llvm-project/llvm-12.0.0.src` is already on
/// disk; the compiler build expects exactly that layout.
pub fn install_toolchain(root: &Path) -> Result<()> {
    let dest = root.join("llvm-project");
    if dest.join(LLVM_SOURCE_DIR).is_dir() {
        info!(path = %dest.display(), "skip: toolchain sources already present");
        return Ok(());
    }

    let tarball = root.join("llvm-project.tar.xz");
    fetch_url(LLVM_SOURCE_URL, &tarball, None)?;
    unpack_tar_xz(&tarball, &dest)?;
    fs::remove_file(&tarball)?;

    Ok(())
}
