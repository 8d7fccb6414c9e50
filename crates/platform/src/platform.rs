//! Operating system and architecture detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Detect the current operating system at compile time
    #[cfg(target_os = "linux")]
    pub const fn current() -> Self {
        Os::Linux
    }

    #[cfg(target_os = "macos")]
    pub const fn current() -> Self {
        Os::Darwin
    }

    #[cfg(target_os = "windows")]
    pub const fn current() -> Self {
        Os::Windows
    }

    /// Returns the OS name as used in platform strings
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
    Arm,
}

impl Arch {
    /// Detect the current architecture at compile time
    #[cfg(target_arch = "x86_64")]
    pub const fn current() -> Self {
        Arch::X86_64
    }

    #[cfg(target_arch = "aarch64")]
    pub const fn current() -> Self {
        Arch::Aarch64
    }

    #[cfg(target_arch = "arm")]
    pub const fn current() -> Self {
        Arch::Arm
    }

    /// Returns the architecture name as used in platform strings
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Arm => "arm",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combined platform identifier (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub arch: Arch,
    pub os: Os,
}

impl Platform {
    /// Detect the current platform at compile time
    pub const fn current() -> Self {
        Self {
            arch: Arch::current(),
            os: Os::current(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.arch, self.os)
    }
}

/// Complete platform information including user details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub hostname: String,
    pub username: String,
}

impl PlatformInfo {
    /// Gather current platform information
    pub fn current() -> Self {
        Self {
            platform: Platform::current(),
            hostname: whoami::fallible::hostname().unwrap_or_else(|_| "unknown".to_string()),
            username: whoami::username(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_string_format() {
        let platform = Platform {
            arch: Arch::Aarch64,
            os: Os::Darwin,
        };
        assert_eq!(platform.to_string(), "aarch64-darwin");

        let platform = Platform {
            arch: Arch::X86_64,
            os: Os::Linux,
        };
        assert_eq!(platform.to_string(), "x86_64-linux");
    }

    #[test]
    fn platform_detection() {
        let info = PlatformInfo::current();

        assert!(!info.hostname.is_empty());
        assert!(!info.username.is_empty());
        assert!(info.platform.to_string().contains('-'));
    }
}
