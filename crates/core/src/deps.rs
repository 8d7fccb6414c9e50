//! Dependency declarations and provisioning outcomes
//!
//! The dependency set is fixed: it is declared once at orchestrator start
//! and never discovered dynamically. The filesystem state of each target
//! directory is the sole source of truth for idempotence; no manifest or
//! lock file exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use depstrap_platform::Os;

/// A single external source dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepSpec {
    /// Short identifier used in log lines and reports
    pub name: String,

    /// Repository to clone from
    pub url: String,

    /// Checkout directory, relative to the provisioning root
    pub dir: String,

    /// Native build recipe, for the one dependency that needs compiled
    /// artifacts rather than raw source
    pub build: Option<BuildRecipe>,
}

impl DepSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dir: dir.into(),
            build: None,
        }
    }

    pub fn with_build(mut self, build: BuildRecipe) -> Self {
        self.build = Some(build);
        self
    }
}

/// Configure/compile/install recipe for a dependency built from source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecipe {
    /// Platforms this recipe is configured for; elsewhere the bootstrap is
    /// skipped as a no-op
    pub platforms: Vec<Os>,

    /// Flags passed to the configure script in addition to the install
    /// prefix
    pub configure_flags: Vec<String>,

    /// Generated header whose presence marks a completed install, relative
    /// to the checkout
    pub include_marker: String,

    /// Static library artifacts, relative to the checkout; either one marks
    /// a completed install (`lib` vs `lib64` layouts)
    pub lib_markers: Vec<String>,
}

impl BuildRecipe {
    /// Whether a build recipe is configured for the given host OS
    pub fn supports(&self, os: Os) -> bool {
        self.platforms.contains(&os)
    }
}

/// Per-dependency provisioning outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Checkout (and, where applicable, build artifacts) already on disk
    AlreadyPresent,
    /// Source fetched this run
    Acquired,
    /// Clone failed; the run continued with the remaining dependencies
    AcquireFailed,
    /// Source fetched (or already present) and native build completed
    BuildSucceeded,
    /// Native build sequence ended before producing the artifacts
    BuildFailed,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::AcquireFailed | Outcome::BuildFailed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::AlreadyPresent => "already present",
            Outcome::Acquired => "acquired",
            Outcome::AcquireFailed => "acquisition failed",
            Outcome::BuildSucceeded => "build succeeded",
            Outcome::BuildFailed => "build failed",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one provisioning run, in declaration order
///
/// Transient: surfaced to the caller for reporting, never persisted.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Report {
    entries: Vec<(String, Outcome)>,
}

impl Report {
    pub fn record(&mut self, name: &str, outcome: Outcome) {
        self.entries.push((name.to_string(), outcome));
    }

    pub fn entries(&self) -> &[(String, Outcome)] {
        &self.entries
    }

    /// Number of dependencies that ended in a failed outcome
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_failure()).count()
    }
}

/// The dependency set for the compiler build environment
///
/// rapidjson is consumed header-only; pcre2 is built into a static library
/// and headers under `<checkout>/out`.
pub fn default_deps() -> Vec<DepSpec> {
    vec![
        DepSpec::new(
            "rapidjson",
            "https://github.com/Tencent/rapidjson.git",
            "deps/rapidjson",
        ),
        DepSpec::new(
            "pcre2",
            "https://github.com/PCRE2Project/pcre2.git",
            "deps/pcre2",
        )
        .with_build(BuildRecipe {
            platforms: vec![Os::Linux, Os::Darwin],
            configure_flags: vec!["--disable-shared".to_string(), "--disable-tests".to_string()],
            include_marker: "out/include/pcre2.h".to_string(),
            lib_markers: vec![
                "out/lib/libpcre2-8.a".to_string(),
                "out/lib64/libpcre2-8.a".to_string(),
            ],
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deps_shape() {
        let deps = default_deps();
        assert_eq!(deps.len(), 2);

        // Exactly one dependency carries a native build recipe
        let built: Vec<_> = deps.iter().filter(|d| d.build.is_some()).collect();
        assert_eq!(built.len(), 1);

        let recipe = built[0].build.as_ref().unwrap();
        assert_eq!(recipe.lib_markers.len(), 2);
        assert!(recipe.configure_flags.contains(&"--disable-shared".to_string()));
    }

    #[test]
    fn recipe_platform_support() {
        let recipe = BuildRecipe {
            platforms: vec![Os::Linux],
            configure_flags: vec![],
            include_marker: "out/include/x.h".to_string(),
            lib_markers: vec!["out/lib/libx.a".to_string()],
        };

        assert!(recipe.supports(Os::Linux));
        assert!(!recipe.supports(Os::Windows));
    }

    #[test]
    fn report_counts_failures() {
        let mut report = Report::default();
        report.record("a", Outcome::Acquired);
        report.record("b", Outcome::AcquireFailed);
        report.record("c", Outcome::BuildFailed);
        report.record("d", Outcome::AlreadyPresent);

        assert_eq!(report.failures(), 2);
        assert_eq!(report.entries().len(), 4);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::AlreadyPresent.to_string(), "already present");
        assert_eq!(Outcome::AcquireFailed.to_string(), "acquisition failed");
    }
}
