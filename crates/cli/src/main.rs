use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use std::path::{Path, PathBuf};

use depstrap_core::{
    Outcome, SystemRunner, default_deps, install_toolchain, is_bootstrapped, is_present, provision,
};
use depstrap_platform::{PlatformInfo, build_jobs};
use tracing_subscriber::EnvFilter;

/// depstrap - Build-environment provisioning for the compiler tree
#[derive(Parser)]
#[command(name = "depstrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and bootstrap the source dependencies
    Deps {
        /// Provisioning root (default: current directory)
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Download and extract the LLVM toolchain sources
    Toolchain {
        /// Directory to place the sources under (default: current directory)
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Show platform info and dependency state
    Status {
        /// Provisioning root (default: current directory)
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    match cli.command {
        Commands::Deps { root } => cmd_deps(&root),
        Commands::Toolchain { root } => cmd_toolchain(&root),
        Commands::Status { root } => cmd_status(&root),
    }
}

fn cmd_deps(root: &Path) -> Result<()> {
    let term = Term::stderr();
    let deps = default_deps();

    term.write_line(&format!(
        "{} Provisioning {} dependencies under {}",
        style("::").cyan().bold(),
        deps.len(),
        root.display()
    ))?;

    let report = provision(&SystemRunner, root, &deps);

    term.write_line("")?;
    for (name, outcome) in report.entries() {
        let symbol = match outcome {
            Outcome::AlreadyPresent => style("=").dim(),
            Outcome::Acquired | Outcome::BuildSucceeded => style("+").green().bold(),
            Outcome::AcquireFailed | Outcome::BuildFailed => style("!").red().bold(),
        };
        term.write_line(&format!(
            "  {} {} {}",
            symbol,
            name,
            style(format!("({})", outcome)).dim()
        ))?;
    }

    term.write_line("")?;
    let failures = report.failures();
    if failures > 0 {
        term.write_line(&format!(
            "{} {} of {} dependencies failed",
            style("::").red().bold(),
            failures,
            deps.len()
        ))?;
        std::process::exit(1);
    }

    term.write_line(&format!("{} Done!", style("::").green().bold()))?;
    Ok(())
}

fn cmd_toolchain(root: &Path) -> Result<()> {
    let term = Term::stderr();

    term.write_line(&format!(
        "{} Fetching the LLVM 12 sources",
        style("::").cyan().bold()
    ))?;

    if let Err(e) = install_toolchain(root) {
        term.write_line(&format!(
            "{} Toolchain download failed: {}",
            style("error:").red().bold(),
            e
        ))?;
        std::process::exit(1);
    }

    term.write_line(&format!("{} Done!", style("::").green().bold()))?;
    Ok(())
}

fn cmd_status(root: &Path) -> Result<()> {
    let term = Term::stderr();
    let info = PlatformInfo::current();

    term.write_line(&format!(
        "{} depstrap v{}",
        style("::").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ))?;
    term.write_line("")?;
    term.write_line(&format!("  Platform:   {}", info.platform))?;
    term.write_line(&format!("  User:       {}@{}", info.username, info.hostname))?;
    term.write_line(&format!("  Build jobs: {}", build_jobs()))?;
    term.write_line("")?;

    for dep in default_deps() {
        let target = root.join(&dep.dir);
        let state = if !is_present(&target) {
            style("missing").red()
        } else if let Some(recipe) = &dep.build {
            if is_bootstrapped(&target, recipe) {
                style("bootstrapped").green()
            } else {
                style("cloned").yellow()
            }
        } else {
            style("cloned").green()
        };
        term.write_line(&format!("  {:<12} {}", dep.name, state))?;
    }

    Ok(())
}
