use crate::prelude::*;
use error::Result;

pub mod error;

/// Code quality checks
#[derive(Debug, clap::Parser)]
#[command(
    long_about = "Run code quality checks including formatting, compilation, linting, and dependency audits.

This command runs the following checks in order:

1. cargo fmt - Code formatting (auto-fix with --fix)
2. cargo check - Compilation check
3. cargo clippy - Linting with all warnings treated as errors
4. cargo test - Run all tests including doctests
5. cargo machete - Unused dependencies detection"
)]
pub struct LintCommand {
    /// Auto-fix formatting issues
    #[arg(long)]
    pub fix: bool,
}

/// A cargo invocation that either passes or fails.
struct CargoStep {
    label: &'static str,
    args: &'static [&'static str],
    /// Appended after `--quiet` unless verbose.
    trailing: &'static [&'static str],
    passed: &'static str,
    failed: &'static str,
    hint: &'static str,
}

const CARGO_STEPS: [CargoStep; 3] = [
    CargoStep {
        label: "Running cargo check...",
        args: &["check", "--all-targets"],
        trailing: &[],
        passed: "Cargo check passed",
        failed: "Cargo check failed",
        hint: "Please fix compilation errors before proceeding",
    },
    CargoStep {
        label: "Running cargo clippy...",
        args: &["clippy", "--all-targets"],
        trailing: &["--", "-D", "warnings"],
        passed: "Clippy checks passed",
        failed: "Clippy checks failed",
        hint: "Please fix clippy warnings before proceeding",
    },
    CargoStep {
        label: "Running cargo test...",
        args: &["test", "--workspace"],
        trailing: &[],
        passed: "All tests passed",
        failed: "Tests failed",
        hint: "Please fix failing tests before proceeding",
    },
];

pub async fn run(command: LintCommand, global: crate::Global) -> Result<()> {
    use error::require_command;

    require_command("cargo", "Required for Rust development: https://rustup.rs/")?;
    require_command(
        "cargo-machete",
        "Required for unused dependency checks: cargo install cargo-machete",
    )?;

    if !global.is_silent() {
        aprintln!("{}", p_b("Running code quality checks..."));
        aprintln!();
    }

    let mut all_passed = run_cargo_fmt(&command, &global).await?;

    for step in &CARGO_STEPS {
        if !run_cargo_step(step, &global).await? {
            all_passed = false;
        }
    }

    if !run_cargo_machete(&global).await? {
        all_passed = false;
    }

    aprintln!();
    if all_passed {
        aprintln!("{} {}", p_g("✅"), p_g("All checks passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some checks failed"));
        aprintln!();
        if !global.is_silent() {
            aprintln!("{}", p_b("Quick fixes:"));
            aprintln!("  • {} - Format code", p_c("cargo xtask lint --fix"));
            aprintln!("  • {} - Auto-fix clippy issues", p_c("cargo clippy --fix"));
        }
        Err(error::LintError::ChecksFailed)
    }
}

async fn run_cargo_fmt(command: &LintCommand, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Running cargo fmt..."));
    }

    let check = tokio::process::Command::new("cargo")
        .args(["fmt", "--all", "--check"])
        .output()
        .await?;

    if check.status.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), "Code formatting is correct");
        }
        return Ok(true);
    }

    if !command.fix {
        aprintln!(
            "{} {}",
            p_r("❌"),
            "Code formatting check failed. Run with --fix to auto-format"
        );
        return Ok(false);
    }

    let status = tokio::process::Command::new("cargo")
        .args(["fmt", "--all"])
        .status()
        .await?;

    if status.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), "Code formatted");
        }
        Ok(true)
    } else {
        aprintln!("{} {}", p_r("❌"), "cargo fmt failed");
        Ok(false)
    }
}

async fn run_cargo_step(step: &CargoStep, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b(step.label));
    }

    let mut cmd = tokio::process::Command::new("cargo");
    cmd.args(step.args);
    if !global.is_verbose() {
        cmd.arg("--quiet");
    }
    cmd.args(step.trailing);

    if cmd.status().await?.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), step.passed);
        }
        Ok(true)
    } else {
        aprintln!("{} {}", p_r("❌"), step.failed);
        aprintln!("{}", p_r(step.hint));
        Ok(false)
    }
}

async fn run_cargo_machete(global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Running cargo machete..."));
    }

    let output = tokio::process::Command::new("cargo")
        .arg("machete")
        .output()
        .await?;

    // cargo machete reports on either stream
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let clean =
        stdout.contains("didn't find any unused") || stderr.contains("didn't find any unused");

    if output.status.success() && clean {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), "No unused dependencies found");
        }
        return Ok(true);
    }

    aprintln!("{} {}", p_r("❌"), "Unused dependencies detected");
    aprintln!("{}", p_r("Please remove unused dependencies from Cargo.toml"));
    if global.is_verbose() {
        if !stdout.is_empty() {
            aprintln!("Output: {}", stdout);
        }
        if !stderr.is_empty() {
            aprintln!("Errors: {}", stderr);
        }
    }
    Ok(false)
}
