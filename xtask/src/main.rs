// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Workspace-wide automation for the Leave Ledger:
//!
//! - `cargo xtask ci` — formatting check, clippy with warnings denied,
//!   and the full test suite, in that order
//! - `cargo xtask fmt` — apply formatting
//! - `cargo xtask clippy` — lint the workspace
//! - `cargo xtask test` — run every workspace crate's tests
//!
//! All orchestration lives here rather than in test code; `cargo test`
//! stays fast and infrastructure-free.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use duct::cmd;
use tracing::info;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.log_level_filter().as_trace())
        .init();

    match args.command {
        Command::Ci => ci(),
        Command::Fmt => fmt(),
        Command::Clippy => clippy(),
        Command::Test => test(),
    }
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full CI pipeline: fmt check, clippy, tests.
    Ci,
    /// Apply rustfmt to the workspace.
    Fmt,
    /// Run clippy with warnings denied.
    Clippy,
    /// Run every workspace crate's tests.
    Test,
}

fn ci() -> Result<()> {
    info!("Checking formatting");
    cmd!("cargo", "fmt", "--all", "--check")
        .run()
        .wrap_err("formatting check failed")?;

    clippy()?;
    test()?;

    info!("CI pipeline passed");
    Ok(())
}

fn fmt() -> Result<()> {
    cmd!("cargo", "fmt", "--all")
        .run()
        .wrap_err("formatting failed")?;
    Ok(())
}

fn clippy() -> Result<()> {
    info!("Running clippy");
    cmd!(
        "cargo",
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings"
    )
    .run()
    .wrap_err("clippy failed")?;
    Ok(())
}

fn test() -> Result<()> {
    let metadata = MetadataCommand::new()
        .exec()
        .wrap_err("failed to read workspace metadata")?;

    for package_id in &metadata.workspace_members {
        let package = &metadata[package_id];
        let name: String = package.name.to_string();
        if name == "xtask" {
            continue;
        }
        info!("Testing {name}");
        cmd!("cargo", "test", "--package", &name)
            .run()
            .wrap_err_with(|| format!("tests failed for {name}"))?;
    }

    Ok(())
}
