//! gp-ast - Build-time code generator for gin-plus applications.
//!
//! Scans a crate for structs marked as beans or controllers, reads the route annotations
//! in their doc comments and writes two files into the project directory:
//! `gp_bean_init.rs` (container registration code) and `gp_api.def` (the route table).
//!
//! # Usage
//!
//! ```bash
//! gp-ast [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Generate for the crate in the current directory:
//! ```bash
//! gp-ast
//! ```
//!
//! Scan only the API modules and mount every route under `/api`:
//! ```bash
//! gp-ast --project-dir ./my-app --scan-pkg src/api --context /api
//! ```
//!
//! Print what was collected and enable verbose logging:
//! ```bash
//! gp-ast -p yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use gp_ast::cli;
use log::info;

fn main() -> Result<()> {
    // The verbose flag decides the log level, so parse before the logger exists
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("gp-ast starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Code generation completed successfully");

    Ok(())
}
