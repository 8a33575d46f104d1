use crate::collector;
use crate::config::GeneratorConfig;
use crate::emitter;
use crate::parser::AstParser;
use crate::scanner::FileScanner;
use crate::serializer::{serialize_json, serialize_yaml};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// gin-plus code generator - Registers beans and controllers and builds the route table
#[derive(Parser, Debug)]
#[command(name = "gp-ast")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Crate directory; artifacts are written here and module paths resolve against its src/
    #[arg(long = "project-dir", value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Comma separated directories to scan, relative to the project directory
    #[arg(long = "scan-pkg", value_name = "DIRS", default_value = ".")]
    pub scan_pkg: String,

    /// Comma separated directory names to skip while scanning
    #[arg(long = "scan-skip", value_name = "DIRS", default_value = "")]
    pub scan_skip: String,

    /// Application context path prepended to every route
    #[arg(long = "context", value_name = "PATH", default_value = "/")]
    pub context: String,

    /// Also print the collected registry to stdout
    #[arg(short = 'p', long = "print", value_enum)]
    pub print: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_dir.exists() {
        anyhow::bail!(
            "Project directory does not exist: {}",
            args.project_dir.display()
        );
    }

    if !args.project_dir.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_dir.display()
        );
    }

    info!("Project directory: {}", args.project_dir.display());
    info!("Scan packages: {}", args.scan_pkg);
    if !args.scan_skip.is_empty() {
        info!("Skipped directories: {}", args.scan_skip);
    }
    info!("Application context: {}", args.context);

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting code generation...");

    let config = GeneratorConfig::new(
        &args.project_dir,
        &args.scan_pkg,
        &args.scan_skip,
        &args.context,
    )?;

    // Step 1: Scan the configured roots for Rust files
    info!("Scanning source directories...");
    let scanner = FileScanner::from_config(&config);
    let scan_result = scanner.scan()?;

    info!("Found {} Rust files", scan_result.rust_files.len());
    for warning in &scan_result.warnings {
        warn!("{}", warning);
    }

    // Step 2: Parse files into AST, any failure aborts the run
    info!("Parsing Rust files...");
    let parsed_files = AstParser::parse_files(&scan_result.rust_files)?;

    // Step 3: Collect beans, controllers and routes
    info!("Collecting beans and controllers...");
    let snapshot = collector::collect(&config, &parsed_files)?.finalize();

    if snapshot.beans().is_empty() {
        warn!("No beans or controllers found");
    }

    // Step 4: Optionally dump the registry
    if let Some(format) = args.print {
        let content = match format {
            OutputFormat::Yaml => serialize_yaml(&snapshot)?,
            OutputFormat::Json => serialize_json(&snapshot)?,
        };
        println!("{}", content);
    }

    // Step 5: Write the artifacts
    info!("Writing artifacts to {}", config.project_root.display());
    let written = emitter::emit(&snapshot, &config.project_root)?;

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Files scanned: {}", scan_result.rust_files.len());
    info!("  - Beans: {}", snapshot.beans().len());
    info!("  - Controllers: {}", snapshot.controllers().len());
    info!("  - Routes: {}", snapshot.route_count());
    info!("  - Artifacts written: {}", written.len());

    Ok(())
}
