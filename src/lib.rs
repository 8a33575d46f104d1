//! gp-ast - Build-time registration and routing code for gin-plus applications.
//!
//! gin-plus wires its IoC container and router from metadata that is generated ahead of
//! time rather than discovered at runtime. This crate produces that metadata by reading
//! the application's source code.
//!
//! A struct takes part when one of its fields is a marker type:
//!
//! ```ignore
//! use gin_plus::{ioc, mvc};
//!
//! /// @BasePath("/users")
//! #[derive(Default)]
//! pub struct UserCtrl {
//!     _ctrl: mvc::Controller,
//! }
//!
//! impl UserCtrl {
//!     /// @GET(path="/all")
//!     /// @Auth -> admin
//!     pub fn list(&self) {}
//! }
//! ```
//!
//! # Architecture
//!
//! 1. [`scanner`] - Walks the configured roots for Rust files
//! 2. [`parser`] - Parses each file into a `syn` syntax tree
//! 3. [`imports`] - Finds the local names of the marker modules in a file
//! 4. [`classifier`] - Decides whether a struct is a bean, a controller or neither
//! 5. [`annotation`] - Reads `@BasePath`, `@VERB(path="...")` and `@Key -> value` lines
//! 6. [`route_path`] - Joins context, base path and method path into a route
//! 7. [`collector`] - Drives the steps above and fills the [`registry`]
//! 8. [`emitter`] - Renders `gp_bean_init.rs` and `gp_api.def` from the registry
//!
//! # Example Usage
//!
//! ```no_run
//! use gp_ast::{
//!     collector, config::GeneratorConfig, emitter, parser::AstParser, scanner::FileScanner,
//! };
//! use std::path::Path;
//!
//! let config = GeneratorConfig::new(Path::new("./my-app"), "src", "", "/api").unwrap();
//! let scanner = FileScanner::from_config(&config);
//! let scan_result = scanner.scan().unwrap();
//!
//! let parsed_files = AstParser::parse_files(&scan_result.rust_files).unwrap();
//! let snapshot = collector::collect(&config, &parsed_files).unwrap().finalize();
//!
//! emitter::emit(&snapshot, &config.project_root).unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod annotation;
pub mod classifier;
pub mod cli;
pub mod collector;
pub mod config;
pub mod emitter;
pub mod error;
pub mod imports;
pub mod markers;
pub mod module_path;
pub mod parser;
pub mod registry;
pub mod route_path;
pub mod scanner;
pub mod serializer;
