use crate::error::GenError;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// AST (Abstract Syntax Tree) parser for Rust source files.
///
/// The `AstParser` uses the `syn` crate to parse Rust source code into an abstract syntax tree,
/// which the collector then inspects for marker imports, structs and `impl` blocks.
///
/// # Example
///
/// ```no_run
/// use gp_ast::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/main.rs")).unwrap();
/// println!("Parsed {} items", parsed.syntax_tree.items.len());
/// ```
pub struct AstParser;

/// A successfully parsed Rust file with its abstract syntax tree.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The parsed abstract syntax tree
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Parses a single Rust source file into an AST.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid Rust syntax
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let syntax_tree = syn::parse_file(&content).map_err(|e| GenError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parses every file in order, stopping at the first failure.
    ///
    /// A tree that cannot be read or parsed completely cannot produce trustworthy
    /// registration code, so there is no partial result.
    pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        paths.iter().map(|path| Self::parse_file(path)).collect()
    }
}
