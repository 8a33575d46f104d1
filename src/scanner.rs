use crate::config::GeneratorConfig;
use crate::markers::BEAN_INIT_FILE;
use anyhow::Result;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// File scanner for traversing the roots of a project.
///
/// The `FileScanner` recursively walks each scan root to find Rust source files. It always
/// skips `target` and hidden entries (those starting with `.`), plus every directory whose
/// name appears in the skip list, together with its whole subtree.
///
/// # Example
///
/// ```no_run
/// use gp_ast::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(vec![PathBuf::from("./src")], vec!["dto".to_string()]);
/// let result = scanner.scan().unwrap();
/// println!("Found {} Rust files", result.rust_files.len());
/// ```
pub struct FileScanner {
    roots: Vec<PathBuf>,
    skip_dirs: Vec<String>,
    excluded: Vec<PathBuf>,
}

/// Result of directory scanning operation.
pub struct ScanResult {
    /// Discovered `.rs` files, sorted and free of duplicates
    pub rust_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    pub fn new(roots: Vec<PathBuf>, skip_dirs: Vec<String>) -> Self {
        Self {
            roots,
            skip_dirs,
            excluded: Vec::new(),
        }
    }

    /// Scanner for a run: its roots and skip list, minus the test, example, bench,
    /// binary and build-script crates of the project.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.scan_roots.clone(), config.skip_dirs.clone())
            .with_excluded(config.excluded_paths.clone())
    }

    /// Leaves out the given files and directories, matched by exact path.
    pub fn with_excluded(mut self, excluded: Vec<PathBuf>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Scans every root and collects the Rust files worth inspecting.
    ///
    /// Besides the skipped directories and excluded paths, the generated initializer and
    /// `*_test.rs` files are left out. Roots are walked in file-name order and files
    /// reachable from overlapping roots are reported once, so the result does not depend on
    /// directory iteration order.
    ///
    /// Inaccessible entries are recorded as warnings and the walk continues.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut rust_files = BTreeSet::new();
        let mut warnings = Vec::new();

        for root in &self.roots {
            debug!("Scanning {}", root.display());

            for entry in WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !self.is_skipped(e))
            {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && Self::is_candidate(&entry) {
                            rust_files.insert(entry.into_path());
                        }
                    }
                    Err(e) => {
                        let warning = format!("Failed to access path: {}", e);
                        warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }

        Ok(ScanResult {
            rust_files: rust_files.into_iter().collect(),
            warnings,
        })
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('.') {
            return true;
        }
        if self.excluded.iter().any(|path| path == entry.path()) {
            debug!("Skipping separate crate {}", entry.path().display());
            return true;
        }

        entry.file_type().is_dir()
            && (file_name == "target" || self.skip_dirs.iter().any(|s| *s == file_name))
    }

    fn is_candidate(entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        file_name.ends_with(".rs")
            && file_name != BEAN_INIT_FILE
            && !file_name.ends_with("_test.rs")
    }
}
