use crate::error::{GenError, Result};
use crate::module_path::SEPARATE_CRATE_PATHS;
use crate::route_path;
use log::debug;
use std::path::{Path, PathBuf};

/// Validated inputs of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Crate directory: module paths are resolved against its `src/` and artifacts are
    /// written into it
    pub project_root: PathBuf,
    /// Directories to scan, absolute
    pub scan_roots: Vec<PathBuf>,
    /// Directory names skipped together with their subtrees
    pub skip_dirs: Vec<String>,
    /// Absolute paths of test, example, bench, binary and build-script crates
    pub excluded_paths: Vec<PathBuf>,
    /// Normalized application context path, e.g. `/` or `/api`
    pub app_context: String,
}

impl GeneratorConfig {
    /// Builds a configuration from raw command-line values.
    ///
    /// `scan_pkg` and `scan_skip` are comma separated lists. Scan roots are relative to
    /// the project root and must exist. An empty root list scans the whole project.
    pub fn new(
        project_root: &Path,
        scan_pkg: &str,
        scan_skip: &str,
        context: &str,
    ) -> Result<Self> {
        let project_root = project_root.canonicalize().map_err(|e| {
            GenError::InvalidArgument(format!(
                "project directory {} is not accessible: {}",
                project_root.display(),
                e
            ))
        })?;
        if !project_root.is_dir() {
            return Err(GenError::InvalidArgument(format!(
                "project path is not a directory: {}",
                project_root.display()
            )));
        }

        let mut scan_roots = Vec::new();
        for pkg in split_and_trim(scan_pkg) {
            let root = project_root.join(&pkg).canonicalize().map_err(|_| {
                GenError::InvalidArgument(format!(
                    "scan package does not exist: {}",
                    project_root.join(&pkg).display()
                ))
            })?;
            scan_roots.push(root);
        }
        if scan_roots.is_empty() {
            scan_roots.push(project_root.clone());
        }

        let excluded_paths = SEPARATE_CRATE_PATHS
            .iter()
            .map(|path| project_root.join(path))
            .collect();

        let config = Self {
            project_root,
            scan_roots,
            skip_dirs: split_and_trim(scan_skip),
            excluded_paths,
            app_context: route_path::normalize_context(context),
        };
        debug!("Generator configuration: {:?}", config);
        Ok(config)
    }
}

/// Splits a comma separated list, trimming whitespace and `/` from each item and
/// dropping empty ones.
pub fn split_and_trim(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|item| item.trim().trim_matches('/'))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
