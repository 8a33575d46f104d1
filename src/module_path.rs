use crate::error::{GenError, Result};
use std::path::{Component, Path};

/// Directory, relative to the project root, that holds the crate's module tree.
pub const SOURCE_DIR: &str = "src";

/// Paths, relative to the project root, that Cargo builds as crates of their own. Nothing
/// declared in them can be imported from the crate root.
pub const SEPARATE_CRATE_PATHS: [&str; 5] =
    ["benches", "build.rs", "examples", "src/bin", "tests"];

/// Where a struct lives in the crate's module tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    /// Name of the declaring module, `crate` for the crate root
    pub module: String,
    /// Path to `use` the struct from, e.g. `crate::api::user`; empty for the crate root,
    /// where the generated initializer is included and no import is needed
    pub import_path: String,
}

impl ModuleLocation {
    pub fn crate_root() -> Self {
        Self {
            module: "crate".to_string(),
            import_path: String::new(),
        }
    }

    /// Maps a source file to its module following the default file layout:
    /// `src/main.rs` and `src/lib.rs` are the crate root, `src/a/b.rs` and
    /// `src/a/b/mod.rs` are `crate::a::b`.
    ///
    /// # Errors
    ///
    /// Fails for files outside `<project_root>/src`, for `src/bin` targets (each one is a
    /// crate root of its own), and for path segments that are not valid identifiers.
    pub fn resolve(project_root: &Path, file: &Path) -> Result<Self> {
        let unresolved = |reason: String| GenError::UnresolvedModulePath {
            file: file.to_path_buf(),
            reason,
        };

        let source_root = project_root.join(SOURCE_DIR);
        let relative = file.strip_prefix(&source_root).map_err(|_| {
            unresolved(format!(
                "file is outside the source directory {}",
                source_root.display()
            ))
        })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| unresolved("path is not valid UTF-8".to_string()))?;
                    segments.push(part.to_string());
                }
                _ => return Err(unresolved("path is not normalized".to_string())),
            }
        }

        if let Some(last) = segments.last_mut() {
            match last.strip_suffix(".rs") {
                Some(stem) => *last = stem.to_string(),
                None => return Err(unresolved("not a Rust source file".to_string())),
            }
        }

        if segments.len() == 1 && (segments[0] == "main" || segments[0] == "lib") {
            return Ok(Self::crate_root());
        }
        if segments.first().map(String::as_str) == Some("bin") {
            return Err(unresolved(
                "binary targets under src/bin are separate crate roots".to_string(),
            ));
        }
        if segments.last().map(String::as_str) == Some("mod") {
            segments.pop();
        }
        if segments.is_empty() {
            return Err(unresolved("file does not name a module".to_string()));
        }

        for segment in &segments {
            if syn::parse_str::<syn::Ident>(segment).is_err() {
                return Err(unresolved(format!(
                    "`{}` is not a valid module name",
                    segment
                )));
            }
        }

        let module = segments[segments.len() - 1].clone();
        Ok(Self {
            module,
            import_path: format!("crate::{}", segments.join("::")),
        })
    }

    pub fn is_crate_root(&self) -> bool {
        self.import_path.is_empty()
    }
}
