//! Serialization helpers: human-readable dumps of a registry snapshot, and the staged
//! file writes every artifact goes through.

use crate::registry::RegistrySnapshot;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serializes a registry snapshot to YAML, for `--print yaml`.
pub fn serialize_yaml(snapshot: &RegistrySnapshot) -> Result<String> {
    debug!("Serializing registry snapshot to YAML");
    serde_yaml::to_string(snapshot).context("Failed to serialize registry snapshot to YAML")
}

/// Serializes a registry snapshot to pretty-printed JSON, for `--print json`.
pub fn serialize_json(snapshot: &RegistrySnapshot) -> Result<String> {
    debug!("Serializing registry snapshot to JSON");
    serde_json::to_string_pretty(snapshot)
        .context("Failed to serialize registry snapshot to JSON")
}

/// Content written to disk next to its target, but not yet visible under the target name.
///
/// [`StagedFile::commit`] renames it into place. A staged file that is dropped without
/// being committed is removed, leaving the target untouched.
#[derive(Debug)]
pub struct StagedFile {
    tmp_path: PathBuf,
    path: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Replaces the target with the staged content.
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.tmp_path, &self.path)
            .with_context(|| format!("Failed to replace file: {}", self.path.display()))?;
        self.committed = true;

        debug!("Committed {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Writes content to a hidden temporary file next to `path` and syncs it.
///
/// Nothing is visible under `path` until the returned [`StagedFile`] is committed, so
/// several files can be prepared before any of them replaces its predecessor.
///
/// # Errors
///
/// Returns an error if the directory or the temporary file cannot be written. The
/// temporary file is removed on failure.
pub fn stage_file(content: &str, path: &Path) -> Result<StagedFile> {
    debug!("Staging content for file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let staged = StagedFile {
        tmp_path: temp_path(path),
        path: path.to_path_buf(),
        committed: false,
    };
    write_and_sync(content, &staged.tmp_path)?;

    debug!("Staged {} bytes for {}", content.len(), path.display());
    Ok(staged)
}

fn write_and_sync(content: &str, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write to file: {}", path.display()))
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}
