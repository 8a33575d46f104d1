//! Artifact emission.
//!
//! A finished scan produces two artifacts in the project root:
//!
//! - [`bean_init::BeanInitArtifact`] writes `gp_bean_init.rs`, Rust code that registers
//!   every bean and controller with the IoC container and hands the route annotations to
//!   the router. The crate root pulls it in with
//!   `include!(concat!(env!("CARGO_MANIFEST_DIR"), "/gp_bean_init.rs"));`
//! - [`api_def::ApiDefArtifact`] writes `gp_api.def`, the base64 encoded JSON route table
//!   the router reads at startup.
//!
//! Both are rendered in memory and then staged to temporary files before either replaces
//! its predecessor. A rendering or write failure leaves the previous artifacts untouched;
//! only the final renames happen after everything is on disk.

pub mod api_def;
pub mod bean_init;

use crate::registry::RegistrySnapshot;
use crate::serializer::stage_file;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// A build artifact derived from a registry snapshot.
pub trait Artifact {
    /// Fixed file name inside the output directory.
    fn file_name(&self) -> &'static str;

    /// Renders the artifact, or returns `None` when the snapshot has nothing for it.
    fn render(&self, snapshot: &RegistrySnapshot) -> crate::error::Result<Option<String>>;
}

/// Renders every artifact and writes the non-empty ones into `out_dir`.
///
/// Returns the paths that were written.
pub fn emit(snapshot: &RegistrySnapshot, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let artifacts: Vec<Box<dyn Artifact>> = vec![
        Box::new(bean_init::BeanInitArtifact),
        Box::new(api_def::ApiDefArtifact),
    ];

    let mut rendered = Vec::new();
    for artifact in &artifacts {
        let content = artifact
            .render(snapshot)
            .with_context(|| format!("Failed to render {}", artifact.file_name()))?;
        match content {
            Some(content) => rendered.push((out_dir.join(artifact.file_name()), content)),
            None => debug!("Nothing to write for {}", artifact.file_name()),
        }
    }

    // Uncommitted files are removed when `staged` drops on an early return
    let mut staged = Vec::new();
    for (path, content) in &rendered {
        staged.push(stage_file(content, path)?);
    }

    let mut written = Vec::new();
    for file in staged {
        let path = file.path().to_path_buf();
        file.commit()?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
