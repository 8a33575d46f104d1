use super::Artifact;
use crate::error::{GenError, Result};
use crate::markers::API_DEF_FILE;
use crate::registry::{AnnotationSet, ControllerInfo, RegistrySnapshot};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route table read by the router at startup.
///
/// On disk it is compact JSON, base64 encoded:
///
/// ```text
/// {"annotation":{"/api/users":{"@Auth":"admin"}},
///  "ctrl":{"UserCtrl":{"api_cache":[{"Method":"GET","APIPath":"/api/users","Name":"list"}]}}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDefinition {
    pub annotation: AnnotationSet,
    pub ctrl: BTreeMap<String, ControllerInfo>,
}

impl ApiDefinition {
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Self {
        Self {
            annotation: snapshot.annotations().clone(),
            ctrl: snapshot.controllers().clone(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(content: &str) -> Result<Self> {
        let json = STANDARD
            .decode(content.trim())
            .map_err(|e| GenError::Serialization(format!("base64: {}", e)))?;
        Ok(serde_json::from_slice(&json)?)
    }
}

/// Writes `gp_api.def`; nothing is written when no controller was found.
pub struct ApiDefArtifact;

impl Artifact for ApiDefArtifact {
    fn file_name(&self) -> &'static str {
        API_DEF_FILE
    }

    fn render(&self, snapshot: &RegistrySnapshot) -> Result<Option<String>> {
        if snapshot.controllers().is_empty() {
            return Ok(None);
        }
        ApiDefinition::from_snapshot(snapshot).encode().map(Some)
    }
}
