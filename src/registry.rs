//! In-memory tables built during a scan.
//!
//! The [`Registry`] is filled by the collector, one declaration at a time, and then
//! consumed by [`Registry::finalize`] into a read-only [`RegistrySnapshot`] that the
//! emitters serialize. All tables are ordered maps, so every artifact derived from a
//! snapshot is byte-for-byte reproducible.

use crate::annotation::{Annotation, HttpMethod};
use crate::classifier::Classification;
use crate::error::{GenError, Result};
use crate::route_path;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Generic annotations of one route, keyed by annotation name (`@Auth`).
pub type AnnotationMap = BTreeMap<String, String>;

/// Annotation maps keyed by composed route path.
pub type AnnotationSet = BTreeMap<String, AnnotationMap>;

/// A struct that embeds a marker type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructMeta {
    pub name: String,
    /// Name of the declaring module
    pub module: String,
    /// Module path to import the struct from; empty for the crate root
    pub import_path: String,
    /// File the struct was declared in
    #[serde(skip)]
    pub source: PathBuf,
}

/// A single route served by a controller.
///
/// Field names on the wire are fixed by the runtime router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    #[serde(rename = "Method")]
    pub method: HttpMethod,
    #[serde(rename = "APIPath")]
    pub path: String,
    /// Name of the handler method
    #[serde(rename = "Name")]
    pub name: String,
}

/// Routes of one controller, in source declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerInfo {
    /// Context path joined with the controller's `@BasePath`; fixed at registration
    #[serde(skip)]
    pub base_path: String,
    #[serde(rename = "api_cache")]
    pub routes: Vec<RouteInfo>,
}

/// A method found in an `impl` block, as seen by the registry.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Name of the implementing type
    pub owner: String,
    pub name: String,
    /// Whether code outside the declaring module can call the method
    pub exported: bool,
    /// Doc-comment lines in source order
    pub doc_lines: Vec<String>,
    pub source: PathBuf,
}

#[derive(Debug)]
pub struct Registry {
    context: String,
    beans: BTreeMap<String, StructMeta>,
    controllers: BTreeMap<String, ControllerInfo>,
    annotations: AnnotationSet,
    route_keys: HashSet<(HttpMethod, String)>,
}

impl Registry {
    /// Creates an empty registry for the given application context path.
    pub fn new(context: &str) -> Self {
        Self {
            context: route_path::normalize_context(context),
            beans: BTreeMap::new(),
            controllers: BTreeMap::new(),
            annotations: BTreeMap::new(),
            route_keys: HashSet::new(),
        }
    }

    /// Registers a classified struct.
    ///
    /// Every struct becomes a bean; controllers additionally get a route table whose base
    /// path is taken from the first `@BasePath` line of `doc_lines`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::DuplicateStruct`] when a struct with the same name was
    /// registered before.
    pub fn register_struct(
        &mut self,
        meta: StructMeta,
        classification: Classification,
        doc_lines: &[String],
    ) -> Result<()> {
        if let Some(existing) = self.beans.get(&meta.name) {
            return Err(GenError::DuplicateStruct {
                name: meta.name,
                first: existing.source.clone(),
                second: meta.source,
            });
        }

        if classification.is_controller() {
            let declared = doc_lines
                .iter()
                .find_map(|line| match Annotation::parse(line) {
                    Some(Annotation::BasePath(path)) => Some(path),
                    _ => None,
                });
            let base_path = route_path::controller_base(&self.context, declared.as_deref());

            debug!("Registered controller {} at {}", meta.name, base_path);
            self.controllers.insert(
                meta.name.clone(),
                ControllerInfo {
                    base_path,
                    routes: Vec::new(),
                },
            );
        } else {
            debug!("Registered bean {}", meta.name);
        }

        self.beans.insert(meta.name.clone(), meta);
        Ok(())
    }

    /// Registers the routes and annotations declared on a method.
    ///
    /// Methods without doc comments, and methods whose owner is not a registered
    /// controller, are skipped. Annotations attach to the first route the method declares
    /// and are dropped when it declares none.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnexportedHandler`] when a route-annotated method is not
    /// exported.
    pub fn register_method(&mut self, decl: &MethodDecl) -> Result<()> {
        if decl.doc_lines.is_empty() {
            return Ok(());
        }

        let controller = match self.controllers.get_mut(&decl.owner) {
            Some(controller) => controller,
            None => {
                debug!(
                    "Skipping {}::{}: owner is not a controller",
                    decl.owner, decl.name
                );
                return Ok(());
            }
        };

        let mut routes = Vec::new();
        let mut annotations = AnnotationMap::new();

        for line in &decl.doc_lines {
            match Annotation::parse(line) {
                Some(Annotation::Route { method, path }) => {
                    if !decl.exported {
                        return Err(GenError::UnexportedHandler {
                            file: decl.source.clone(),
                            owner: decl.owner.clone(),
                            method: decl.name.clone(),
                        });
                    }
                    routes.push(RouteInfo {
                        method,
                        path: route_path::join(&controller.base_path, &path),
                        name: decl.name.clone(),
                    });
                }
                Some(Annotation::Generic { key, value }) => {
                    annotations.insert(key, value);
                }
                Some(Annotation::BasePath(path)) => {
                    debug!(
                        "Ignoring @BasePath(\"{}\") on method {}::{}",
                        path, decl.owner, decl.name
                    );
                }
                None => {}
            }
        }

        let first_path = match routes.first() {
            Some(route) => route.path.clone(),
            None => {
                if !annotations.is_empty() {
                    debug!(
                        "Dropping annotations of {}::{}: it declares no route",
                        decl.owner, decl.name
                    );
                }
                return Ok(());
            }
        };

        for route in &routes {
            debug!("Route {} {} -> {}::{}", route.method, route.path, decl.owner, route.name);
            if !self.route_keys.insert((route.method, route.path.clone())) {
                warn!(
                    "Route {} {} is declared more than once (again by {}::{})",
                    route.method, route.path, decl.owner, route.name
                );
            }
        }
        controller.routes.extend(routes);

        if !annotations.is_empty() {
            if self.annotations.insert(first_path.clone(), annotations).is_some() {
                warn!(
                    "Annotations for {} were replaced by {}::{}",
                    first_path, decl.owner, decl.name
                );
            }
        }

        Ok(())
    }

    /// Ends the scan and hands the tables over for emission.
    pub fn finalize(self) -> RegistrySnapshot {
        RegistrySnapshot {
            beans: self.beans,
            controllers: self.controllers,
            annotations: self.annotations,
        }
    }
}

/// Read-only view of a finished scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    beans: BTreeMap<String, StructMeta>,
    controllers: BTreeMap<String, ControllerInfo>,
    annotations: AnnotationSet,
}

impl RegistrySnapshot {
    /// Beans sorted by struct name; controllers are included.
    pub fn beans(&self) -> &BTreeMap<String, StructMeta> {
        &self.beans
    }

    /// Controllers sorted by struct name.
    pub fn controllers(&self) -> &BTreeMap<String, ControllerInfo> {
        &self.controllers
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn route_count(&self) -> usize {
        self.controllers.values().map(|c| c.routes.len()).sum()
    }
}
