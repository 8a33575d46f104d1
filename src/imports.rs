use crate::markers::Marker;
use log::debug;
use std::collections::BTreeMap;
use syn::{Item, UseTree};

/// Per-file table mapping each imported marker module to the local name it is used under.
///
/// The resolver understands every shape a `use` tree can take:
///
/// ```text
/// use gin_plus::mvc;                  // mvc
/// use gin_plus::mvc as web;           // web
/// use gin_plus::{ioc, mvc as web};    // ioc, web
/// use gin_plus::mvc::{self as web};   // web
/// ```
///
/// A file whose set is empty imports neither marker module and cannot declare anything
/// registrable, so the rest of the pipeline skips it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportAliasSet {
    aliases: BTreeMap<Marker, String>,
}

impl ImportAliasSet {
    /// Scans the top-level `use` items of a file once.
    ///
    /// When the same marker module is imported several times the last import wins.
    pub fn resolve(file: &syn::File) -> Self {
        let mut set = ImportAliasSet::default();

        for item in &file.items {
            if let Item::Use(use_item) = item {
                set.check_use_tree(&use_item.tree, &mut Vec::new());
            }
        }

        debug!("Resolved marker aliases: {:?}", set.aliases);
        set
    }

    /// Records an alias directly, for callers that already know what a file imports.
    #[cfg(test)]
    pub(crate) fn with_alias(mut self, marker: Marker, alias: impl Into<String>) -> Self {
        self.aliases.insert(marker, alias.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Local alias of `marker`, if the file imports its module.
    pub fn alias(&self, marker: Marker) -> Option<&str> {
        self.aliases.get(&marker).map(String::as_str)
    }

    /// Recursively walks a use tree, tracking the path segments seen so far.
    fn check_use_tree(&mut self, tree: &UseTree, prefix: &mut Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.check_use_tree(&path.tree, prefix);
                prefix.pop();
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.check_use_tree(item, prefix);
                }
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                if let Some(marker) = Self::imported_marker(prefix, &ident) {
                    self.aliases
                        .insert(marker, marker.default_alias().to_string());
                }
            }
            UseTree::Rename(rename) => {
                let ident = rename.ident.to_string();
                if let Some(marker) = Self::imported_marker(prefix, &ident) {
                    // `as _` imports the module without making it nameable
                    let alias = rename.rename.to_string();
                    if alias == "_" {
                        self.aliases.remove(&marker);
                    } else {
                        self.aliases.insert(marker, alias);
                    }
                }
            }
            UseTree::Glob(_) => {
                // Glob imports bring the members into scope, not the module
            }
        }
    }

    fn imported_marker(prefix: &[String], ident: &str) -> Option<Marker> {
        let path = if ident == "self" {
            prefix.join("::")
        } else if prefix.is_empty() {
            ident.to_string()
        } else {
            format!("{}::{}", prefix.join("::"), ident)
        };
        Marker::from_module_path(&path)
    }
}
