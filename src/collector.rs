//! Scan pipeline: turns parsed files into a filled [`Registry`].

use crate::annotation::doc_lines;
use crate::classifier::classify;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::imports::ImportAliasSet;
use crate::module_path::ModuleLocation;
use crate::parser::ParsedFile;
use crate::registry::{MethodDecl, Registry, StructMeta};
use log::debug;
use syn::{ImplItem, ImplItemFn, Item, ItemImpl, Type, Visibility};

/// Collects every bean, controller and route declared in `parsed_files`.
///
/// Files that import neither marker module are skipped entirely. Structs from all
/// remaining files are registered before any method is, so routes do not depend on the
/// order files were visited in and an `impl` block may come before its struct.
///
/// # Errors
///
/// Stops at the first fatal condition: a duplicate struct name, a qualifying struct
/// without a resolvable module path, or an unexported route handler.
pub fn collect(config: &GeneratorConfig, parsed_files: &[ParsedFile]) -> Result<Registry> {
    let mut registry = Registry::new(&config.app_context);

    let relevant: Vec<(&ParsedFile, ImportAliasSet)> = parsed_files
        .iter()
        .filter_map(|file| {
            let aliases = ImportAliasSet::resolve(&file.syntax_tree);
            if aliases.is_empty() {
                debug!("No marker import in {}, skipping", file.path.display());
                None
            } else {
                Some((file, aliases))
            }
        })
        .collect();

    for (file, aliases) in &relevant {
        for item in &file.syntax_tree.items {
            if let Item::Struct(item_struct) = item {
                let classification = match classify(item_struct, aliases) {
                    Some(classification) => classification,
                    None => continue,
                };

                let location = ModuleLocation::resolve(&config.project_root, &file.path)?;
                let meta = StructMeta {
                    name: item_struct.ident.to_string(),
                    module: location.module,
                    import_path: location.import_path,
                    source: file.path.clone(),
                };
                registry.register_struct(meta, classification, &doc_lines(&item_struct.attrs))?;
            }
        }
    }

    for (file, _) in &relevant {
        for item in &file.syntax_tree.items {
            if let Item::Impl(item_impl) = item {
                collect_impl(&mut registry, file, item_impl)?;
            }
        }
    }

    Ok(registry)
}

fn collect_impl(registry: &mut Registry, file: &ParsedFile, item_impl: &ItemImpl) -> Result<()> {
    let owner = match owner_name(&item_impl.self_ty) {
        Some(owner) => owner,
        None => return Ok(()),
    };
    // Trait methods are as visible as the trait itself
    let trait_impl = item_impl.trait_.is_some();

    for impl_item in &item_impl.items {
        if let ImplItem::Fn(method) = impl_item {
            if method.sig.receiver().is_none() {
                continue;
            }
            registry.register_method(&MethodDecl {
                owner: owner.clone(),
                name: method.sig.ident.to_string(),
                exported: trait_impl || is_exported(method),
                doc_lines: doc_lines(&method.attrs),
                source: file.path.clone(),
            })?;
        }
    }

    Ok(())
}

/// Name of the type an `impl` block is for, ignoring generic arguments.
fn owner_name(self_ty: &Type) -> Option<String> {
    match self_ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        Type::Paren(paren) => owner_name(&paren.elem),
        _ => None,
    }
}

/// `pub(self)` and `pub(in self)` are spelled-out private visibility.
fn is_exported(method: &ImplItemFn) -> bool {
    match &method.vis {
        Visibility::Inherited => false,
        Visibility::Restricted(restricted) => !restricted.path.is_ident("self"),
        Visibility::Public(_) => true,
    }
}
