use super::Artifact;
use crate::error::Result;
use crate::markers::{Marker, BEAN_INIT_FILE, INIT_FN};
use crate::registry::RegistrySnapshot;
use log::debug;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeMap;

const HEADER: &str = "\
// Code generated by gp-ast. DO NOT EDIT.
// Every bean and controller is registered with the IoC container here.
// Include it from the crate root:
//     include!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/gp_bean_init.rs\"));

";

/// Generates the `gp_init` function that registers every bean with the container.
///
/// Imports live inside the function body, so they never clash with names the crate root
/// already has in scope. Output for a crate with a controller in `src/api/user.rs` and one
/// annotated route:
///
/// ```text
/// pub fn gp_init() {
///     use crate::api::user::UserCtrl;
///     gin_plus::ioc::register(UserCtrl::default());
///     gin_plus::mvc::set_annotations(&[("/api/users", &[("@Auth", "admin")])]);
/// }
/// ```
pub struct BeanInitArtifact;

impl Artifact for BeanInitArtifact {
    fn file_name(&self) -> &'static str {
        BEAN_INIT_FILE
    }

    fn render(&self, snapshot: &RegistrySnapshot) -> Result<Option<String>> {
        if snapshot.beans().is_empty() {
            return Ok(None);
        }

        let file: syn::File = syn::parse2(init_tokens(snapshot)?)?;
        debug!("Generated {} with {} items", BEAN_INIT_FILE, file.items.len());

        Ok(Some(format!("{}{}", HEADER, prettyplease::unparse(&file))))
    }
}

fn init_tokens(snapshot: &RegistrySnapshot) -> Result<TokenStream> {
    // One `use` per declaring module; crate-root beans need none
    let mut modules: BTreeMap<&str, Vec<syn::Ident>> = BTreeMap::new();
    let mut registrations = Vec::new();
    let ioc: syn::Path = syn::parse_str(Marker::Bean.module_path())?;

    for bean in snapshot.beans().values() {
        let ident: syn::Ident = syn::parse_str(&bean.name)?;
        registrations.push(quote! { #ioc::register(#ident::default()); });
        if !bean.import_path.is_empty() {
            modules.entry(bean.import_path.as_str()).or_default().push(ident);
        }
    }

    let mut uses = Vec::new();
    for (module, idents) in &modules {
        let module: syn::Path = syn::parse_str(module)?;
        uses.push(match idents.as_slice() {
            [single] => quote! { use #module::#single; },
            many => quote! { use #module::{#(#many),*}; },
        });
    }

    let annotations = if snapshot.annotations().is_empty() {
        TokenStream::new()
    } else {
        let mvc: syn::Path = syn::parse_str(Marker::Controller.module_path())?;
        let entries = snapshot.annotations().iter().map(|(path, map)| {
            let keys = map.keys();
            let values = map.values();
            quote! { (#path, &[#((#keys, #values)),*]) }
        });
        quote! { #mvc::set_annotations(&[#(#entries),*]); }
    };

    let init_fn = format_ident!("{}", INIT_FN);
    Ok(quote! {
        pub fn #init_fn() {
            #(#uses)*
            #(#registrations)*
            #annotations
        }
    })
}
