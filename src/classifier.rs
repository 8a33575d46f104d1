use crate::imports::ImportAliasSet;
use crate::markers::Marker;
use syn::{ItemStruct, Type};

/// How a struct takes part in registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Registered with the IoC container only
    Bean,
    /// Owns route handlers; every controller is a bean as well
    Controller,
}

impl Classification {
    pub fn is_controller(self) -> bool {
        self == Classification::Controller
    }
}

/// Decides whether a struct embeds one of the marker types.
///
/// A field qualifies when its type is exactly `<alias>::Controller` or `<alias>::Bean`,
/// with the alias the file imported the marker module under. Fields are scanned in
/// order: a controller field ends the scan, a bean field keeps scanning because a later
/// controller field still wins.
pub fn classify(item: &ItemStruct, aliases: &ImportAliasSet) -> Option<Classification> {
    let mut classification = None;

    for field in &item.fields {
        match marker_of(&field.ty, aliases) {
            Some(Marker::Controller) => return Some(Classification::Controller),
            Some(Marker::Bean) => classification = Some(Classification::Bean),
            None => {}
        }
    }

    classification
}

fn marker_of(ty: &Type, aliases: &ImportAliasSet) -> Option<Marker> {
    let type_path = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path,
        _ => return None,
    };

    let path = &type_path.path;
    if path.leading_colon.is_some() || path.segments.len() != 2 {
        return None;
    }

    let qualifier = path.segments[0].ident.to_string();
    let member = path.segments[1].ident.to_string();

    Marker::ALL.into_iter().find(|marker| {
        aliases.alias(*marker) == Some(qualifier.as_str()) && member == marker.member()
    })
}
