//! Identifiers shared between annotated source trees, the generator, and the runtime.
//!
//! Everything in here is part of the wire contract: renaming a marker module, a marker
//! member, or a generated file name breaks every project that was annotated against it.

/// File name of the generated initializer (artifact A).
pub const BEAN_INIT_FILE: &str = "gp_bean_init.rs";

/// File name of the serialized controller/annotation table (artifact B).
pub const API_DEF_FILE: &str = "gp_api.def";

/// Name of the function defined by the generated initializer.
pub const INIT_FN: &str = "gp_init";

/// The two marker types a struct can embed to opt into registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    /// `gin_plus::ioc::Bean`, a dependency-injection managed component
    Bean,
    /// `gin_plus::mvc::Controller`, a route handler owner
    Controller,
}

impl Marker {
    pub const ALL: [Marker; 2] = [Marker::Bean, Marker::Controller];

    /// Fully qualified module path that has to be imported for the marker to be recognized.
    pub fn module_path(self) -> &'static str {
        match self {
            Marker::Bean => "gin_plus::ioc",
            Marker::Controller => "gin_plus::mvc",
        }
    }

    /// Local name the module is known by when imported without `as`.
    pub fn default_alias(self) -> &'static str {
        match self {
            Marker::Bean => "ioc",
            Marker::Controller => "mvc",
        }
    }

    /// Name of the marker type inside its module.
    pub fn member(self) -> &'static str {
        match self {
            Marker::Bean => "Bean",
            Marker::Controller => "Controller",
        }
    }

    /// Looks up the marker whose module path equals `path` (segments joined by `::`).
    pub fn from_module_path(path: &str) -> Option<Marker> {
        Self::ALL.into_iter().find(|m| m.module_path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_module_path() {
        assert_eq!(Marker::from_module_path("gin_plus::ioc"), Some(Marker::Bean));
        assert_eq!(Marker::from_module_path("gin_plus::mvc"), Some(Marker::Controller));
        assert_eq!(Marker::from_module_path("gin_plus"), None);
        assert_eq!(Marker::from_module_path("other::mvc"), None);
    }

    #[test]
    fn test_default_alias_is_last_module_segment() {
        for marker in Marker::ALL {
            let last = marker.module_path().rsplit("::").next().unwrap();
            assert_eq!(marker.default_alias(), last);
        }
    }
}
