//! The declarative style catalog
//!
//! One macro invocation is the single source of truth for which styles
//! exist. It expands into:
//! - a module per collection with one [`StyleKey`] constant per style
//!   (`catalog::dark::CHARCOAL`) and an `ALL` slice
//! - the enumerable [`CATALOG`] slice used to build a [`Registry`]
//!
//! Direct access and enumeration are generated from the same table, so a
//! style can never be nameable but unlisted (or the reverse).
//!
//! [`Registry`]: crate::registry::Registry

use std::fmt;
use std::path::PathBuf;

/// Extension carried by every style-definition file
pub const STYLE_EXTENSION: &str = "mplstyle";

/// Directory (relative to the package root) holding the bundled styles
pub const STYLES_DIR: &str = "styles";

/// Compile-time identifier of one packaged style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleKey {
    pub collection: &'static str,
    pub name: &'static str,
}

impl StyleKey {
    pub const fn new(collection: &'static str, name: &'static str) -> Self {
        Self { collection, name }
    }

    /// File name by convention: `<name>.mplstyle`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, STYLE_EXTENSION)
    }

    /// Location of the style file relative to the package root
    pub fn relative_location(&self) -> PathBuf {
        PathBuf::from(STYLES_DIR).join(self.file_name())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.name)
    }
}

/// One collection as declared in a catalog table
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub styles: &'static [StyleKey],
}

impl CollectionSpec {
    pub fn find(&self, name: &str) -> Option<StyleKey> {
        self.styles.iter().copied().find(|k| k.name == name)
    }
}

/// Declare a style catalog.
///
/// ```ignore
/// style_catalog! {
///     dark: "Dark backgrounds" {
///         CHARCOAL => "charcoal",
///     },
/// }
/// ```
macro_rules! style_catalog {
    (
        $(
            $(#[$cmeta:meta])*
            $collection:ident : $description:literal {
                $( $konst:ident => $style:literal ),+ $(,)?
            }
        ),+ $(,)?
    ) => {
        $(
            $(#[$cmeta])*
            pub mod $collection {
                use super::StyleKey;

                $(
                    pub const $konst: StyleKey = StyleKey::new(stringify!($collection), $style);
                )+

                /// Every style in this collection, in declaration order
                pub const ALL: &[StyleKey] = &[$($konst),+];
            }
        )+

        /// Every collection known to the package
        pub const CATALOG: &[CollectionSpec] = &[
            $(
                CollectionSpec {
                    name: stringify!($collection),
                    description: $description,
                    styles: $collection::ALL,
                },
            )+
        ];
    };
}

style_catalog! {
    /// Styles drawn on dark backgrounds
    dark: "Dark backgrounds with muted grids and saturated accents" {
        CHARCOAL => "charcoal",
        FORESTDARK => "forestdark",
        SEADARK => "seadark",
    },

    /// Styles drawn on light backgrounds
    light: "Light backgrounds with soft grids and print-friendly palettes" {
        FORESTLIGHT => "forestlight",
        IVORYGRID => "ivorygrid",
        PAPYRUS => "papyrus",
        SEALIGHT => "sealight",
    },
}

/// Look up a collection in the bundled catalog
pub fn collection(name: &str) -> Option<&'static CollectionSpec> {
    CATALOG.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_constants_appear_in_catalog() {
        let named = [
            dark::CHARCOAL,
            dark::FORESTDARK,
            dark::SEADARK,
            light::FORESTLIGHT,
            light::IVORYGRID,
            light::PAPYRUS,
            light::SEALIGHT,
        ];

        for key in named {
            let spec = collection(key.collection).expect("collection of constant is listed");
            assert_eq!(spec.find(key.name), Some(key), "{key} missing from CATALOG");
        }

        let listed: usize = CATALOG.iter().map(|c| c.styles.len()).sum();
        assert_eq!(listed, named.len(), "CATALOG lists styles with no constant");
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut collections = HashSet::new();
        for spec in CATALOG {
            assert!(collections.insert(spec.name), "duplicate collection {}", spec.name);

            let mut styles = HashSet::new();
            for key in spec.styles {
                assert_eq!(key.collection, spec.name);
                assert!(styles.insert(key.name), "duplicate style {key}");
            }
        }
    }

    #[test]
    fn test_every_collection_non_empty() {
        assert!(!CATALOG.is_empty());
        for spec in CATALOG {
            assert!(!spec.styles.is_empty(), "{} is empty", spec.name);
            assert!(!spec.description.is_empty());
        }
    }

    #[test]
    fn test_relative_location_convention() {
        assert_eq!(dark::CHARCOAL.file_name(), "charcoal.mplstyle");
        assert_eq!(
            light::IVORYGRID.relative_location(),
            PathBuf::from("styles").join("ivorygrid.mplstyle")
        );
        assert_eq!(dark::SEADARK.to_string(), "dark/seadark");
    }

    #[test]
    fn test_collection_lookup() {
        assert_eq!(collection("dark").map(|c| c.styles.len()), Some(3));
        assert_eq!(collection("light").map(|c| c.styles.len()), Some(4));
        assert!(collection("neon").is_none());
    }
}
