//! Integration tests for the style registry
//!
//! These tests verify that:
//! 1. The bundled package resolves every catalog entry from the source checkout
//! 2. Enumeration and resolution never disagree
//! 3. A minimal hand-built package behaves as documented end to end

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pstyle_core::catalog::{dark, light, CollectionSpec, CATALOG};
use pstyle_core::{build_registry, locate_package_root, Error, Registry, StyleKey};

/// Package root of the source checkout (the pstyle-core crate directory)
fn checkout_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("crates/pstyle-core")
}

/// Helper to create a package with the given style files
fn create_package(path: &Path, files: &[&str]) {
    let styles = path.join("styles");
    fs::create_dir_all(&styles).unwrap();
    for file in files {
        fs::write(
            styles.join(file),
            "axes.facecolor: white\naxes.grid: True\n",
        )
        .unwrap();
    }
}

#[test]
fn test_checkout_package_resolves_everything() {
    let registry = build_registry(&checkout_root()).unwrap();

    for spec in CATALOG {
        for key in spec.styles {
            let path = registry.resolve_key(*key).unwrap();
            assert!(path.is_absolute());
            assert!(path.is_file(), "{key} -> {}", path.display());
            assert_eq!(path.extension().unwrap(), "mplstyle");
        }
    }

    let report = registry.verify();
    assert!(report.is_ok(), "{:#?}", report.failures);
    assert_eq!(report.checked, 7);
}

#[test]
fn test_enumeration_matches_resolution() {
    let registry = build_registry(&checkout_root()).unwrap();

    let collections = registry.list_collections();
    assert!(!collections.is_empty());

    for collection in collections {
        let names = registry.list_available(collection).unwrap();
        assert!(!names.is_empty(), "{collection} has no styles");

        for name in names {
            let first = registry.resolve(collection, name).unwrap();
            let second = registry.resolve(collection, name).unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_constants_cover_enumeration() {
    let registry = build_registry(&checkout_root()).unwrap();

    let from_constants: BTreeSet<String> = dark::ALL
        .iter()
        .chain(light::ALL)
        .map(StyleKey::to_string)
        .collect();
    let from_registry: BTreeSet<String> =
        registry.iter().map(|r| r.qualified_name()).collect();

    assert_eq!(from_constants, from_registry);
}

#[test]
fn test_end_to_end_two_collection_package() {
    const CATALOG_UNDER_TEST: &[CollectionSpec] = &[
        CollectionSpec {
            name: "dark",
            description: "Dark backgrounds",
            styles: &[StyleKey::new("dark", "charcoal")],
        },
        CollectionSpec {
            name: "light",
            description: "Light backgrounds",
            styles: &[StyleKey::new("light", "ivorygrid")],
        },
    ];

    let temp = TempDir::new().unwrap();
    create_package(temp.path(), &["charcoal.mplstyle", "ivorygrid.mplstyle"]);

    let registry = Registry::from_catalog(temp.path(), CATALOG_UNDER_TEST).unwrap();

    let path = registry.resolve("dark", "charcoal").unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("charcoal.mplstyle"));
    assert!(path.exists());

    let collections: BTreeSet<&str> = registry.list_collections().into_iter().collect();
    assert_eq!(collections, BTreeSet::from(["dark", "light"]));

    assert!(matches!(
        registry.resolve("light", "does-not-exist"),
        Err(Error::ResourceNotFound { .. })
    ));
    assert!(matches!(
        registry.resolve("nonexistent-theme", "anything"),
        Err(Error::UnknownCollection { .. })
    ));
}

#[test]
fn test_incomplete_package_is_packaging_error() {
    let temp = TempDir::new().unwrap();
    // Only the dark styles were shipped
    create_package(
        temp.path(),
        &["charcoal.mplstyle", "forestdark.mplstyle", "seadark.mplstyle"],
    );

    let registry = build_registry(temp.path()).unwrap();
    assert!(registry.resolve_key(dark::CHARCOAL).is_ok());

    let err = registry.resolve_key(light::PAPYRUS).unwrap_err();
    assert!(matches!(err, Error::Packaging { .. }), "got {err:?}");
    assert!(err.is_fatal());

    let report = registry.verify();
    assert_eq!(report.failures.len(), 4);
}

#[test]
fn test_located_root_builds_registry() {
    let root = locate_package_root(None).unwrap();
    let registry = build_registry(&root.path).unwrap();
    assert!(registry.resolve_key(light::SEALIGHT).is_ok());
}
