use column_aliases::{AliasError, AliasRegistry};
use column_aliases::label::ColumnLabel;
use tempfile::tempdir;

#[test]
fn conflict_then_overwrite_scenario() {
    let mut registry = AliasRegistry::new();
    registry.add_alias("qty", "quantity", false).unwrap();
    let err = registry.add_alias("qty", "count", false).unwrap_err();
    assert!(matches!(err, AliasError::Conflict { .. }));
    assert_eq!(
        err.to_string(),
        "Alias 'qty' already mapped to 'quantity' (requested 'count')"
    );

    registry.add_alias("qty", "count", true).unwrap();
    assert_eq!(registry.canonical("QTY"), "count");
}

#[test]
fn freeze_blocks_mutation_but_not_queries() {
    let mut registry = AliasRegistry::with_aliases([("qty", "quantity")], false).unwrap();
    registry.freeze();
    assert!(matches!(
        registry.add_alias("amt", "amount", true),
        Err(AliasError::Frozen)
    ));
    assert!(matches!(
        registry.add_alias_groups([("amount", ["amt"])], false),
        Err(AliasError::Frozen)
    ));
    assert!(registry.contains("QTY"));
    assert_eq!(registry.aliases_for("quantity"), vec!["qty".to_string()]);
}

#[test]
fn resolve_mixed_labels() {
    let registry = AliasRegistry::with_aliases([("qty", "quantity")], false).unwrap();
    let labels = vec![
        ColumnLabel::from("Qty"),
        ColumnLabel::Integer(42),
        ColumnLabel::from(vec!["qty", "sum"]),
        ColumnLabel::from("price"),
    ];
    let resolved = registry.resolve(Some(labels.as_slice())).expect("resolved");
    assert_eq!(resolved.len(), labels.len());
    assert_eq!(resolved[0], ColumnLabel::from("quantity"));
    assert_eq!(resolved[1], ColumnLabel::Integer(42));
    assert_eq!(resolved[2], labels[2]);
    assert_eq!(resolved[3], ColumnLabel::from("price"));
    assert!(registry.resolve(None).is_none());
}

#[test]
fn non_ascii_aliases_match_across_casings() {
    let mut registry = AliasRegistry::new();
    registry.insert("Straße", "street").unwrap();
    registry.insert("ÄNDERUNG", "change").unwrap();
    assert_eq!(registry.canonical("STRASSE"), "street");
    assert_eq!(registry.canonical("strasse"), "street");
    assert_eq!(registry.canonical("änderung"), "change");
}

#[test]
fn save_and_load_preserve_every_lookup() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("aliases.json");
    let registry =
        AliasRegistry::with_aliases([("Qty", "quantity"), ("AMT", "Amount")], false).unwrap();
    registry.save(&path).expect("save");

    let loaded = AliasRegistry::load(&path).expect("load");
    for alias in ["qty", "QTY", "amt", "Amt"] {
        assert_eq!(loaded.canonical(alias), registry.canonical(alias));
    }
    assert_eq!(loaded.aliases(), registry.aliases());
}

#[test]
fn load_reports_malformed_files() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"qty\": 5}").unwrap();
    let err = AliasRegistry::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Parsing alias file"));
}
