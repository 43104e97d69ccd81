use column_aliases::{
    AliasError, AliasRegistry, CanonicalOptions, Frame, LabeledTable, RENAME_RECORD_KEY,
};
use serde_json::json;

fn registry() -> AliasRegistry {
    AliasRegistry::with_aliases([("qty", "quantity"), ("amt", "amount")], false).unwrap()
}

fn frame(columns: &[&str]) -> Frame {
    Frame::new(
        columns.iter().copied(),
        vec![columns.iter().map(|c| format!("{c}-value")).collect()],
    )
}

#[test]
fn rename_and_restore_round_trip() {
    let registry = registry();
    let original = frame(&["qty", "amt"]);

    let canonical = registry
        .to_canonical(&original, CanonicalOptions::default())
        .unwrap();
    assert_eq!(canonical.header_names(), vec!["quantity", "amount"]);
    assert_eq!(
        canonical.metadata(RENAME_RECORD_KEY),
        Some(&json!({"qty": "quantity", "amt": "amount"}))
    );
    assert_eq!(canonical.rows(), original.rows());

    let restored = registry.restore_aliases(&canonical, true).unwrap();
    assert_eq!(restored.header_names(), vec!["qty", "amt"]);
}

#[test]
fn collision_scenario() {
    let registry = registry();
    let table = frame(&["qty", "quantity"]);

    let err = registry
        .to_canonical(&table, CanonicalOptions::default())
        .unwrap_err();
    assert!(matches!(err, AliasError::Collision { ref aliases } if aliases == &["qty"]));

    let options = CanonicalOptions {
        drop_conflicts: true,
        ..CanonicalOptions::default()
    };
    let pruned = registry.to_canonical(&table, options).unwrap();
    assert_eq!(pruned.header_names(), vec!["qty", "quantity"]);
    assert_eq!(pruned.metadata(RENAME_RECORD_KEY), Some(&json!({})));
}

#[test]
fn second_canonicalization_replaces_the_record() {
    let mut first = AliasRegistry::new();
    first.insert("qty", "quantity").unwrap();
    let mut second = AliasRegistry::new();
    second.insert("amt", "amount").unwrap();

    let mut table = frame(&["qty", "amt"]);
    first
        .to_canonical_in_place(&mut table, CanonicalOptions::default())
        .unwrap();
    second
        .to_canonical_in_place(&mut table, CanonicalOptions::default())
        .unwrap();
    assert_eq!(table.header_names(), vec!["quantity", "amount"]);

    second.restore_aliases_in_place(&mut table, true).unwrap();
    assert_eq!(table.header_names(), vec!["quantity", "amt"]);
}

#[test]
fn chained_in_place_calls_share_one_table() {
    let registry = registry();
    let mut table = frame(&["QTY"]);
    let names = registry
        .to_canonical_in_place(&mut table, CanonicalOptions::default())
        .and_then(|renamed| registry.restore_aliases_in_place(renamed, true))
        .map(|restored| restored.header_names())
        .unwrap();
    assert_eq!(names, vec!["QTY"]);
}

#[test]
fn lenient_restore_without_record_is_a_no_op() {
    let registry = registry();
    let table = frame(&["quantity"]);
    assert!(matches!(
        registry.restore_aliases(&table, true),
        Err(AliasError::MissingRecord { .. })
    ));
    assert_eq!(registry.restore_aliases(&table, false).unwrap(), table);
}
