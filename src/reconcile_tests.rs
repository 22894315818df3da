use super::*;
use crate::dataset::render;
use serde_json::{json, Value};

fn records(value: Value) -> Vec<Record> {
    value
        .as_array()
        .expect("array")
        .iter()
        .cloned()
        .map(|item| Record::from_value(item).expect("valid record"))
        .collect()
}

#[test]
fn derive_id_normalizes_words() {
    assert_eq!(derive_id("sit down"), "ket_sit_down");
    assert_eq!(derive_id("T-shirt"), "ket_tshirt");
    assert_eq!(derive_id("Mr."), "ket_mr");
    assert_eq!(derive_id("café"), "ket_caf");
}

#[test]
fn missing_id_is_assigned_from_word() {
    let mut data = records(json!([
        { "word": "sit down" },
        { "word": "cat", "id": "" },
        { "word": "dog", "id": "custom_dog" }
    ]));
    let summary = reconcile(&mut data);
    assert_eq!(data[0].get_str(Field::Id), Some("ket_sit_down"));
    assert_eq!(data[1].get_str(Field::Id), Some("ket_cat"));
    assert_eq!(data[2].get_str(Field::Id), Some("custom_dog"));
    assert_eq!(summary.ids_assigned, 2);
}

#[test]
fn existing_non_string_id_is_kept() {
    let mut data = records(json!([{ "word": "cat", "id": 42, "definition": "a pet" }]));
    let summary = reconcile(&mut data);
    assert_eq!(summary.ids_assigned, 0);
    assert_eq!(serde_json::to_value(&data).expect("serialize")[0]["id"], json!(42));
}

#[test]
fn meaning_wins_over_legacy_definition() {
    let mut data = records(json!([{
        "word": "cat",
        "id": "ket_cat",
        "definition": "legacy text",
        "definitionEn": "Official KET word",
        "meaning": "a small domesticated animal"
    }]));
    reconcile(&mut data);
    for field in DEFINITION_ALIASES {
        assert_eq!(data[0].get_str(field), Some("a small domesticated animal"));
    }
}

#[test]
fn legacy_definition_fills_placeholders() {
    let mut data = records(json!([{
        "word": "cat",
        "id": "ket_cat",
        "definition": "a pet",
        "definitionEn": "Official KET word"
    }]));
    let summary = reconcile(&mut data);
    assert_eq!(summary.aliases_synced, 1);
    assert_eq!(data[0].get_str(Field::DefinitionEn), Some("a pet"));
    assert_eq!(data[0].get_str(Field::Meaning), Some("a pet"));
}

#[test]
fn definition_en_is_the_last_resort() {
    let mut data = records(json!([{
        "word": "cat",
        "id": "ket_cat",
        "definition": "Official KET word",
        "definitionEn": "a pet"
    }]));
    reconcile(&mut data);
    assert_eq!(data[0].get_str(Field::Definition), Some("a pet"));
    assert_eq!(data[0].get_str(Field::Meaning), Some("a pet"));
}

#[test]
fn placeholder_only_records_keep_their_aliases() {
    let input = json!([{
        "word": "cat",
        "id": "ket_cat",
        "definition": "Official KET word"
    }]);
    let mut data = records(input.clone());
    let summary = reconcile(&mut data);
    assert!(!summary.changed());
    assert_eq!(serde_json::to_value(&data).expect("serialize"), input);
}

#[test]
fn reconcile_is_idempotent() {
    let mut data = records(json!([
        { "word": "sit down", "definition": "to take a seat" },
        { "word": "cat", "meaning": "a pet", "definitionEn": "Official KET word" },
        { "word": "dog", "definition": "Official KET word", "translation": "n. 狗" },
        { "word": "T-shirt", "definitionEn": "a shirt", "meaning": "" }
    ]));
    let first = reconcile(&mut data);
    assert!(first.changed());
    let after_first = render(&data).expect("render");

    let second = reconcile(&mut data);
    assert!(!second.changed());
    assert_eq!(render(&data).expect("render"), after_first);
}

#[test]
fn aliases_agree_after_reconciliation() {
    let mut data = records(json!([
        { "word": "a", "definition": "x", "definitionEn": "y", "meaning": "z" },
        { "word": "b", "definitionEn": "only en" },
        { "word": "c", "meaning": "m", "definition": "Official KET word" }
    ]));
    assert!(data.iter().all(aliases_out_of_sync));
    reconcile(&mut data);
    for record in &data {
        assert!(!aliases_out_of_sync(record));
        let canonical = canonical_definition(record).expect("canonical value");
        for field in DEFINITION_ALIASES {
            assert_eq!(record.get_str(field), Some(canonical));
        }
    }
}
