// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_kit;
use crate::{Kit, KitId, KitRecord, resolve_kits, search_kits};

fn catalog() -> Vec<Kit> {
    vec![
        Kit::new(
            KitId::new("a"),
            "001",
            "TDP",
            "Hoodies",
            "001 Mixed ST PETERS Hoodies",
            "BAY 8",
            "4-16, S-3XL",
        ),
        Kit::new(
            KitId::new("b"),
            "14",
            "AS",
            "Polos",
            "14 Olympikool",
            "BAY 1",
            "12 (6-16/S-3XL)",
        ),
        Kit::new(
            KitId::new("c"),
            "301",
            "SUNCHASER",
            "Adult Sizing Kit",
            "RUGBY JERSEYS",
            "-",
            "2XS-5XL",
        ),
    ]
}

#[test]
fn test_blank_query_returns_everything() {
    let kits: Vec<Kit> = catalog();

    assert_eq!(search_kits(&kits, "  ").len(), 3);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let kits: Vec<Kit> = catalog();

    let by_category: Vec<&str> = search_kits(&kits, "hoodIES")
        .iter()
        .map(|k| k.id.value())
        .collect();
    let by_supplier: Vec<&str> = search_kits(&kits, "sunchaser")
        .iter()
        .map(|k| k.id.value())
        .collect();
    let by_number: Vec<&str> = search_kits(&kits, "14")
        .iter()
        .map(|k| k.id.value())
        .collect();

    assert_eq!(by_category, vec!["a"]);
    assert_eq!(by_supplier, vec!["c"]);
    assert_eq!(by_number, vec!["b"]);
}

#[test]
fn test_search_does_not_match_bay_or_sizes() {
    let kits: Vec<Kit> = catalog();

    assert!(search_kits(&kits, "BAY 8").is_empty());
    assert!(search_kits(&kits, "2XS-5XL").is_empty());
}

#[test]
fn test_resolve_skips_stale_references() {
    let kits: Vec<Kit> = vec![create_test_kit("k1", "1"), create_test_kit("k2", "2")];

    let resolved = resolve_kits(
        &[KitId::new("k2"), KitId::new("gone"), KitId::new("k1")],
        &kits,
    );

    let ids: Vec<&str> = resolved.iter().map(|k| k.id.value()).collect();
    assert_eq!(ids, vec!["k2", "k1"]);
}

#[test]
fn test_standard_record_keeps_its_id() {
    let record: KitRecord = serde_json::from_str(
        r#"{"id":"kit-9","kitNumber":"9","supplier":"AP","category":"Hoodies","description":"9 Huxley","bay":"BAY 6","sizes":"14"}"#,
    )
    .unwrap();

    let kit: Kit = record.normalize(|| KitId::new("unused"));

    assert_eq!(kit.id, KitId::new("kit-9"));
    assert_eq!(kit.kit_number, "9");
    assert_eq!(kit.description, "9 Huxley");
}

#[test]
fn test_standard_record_without_id_gets_one() {
    let record: KitRecord =
        serde_json::from_str(r#"{"kitNumber":"12","category":"Shorts"}"#).unwrap();

    let kit: Kit = record.normalize(|| KitId::new("fresh"));

    assert_eq!(kit.id, KitId::new("fresh"));
    assert_eq!(kit.category, "Shorts");
    assert_eq!(kit.supplier, "");
}

#[test]
fn test_legacy_record_is_mapped() {
    let record: KitRecord = serde_json::from_str(
        r#"{"no":"23","sup":"BOC","cat":"Hoodies","desc":"23 1060","bay":"BAY 2","size":"8 (XS-3XL+5XL)"}"#,
    )
    .unwrap();
    assert!(matches!(record, KitRecord::Legacy(_)));

    let kit: Kit = record.normalize(|| KitId::new("generated"));

    assert_eq!(kit.id, KitId::new("generated"));
    assert_eq!(kit.kit_number, "23");
    assert_eq!(kit.supplier, "BOC");
    assert_eq!(kit.category, "Hoodies");
    assert_eq!(kit.description, "23 1060");
    assert_eq!(kit.bay, "BAY 2");
    assert_eq!(kit.sizes, "8 (XS-3XL+5XL)");
}

#[test]
fn test_legacy_record_without_number_gets_placeholder() {
    let record: KitRecord = serde_json::from_str(r#"{"sup":"JB's","cat":"Skort"}"#).unwrap();

    let kit: Kit = record.normalize(|| KitId::new("generated"));

    assert_eq!(kit.kit_number, "?");
    assert_eq!(kit.description, "");
}

#[test]
fn test_kit_converts_to_standard_record() {
    let kit: Kit = create_test_kit("k1", "001");

    let record: KitRecord = KitRecord::from(kit.clone());

    assert_eq!(record.normalize(|| KitId::new("unused")), kit);
}

#[test]
fn test_record_without_kit_number_keeps_id_and_fields() {
    let record: KitRecord = serde_json::from_str(
        r#"{"id":"k-keep","category":"Hoodies","description":"Crew"}"#,
    )
    .unwrap();
    assert!(!record.needs_id());

    let kit: Kit = record.normalize(|| KitId::new("fresh"));

    assert_eq!(kit.id, KitId::new("k-keep"));
    assert_eq!(kit.kit_number, "?");
    assert_eq!(kit.category, "Hoodies");
    assert_eq!(kit.description, "Crew");
}

#[test]
fn test_unrelated_object_is_not_a_kit_record() {
    assert!(serde_json::from_str::<KitRecord>(r#"{"foo":1}"#).is_err());
    assert!(serde_json::from_str::<KitRecord>("{}").is_err());
}

#[test]
fn test_blank_legacy_keys_do_not_force_legacy_shape() {
    let record: KitRecord =
        serde_json::from_str(r#"{"id":"k-5","no":"","kitNumber":"5","category":"Tees"}"#)
            .unwrap();

    assert!(matches!(record, KitRecord::Standard(_)));
    assert_eq!(record.normalize(|| KitId::new("fresh")).kit_number, "5");
}

#[test]
fn test_legacy_record_falls_back_to_current_keys() {
    let record: KitRecord =
        serde_json::from_str(r#"{"sup":"BOC","kitNumber":"77","description":"Singlet"}"#)
            .unwrap();

    let kit: Kit = record.normalize(|| KitId::new("generated"));

    assert_eq!(kit.id, KitId::new("generated"));
    assert_eq!(kit.kit_number, "77");
    assert_eq!(kit.supplier, "BOC");
    assert_eq!(kit.description, "Singlet");
}
