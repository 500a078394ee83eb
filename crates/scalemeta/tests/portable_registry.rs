// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Portable registry integration: metadata fixtures loaded from disk, resolved
// end to end, and shared between threads.

#![allow(clippy::unwrap_used)]

use scalemeta::portable::{PortableRegistry, PortableTable, TypeDefInfo};
use scalemeta::types::{CodecKind, KnownTypes, PrimitiveKind};
use scalemeta::{Error, ResolverConfig};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(FIXTURES).join(name)
}

fn load(name: &str) -> PortableRegistry {
    let table = PortableTable::from_path(fixture(name)).unwrap();
    PortableRegistry::new(table, Arc::new(KnownTypes::new()))
}

#[test]
fn decodes_a_range_type() {
    let registry = load("range.json");
    assert_eq!(registry.get_type_def(0).unwrap().to_string(), "Range<u32>");
    assert_eq!(registry.get_type_def(1).unwrap().to_string(), "u32");
}

#[test]
fn resolves_runtime_metadata() {
    let registry = load("runtime.json");
    let expected = [
        (0, "u8"),
        (1, "[u8; 32]"),
        (2, "sp_core::crypto::AccountId32"),
        (4, "Compact<u128>"),
        (6, "Range<u32>"),
        (7, "Option<u32>"),
        (8, "Result<(), sp_runtime::DispatchError>"),
        (9, "()"),
        (11, "Vec<u8>"),
        (14, "kitchensink_runtime::RuntimeCall"),
        (15, "Vec<kitchensink_runtime::RuntimeCall>"),
        (16, "(sp_core::crypto::AccountId32, Compact<u128>)"),
        (18, "BTreeMap<sp_core::crypto::AccountId32, u128>"),
        (19, "BitVec"),
        (
            21,
            "{ who: sp_core::crypto::AccountId32, amount: Compact<u128> }",
        ),
    ];

    for (id, name) in expected {
        assert_eq!(
            registry.get_type_def(id).unwrap().to_string(),
            name,
            "type #{}",
            id
        );
    }
}

#[test]
fn runtime_definitions_carry_structure_and_codecs() {
    let registry = load("runtime.json");

    let vote = registry.get_type_def(13).unwrap();
    assert_eq!(vote.codec, Some(CodecKind::Vote));
    let conviction = registry.get_type_def(12).unwrap();
    assert_eq!(conviction.codec, Some(CodecKind::Conviction));
    let TypeDefInfo::Variant(arms) = &conviction.info else {
        panic!("Conviction should be a variant");
    };
    assert_eq!(arms.len(), 7);
    assert_eq!(arms[6].name, "Locked6x");

    let byte = registry.get_type_def(0).unwrap();
    assert_eq!(byte.codec, Some(CodecKind::Primitive(PrimitiveKind::U8)));

    let call = registry.get_type_def(14).unwrap();
    let TypeDefInfo::Variant(arms) = &call.info else {
        panic!("RuntimeCall should be a variant");
    };
    let calls = &arms[1].fields[0];
    assert_eq!(calls.name.as_deref(), Some("calls"));
    assert_eq!(calls.type_name.as_deref(), Some("Vec<RuntimeCall>"));
    assert_eq!(&*calls.ty.type_name, "Vec<kitchensink_runtime::RuntimeCall>");
}

#[test]
fn resolve_all_covers_every_id() {
    let registry = load("runtime.json");
    let defs = registry.resolve_all().unwrap();
    assert_eq!(defs.len(), registry.table().len());
    assert!(defs.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn loads_from_a_temporary_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": 3, "type": {{"def": {{"sequence": {{"type": 9}}}}}}}},
            {{"id": 9, "type": {{"def": {{"primitive": "Bool"}}}}}}]"#
    )
    .unwrap();

    let table = PortableTable::from_path(file.path()).unwrap();
    let registry = PortableRegistry::new(table, Arc::new(KnownTypes::new()));
    assert_eq!(&*registry.type_name(3).unwrap(), "Vec<bool>");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PortableTable::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn config_from_json_relaxes_range_names() {
    let config = ResolverConfig::from_json(r#"{"rangeFieldNames": false}"#).unwrap();
    assert_eq!(config.max_depth, scalemeta::config::DEFAULT_MAX_DEPTH);

    let json = std::fs::read_to_string(fixture("range.json"))
        .unwrap()
        .replace("\"start\"", "\"from\"")
        .replace("\"end\"", "\"to\"");
    let table = PortableTable::from_json(&json).unwrap();

    let strict = PortableRegistry::new(table.clone(), Arc::new(KnownTypes::new()));
    assert_eq!(&*strict.type_name(0).unwrap(), "Range");

    let relaxed = PortableRegistry::new(table, Arc::new(KnownTypes::new())).with_config(config);
    assert_eq!(&*relaxed.type_name(0).unwrap(), "Range<u32>");
}

#[test]
fn concurrent_resolution_converges() {
    let registry = Arc::new(load("runtime.json"));
    let ids: Vec<u32> = registry.table().ids().collect();

    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            let registry = Arc::clone(&registry);
            let mut ids = ids.clone();
            thread::spawn(move || {
                let mut rng = fastrand::Rng::with_seed(seed);
                rng.shuffle(&mut ids);
                ids.iter()
                    .map(|id| (*id, registry.get_type_def(*id).unwrap()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for id in &ids {
        let stored = registry.get_type_def(*id).unwrap();
        for per_thread in &results {
            let (_, def) = per_thread.iter().find(|(i, _)| i == id).unwrap();
            assert!(Arc::ptr_eq(def, &stored), "type #{} resolved twice", id);
        }
    }

    let stats = registry.cache_stats();
    assert_eq!(stats.defs, ids.len());
    assert_eq!(stats.names, ids.len());
}

#[test]
fn concurrent_failures_stay_uncached() {
    let table = PortableTable::from_json(
        r#"[{"id": 0, "type": {"def": {"sequence": {"type": 1}}}},
            {"id": 1, "type": {"def": {"tuple": [0, 2]}}},
            {"id": 2, "type": {"def": {"primitive": "u8"}}}]"#,
    )
    .unwrap();
    let registry = Arc::new(PortableRegistry::new(table, Arc::new(KnownTypes::new())));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.type_name(i % 2).unwrap_err())
        })
        .collect();

    for handle in handles {
        assert!(matches!(
            handle.join().unwrap(),
            Error::CyclicTypeDefinition { .. }
        ));
    }
    assert_eq!(&*registry.type_name(2).unwrap(), "u8");
    assert_eq!(registry.cache_stats().names, 1);
}
