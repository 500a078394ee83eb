// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver tests over hand-built tables.

use super::*;
use crate::config::ResolverConfig;
use crate::error::Error;
use crate::types::{CodecKind, KnownTypes, PrimitiveKind};
use serde_json::json;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn prim(id: TypeId, kind: PrimitiveKind) -> PortableType {
    PortableType::new(id, TypeDefVariant::Primitive(kind))
}

fn seq(id: TypeId, element: TypeId) -> PortableType {
    PortableType::new(id, TypeDefVariant::Sequence { element })
}

fn tuple(id: TypeId, members: &[TypeId]) -> PortableType {
    PortableType::new(id, TypeDefVariant::Tuple(members.to_vec()))
}

fn composite(id: TypeId, fields: Vec<Field>) -> PortableType {
    PortableType::new(id, TypeDefVariant::Composite { fields })
}

fn variant(id: TypeId, arms: Vec<VariantArm>) -> PortableType {
    PortableType::new(id, TypeDefVariant::Variant { variants: arms })
}

fn registry(types: Vec<PortableType>) -> PortableRegistry {
    PortableRegistry::new(
        PortableTable::new(types).expect("unique ids"),
        Arc::new(KnownTypes::new()),
    )
}

fn name(registry: &PortableRegistry, id: TypeId) -> String {
    registry.type_name(id).expect("resolvable").to_string()
}

fn range_table() -> Vec<PortableType> {
    vec![
        composite(
            0,
            vec![
                Field::named("start", 1).with_type_name("Idx"),
                Field::named("end", 1).with_type_name("Idx"),
            ],
        )
        .with_path(["Range"])
        .with_param("Idx", Some(1)),
        prim(1, PrimitiveKind::U32),
    ]
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

#[test]
fn primitives_resolve_to_their_name() {
    let types: Vec<_> = PrimitiveKind::ALL
        .iter()
        .zip(0..)
        .map(|(kind, id)| prim(id, *kind))
        .collect();
    let reg = registry(types);

    for (kind, id) in PrimitiveKind::ALL.iter().zip(0..) {
        assert_eq!(name(&reg, id), kind.name());
    }
}

#[test]
fn range_of_u32() {
    let reg = registry(range_table());
    let def = reg.get_type_def(0).unwrap();

    assert_eq!(def.to_string(), "Range<u32>");
    let generic = def.generic.as_ref().unwrap();
    assert_eq!(generic.name, "Range");
    assert_eq!(generic.params[0].type_name.as_ref(), "u32");
}

#[test]
fn structural_names() {
    let reg = registry(vec![
        prim(0, PrimitiveKind::U8),
        seq(1, 0),
        PortableType::new(2, TypeDefVariant::Array { element: 0, len: 32 }),
        tuple(3, &[]),
        tuple(4, &[0]),
        tuple(5, &[0, 1]),
        PortableType::new(6, TypeDefVariant::Compact { inner: 0 }),
        PortableType::new(7, TypeDefVariant::BitSequence { store: 0, order: 8 }),
        composite(8, vec![]).with_path(["bitvec", "order", "Lsb0"]),
        seq(9, 2),
    ]);

    assert_eq!(name(&reg, 1), "Vec<u8>");
    assert_eq!(name(&reg, 2), "[u8; 32]");
    assert_eq!(name(&reg, 3), "()");
    assert_eq!(name(&reg, 4), "(u8)");
    assert_eq!(name(&reg, 5), "(u8, Vec<u8>)");
    assert_eq!(name(&reg, 6), "Compact<u8>");
    assert_eq!(name(&reg, 7), "BitVec");
    assert_eq!(name(&reg, 8), "bitvec::order::Lsb0");
    assert_eq!(name(&reg, 9), "Vec<[u8; 32]>");
}

#[test]
fn anonymous_composites_and_variants_render_structure() {
    let reg = registry(vec![
        prim(0, PrimitiveKind::U32),
        prim(1, PrimitiveKind::Bool),
        composite(2, vec![Field::named("a", 0), Field::named("b", 1)]),
        composite(3, vec![Field::unnamed(0), Field::unnamed(1)]),
        composite(4, vec![]),
        variant(
            5,
            vec![
                VariantArm::new("A", 0, vec![]),
                VariantArm::new("B", 1, vec![Field::unnamed(0)]),
                VariantArm::new("C", 2, vec![Field::named("x", 1)]),
            ],
        ),
    ]);

    assert_eq!(name(&reg, 2), "{ a: u32, b: bool }");
    assert_eq!(name(&reg, 3), "(u32, bool)");
    assert_eq!(name(&reg, 4), "()");
    assert_eq!(name(&reg, 5), "enum { A, B(u32), C { x: bool } }");
}

#[test]
fn option_result_and_maps() {
    let reg = registry(vec![
        prim(0, PrimitiveKind::U32),
        prim(1, PrimitiveKind::Str),
        variant(
            2,
            vec![
                VariantArm::new("None", 0, vec![]),
                VariantArm::new("Some", 1, vec![Field::unnamed(0)]),
            ],
        )
        .with_path(["Option"])
        .with_param("T", Some(0)),
        variant(
            3,
            vec![
                VariantArm::new("Ok", 0, vec![Field::unnamed(0)]),
                VariantArm::new("Err", 1, vec![Field::unnamed(1)]),
            ],
        )
        .with_path(["Result"])
        .with_param("T", Some(0))
        .with_param("E", Some(1)),
        tuple(4, &[0, 1]),
        seq(5, 4),
        composite(6, vec![Field::unnamed(5)])
            .with_path(["BTreeMap"])
            .with_param("K", Some(0))
            .with_param("V", Some(1)),
        seq(7, 2),
    ]);

    assert_eq!(name(&reg, 2), "Option<u32>");
    assert_eq!(name(&reg, 3), "Result<u32, str>");
    assert_eq!(name(&reg, 6), "BTreeMap<u32, str>");
    assert_eq!(name(&reg, 7), "Vec<Option<u32>>");
}

#[test]
fn relaxed_range_accepts_other_field_names() {
    let mut types = range_table();
    if let TypeDefVariant::Composite { fields } = &mut types[0].def {
        fields[0].name = Some("lo".to_string());
        fields[1].name = Some("hi".to_string());
    }

    let strict = registry(types.clone());
    assert_eq!(name(&strict, 0), "Range");

    let relaxed =
        registry(types).with_config(ResolverConfig::default().with_range_field_names(false));
    assert_eq!(name(&relaxed, 0), "Range<u32>");
}

#[derive(Debug)]
struct Bounded;

impl GenericMatcher for Bounded {
    fn name(&self) -> &str {
        "BoundedVec"
    }

    fn try_match(&self, ty: &PortableType, _config: &ResolverConfig) -> Option<GenericShape> {
        if ty.ident() != Some("BoundedVec") {
            return None;
        }
        let [param, _bound] = ty.params.as_slice() else {
            return None;
        };
        Some(GenericShape {
            name: "BoundedVec".to_string(),
            params: vec![param.ty?],
        })
    }
}

#[test]
fn custom_matchers_run_after_builtins() {
    let types = vec![
        prim(0, PrimitiveKind::U8),
        seq(1, 0),
        composite(2, vec![Field::unnamed(1)])
            .with_path(["bounded_collections", "bounded_vec", "BoundedVec"])
            .with_param("T", Some(0))
            .with_param("S", None),
    ];

    let plain = registry(types.clone());
    assert_eq!(name(&plain, 2), "bounded_collections::bounded_vec::BoundedVec");

    let extended = registry(types).with_matcher(Box::new(Bounded));
    assert_eq!(name(&extended, 2), "BoundedVec<u8>");
    assert!(extended.get_type_def(2).unwrap().is_generic());
}

// ---------------------------------------------------------------------------
// Cycles and failures
// ---------------------------------------------------------------------------

#[test]
fn named_recursive_types_resolve() {
    // enum Call { batch(Vec<Call>), remark(Vec<u8>) }
    let reg = registry(vec![
        variant(
            0,
            vec![
                VariantArm::new("batch", 0, vec![Field::named("calls", 1)]),
                VariantArm::new("remark", 1, vec![Field::named("data", 3)]),
            ],
        )
        .with_path(["runtime", "Call"]),
        seq(1, 0),
        prim(2, PrimitiveKind::U8),
        seq(3, 2),
    ]);

    assert_eq!(name(&reg, 1), "Vec<runtime::Call>");
    let def = reg.get_type_def(0).unwrap();
    let TypeDefInfo::Variant(arms) = &def.info else {
        panic!("expected variant info");
    };
    assert_eq!(arms[0].fields[0].ty.type_name.as_ref(), "Vec<runtime::Call>");
    assert_eq!(arms[1].fields[0].ty.type_name.as_ref(), "Vec<u8>");
}

#[test]
fn anonymous_cycle_is_an_error() {
    let reg = registry(vec![seq(0, 1), tuple(1, &[0])]);

    let err = reg.type_name(0).unwrap_err();
    assert!(
        matches!(err, Error::CyclicTypeDefinition { id: 0, ref chain } if chain == &[0, 1]),
        "got {err}"
    );
    assert!(matches!(
        reg.get_type_def(1),
        Err(Error::CyclicTypeDefinition { id: 1, .. })
    ));
    assert_eq!(reg.cache_stats().names, 0);
    assert_eq!(reg.cache_stats().defs, 0);
}

#[test]
fn self_reference_is_an_error() {
    let reg = registry(vec![seq(0, 0)]);
    assert!(matches!(
        reg.type_name(0),
        Err(Error::CyclicTypeDefinition { id: 0, ref chain }) if chain == &[0]
    ));
}

#[test]
fn generic_cycle_is_an_error() {
    // Option<T> whose parameter is itself.
    let reg = registry(vec![variant(
        0,
        vec![
            VariantArm::new("None", 0, vec![]),
            VariantArm::new("Some", 1, vec![Field::unnamed(0)]),
        ],
    )
    .with_path(["Option"])
    .with_param("T", Some(0))]);

    assert!(matches!(
        reg.type_name(0),
        Err(Error::CyclicTypeDefinition { id: 0, .. })
    ));
}

#[test]
fn unknown_ids_are_reported() {
    let reg = registry(vec![seq(0, 5)]);
    assert!(matches!(reg.type_name(99), Err(Error::UnknownTypeId(99))));
    assert!(matches!(reg.get_type_def(0), Err(Error::UnknownTypeId(5))));
}

fn nested_sequences(depth: TypeId) -> Vec<PortableType> {
    let mut types: Vec<_> = (0..depth).map(|id| seq(id, id + 1)).collect();
    types.push(prim(depth, PrimitiveKind::U8));
    types
}

#[test]
fn depth_limit_is_enforced() {
    let reg = registry(nested_sequences(10))
        .with_config(ResolverConfig::default().with_max_depth(4));
    assert!(matches!(
        reg.type_name(0),
        Err(Error::DepthLimitExceeded { id: 4, limit: 4 })
    ));

    let unlimited = registry(nested_sequences(10));
    assert_eq!(
        name(&unlimited, 0),
        format!("{}u8{}", "Vec<".repeat(10), ">".repeat(10))
    );
}

#[test]
fn failures_are_not_cached() {
    let reg = registry(nested_sequences(10))
        .with_config(ResolverConfig::default().with_max_depth(4));
    assert!(reg.type_name(0).is_err());

    // Cached names shorten later walks, so resolving bottom-up succeeds.
    for id in (0..=10).rev() {
        reg.type_name(id).unwrap();
    }
    assert_eq!(name(&reg, 0), format!("{}u8{}", "Vec<".repeat(10), ">".repeat(10)));
}

/// u64 leaf, then anonymous `{ left, right }` layers over the previous layer.
fn diamond(layers: TypeId) -> Vec<PortableType> {
    let mut types = vec![prim(0, PrimitiveKind::U64)];
    for id in 1..=layers {
        types.push(composite(
            id,
            vec![Field::named("left", id - 1), Field::named("right", id - 1)],
        ));
    }
    types
}

#[test]
fn diamond_names_are_bounded() {
    let reg = registry(diamond(30));
    let limit = crate::config::DEFAULT_MAX_NAME_LEN;

    let (overflowed, reported) = match reg.type_name(30) {
        Err(Error::NameTooLong { id, limit }) => (id, limit),
        other => panic!("expected NameTooLong, got {:?}", other),
    };
    assert_eq!(reported, limit);
    assert!(overflowed > 1 && overflowed < 30);

    // Layers below the overflow resolve and stay within the limit.
    let below = reg.type_name(overflowed - 1).unwrap();
    assert!(below.len() <= limit);

    // The overflowing name is never cached.
    assert!(matches!(
        reg.type_name(overflowed),
        Err(Error::NameTooLong { id, .. }) if id == overflowed
    ));
    assert!(matches!(reg.get_type_def(30), Err(Error::NameTooLong { .. })));
}

#[test]
fn name_limit_is_configurable() {
    let reg = registry(diamond(3))
        .with_config(ResolverConfig::default().with_max_name_len(32));
    assert_eq!(name(&reg, 1), "{ left: u64, right: u64 }");
    assert!(matches!(
        reg.type_name(3),
        Err(Error::NameTooLong { id: 2, limit: 32 })
    ));
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

#[test]
fn codecs_come_from_the_injected_registry() {
    let types = vec![
        prim(0, PrimitiveKind::U32),
        PortableType::new(1, TypeDefVariant::Compact { inner: 0 }),
        composite(2, vec![Field::unnamed(3)]).with_path(["pallet_democracy", "vote", "Vote"]),
        prim(3, PrimitiveKind::U8),
        seq(4, 3),
    ];

    let reg = registry(types.clone());
    assert_eq!(
        reg.get_type_def(0).unwrap().codec,
        Some(CodecKind::Primitive(PrimitiveKind::U32))
    );
    assert_eq!(reg.get_type_def(1).unwrap().codec, Some(CodecKind::Compact));
    assert_eq!(reg.get_type_def(2).unwrap().codec, Some(CodecKind::Vote));
    assert_eq!(reg.get_type_def(4).unwrap().codec, None);

    let bare = PortableRegistry::new(
        PortableTable::new(types).unwrap(),
        Arc::new(KnownTypes::empty()),
    );
    let def = bare.get_type_def(0).unwrap();
    assert_eq!(def.codec, None);
    assert_eq!(def.as_primitive(), Some(PrimitiveKind::U32));
}

#[test]
fn definitions_are_cached() {
    let reg = registry(range_table());
    let first = reg.get_type_def(0).unwrap();
    let second = reg.get_type_def(0).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    let stats = reg.cache_stats();
    assert_eq!(stats.def_hits, 1);
    assert_eq!(stats.def_misses, 1);
    assert_eq!(stats.names, 2);
}

#[test]
fn resolve_all_in_id_order() {
    let reg = registry(vec![seq(7, 3), prim(3, PrimitiveKind::Bool), tuple(5, &[3, 7])]);
    let names: Vec<String> = reg
        .resolve_all()
        .unwrap()
        .iter()
        .map(|d| d.to_string())
        .collect();
    assert_eq!(names, vec!["bool", "(bool, Vec<bool>)", "Vec<bool>"]);
}

#[test]
fn definition_serializes() {
    let reg = registry(range_table());
    let value = serde_json::to_value(&*reg.get_type_def(0).unwrap()).unwrap();

    assert_eq!(value["typeName"], json!("Range<u32>"));
    assert_eq!(value["generic"]["name"], json!("Range"));
    assert_eq!(value["info"]["kind"], json!("composite"));
    assert_eq!(value["info"]["def"][0]["type"]["typeName"], json!("u32"));
    assert_eq!(
        serde_json::to_value(&*reg.get_type_def(1).unwrap()).unwrap()["codec"],
        json!("u32")
    );
}

#[test]
fn children_follow_declaration_order() {
    let reg = registry(vec![
        prim(0, PrimitiveKind::U8),
        prim(1, PrimitiveKind::Bool),
        variant(
            2,
            vec![
                VariantArm::new("A", 0, vec![]),
                VariantArm::new("B", 1, vec![Field::unnamed(0)]),
                VariantArm::new("C", 2, vec![Field::named("x", 1), Field::named("y", 0)]),
            ],
        ),
        PortableType::new(3, TypeDefVariant::BitSequence { store: 0, order: 4 }),
        composite(4, vec![]).with_path(["bitvec", "order", "Lsb0"]),
    ]);

    let children = |id| -> Vec<(TypeId, String)> {
        reg.get_type_def(id)
            .unwrap()
            .children()
            .into_iter()
            .map(|r| (r.id, r.type_name.to_string()))
            .collect()
    };

    assert!(children(0).is_empty());
    assert_eq!(
        children(2),
        vec![(0, "u8".into()), (1, "bool".into()), (0, "u8".into())]
    );
    assert_eq!(
        children(3),
        vec![(0, "u8".into()), (4, "bitvec::order::Lsb0".into())]
    );
    assert_eq!(reg.get_type_def(1).unwrap().as_primitive(), Some(PrimitiveKind::Bool));
    assert_eq!(reg.get_type_def(3).unwrap().as_primitive(), None);
}

#[test]
fn registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PortableRegistry>();
}
