//! Design tests for emission.
//!
//! Scenario goldens for whole types, distinctness across the classification
//! space, decode guard polarity, and type-level skip behavior.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHashSet;
use ssg_classify::{Classification, Classifier, ContainerShape, SerializationKind};
use ssg_codegen::{
    emit_decode, emit_encode, generate_unit, synthesize_shadow, write_unit, Capsule, EmitError,
    Encloser, Polarity,
};
use ssg_ir::{
    Accessibility, AttrArg, AttributeData, Item, MemberDecl, Modifiers, NamespaceDecl,
    SourceUnit, TypeDecl, TypeId, TypeKind, TypePool, WellKnown,
};

struct Fixture {
    pool: TypePool,
    wk: WellKnown,
}

impl Fixture {
    fn new() -> Self {
        let pool = TypePool::new();
        let wk = WellKnown::resolve(&pool);
        Fixture { pool, wk }
    }

    fn ty(&self, name: &str) -> TypeId {
        self.pool.named(name)
    }

    fn marker(&self) -> AttributeData {
        AttributeData::new(self.wk.saints_serialized, "SaintsSerialized")
    }

    fn identity_marker(&self) -> AttributeData {
        AttributeData::new(
            self.wk.value_attribute,
            "ValueAttribute(typeof(SerializeReference))",
        )
        .with_arg(AttrArg::Type(self.wk.serialize_reference))
    }

    fn annotated(&self, name: &str, ty: TypeId) -> MemberDecl {
        MemberDecl::field(name, ty).with_attribute(self.marker())
    }

    /// A declared type for one point of the classification space.
    fn declared(&self, container: ContainerShape, kind: SerializationKind) -> TypeId {
        let component = self.ty("Game.ComponentRef");
        let inner = match kind {
            SerializationKind::Scalar => component,
            SerializationKind::Dictionary => self.pool.generic(
                self.wk.dictionary,
                &[self.ty("System.String"), self.ty("System.Int32")],
            ),
            SerializationKind::HashSet => self.pool.generic(self.wk.hash_set, &[component]),
        };
        match container {
            ContainerShape::None => inner,
            ContainerShape::Array => self.pool.array(inner, 1),
            ContainerShape::List => self.pool.generic(self.wk.list, &[inner]),
        }
    }

    fn classify(
        &self,
        container: ContainerShape,
        kind: SerializationKind,
        identity: bool,
    ) -> Classification {
        let attrs = if identity {
            vec![self.identity_marker()]
        } else {
            Vec::new()
        };
        Classifier::new(&self.pool, &self.wk)
            .classify(self.declared(container, kind), &attrs)
            .unwrap()
    }
}

fn partial_class(name: &str, members: Vec<MemberDecl>) -> TypeDecl {
    let mut decl = TypeDecl::new(name, TypeKind::Class);
    decl.accessibility = Accessibility::Public;
    decl.modifiers = Modifiers::PARTIAL;
    decl.members = members;
    decl
}

fn partial_struct(name: &str, members: Vec<MemberDecl>) -> TypeDecl {
    let mut decl = TypeDecl::new(name, TypeKind::Struct);
    decl.accessibility = Accessibility::Public;
    decl.modifiers = Modifiers::PARTIAL;
    decl.members = members;
    decl
}

fn text(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn generate(f: &Fixture, unit: &SourceUnit) -> String {
    let out = generate_unit(&f.pool, &f.wk, unit).unwrap();
    write_unit(&out).unwrap()
}

/// Every point of the space: 9 shape x kind combinations plus identity for
/// hash sets.
fn all_classification_points() -> Vec<(ContainerShape, SerializationKind, bool)> {
    let mut points = Vec::new();
    for container in ContainerShape::ALL {
        for kind in SerializationKind::ALL {
            points.push((container, kind, false));
            if kind == SerializationKind::HashSet {
                points.push((container, kind, true));
            }
        }
    }
    points
}

// =============================================================================
// Scenarios
// =============================================================================

/// Design: scenario A, a bare number, as a whole generated file
#[test]
fn design_scenario_a_scalar_file() {
    let f = Fixture::new();
    let unit = SourceUnit {
        path: "Assets/Scripts/Player.cs".into(),
        usings: vec!["System".into()],
        items: vec![Item::Namespace(NamespaceDecl {
            name: "Game".into(),
            usings: vec!["UnityEngine".into()],
            items: vec![Item::Type(partial_class(
                "Player",
                vec![f.annotated("score", f.ty("System.Int32"))],
            ))],
        })],
    };

    let expected = text(&[
        "using System;",
        "",
        "namespace Game",
        "{",
        "    using UnityEngine;",
        "",
        "    public partial class Player : global::UnityEngine.ISerializationCallbackReceiver",
        "    {",
        "        [global::UnityEngine.SerializeField]",
        "        [global::SaintsField.Utils.SaintsSerializedActual(nameof(score))]",
        "        [global::SaintsField.Utils.SaintsSerializedActualDrawer]",
        "        private global::SaintsField.SaintsSerialization.SaintsSerializedProperty score__SaintsSerialized__ = new global::SaintsField.SaintsSerialization.SaintsSerializedProperty();",
        "        public void OnBeforeSerialize()",
        "        {",
        "            (bool scoreSaintsChanged, global::SaintsField.SaintsSerialization.SaintsSerializedProperty scoreSaintsShadow) = global::SaintsField.Utils.SaintsSerializedUtil.OnBeforeSerialize(score__SaintsSerialized__, score, typeof(int));",
        "            if (scoreSaintsChanged)",
        "            {",
        "                score__SaintsSerialized__ = scoreSaintsShadow;",
        "            }",
        "        }",
        "        public void OnAfterDeserialize()",
        "        {",
        "            (bool scoreSaintsOk, int scoreSaintsValue) = global::SaintsField.Utils.SaintsSerializedUtil.OnAfterDeserialize<int>(score__SaintsSerialized__, typeof(int));",
        "            if (scoreSaintsOk)",
        "            {",
        "                score = scoreSaintsValue;",
        "            }",
        "        }",
        "    }",
        "}",
    ]);
    assert_eq!(generate(&f, &unit), expected);
}

/// Design: scenario B, a list of strings in a class
#[test]
fn design_scenario_b_list_of_string() {
    let f = Fixture::new();
    let names = f.pool.generic(f.wk.list, &[f.ty("System.String")]);
    let cls_names = Classifier::new(&f.pool, &f.wk)
        .classify(names, &[])
        .unwrap();
    assert_eq!(cls_names.container(), ContainerShape::List);

    let shadow = synthesize_shadow(&f.pool, "names", &cls_names, Encloser::Reference).unwrap();
    assert_eq!(
        shadow.declaration(),
        "private global::SaintsField.SaintsSerialization.SaintsSerializedProperty[] names__SaintsSerialized__ = global::System.Array.Empty<global::SaintsField.SaintsSerialization.SaintsSerializedProperty>();"
    );

    let encode = emit_encode(&f.pool, "names", &cls_names).unwrap();
    assert_eq!(
        encode.text(),
        text(&[
            "if (names == null)",
            "{",
            "    names = new global::System.Collections.Generic.List<string>();",
            "}",
            "global::SaintsField.Utils.SaintsSerializedUtil.OnBeforeSerializeCollection<string>(ref names__SaintsSerialized__, names, typeof(string));",
        ])
    );

    let decode = emit_decode(&f.pool, "names", &cls_names).unwrap();
    assert_eq!(
        decode.text(),
        text(&[
            "(bool namesSaintsFilled, global::System.Collections.Generic.List<string> namesSaintsValue) = global::SaintsField.Utils.SaintsSerializedUtil.OnAfterDeserializeList<string>(names, names__SaintsSerialized__, typeof(string));",
            "if (!namesSaintsFilled)",
            "{",
            "    names = namesSaintsValue;",
            "}",
        ])
    );
}

/// Design: scenario C, dictionary primitives are used, not scalar ones
#[test]
fn design_scenario_c_dictionary() {
    let f = Fixture::new();
    let cls = f.classify(ContainerShape::None, SerializationKind::Dictionary, false);

    let shadow = synthesize_shadow(&f.pool, "lookup", &cls, Encloser::Reference).unwrap();
    assert_eq!(shadow.ty, "global::SaintsField.SaintsDictionary<string, int>");
    assert_eq!(shadow.capsule, Capsule::Dictionary);

    let encode = emit_encode(&f.pool, "lookup", &cls).unwrap();
    assert_eq!(
        encode.text(),
        text(&[
            "(bool lookupSaintsChanged, global::SaintsField.SaintsDictionary<string, int> lookupSaintsShadow) = global::SaintsField.Utils.SaintsSerializedUtil.OnBeforeSerializeDictionary<string, int>(lookup__SaintsSerialized__, lookup);",
            "if (lookupSaintsChanged)",
            "{",
            "    lookup__SaintsSerialized__ = lookupSaintsShadow;",
            "}",
        ])
    );

    let decode = emit_decode(&f.pool, "lookup", &cls).unwrap();
    assert_eq!(
        decode.text(),
        text(&[
            "(bool lookupSaintsOk, global::System.Collections.Generic.Dictionary<string, int> lookupSaintsValue) = global::SaintsField.Utils.SaintsSerializedUtil.OnAfterDeserializeDictionary<string, int>(lookup, lookup__SaintsSerialized__);",
            "if (lookupSaintsOk)",
            "{",
            "    lookup = lookupSaintsValue;",
            "}",
        ])
    );
}

/// Design: scenario D, the identity marker picks the reference set capsule
/// and is not carried over
#[test]
fn design_scenario_d_reference_set() {
    let f = Fixture::new();
    let refs = f
        .pool
        .generic(f.wk.hash_set, &[f.ty("Game.ComponentRef")]);
    let tooltip = f.ty("UnityEngine.TooltipAttribute");
    let attrs = [
        f.marker(),
        AttributeData::new(tooltip, "Tooltip(\"refs\")").with_arg(AttrArg::Str("refs".into())),
        f.identity_marker(),
    ];
    let cls = Classifier::new(&f.pool, &f.wk)
        .classify(refs, &attrs)
        .unwrap();
    assert!(cls.preserves_identity());

    let shadow = synthesize_shadow(&f.pool, "refs", &cls, Encloser::Reference).unwrap();
    assert_eq!(shadow.capsule, Capsule::ReferenceHashSet);
    assert_eq!(
        shadow.attributes,
        vec![
            "[global::UnityEngine.SerializeField]",
            "[global::SaintsField.Utils.SaintsSerializedActual(nameof(refs))]",
            "[Tooltip(\"refs\")]",
        ]
    );
    assert_eq!(
        shadow.declaration(),
        "private global::SaintsField.ReferenceHashSet<global::Game.ComponentRef> refs__SaintsSerialized__ = new global::SaintsField.ReferenceHashSet<global::Game.ComponentRef>();"
    );

    let encode = emit_encode(&f.pool, "refs", &cls).unwrap();
    assert!(encode
        .text()
        .contains("OnBeforeSerializeReferenceHashSet<global::Game.ComponentRef>(refs__SaintsSerialized__, refs)"));
}

// =============================================================================
// Distinctness and determinism
// =============================================================================

/// Design: no two points of the classification space emit the same code
#[test]
fn design_every_classification_emits_distinct_code() {
    let f = Fixture::new();
    let mut seen = FxHashSet::default();
    let points = all_classification_points();
    for &(container, kind, identity) in &points {
        let cls = f.classify(container, kind, identity);
        assert_eq!(cls.preserves_identity(), identity);
        let shadow = synthesize_shadow(&f.pool, "m", &cls, Encloser::Reference).unwrap();
        let encode = emit_encode(&f.pool, "m", &cls).unwrap().text();
        let decode = emit_decode(&f.pool, "m", &cls).unwrap().text();
        assert!(
            seen.insert((shadow.declaration(), encode, decode)),
            "duplicate emission for {container} {kind} identity={identity}"
        );
    }
    assert_eq!(seen.len(), 12);
}

/// Design: capsule choice depends only on kind and identity
#[test]
fn design_capsule_follows_kind_and_identity() {
    let f = Fixture::new();
    let mut capsules = FxHashSet::default();
    for (container, kind, identity) in all_classification_points() {
        let cls = f.classify(container, kind, identity);
        let shadow = synthesize_shadow(&f.pool, "m", &cls, Encloser::Value).unwrap();
        assert_eq!(shadow.is_array, container.is_container());
        assert_eq!(shadow.ty.ends_with("[]"), container.is_container());
        capsules.insert(shadow.capsule);
    }
    assert_eq!(capsules.len(), 4);
}

// =============================================================================
// Decode polarity
// =============================================================================

/// Design: scalar decode assigns on `ok`, container decode on `!filled`
#[test]
fn design_decode_polarity_all_flag_states() {
    let f = Fixture::new();
    let bare = f.classify(ContainerShape::None, SerializationKind::Scalar, false);
    let listed = f.classify(ContainerShape::Array, SerializationKind::Scalar, false);

    let bare_decode = emit_decode(&f.pool, "score", &bare).unwrap();
    let (guard, target, value) = bare_decode.guarded_assignments().next().unwrap();
    assert_eq!(
        (guard.flag.as_str(), target, value),
        ("scoreSaintsOk", "score", "scoreSaintsValue")
    );
    assert_eq!(guard.polarity, Polarity::WhenTrue);
    assert!(guard.admits(true), "ok = true must overwrite");
    assert!(!guard.admits(false), "ok = false must keep the live value");

    let list_decode = emit_decode(&f.pool, "names", &listed).unwrap();
    let (guard, target, _) = list_decode.guarded_assignments().next().unwrap();
    assert_eq!((guard.flag.as_str(), target), ("namesSaintsFilled", "names"));
    assert_eq!(guard.polarity, Polarity::WhenFalse);
    assert!(!guard.admits(true), "filled = true must keep the live value");
    assert!(guard.admits(false), "filled = false must overwrite");
}

/// Design: encode only has a guarded shadow write for bare members
#[test]
fn design_encode_guard_only_for_bare_members() {
    let f = Fixture::new();
    for (container, kind, identity) in all_classification_points() {
        let cls = f.classify(container, kind, identity);
        let encode = emit_encode(&f.pool, "m", &cls).unwrap();
        let guarded: Vec<_> = encode.guarded_assignments().collect();
        if container.is_container() {
            assert!(guarded.is_empty());
        } else {
            assert_eq!(guarded.len(), 1);
            assert_eq!(guarded[0].0.polarity, Polarity::WhenTrue);
            assert_eq!(guarded[0].1, "m__SaintsSerialized__");
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Design: an unsupported member drops its type but keeps siblings
#[test]
fn design_unsupported_member_skips_only_its_type() {
    let f = Fixture::new();
    let int = f.ty("System.Int32");
    let jagged = f.pool.generic(f.wk.list, &[f.pool.array(int, 1)]);
    let unit = SourceUnit {
        items: vec![
            Item::Type(partial_class("Broken", vec![f.annotated("grid", jagged)])),
            Item::Type(partial_class("Fine", vec![f.annotated("hp", int)])),
        ],
        ..SourceUnit::default()
    };
    let out = generate_unit(&f.pool, &f.wk, &unit).unwrap();
    let paths: Vec<&str> = out.types().map(|ty| ty.path.as_str()).collect();
    assert_eq!(paths, vec!["Fine"]);
    assert_eq!(out.skipped.len(), 1);
    assert!(matches!(
        &out.skipped[0],
        EmitError::Classify { type_name, member, .. } if type_name == "Broken" && member == "grid"
    ));
}

/// Design: a skipped type still wraps its generated nested types
#[test]
fn design_skipped_type_keeps_shell_for_nested() {
    let f = Fixture::new();
    let int = f.ty("System.Int32");
    let jagged = f.pool.array(f.pool.array(int, 1), 1);
    let mut outer = partial_class("Outer", vec![f.annotated("grid", jagged)]);
    outer
        .nested
        .push(partial_struct("Inner", vec![f.annotated("hp", int)]));
    let unit = SourceUnit {
        items: vec![Item::Type(outer)],
        ..SourceUnit::default()
    };
    let source = generate(&f, &unit);
    let lines: Vec<&str> = source.lines().collect();
    assert_eq!(lines[0], "public partial class Outer");
    assert_eq!(lines[1], "{");
    assert_eq!(
        lines[2],
        "    public partial struct Inner : global::UnityEngine.ISerializationCallbackReceiver"
    );
    assert!(lines.contains(
        &"        private global::SaintsField.SaintsSerialization.SaintsSerializedProperty hp__SaintsSerialized__;"
    ));
    assert!(!source.contains("grid"));
    assert_eq!(lines.last(), Some(&"}"));
}

/// Design: the base list precedes constraint clauses
#[test]
fn design_constraints_follow_base_list() {
    let f = Fixture::new();
    let t = f.pool.param("T");
    let items = f.pool.generic(f.wk.list, &[t]);
    let mut cache = partial_class("Cache", vec![f.annotated("items", items)]);
    cache.type_params = vec!["T".into()];
    cache.constraints = vec!["where T : class".into()];
    let unit = SourceUnit {
        items: vec![Item::Type(cache)],
        ..SourceUnit::default()
    };
    let source = generate(&f, &unit);
    assert_eq!(
        source.lines().next(),
        Some("public partial class Cache<T> : global::UnityEngine.ISerializationCallbackReceiver where T : class")
    );
    assert!(source.contains("OnAfterDeserializeList<T>(items, items__SaintsSerialized__, typeof(T))"));
}

/// Design: members keep declaration order in every section
#[test]
fn design_members_keep_declaration_order() {
    let f = Fixture::new();
    let int = f.ty("System.Int32");
    let members = vec![
        f.annotated("zeta", int),
        MemberDecl::field("skipped", int),
        f.annotated("alpha", int),
    ];
    let unit = SourceUnit {
        items: vec![Item::Type(partial_class("Ordered", members))],
        ..SourceUnit::default()
    };
    let out = generate_unit(&f.pool, &f.wk, &unit).unwrap();
    let Some(ty) = out.types().next() else {
        panic!("expected generated type");
    };
    let shadows: Vec<&str> = ty.shadows.iter().map(|s| s.member.as_str()).collect();
    assert_eq!(shadows, vec!["zeta", "alpha"]);
    assert!(ty.encode[0].text().contains("zeta"));
    assert!(ty.decode[1].text().contains("alpha"));
}

// =============================================================================
// Property tests
// =============================================================================

fn arb_point() -> impl Strategy<Value = (ContainerShape, SerializationKind, bool)> {
    (
        prop::sample::select(ContainerShape::ALL.to_vec()),
        prop::sample::select(SerializationKind::ALL.to_vec()),
        any::<bool>(),
    )
}

fn render_point(
    name: &str,
    (container, kind, identity): (ContainerShape, SerializationKind, bool),
) -> String {
    let f = Fixture::new();
    let mut member = f.annotated(name, f.declared(container, kind));
    if identity {
        member = member.with_attribute(f.identity_marker());
    }
    let unit = SourceUnit {
        items: vec![Item::Type(partial_class("Holder", vec![member]))],
        ..SourceUnit::default()
    };
    generate(&f, &unit)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Emission is a pure function of the declaration.
    #[test]
    fn prop_emission_is_deterministic(name in "[a-z][a-zA-Z0-9]{0,8}", point in arb_point()) {
        let first = render_point(&name, point);
        let second = render_point(&name, point);
        prop_assert_eq!(&first, &second);
        let expected_shadow = format!("{name}__SaintsSerialized__");
        prop_assert!(first.contains(&expected_shadow));
    }
}
