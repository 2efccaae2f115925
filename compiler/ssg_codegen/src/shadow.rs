//! Shadow field synthesis.
//!
//! Each annotated member gets one private, host-serialized field holding
//! its capsule (or an array of capsules for container members).

use ssg_classify::{Classification, SerializationKind, SHADOW_SUFFIX};
use ssg_ir::TypePool;

use crate::member::MemberTypes;
use crate::{runtime, EmitError, Line};

/// Engine-provided wrapper type holding one serialized value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capsule {
    Scalar,
    Dictionary,
    /// Set whose elements keep reference identity.
    ReferenceHashSet,
    /// Set whose elements are value-copied.
    HashSet,
}

impl Capsule {
    pub fn of(cls: &Classification) -> Self {
        match cls.kind() {
            SerializationKind::Scalar => Capsule::Scalar,
            SerializationKind::Dictionary => Capsule::Dictionary,
            SerializationKind::HashSet if cls.preserves_identity() => Capsule::ReferenceHashSet,
            SerializationKind::HashSet => Capsule::HashSet,
        }
    }

    /// Kind fragment in runtime primitive names.
    pub(crate) fn primitive_suffix(self) -> &'static str {
        match self {
            Capsule::Scalar => "",
            Capsule::Dictionary => "Dictionary",
            Capsule::ReferenceHashSet => "ReferenceHashSet",
            Capsule::HashSet => "HashSet",
        }
    }

    /// Capsule type text. The scalar capsule is not generic; its element type
    /// travels as a `typeof` witness in the calls instead.
    pub fn render(self, type_args: &str) -> String {
        match self {
            Capsule::Scalar => runtime::SCALAR_CAPSULE.to_owned(),
            Capsule::Dictionary => format!("{}<{type_args}>", runtime::DICTIONARY_CAPSULE),
            Capsule::ReferenceHashSet => format!("{}<{type_args}>", runtime::REFERENCE_SET_CAPSULE),
            Capsule::HashSet => format!("{}<{type_args}>", runtime::SET_CAPSULE),
        }
    }
}

/// Semantics of the type that declares the member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encloser {
    /// Classes: fields may carry initializers.
    Reference,
    /// Structs: no field initializers, shadows start zeroed.
    Value,
}

/// A synthesized shadow field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowField {
    /// Live member this shadow mirrors.
    pub member: String,
    pub name: String,
    pub capsule: Capsule,
    /// Whether the shadow is an array of capsules.
    pub is_array: bool,
    /// Full shadow type text.
    pub ty: String,
    /// Initializer expression; `None` for value-type enclosers.
    pub default: Option<String>,
    /// Attribute lines, brackets included, in emission order.
    pub attributes: Vec<String>,
}

impl ShadowField {
    pub fn needs_eager_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn declaration(&self) -> String {
        match &self.default {
            Some(default) => format!("private {} {} = {default};", self.ty, self.name),
            None => format!("private {} {};", self.ty, self.name),
        }
    }

    pub fn lines(&self) -> Vec<Line> {
        self.attributes
            .iter()
            .map(|a| Line::new(0, a.clone()))
            .chain(std::iter::once(Line::new(0, self.declaration())))
            .collect()
    }
}

/// Name of the shadow field for a live member.
pub fn shadow_name(member: &str) -> String {
    format!("{member}{SHADOW_SUFFIX}")
}

/// Build the shadow field for one classified member.
pub fn synthesize_shadow(
    pool: &TypePool,
    member: &str,
    cls: &Classification,
    encloser: Encloser,
) -> Result<ShadowField, EmitError> {
    let types = MemberTypes::new(pool, member, cls)?;
    let is_array = cls.container().is_container();
    let ty = if is_array {
        format!("{}[]", types.capsule_ty)
    } else {
        types.capsule_ty.clone()
    };

    let default = match encloser {
        Encloser::Value => None,
        Encloser::Reference if is_array => {
            Some(format!("{}<{}>()", runtime::ARRAY_EMPTY, types.capsule_ty))
        }
        Encloser::Reference => Some(format!("new {}()", types.capsule_ty)),
    };

    let mut attributes = vec![
        format!("[{}]", runtime::SERIALIZE_FIELD),
        format!("[{}(nameof({member}))]", runtime::SERIALIZED_ACTUAL),
    ];
    if types.capsule == Capsule::Scalar {
        attributes.push(format!("[{}]", runtime::SERIALIZED_ACTUAL_DRAWER));
    }
    if !cls.passthrough().is_empty() {
        let carried: Vec<&str> = cls.passthrough().iter().map(|p| p.text.as_str()).collect();
        attributes.push(format!("[{}]", carried.join(", ")));
    }

    Ok(ShadowField {
        member: member.to_owned(),
        name: shadow_name(member),
        capsule: types.capsule,
        is_array,
        ty,
        default,
        attributes,
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ssg_classify::{ContainerShape, PassthroughAttr};

    fn classification(
        pool: &TypePool,
        container: ContainerShape,
        kind: SerializationKind,
        identity: bool,
    ) -> Classification {
        let string = pool.named("System.String");
        let int = pool.named("System.Int32");
        let elements: &[_] = match kind {
            SerializationKind::Dictionary => &[string, int],
            _ => &[string],
        };
        Classification::new(container, kind, elements, identity).unwrap()
    }

    #[test]
    fn test_scalar_in_class_gets_new_capsule() {
        let pool = TypePool::new();
        let cls = classification(&pool, ContainerShape::None, SerializationKind::Scalar, false);
        let shadow = synthesize_shadow(&pool, "score", &cls, Encloser::Reference).unwrap();
        assert_eq!(shadow.name, "score__SaintsSerialized__");
        assert_eq!(
            shadow.declaration(),
            "private global::SaintsField.SaintsSerialization.SaintsSerializedProperty \
             score__SaintsSerialized__ = \
             new global::SaintsField.SaintsSerialization.SaintsSerializedProperty();"
        );
    }

    #[test]
    fn test_container_in_class_gets_empty_array() {
        let pool = TypePool::new();
        let cls = classification(&pool, ContainerShape::List, SerializationKind::Dictionary, false);
        let shadow = synthesize_shadow(&pool, "maps", &cls, Encloser::Reference).unwrap();
        assert_eq!(shadow.ty, "global::SaintsField.SaintsDictionary<string, int>[]");
        assert_eq!(
            shadow.default.as_deref(),
            Some("global::System.Array.Empty<global::SaintsField.SaintsDictionary<string, int>>()")
        );
    }

    #[test]
    fn test_struct_encloser_has_no_default() {
        let pool = TypePool::new();
        let cls = classification(&pool, ContainerShape::Array, SerializationKind::HashSet, true);
        let shadow = synthesize_shadow(&pool, "refs", &cls, Encloser::Value).unwrap();
        assert!(!shadow.needs_eager_default());
        assert_eq!(
            shadow.declaration(),
            "private global::SaintsField.ReferenceHashSet<string>[] refs__SaintsSerialized__;"
        );
    }

    #[test]
    fn test_attribute_lines() {
        let pool = TypePool::new();
        let cls = classification(&pool, ContainerShape::None, SerializationKind::Scalar, false)
            .with_passthrough(vec![
                PassthroughAttr {
                    index: 0,
                    text: "Range(0, 10)".into(),
                },
                PassthroughAttr {
                    index: 2,
                    text: "Tooltip(\"hp\")".into(),
                },
            ]);
        let shadow = synthesize_shadow(&pool, "hp", &cls, Encloser::Reference).unwrap();
        assert_eq!(
            shadow.attributes,
            vec![
                "[global::UnityEngine.SerializeField]",
                "[global::SaintsField.Utils.SaintsSerializedActual(nameof(hp))]",
                "[global::SaintsField.Utils.SaintsSerializedActualDrawer]",
                "[Range(0, 10), Tooltip(\"hp\")]",
            ]
        );
    }

    #[test]
    fn test_sets_and_dictionaries_skip_drawer() {
        let pool = TypePool::new();
        for kind in [SerializationKind::Dictionary, SerializationKind::HashSet] {
            let cls = classification(&pool, ContainerShape::None, kind, false);
            let shadow = synthesize_shadow(&pool, "x", &cls, Encloser::Reference).unwrap();
            assert_eq!(shadow.attributes.len(), 2);
        }
    }
}
