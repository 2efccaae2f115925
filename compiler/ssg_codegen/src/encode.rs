//! Encode snippets: push the live value into the shadow before the host
//! serializes the object.

use ssg_classify::{Classification, ContainerShape};
use ssg_ir::TypePool;

use crate::member::MemberTypes;
use crate::{
    runtime, shadow_name, Arg, Call, Direction, EmitError, Guard, Primitive, Snippet, Stmt,
};

/// Build the encode snippet for one member.
///
/// Bare members write the shadow only when the primitive reports a change,
/// so an unchanged value never dirties the host object. Container members
/// are first defaulted to an empty container if null, then the shadow array
/// is rebuilt in place unconditionally.
pub fn emit_encode(
    pool: &TypePool,
    member: &str,
    cls: &Classification,
) -> Result<Snippet, EmitError> {
    let types = MemberTypes::new(pool, member, cls)?;
    let shadow = shadow_name(member);
    let primitive = Primitive {
        direction: Direction::Encode,
        container: cls.container(),
        capsule: types.capsule,
    };

    if cls.container() == ContainerShape::None {
        let mut args = vec![Arg::Value(shadow.clone()), Arg::Value(member.to_owned())];
        args.extend(types.witness.clone().map(Arg::TypeOf));
        // The scalar primitive is not generic; the witness carries the type.
        let type_args = types.witness.is_none().then(|| types.type_args.clone());

        let changed = format!("{member}SaintsChanged");
        let candidate = format!("{member}SaintsShadow");
        return Ok(Snippet::new(vec![
            Stmt::Destructure {
                flag: changed.clone(),
                value: candidate.clone(),
                value_ty: types.capsule_ty,
                call: Call {
                    primitive,
                    type_args,
                    args,
                },
            },
            Stmt::AssignIf {
                guard: Guard::when_true(changed),
                target: shadow,
                value: candidate,
            },
        ]));
    }

    let empty = empty_container(member, cls.container(), &types.inner_live)?;
    let mut args = vec![Arg::Ref(shadow), Arg::Value(member.to_owned())];
    args.extend(types.witness.map(Arg::TypeOf));
    Ok(Snippet::new(vec![
        Stmt::DefaultIfNull {
            target: member.to_owned(),
            empty,
        },
        Stmt::Invoke(Call {
            primitive,
            type_args: Some(types.type_args),
            args,
        }),
    ]))
}

/// Empty instance of the live container, matching its declared shape.
fn empty_container(
    member: &str,
    container: ContainerShape,
    inner: &str,
) -> Result<String, EmitError> {
    match container {
        ContainerShape::Array => Ok(format!("{}<{inner}>()", runtime::ARRAY_EMPTY)),
        ContainerShape::List => Ok(format!("new {}<{inner}>()", runtime::LIST)),
        ContainerShape::None => Err(EmitError::Invariant {
            member: member.to_owned(),
            reason: "null defense requested for a bare member",
        }),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ssg_classify::SerializationKind;

    #[test]
    fn test_scalar_encode_text() {
        let pool = TypePool::new();
        let int = pool.named("System.Int32");
        let cls =
            Classification::new(ContainerShape::None, SerializationKind::Scalar, &[int], false)
                .unwrap();
        let snippet = emit_encode(&pool, "score", &cls).unwrap();
        assert_eq!(
            snippet.text(),
            "(bool scoreSaintsChanged, global::SaintsField.SaintsSerialization.SaintsSerializedProperty scoreSaintsShadow) = global::SaintsField.Utils.SaintsSerializedUtil.OnBeforeSerialize(score__SaintsSerialized__, score, typeof(int));\n\
             if (scoreSaintsChanged)\n\
             {\n    score__SaintsSerialized__ = scoreSaintsShadow;\n}\n"
        );
    }

    #[test]
    fn test_hash_set_list_encode_text() {
        let pool = TypePool::new();
        let id = pool.named("Game.ComponentRef");
        let cls = Classification::new(ContainerShape::List, SerializationKind::HashSet, &[id], true)
            .unwrap();
        let snippet = emit_encode(&pool, "groups", &cls).unwrap();
        assert_eq!(
            snippet.text(),
            "if (groups == null)\n\
             {\n    groups = new global::System.Collections.Generic.List<global::System.Collections.Generic.HashSet<global::Game.ComponentRef>>();\n}\n\
             global::SaintsField.Utils.SaintsSerializedUtil.OnBeforeSerializeCollectionReferenceHashSet<global::Game.ComponentRef>(ref groups__SaintsSerialized__, groups);\n"
        );
    }

    #[test]
    fn test_empty_container_rejects_bare_shape() {
        assert!(matches!(
            empty_container("x", ContainerShape::None, "int"),
            Err(EmitError::Invariant { .. })
        ));
    }
}
