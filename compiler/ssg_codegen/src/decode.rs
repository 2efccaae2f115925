//! Decode snippets: rebuild the live value from the shadow after the host
//! deserializes the object.

use ssg_classify::{Classification, ContainerShape};
use ssg_ir::TypePool;

use crate::member::MemberTypes;
use crate::{
    runtime, shadow_name, Arg, Call, Direction, EmitError, Guard, Primitive, Snippet, Stmt,
};

/// Build the decode snippet for one member.
///
/// The guard polarity differs by shape. A bare member is assigned when the
/// primitive reports `ok`; a container member is assigned when the primitive
/// reports the live container was *not* already `filled` from the shadow.
pub fn emit_decode(
    pool: &TypePool,
    member: &str,
    cls: &Classification,
) -> Result<Snippet, EmitError> {
    let types = MemberTypes::new(pool, member, cls)?;
    let shadow = shadow_name(member);
    let primitive = Primitive {
        direction: Direction::Decode,
        container: cls.container(),
        capsule: types.capsule,
    };
    let value = format!("{member}SaintsValue");

    let (flag, guard, live_ty, args) = match cls.container() {
        ContainerShape::None => {
            let flag = format!("{member}SaintsOk");
            let args = match &types.witness {
                Some(witness) => vec![Arg::Value(shadow), Arg::TypeOf(witness.clone())],
                None => vec![Arg::Value(member.to_owned()), Arg::Value(shadow)],
            };
            (flag.clone(), Guard::when_true(flag), types.inner_live.clone(), args)
        }
        ContainerShape::Array | ContainerShape::List => {
            let flag = format!("{member}SaintsFilled");
            let live_ty = if cls.container() == ContainerShape::Array {
                format!("{}[]", types.inner_live)
            } else {
                format!("{}<{}>", runtime::LIST, types.inner_live)
            };
            let mut args = vec![Arg::Value(member.to_owned()), Arg::Value(shadow)];
            args.extend(types.witness.clone().map(Arg::TypeOf));
            (flag.clone(), Guard::when_false(flag), live_ty, args)
        }
    };

    Ok(Snippet::new(vec![
        Stmt::Destructure {
            flag,
            value: value.clone(),
            value_ty: live_ty,
            call: Call {
                primitive,
                type_args: Some(types.type_args),
                args,
            },
        },
        Stmt::AssignIf {
            guard,
            target: member.to_owned(),
            value,
        },
    ]))
}
