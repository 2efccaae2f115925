//! Rendered type texts for one member, shared by the three emitters.

use ssg_classify::{Classification, SerializationKind};
use ssg_ir::TypePool;

use crate::{runtime, Capsule, EmitError};

pub(crate) struct MemberTypes {
    pub capsule: Capsule,
    /// Capsule type of one element of the shadow, never an array.
    pub capsule_ty: String,
    /// Element types joined for a generic argument list (`string, int`).
    pub type_args: String,
    /// Type passed as `typeof(..)` witness; scalars only.
    pub witness: Option<String>,
    /// Live type inside the container wrapper.
    pub inner_live: String,
}

impl MemberTypes {
    pub fn new(pool: &TypePool, member: &str, cls: &Classification) -> Result<Self, EmitError> {
        let elements = cls.element_types();
        if elements.len() != cls.kind().arity() {
            return Err(EmitError::Invariant {
                member: member.to_owned(),
                reason: "element count does not match serialization kind",
            });
        }

        let capsule = Capsule::of(cls);
        let type_args = pool.render_list(elements);
        let (witness, inner_live) = match cls.kind() {
            SerializationKind::Scalar => (Some(type_args.clone()), type_args.clone()),
            SerializationKind::Dictionary => (None, format!("{}<{type_args}>", runtime::DICTIONARY)),
            SerializationKind::HashSet => (None, format!("{}<{type_args}>", runtime::HASH_SET)),
        };

        Ok(MemberTypes {
            capsule,
            capsule_ty: capsule.render(&type_args),
            type_args,
            witness,
            inner_live,
        })
    }
}
