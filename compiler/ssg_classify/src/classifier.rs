//! Member classification.

use smallvec::smallvec;
use ssg_ir::{AttributeData, MemberDecl, TypeData, TypeId, TypePool, WellKnown};

use crate::disposition::{AttrDisposition, AttrFilter};
use crate::{
    Classification, ClassifyError, ContainerShape, ElementTypes, PassthroughAttr,
    SerializationKind, ShapeProblem,
};

/// Classifies member types against the well-known symbols of one pool.
#[derive(Copy, Clone)]
pub struct Classifier<'a> {
    pool: &'a TypePool,
    wk: &'a WellKnown,
}

impl<'a> Classifier<'a> {
    pub fn new(pool: &'a TypePool, wk: &'a WellKnown) -> Self {
        Classifier { pool, wk }
    }

    /// Whether a member carries the marker that opts it into shadow
    /// serialization.
    pub fn is_annotated(&self, member: &MemberDecl) -> bool {
        member.has_attribute(self.wk.saints_serialized)
    }

    pub fn classify_member(&self, member: &MemberDecl) -> Result<Classification, ClassifyError> {
        self.classify(member.ty, &member.attributes)
    }

    /// Classify a declared type and its attribute list.
    pub fn classify(
        &self,
        ty: TypeId,
        attributes: &[AttributeData],
    ) -> Result<Classification, ClassifyError> {
        let (container, inner) = self.unwrap_container(ty)?;
        let (kind, elements) = self.inner_kind(inner)?;

        let mut filter = AttrFilter::new(self.wk);
        let mut passthrough = Vec::with_capacity(attributes.len());
        for (index, attr) in attributes.iter().enumerate() {
            let disposition = filter.dispose(attr);
            tracing::trace!(attr = %attr.text, ?disposition, "attribute disposition");
            match disposition {
                AttrDisposition::Consumed | AttrDisposition::Ignored => {}
                AttrDisposition::Rewritten(text) => {
                    passthrough.push(PassthroughAttr { index, text });
                }
                AttrDisposition::Passthrough => passthrough.push(PassthroughAttr {
                    index,
                    text: attr.text.clone(),
                }),
            }
        }

        // The marker is consumed on any kind, but only sets carry identity.
        let preserves_identity =
            filter.identity_marker_seen() && kind == SerializationKind::HashSet;

        let Some(classification) =
            Classification::new(container, kind, &elements, preserves_identity)
        else {
            return Err(self.unsupported(
                inner,
                ShapeProblem::GenericArity {
                    expected: kind.arity(),
                    found: elements.len(),
                },
            ));
        };
        Ok(classification.with_passthrough(passthrough))
    }

    /// Strip the single outer array or list wrapper, if any.
    fn unwrap_container(&self, ty: TypeId) -> Result<(ContainerShape, TypeId), ClassifyError> {
        match self.pool.data(ty) {
            TypeData::Array { elem, rank } => {
                if rank != 1 {
                    return Err(
                        self.unsupported(ty, ShapeProblem::MultiDimensionalArray { rank })
                    );
                }
                self.ensure_unwrapped(ty, elem)?;
                Ok((ContainerShape::Array, elem))
            }
            TypeData::Generic { def, args } if def == self.wk.list => match *args {
                [elem] => {
                    self.ensure_unwrapped(ty, elem)?;
                    Ok((ContainerShape::List, elem))
                }
                _ => Err(self.unsupported(
                    ty,
                    ShapeProblem::GenericArity {
                        expected: 1,
                        found: args.len(),
                    },
                )),
            },
            _ => Ok((ContainerShape::None, ty)),
        }
    }

    /// Reject a second container level inside `outer`.
    fn ensure_unwrapped(&self, outer: TypeId, elem: TypeId) -> Result<(), ClassifyError> {
        let nested = match self.pool.data(elem) {
            TypeData::Array { .. } => true,
            TypeData::Generic { def, .. } => def == self.wk.list,
            TypeData::Named { .. } | TypeData::Param { .. } => false,
        };
        if nested {
            Err(self.unsupported(outer, ShapeProblem::NestedContainer))
        } else {
            Ok(())
        }
    }

    /// Kind and element types of the unwrapped type.
    fn inner_kind(&self, inner: TypeId) -> Result<(SerializationKind, ElementTypes), ClassifyError> {
        let TypeData::Generic { def, args } = self.pool.data(inner) else {
            return Ok((SerializationKind::Scalar, smallvec![inner]));
        };

        let kind = if def == self.wk.dictionary {
            SerializationKind::Dictionary
        } else if def == self.wk.hash_set {
            SerializationKind::HashSet
        } else {
            return Ok((SerializationKind::Scalar, smallvec![inner]));
        };

        if args.len() != kind.arity() {
            return Err(self.unsupported(
                inner,
                ShapeProblem::GenericArity {
                    expected: kind.arity(),
                    found: args.len(),
                },
            ));
        }
        Ok((kind, args.iter().copied().collect()))
    }

    fn unsupported(&self, ty: TypeId, problem: ShapeProblem) -> ClassifyError {
        ClassifyError::UnsupportedTypeShape {
            ty: self.pool.render(ty),
            problem,
        }
    }
}
