//! Type taxonomy classifier.
//!
//! Decides, per annotated member, how its live value is mirrored into a
//! shadow field the host serializer can store. The decision is a
//! [`Classification`] along three independent axes:
//!
//! - [`ContainerShape`]: bare value, array, or list wrapper
//! - [`SerializationKind`]: scalar, dictionary, or hash set inside the wrapper
//! - identity preservation, for hash sets only
//!
//! Containers and marker attributes are recognized by [`TypeId`] identity
//! against [`WellKnown`] symbols, never by rendered names.
//!
//! [`TypeId`]: ssg_ir::TypeId
//! [`WellKnown`]: ssg_ir::WellKnown

mod classifier;
mod disposition;
mod error;
mod shape;

pub use classifier::Classifier;
pub use disposition::{escape_string_literal, AttrDisposition, AttrFilter};
pub use error::{ClassifyError, ShapeProblem};
pub use shape::{
    Classification, ContainerShape, ElementTypes, PassthroughAttr, SerializationKind,
};

/// Appended to a member name to form its shadow field name, and to renamed
/// serialization keys so they keep pointing at the shadow field.
pub const SHADOW_SUFFIX: &str = "__SaintsSerialized__";
