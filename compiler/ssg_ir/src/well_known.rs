//! Symbols the generator recognizes by identity.
//!
//! Each symbol is resolved once per pool by interning its metadata name.
//! After that, recognizing a container or attribute is a `TypeId` comparison,
//! so aliased, `global::`-prefixed, or short spellings in user code resolve
//! to the same symbol.

use crate::{TypeId, TypePool};

/// Metadata names of the recognized symbols.
pub mod paths {
    pub const LIST: &str = "System.Collections.Generic.List`1";
    pub const DICTIONARY: &str = "System.Collections.Generic.Dictionary`2";
    pub const HASH_SET: &str = "System.Collections.Generic.HashSet`1";

    pub const SERIALIZE_FIELD: &str = "UnityEngine.SerializeField";
    pub const NON_SERIALIZED: &str = "System.NonSerializedAttribute";
    pub const HIDE_IN_INSPECTOR: &str = "UnityEngine.HideInInspector";
    pub const FORMERLY_SERIALIZED_AS: &str =
        "UnityEngine.Serialization.FormerlySerializedAsAttribute";
    pub const SERIALIZE_REFERENCE: &str = "UnityEngine.SerializeReference";

    /// Marks a member for shadow serialization.
    pub const SAINTS_SERIALIZED: &str = "SaintsField.Playa.SaintsSerializedAttribute";
    /// Applies an attribute to container values; with `SerializeReference`
    /// it requests identity-preserving sets.
    pub const VALUE_ATTRIBUTE: &str = "SaintsField.ValueAttributeAttribute";
}

/// Resolved ids of every recognized symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WellKnown {
    /// Ordered sequence of one type parameter.
    pub list: TypeId,
    /// Two-argument mapping.
    pub dictionary: TypeId,
    /// Single-argument unique set.
    pub hash_set: TypeId,
    pub serialize_field: TypeId,
    pub non_serialized: TypeId,
    pub hide_in_inspector: TypeId,
    pub formerly_serialized_as: TypeId,
    pub serialize_reference: TypeId,
    pub saints_serialized: TypeId,
    pub value_attribute: TypeId,
}

impl WellKnown {
    /// Resolve every recognized symbol in `pool`.
    pub fn resolve(pool: &TypePool) -> Self {
        WellKnown {
            list: pool.named(paths::LIST),
            dictionary: pool.named(paths::DICTIONARY),
            hash_set: pool.named(paths::HASH_SET),
            serialize_field: pool.named(paths::SERIALIZE_FIELD),
            non_serialized: pool.named(paths::NON_SERIALIZED),
            hide_in_inspector: pool.named(paths::HIDE_IN_INSPECTOR),
            formerly_serialized_as: pool.named(paths::FORMERLY_SERIALIZED_AS),
            serialize_reference: pool.named(paths::SERIALIZE_REFERENCE),
            saints_serialized: pool.named(paths::SAINTS_SERIALIZED),
            value_attribute: pool.named(paths::VALUE_ATTRIBUTE),
        }
    }
}
