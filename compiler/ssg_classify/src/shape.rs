//! The classification record and its axes.

use std::fmt;

use smallvec::SmallVec;
use ssg_ir::TypeId;

/// Element types of a classification: one for scalars and sets, key and
/// value for dictionaries.
pub type ElementTypes = SmallVec<[TypeId; 2]>;

/// The single outer wrapper around a member's type, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerShape {
    None,
    /// `T[]`
    Array,
    /// `List<T>`
    List,
}

impl ContainerShape {
    pub const ALL: [ContainerShape; 3] =
        [ContainerShape::None, ContainerShape::Array, ContainerShape::List];

    pub fn is_container(self) -> bool {
        self != ContainerShape::None
    }
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContainerShape::None => "none",
            ContainerShape::Array => "array",
            ContainerShape::List => "list",
        })
    }
}

/// What the unwrapped type is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SerializationKind {
    Scalar,
    /// `Dictionary<K, V>`
    Dictionary,
    /// `HashSet<T>`
    HashSet,
}

impl SerializationKind {
    pub const ALL: [SerializationKind; 3] = [
        SerializationKind::Scalar,
        SerializationKind::Dictionary,
        SerializationKind::HashSet,
    ];

    /// Number of element types this kind carries.
    pub fn arity(self) -> usize {
        match self {
            SerializationKind::Scalar | SerializationKind::HashSet => 1,
            SerializationKind::Dictionary => 2,
        }
    }
}

impl fmt::Display for SerializationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SerializationKind::Scalar => "scalar",
            SerializationKind::Dictionary => "dictionary",
            SerializationKind::HashSet => "hash-set",
        })
    }
}

/// An attribute carried over onto the shadow field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassthroughAttr {
    /// Position of the attribute in the member's attribute list.
    pub index: usize,
    /// Text to emit between brackets.
    pub text: String,
}

/// How one member is mirrored into its shadow field.
///
/// Immutable once built. Element count always matches the kind's arity,
/// and identity preservation is only ever set for hash sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    container: ContainerShape,
    kind: SerializationKind,
    element_types: ElementTypes,
    preserves_identity: bool,
    passthrough: Vec<PassthroughAttr>,
}

impl Classification {
    /// Build a classification with no passthrough attributes.
    ///
    /// Returns `None` if `element_types` does not match the kind's arity, or
    /// if identity preservation is requested for anything but a hash set.
    pub fn new(
        container: ContainerShape,
        kind: SerializationKind,
        element_types: &[TypeId],
        preserves_identity: bool,
    ) -> Option<Self> {
        if element_types.len() != kind.arity() {
            return None;
        }
        if preserves_identity && kind != SerializationKind::HashSet {
            return None;
        }
        Some(Classification {
            container,
            kind,
            element_types: element_types.iter().copied().collect(),
            preserves_identity,
            passthrough: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_passthrough(mut self, passthrough: Vec<PassthroughAttr>) -> Self {
        self.passthrough = passthrough;
        self
    }

    pub fn container(&self) -> ContainerShape {
        self.container
    }

    pub fn kind(&self) -> SerializationKind {
        self.kind
    }

    pub fn element_types(&self) -> &[TypeId] {
        &self.element_types
    }

    pub fn preserves_identity(&self) -> bool {
        self.preserves_identity
    }

    pub fn passthrough(&self) -> &[PassthroughAttr] {
        &self.passthrough
    }
}
