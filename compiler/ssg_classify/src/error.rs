use thiserror::Error;

/// Why a declared type has no shadow representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeProblem {
    #[error("containers nested more than one level deep")]
    NestedContainer,
    #[error("array of rank {rank}, only single-dimension arrays are supported")]
    MultiDimensionalArray { rank: u8 },
    #[error("generic with {found} type arguments where {expected} were expected")]
    GenericArity { expected: usize, found: usize },
}

/// Classification failure. No partial classification is ever returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("unsupported type shape `{ty}`: {problem}")]
    UnsupportedTypeShape { ty: String, problem: ShapeProblem },
}
