use ssg_classify::ClassifyError;
use thiserror::Error;

/// Code generation failure.
///
/// [`EmitError::Classify`] is scoped to one type and lets siblings continue.
/// The other variants abort the whole file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("`{type_name}.{member}`: {source}")]
    Classify {
        type_name: String,
        member: String,
        #[source]
        source: ClassifyError,
    },
    #[error("`{type_name}` is nested more than {limit} levels deep")]
    NestingTooDeep { type_name: String, limit: usize },
    #[error("cannot emit `{member}`: {reason}")]
    Invariant { member: String, reason: &'static str },
}

impl EmitError {
    /// Whether this error only removes the affected type from the output.
    pub fn is_type_scoped(&self) -> bool {
        matches!(self, EmitError::Classify { .. })
    }
}
