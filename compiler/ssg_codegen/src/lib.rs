//! Code generation for shadow-serialized members.
//!
//! Given a [`Classification`] per annotated member, this crate produces:
//!
//! - a shadow field declaration ([`synthesize_shadow`])
//! - the encode snippet run before serialization ([`emit_encode`])
//! - the decode snippet run after deserialization ([`emit_decode`])
//!
//! [`MemberAggregator`] collects those per type, recursing into nested
//! types, and [`write_unit`] turns the result into C# source text. Snippets
//! are built as [`Stmt`] trees first, so their control flow can be inspected
//! without parsing emitted text.
//!
//! Indentation depth is always an explicit argument; nothing here keeps
//! global or per-writer indentation state.
//!
//! [`Classification`]: ssg_classify::Classification

mod aggregate;
mod decode;
mod encode;
mod error;
mod member;
pub mod runtime;
mod shadow;
mod snippet;
mod unit;
mod writer;

pub use aggregate::{MemberAggregator, TypeOutput, MAX_NESTING_DEPTH};
pub use decode::emit_decode;
pub use encode::emit_encode;
pub use error::EmitError;
pub use shadow::{shadow_name, synthesize_shadow, Capsule, Encloser, ShadowField};
pub use snippet::{Arg, Call, Direction, Guard, Line, Polarity, Primitive, Snippet, Stmt};
pub use unit::{generate_unit, NamespaceOutput, OutputItem, UnitOutput};
pub use writer::{write_type, write_unit, SourceWriter};
