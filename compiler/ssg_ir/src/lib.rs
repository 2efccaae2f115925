//! Semantic model shared by every phase of the shadow serialization generator.
//!
//! The traversal front end resolves each declared type to a metadata name
//! and hands it over here. Everything downstream works on interned handles:
//!
//! - [`Name`]: interned string, produced by [`StringInterner`]
//! - [`TypeId`]: interned type, produced by [`TypePool`]
//! - [`WellKnown`]: the symbols the classifier compares by identity
//!
//! Declarations ([`TypeDecl`], [`MemberDecl`], [`AttributeData`]) reference
//! types only through `TypeId`, so two spellings of the same type can never
//! be told apart once they reach the classifier.

mod attr;
mod decl;
mod interner;
mod name;
mod types;
pub mod well_known;

pub use attr::{AttrArg, AttributeData};
pub use decl::{
    Accessibility, Item, MemberDecl, MemberKind, Modifiers, NamespaceDecl, SourceUnit, TypeDecl,
    TypeKind,
};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use types::{TypeData, TypeId, TypePool};
pub use well_known::WellKnown;
