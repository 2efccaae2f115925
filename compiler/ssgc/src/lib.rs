//! Driver for the shadow serialization generator.
//!
//! Loads the input model written by the traversal front end, lowers it into
//! a shared [`TypePool`](ssg_ir::TypePool), locates the Unity project and its
//! control file, and runs per-file generation in parallel.
//!
//! ```text
//! model.json ──► lower ──► SourceUnit per file
//!                               │
//!            control file ──► Generator (rayon, one task per file)
//!                               │
//!                   FileReport { outcome, diagnostics } in input order
//! ```

pub mod commands;
mod config;
mod diagnostic;
mod error;
mod model;
mod pipeline;
mod project;
pub mod tracing_setup;

pub use config::{ConfigError, GeneratorConfig, ParseReason, CONTROL_FILE};
pub use diagnostic::{Diagnostic, DiagnosticBag, ErrorCode, Severity};
pub use error::DriverError;
pub use model::{
    AccessibilityDoc, AttrArgDoc, AttributeDoc, ItemDoc, MemberDoc, MemberKindDoc,
    ModelDocument, ModelError, ModifierDoc, NamespaceDoc, TypeDoc, TypeKindDoc, TypeRef, UnitDoc,
};
pub use pipeline::{
    FileOutcome, FileReport, GeneratedFile, GenerationReport, Generator, ParallelConfig,
    SkipReason,
};
pub use project::{common_prefix, find_project_root, hint_name, DirLookup, RealFs, ProjectLayout};
