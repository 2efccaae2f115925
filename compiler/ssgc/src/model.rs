//! JSON input model.
//!
//! The traversal front end resolves every type reference to metadata names
//! and writes one document per pass:
//!
//! ```json
//! { "units": [ { "path": "...", "usings": [..], "items": [ { "namespace": .. }, { "type": .. } ] } ] }
//! ```
//!
//! Lowering interns every type reference into a shared [`TypePool`] and
//! produces the [`SourceUnit`]s the generator consumes.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ssg_ir::{
    Accessibility, AttrArg, AttributeData, Item, MemberDecl, MemberKind, Modifiers,
    NamespaceDecl, SourceUnit, TypeDecl, TypeId, TypeKind, TypePool,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{def}` takes {expected} type arguments, {found} given")]
    GenericArity {
        def: String,
        expected: u8,
        found: usize,
    },
    #[error("array rank must be at least 1")]
    ZeroRank,
    #[error("empty {what} name in `{path}`")]
    EmptyName { what: &'static str, path: String },
}

/// A resolved type reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Metadata name, e.g. ``System.Collections.Generic.List`1``.
    Named(String),
    Generic { def: String, args: Vec<TypeRef> },
    Array {
        elem: Box<TypeRef>,
        #[serde(default = "default_rank")]
        rank: u8,
    },
    Param(String),
}

fn default_rank() -> u8 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrArgDoc {
    Type(TypeRef),
    Str(String),
    Int(i64),
    Expr(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDoc {
    /// Metadata name of the attribute class.
    pub class: String,
    /// Source text without brackets.
    pub text: String,
    #[serde(default)]
    pub args: Vec<AttrArgDoc>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKindDoc {
    #[default]
    Field,
    Property,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub kind: MemberKindDoc,
    #[serde(default)]
    pub attributes: Vec<AttributeDoc>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKindDoc {
    Class,
    Struct,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityDoc {
    #[default]
    Default,
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierDoc {
    New,
    Static,
    Abstract,
    Sealed,
    Readonly,
    Unsafe,
    Partial,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDoc {
    pub name: String,
    pub kind: TypeKindDoc,
    #[serde(default)]
    pub accessibility: AccessibilityDoc,
    #[serde(default)]
    pub modifiers: Vec<ModifierDoc>,
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Constraint clauses as written, e.g. `where T : class`.
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDoc>,
    #[serde(default)]
    pub nested: Vec<TypeDoc>,
}

/// A type or namespace, tagged `{ "type": .. }` or `{ "namespace": .. }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemDoc {
    Type(TypeDoc),
    Namespace(NamespaceDoc),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceDoc {
    pub name: String,
    #[serde(default)]
    pub usings: Vec<String>,
    /// Types and inner namespaces in declaration order.
    #[serde(default)]
    pub items: Vec<ItemDoc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDoc {
    pub path: String,
    #[serde(default)]
    pub usings: Vec<String>,
    /// Top-level types and namespaces in declaration order.
    #[serde(default)]
    pub items: Vec<ItemDoc>,
}

/// The whole input document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    pub units: Vec<UnitDoc>,
}

impl ModelDocument {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Paths of every unit, in document order.
    pub fn paths(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.path.as_str()).collect()
    }

    /// Intern every type reference into `pool` and build the declaration
    /// model.
    #[tracing::instrument(level = "debug", skip_all, fields(units = self.units.len()))]
    pub fn lower(&self, pool: &TypePool) -> Result<Vec<SourceUnit>, ModelError> {
        self.units.iter().map(|unit| lower_unit(pool, unit)).collect()
    }
}

fn lower_unit(pool: &TypePool, unit: &UnitDoc) -> Result<SourceUnit, ModelError> {
    let lowerer = Lowerer {
        pool,
        path: &unit.path,
    };
    Ok(SourceUnit {
        path: unit.path.clone(),
        usings: unit.usings.clone(),
        items: lowerer.items(&unit.items)?,
    })
}

struct Lowerer<'a> {
    pool: &'a TypePool,
    path: &'a str,
}

impl Lowerer<'_> {
    fn empty_name(&self, what: &'static str) -> ModelError {
        ModelError::EmptyName {
            what,
            path: self.path.to_owned(),
        }
    }

    fn namespace(&self, ns: &NamespaceDoc) -> Result<NamespaceDecl, ModelError> {
        if ns.name.is_empty() {
            return Err(self.empty_name("namespace"));
        }
        Ok(NamespaceDecl {
            name: ns.name.clone(),
            usings: ns.usings.clone(),
            items: self.items(&ns.items)?,
        })
    }

    fn items(&self, docs: &[ItemDoc]) -> Result<Vec<Item>, ModelError> {
        docs.iter()
            .map(|doc| match doc {
                ItemDoc::Type(ty) => self.type_decl(ty).map(Item::Type),
                ItemDoc::Namespace(ns) => self.namespace(ns).map(Item::Namespace),
            })
            .collect()
    }

    fn types(&self, docs: &[TypeDoc]) -> Result<Vec<TypeDecl>, ModelError> {
        docs.iter().map(|doc| self.type_decl(doc)).collect()
    }

    fn type_decl(&self, doc: &TypeDoc) -> Result<TypeDecl, ModelError> {
        if doc.name.is_empty() {
            return Err(self.empty_name("type"));
        }
        let kind = match doc.kind {
            TypeKindDoc::Class => TypeKind::Class,
            TypeKindDoc::Struct => TypeKind::Struct,
        };
        let mut decl = TypeDecl::new(doc.name.clone(), kind);
        decl.accessibility = accessibility(doc.accessibility);
        decl.modifiers = doc
            .modifiers
            .iter()
            .fold(Modifiers::empty(), |acc, m| acc | modifier(*m));
        decl.type_params.clone_from(&doc.type_params);
        decl.constraints.clone_from(&doc.constraints);
        decl.members = doc
            .members
            .iter()
            .map(|m| self.member(m))
            .collect::<Result<_, _>>()?;
        decl.nested = self.types(&doc.nested)?;
        Ok(decl)
    }

    fn member(&self, doc: &MemberDoc) -> Result<MemberDecl, ModelError> {
        if doc.name.is_empty() {
            return Err(self.empty_name("member"));
        }
        let mut member = MemberDecl::field(doc.name.clone(), self.type_ref(&doc.ty)?);
        member.kind = match doc.kind {
            MemberKindDoc::Field => MemberKind::Field,
            MemberKindDoc::Property => MemberKind::Property,
        };
        for attr in &doc.attributes {
            member = member.with_attribute(self.attribute(attr)?);
        }
        Ok(member)
    }

    fn attribute(&self, doc: &AttributeDoc) -> Result<AttributeData, ModelError> {
        let mut attr = AttributeData::new(self.pool.named(&doc.class), doc.text.clone());
        for arg in &doc.args {
            let arg = match arg {
                AttrArgDoc::Type(ty) => AttrArg::Type(self.type_ref(ty)?),
                AttrArgDoc::Str(s) => AttrArg::Str(s.clone()),
                AttrArgDoc::Int(i) => AttrArg::Int(*i),
                AttrArgDoc::Expr(e) => AttrArg::Expr(e.clone()),
            };
            attr = attr.with_arg(arg);
        }
        Ok(attr)
    }

    fn type_ref(&self, ty: &TypeRef) -> Result<TypeId, ModelError> {
        match ty {
            TypeRef::Named(name) => {
                if name.is_empty() {
                    return Err(self.empty_name("type reference"));
                }
                Ok(self.pool.named(name))
            }
            TypeRef::Generic { def, args } => {
                let def_id = self.pool.named(def);
                if let ssg_ir::TypeData::Named { arity, .. } = self.pool.data(def_id) {
                    if usize::from(arity) != args.len() {
                        return Err(ModelError::GenericArity {
                            def: def.clone(),
                            expected: arity,
                            found: args.len(),
                        });
                    }
                }
                let args = args
                    .iter()
                    .map(|arg| self.type_ref(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.pool.generic(def_id, &args))
            }
            TypeRef::Array { elem, rank } => {
                if *rank == 0 {
                    return Err(ModelError::ZeroRank);
                }
                Ok(self.pool.array(self.type_ref(elem)?, *rank))
            }
            TypeRef::Param(name) => Ok(self.pool.param(name)),
        }
    }
}

fn accessibility(doc: AccessibilityDoc) -> Accessibility {
    match doc {
        AccessibilityDoc::Default => Accessibility::Default,
        AccessibilityDoc::Public => Accessibility::Public,
        AccessibilityDoc::Internal => Accessibility::Internal,
        AccessibilityDoc::Protected => Accessibility::Protected,
        AccessibilityDoc::Private => Accessibility::Private,
        AccessibilityDoc::ProtectedInternal => Accessibility::ProtectedInternal,
        AccessibilityDoc::PrivateProtected => Accessibility::PrivateProtected,
    }
}

fn modifier(doc: ModifierDoc) -> Modifiers {
    match doc {
        ModifierDoc::New => Modifiers::NEW,
        ModifierDoc::Static => Modifiers::STATIC,
        ModifierDoc::Abstract => Modifiers::ABSTRACT,
        ModifierDoc::Sealed => Modifiers::SEALED,
        ModifierDoc::Readonly => Modifiers::READONLY,
        ModifierDoc::Unsafe => Modifiers::UNSAFE,
        ModifierDoc::Partial => Modifiers::PARTIAL,
    }
}
