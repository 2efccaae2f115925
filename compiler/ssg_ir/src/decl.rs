//! Declarations handed over by the traversal front end.

use bitflags::bitflags;

use crate::{AttributeData, TypeId};

/// Whether a member is a field or an auto-property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

/// A field or property of a user type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub ty: TypeId,
    pub kind: MemberKind,
    pub attributes: Vec<AttributeData>,
}

impl MemberDecl {
    pub fn field(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDecl {
            name: name.into(),
            ty,
            kind: MemberKind::Field,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attr: AttributeData) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Whether any attribute on this member is of class `class`.
    pub fn has_attribute(&self, class: TypeId) -> bool {
        self.attributes.iter().any(|a| a.class == class)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
        }
    }
}

/// Declared accessibility. `Default` means none was written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    #[default]
    Default,
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
}

impl Accessibility {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Accessibility::Default => None,
            Accessibility::Public => Some("public"),
            Accessibility::Internal => Some("internal"),
            Accessibility::Protected => Some("protected"),
            Accessibility::Private => Some("private"),
            Accessibility::ProtectedInternal => Some("protected internal"),
            Accessibility::PrivateProtected => Some("private protected"),
        }
    }
}

bitflags! {
    /// Declaration modifiers other than accessibility.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u8 {
        const NEW = 1 << 0;
        const STATIC = 1 << 1;
        const ABSTRACT = 1 << 2;
        const SEALED = 1 << 3;
        const READONLY = 1 << 4;
        const UNSAFE = 1 << 5;
        const PARTIAL = 1 << 6;
    }
}

impl Modifiers {
    /// Keywords in the order C# declarations conventionally spell them.
    /// `partial` is always last, as the language requires.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        [
            (Modifiers::NEW, "new"),
            (Modifiers::STATIC, "static"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::SEALED, "sealed"),
            (Modifiers::READONLY, "readonly"),
            (Modifiers::UNSAFE, "unsafe"),
            (Modifiers::PARTIAL, "partial"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, kw)| kw)
    }
}

/// A class or struct declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub modifiers: Modifiers,
    /// Type parameter names, e.g. `["TKey", "TValue"]`.
    pub type_params: Vec<String>,
    /// Constraint clauses as source text, e.g. `where T : class`.
    pub constraints: Vec<String>,
    pub members: Vec<MemberDecl>,
    pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDecl {
            name: name.into(),
            kind,
            accessibility: Accessibility::Default,
            modifiers: Modifiers::empty(),
            type_params: Vec::new(),
            constraints: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Classes have reference semantics; structs are value types.
    pub fn is_reference_type(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(Modifiers::PARTIAL)
    }
}

/// A type or namespace declared directly inside a file or namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Type(TypeDecl),
    Namespace(NamespaceDecl),
}

/// A namespace block and what it contains.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NamespaceDecl {
    pub name: String,
    /// Using targets declared inside the block, without `using` and `;`.
    pub usings: Vec<String>,
    /// Types and inner namespaces in declaration order.
    pub items: Vec<Item>,
}

/// One source file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SourceUnit {
    /// Path as reported by the host, either separator style.
    pub path: String,
    /// File-level using targets, without `using` and `;`.
    pub usings: Vec<String>,
    /// Top-level types and namespaces in declaration order.
    pub items: Vec<Item>,
}
