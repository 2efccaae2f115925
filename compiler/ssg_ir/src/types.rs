//! Semantic type pool.
//!
//! Every resolved type reference is interned into a [`TypePool`] and handed
//! around as a [`TypeId`]. Structurally equal types always share one id, so
//! identity checks are a `u32` comparison and never look at rendered text.
//!
//! Named types are keyed by their metadata name: namespace-qualified, nested
//! types joined with `+`, generic definitions carrying a `` `N `` arity
//! suffix (``System.Collections.Generic.Dictionary`2``).

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Name, StringInterner};

/// Interned type handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Structure of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    /// A non-generic type, or an open generic definition.
    Named { path: Name, arity: u8 },
    /// A closed generic instantiation of `def`.
    Generic { def: TypeId, args: Box<[TypeId]> },
    /// `elem[]`, or `elem[,]` and up for `rank > 1`.
    Array { elem: TypeId, rank: u8 },
    /// A type parameter of an enclosing declaration.
    Param { name: Name },
}

struct PoolTable {
    map: FxHashMap<TypeData, TypeId>,
    types: Vec<TypeData>,
}

/// Append-only, thread-safe pool of interned types.
pub struct TypePool {
    names: StringInterner,
    table: RwLock<PoolTable>,
}

impl TypePool {
    pub fn new() -> Self {
        TypePool {
            names: StringInterner::new(),
            table: RwLock::new(PoolTable {
                map: FxHashMap::default(),
                types: Vec::with_capacity(64),
            }),
        }
    }

    /// The interner holding metadata names and type parameter names.
    pub fn names(&self) -> &StringInterner {
        &self.names
    }

    fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.table.read().map.get(&data) {
            return id;
        }

        let mut table = self.table.write();
        if let Some(&id) = table.map.get(&data) {
            return id;
        }

        let count = table.types.len();
        let raw = u32::try_from(count)
            .unwrap_or_else(|_| panic!("type pool exceeded capacity: {count} types"));
        let id = TypeId(raw);
        table.types.push(data.clone());
        table.map.insert(data, id);
        id
    }

    /// Intern a named type by metadata name.
    ///
    /// The arity is taken from a trailing `` `N `` suffix, if any.
    pub fn named(&self, metadata_name: &str) -> TypeId {
        let arity = metadata_arity(metadata_name);
        let path = self.names.intern(metadata_name);
        self.intern(TypeData::Named { path, arity })
    }

    /// Intern a closed generic instantiation.
    pub fn generic(&self, def: TypeId, args: &[TypeId]) -> TypeId {
        self.intern(TypeData::Generic {
            def,
            args: args.into(),
        })
    }

    /// Intern an array type. A rank of zero is treated as one.
    pub fn array(&self, elem: TypeId, rank: u8) -> TypeId {
        self.intern(TypeData::Array {
            elem,
            rank: rank.max(1),
        })
    }

    /// Intern a type parameter reference.
    pub fn param(&self, name: &str) -> TypeId {
        let name = self.names.intern(name);
        self.intern(TypeData::Param { name })
    }

    /// Look up the structure behind an id.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this pool.
    pub fn data(&self, id: TypeId) -> TypeData {
        let table = self.table.read();
        match table.types.get(id.index()) {
            Some(data) => data.clone(),
            None => panic!("{id:?} does not belong to this type pool"),
        }
    }

    /// Metadata name of a named type, `None` for any other shape.
    pub fn metadata_name(&self, id: TypeId) -> Option<Arc<str>> {
        match self.data(id) {
            TypeData::Named { path, .. } => Some(self.names.lookup(path)),
            _ => None,
        }
    }

    /// Number of distinct types interned so far.
    pub fn len(&self) -> usize {
        self.table.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a type as fully qualified C# source text.
    ///
    /// Predefined types use their keyword (`int`, `string`); every other named
    /// type is spelled from `global::` so the output does not depend on the
    /// usings of the file it lands in.
    pub fn render(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.render_into(&mut out, id);
        out
    }

    /// Render a list of types separated by `", "`.
    pub fn render_list(&self, ids: &[TypeId]) -> String {
        let mut out = String::new();
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.render_into(&mut out, id);
        }
        out
    }

    fn render_into(&self, out: &mut String, id: TypeId) {
        match self.data(id) {
            TypeData::Named { path, .. } => {
                let path = self.names.lookup(path);
                render_path(out, &path);
            }
            TypeData::Generic { def, args } => {
                self.render_into(out, def);
                out.push('<');
                out.push_str(&self.render_list(&args));
                out.push('>');
            }
            TypeData::Array { elem, rank } => {
                self.render_into(out, elem);
                out.push('[');
                for _ in 1..rank {
                    out.push(',');
                }
                out.push(']');
            }
            TypeData::Param { name } => {
                out.push_str(&self.names.lookup(name));
            }
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Arity encoded in a metadata name's trailing `` `N `` suffix.
fn metadata_arity(metadata_name: &str) -> u8 {
    metadata_name
        .rsplit_once('`')
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(0)
}

fn keyword_alias(path: &str) -> Option<&'static str> {
    Some(match path {
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Char" => "char",
        "System.Decimal" => "decimal",
        "System.Double" => "double",
        "System.Single" => "float",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Object" => "object",
        "System.String" => "string",
        _ => return None,
    })
}

fn render_path(out: &mut String, path: &str) {
    if let Some(keyword) = keyword_alias(path) {
        out.push_str(keyword);
        return;
    }

    out.push_str("global::");
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '+' => out.push('.'),
            // Drop the arity suffix: `List`1` renders as `List`.
            '`' => {
                while chars.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }
}
