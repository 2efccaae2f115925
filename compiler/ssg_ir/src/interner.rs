//! Thread-safe string interner.
//!
//! Reads take a shared lock; only the first sighting of a string takes the
//! write lock. Strings are stored once as `Arc<str>` and shared between the
//! lookup map and the index table.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More strings than a `u32` index can address.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "string interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    map: FxHashMap<Arc<str>, Name>,
    strings: Vec<Arc<str>>,
}

/// String interner handing out [`Name`] handles.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let empty: Arc<str> = Arc::from("");
        let mut map = FxHashMap::default();
        map.insert(Arc::clone(&empty), Name::EMPTY);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }

        let mut table = self.table.write();
        // Another thread may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return Ok(name);
        }

        let count = table.strings.len();
        let raw = u32::try_from(count).map_err(|_| InternError::Overflow { count })?;
        let name = Name::from_raw(raw);
        let stored: Arc<str> = Arc::from(s);
        table.strings.push(Arc::clone(&stored));
        table.map.insert(stored, name);
        Ok(name)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Resolve a name back to its string.
    ///
    /// A name that did not come from this interner resolves to the empty
    /// string.
    pub fn lookup(&self, name: Name) -> Arc<str> {
        let table = self.table.read();
        match table.strings.get(name.index()) {
            Some(s) => Arc::clone(s),
            None => Arc::clone(&table.strings[0]),
        }
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("UnityEngine.SerializeField");
        let b = interner.intern("UnityEngine.SerializeField");
        assert_eq!(a, b);
        assert_eq!(&*interner.lookup(a), "UnityEngine.SerializeField");
    }

    #[test]
    fn test_distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("System.Int32");
        let b = interner.intern("System.String");
        assert_ne!(a, b);
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn test_empty_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(&*interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn test_unknown_name_resolves_to_empty() {
        let interner = StringInterner::new();
        assert_eq!(&*interner.lookup(Name::from_raw(999)), "");
    }

    #[test]
    fn test_concurrent_interning_agrees() {
        let interner = StringInterner::new();
        let names: Vec<Name> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| interner.intern("System.Collections.Generic.List`1")))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|_| panic!("interning thread panicked")))
                .collect()
        });
        assert!(names.windows(2).all(|w| w[0] == w[1]));
    }
}
