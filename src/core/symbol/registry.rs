//! Global symbol interner.
//!
//! Names map to `slotmap` keys under a single `RwLock`; a thread-local cache
//! keeps the common lookup of an already-interned name lock-free.

use std::cell::RefCell;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{DefaultKey, SlotMap};

use super::Symbol;

#[derive(Default)]
struct Interner {
    /// `None` marks an anonymous symbol
    names: SlotMap<DefaultKey, Option<Arc<str>>>,
    by_name: FxHashMap<Arc<str>, DefaultKey>,
}

static INTERNER: LazyLock<RwLock<Interner>> = LazyLock::new(|| RwLock::new(Interner::default()));

thread_local! {
    static NAME_CACHE: RefCell<FxHashMap<String, Symbol>> = RefCell::new(FxHashMap::default());
}

/// Create a `DefaultKey` from a 64-bit ID (inverse of `key.data().as_ffi()`)
#[inline]
pub(super) fn key_from_id(id: u64) -> DefaultKey {
    slotmap::KeyData::from_ffi(id).into()
}

/// Create or get the symbol with this name
#[must_use]
pub fn symb(name: &str) -> Symbol {
    if let Some(sym) = NAME_CACHE.with(|cache| cache.borrow().get(name).copied()) {
        return sym;
    }

    let existing = INTERNER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .by_name
        .get(name)
        .copied();

    let key = existing.unwrap_or_else(|| {
        let mut interner = INTERNER.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have interned the name between the two locks
        if let Some(&key) = interner.by_name.get(name) {
            return key;
        }
        let shared: Arc<str> = Arc::from(name);
        let key = interner.names.insert(Some(Arc::clone(&shared)));
        interner.by_name.insert(shared, key);
        key
    });

    let sym = Symbol(key);
    NAME_CACHE.with(|cache| {
        cache.borrow_mut().insert(name.to_owned(), sym);
    });
    sym
}

/// Get an existing symbol by name without creating it
#[must_use]
pub fn symb_get(name: &str) -> Option<Symbol> {
    INTERNER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .by_name
        .get(name)
        .map(|&key| Symbol(key))
}

#[must_use]
pub fn symbol_exists(name: &str) -> bool {
    symb_get(name).is_some()
}

/// Create a fresh anonymous symbol, distinct from every other symbol
#[must_use]
pub fn symb_anon() -> Symbol {
    let key = INTERNER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .names
        .insert(None);
    Symbol(key)
}

pub(super) fn name_of(key: DefaultKey) -> Option<Arc<str>> {
    INTERNER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .names
        .get(key)
        .cloned()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symb_is_idempotent() {
        let a = symb("registry_test_a");
        let b = symb("registry_test_a");
        assert_eq!(a, b);
        assert_eq!(symb_get("registry_test_a"), Some(a));
        assert!(symbol_exists("registry_test_a"));
        assert!(!symbol_exists("registry_test_never_created"));
    }

    #[test]
    fn test_anonymous_symbols_are_distinct() {
        let a = symb_anon();
        let b = symb_anon();
        assert_ne!(a, b);
        assert!(a.name().is_none());
    }

    #[test]
    fn test_interning_across_threads() {
        let here = symb("registry_test_threads");
        let there = std::thread::spawn(|| symb("registry_test_threads"))
            .join()
            .unwrap();
        assert_eq!(here, there);
    }
}
