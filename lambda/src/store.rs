//! The definition store: an open-addressing hash table keyed by
//! identifier, retaining named terms across REPL lines.

use crate::ast::{IdentRef, Identifier, Term};

const INITIAL_CAPACITY: usize = 16;

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

#[derive(Debug)]
struct Entry {
    identifier: IdentRef,
    term: Term,
}

/// Linear-probing table of named definitions. Capacity stays a power of
/// two and doubles when an insertion finds the table full; redefining
/// an existing name overwrites its slot in place. Deletion is never
/// exposed, so there are no tombstones.
#[derive(Debug)]
pub struct Definitions {
    entries: Vec<Option<Entry>>,
    size: usize,
}

impl Definitions {
    pub fn new() -> Self {
        let mut entries = Vec::new();
        entries.resize_with(INITIAL_CAPACITY, || None);
        Definitions { entries, size: 0 }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&Term> {
        let index = self.probe(identifier)?;
        self.entries[index].as_ref().map(|entry| &entry.term)
    }

    /// Stores a definition. An equal identifier found mid-probe has its
    /// term replaced in place and the size stays unchanged; otherwise
    /// the entry lands in the first empty slot from its home.
    pub fn set(&mut self, identifier: IdentRef, term: Term) {
        if self.size == self.entries.len() {
            self.grow();
        }
        // the table is no longer full, so the probe lands somewhere
        if let Some(index) = self.probe(&identifier) {
            match &mut self.entries[index] {
                Some(entry) => entry.term = term,
                slot => {
                    *slot = Some(Entry { identifier, term });
                    self.size += 1;
                }
            }
        }
    }

    /// First slot from the identifier's home that is empty or holds an
    /// equal identifier; `None` only when the table is full of other
    /// keys.
    fn probe(&self, identifier: &Identifier) -> Option<usize> {
        let capacity = self.entries.len();
        let home = hash_key(identifier) as usize % capacity;
        for offset in 0..capacity {
            let index = (home + offset) % capacity;
            match &self.entries[index] {
                Some(entry) if entry.identifier.as_ref() != identifier => {}
                _ => return Some(index),
            }
        }
        None
    }

    /// Doubles the slot array and rehashes every live entry into it.
    fn grow(&mut self) {
        let doubled = self.entries.len() * 2;
        let mut entries = Vec::new();
        entries.resize_with(doubled, || None);
        let old = std::mem::replace(&mut self.entries, entries);
        for entry in old.into_iter().flatten() {
            if let Some(index) = self.probe(&entry.identifier) {
                self.entries[index] = Some(entry);
            }
        }
    }
}

impl Default for Definitions {
    fn default() -> Self {
        Definitions::new()
    }
}

/// 64-bit FNV-1a over the name bytes, with the subscript folded in so
/// `x` and `x1` take different home slots even under a pathological
/// name-hash collision. A missing subscript folds as -1, keeping it
/// distinct from `x0`.
fn hash_key(identifier: &Identifier) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in identifier.name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash.wrapping_mul(31)
        .wrapping_add(identifier.subscript.map_or(u64::MAX, |subscript| subscript))
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;

    fn ident(name: &str, subscript: Option<u64>) -> IdentRef {
        Rc::new(Identifier::new(name, subscript))
    }

    #[test]
    fn get_on_empty_table() {
        let definitions = Definitions::new();
        assert!(definitions.is_empty());
        assert_eq!(definitions.capacity(), 16);
        assert_eq!(definitions.get(&Identifier::new("id", None)), None);
    }

    #[test]
    fn set_then_get() {
        let mut definitions = Definitions::new();
        definitions.set(ident("id", None), Term::Numeral(1));
        assert_eq!(definitions.len(), 1);
        assert_eq!(
            definitions.get(&Identifier::new("id", None)),
            Some(&Term::Numeral(1))
        );
        assert_eq!(definitions.get(&Identifier::new("other", None)), None);
    }

    #[test]
    fn redefinition_overwrites_in_place() {
        let mut definitions = Definitions::new();
        definitions.set(ident("id", None), Term::Numeral(1));
        definitions.set(ident("id", None), Term::Numeral(2));
        assert_eq!(definitions.len(), 1);
        assert_eq!(
            definitions.get(&Identifier::new("id", None)),
            Some(&Term::Numeral(2))
        );
    }

    #[test]
    fn subscripts_key_distinct_entries() {
        let mut definitions = Definitions::new();
        definitions.set(ident("x", None), Term::Numeral(0));
        definitions.set(ident("x", Some(0)), Term::Numeral(1));
        definitions.set(ident("x", Some(1)), Term::Numeral(2));
        assert_eq!(definitions.len(), 3);
        assert_eq!(
            definitions.get(&Identifier::new("x", None)),
            Some(&Term::Numeral(0))
        );
        assert_eq!(
            definitions.get(&Identifier::new("x", Some(0))),
            Some(&Term::Numeral(1))
        );
        assert_eq!(
            definitions.get(&Identifier::new("x", Some(1))),
            Some(&Term::Numeral(2))
        );
    }

    #[test]
    fn growth_doubles_and_rehashes() {
        let mut definitions = Definitions::new();
        for i in 0..17 {
            definitions.set(ident("x", Some(i)), Term::Numeral(i));
        }
        assert_eq!(definitions.len(), 17);
        assert_eq!(definitions.capacity(), 32);
        assert!(definitions.len() < definitions.capacity());
        for i in 0..17 {
            assert_eq!(
                definitions.get(&Identifier::new("x", Some(i))),
                Some(&Term::Numeral(i))
            );
        }
    }

    #[test]
    fn overwrites_do_not_trigger_growth() {
        let mut definitions = Definitions::new();
        for round in 0..4 {
            for i in 0..10 {
                definitions.set(ident("x", Some(i)), Term::Numeral(round));
            }
        }
        assert_eq!(definitions.len(), 10);
        assert_eq!(definitions.capacity(), 16);
    }
}
