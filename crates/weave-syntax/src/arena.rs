//! Owned storage for the syntax tree: a segmented bump allocator for node
//! and token records, and an `FxHashMap`-backed string interner.
//!
//! Nodes and tokens are addressed by index (`NodeId`/`TokenId`), not by raw
//! pointer, so there is no pointer-stability requirement to uphold: growing
//! the arena never invalidates a previously issued id. `Blocks<T>` still
//! grows in fixed-capacity segments sized `max(requested, 64 KiB)` rather
//! than as one reallocating `Vec<T>`, so a large parse does not pay for
//! repeated doubling copies of already-placed records.

use std::mem;

use rustc_hash::FxHashMap;
use std::rc::Rc;

const DEFAULT_BLOCK_BYTES: usize = 64 * 1024;

/// A segmented, append-only store of `T`, addressed by `u32` index.
pub struct Blocks<T> {
    block_len: usize,
    blocks: Vec<Vec<T>>,
}

impl<T> Blocks<T> {
    pub fn new() -> Self {
        let element_size = mem::size_of::<T>().max(1);
        let block_len = (DEFAULT_BLOCK_BYTES / element_size).max(1);
        Self {
            block_len,
            blocks: vec![Vec::with_capacity(block_len)],
        }
    }

    pub fn push(&mut self, value: T) -> u32 {
        let last = self.blocks.last_mut().expect("at least one block");
        if last.len() == last.capacity() {
            self.blocks.push(Vec::with_capacity(self.block_len));
        }
        let block_index = self.blocks.len() - 1;
        let block = self.blocks.last_mut().expect("at least one block");
        let offset = block.len();
        block.push(value);
        (block_index * self.block_len + offset) as u32
    }

    pub fn get(&self, id: u32) -> &T {
        let id = id as usize;
        let block_index = id / self.block_len;
        let offset = id % self.block_len;
        &self.blocks[block_index][offset]
    }

    pub fn len(&self) -> u32 {
        let full_blocks = self.blocks.len().saturating_sub(1);
        (full_blocks * self.block_len + self.blocks.last().map_or(0, |b| b.len())) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Blocks<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An interned string handle. Equal spellings always intern to the same
/// `Symbol` within one `StringInterner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub u32);

/// Deduplicating string store backed by `rustc_hash::FxHashMap`, matching
/// the hash function the keyword table already uses.
#[derive(Default)]
pub struct StringInterner {
    strings: Vec<Rc<str>>,
    lookup: FxHashMap<Rc<str>, Symbol>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&symbol) = self.lookup.get(text) {
            return symbol;
        }
        let shared: Rc<str> = Rc::from(text);
        let symbol = Symbol(self.strings.len() as u32);
        self.strings.push(shared.clone());
        self.lookup.insert(shared, symbol);
        symbol
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_assigns_sequential_ids() {
        let mut blocks = Blocks::new();
        let a = blocks.push(10);
        let b = blocks.push(20);
        assert_eq!(*blocks.get(a), 10);
        assert_eq!(*blocks.get(b), 20);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn blocks_spans_multiple_segments() {
        let mut blocks: Blocks<u8> = Blocks::new();
        let block_len = blocks.block_len;
        for i in 0..(block_len * 2 + 5) {
            let id = blocks.push((i % 251) as u8);
            assert_eq!(*blocks.get(id), (i % 251) as u8);
        }
        assert_eq!(blocks.len() as usize, block_len * 2 + 5);
    }

    #[test]
    fn interner_gives_same_symbol_for_equal_spellings() {
        let mut interner = StringInterner::new();
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        let c = interner.intern("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "hello");
    }
}
