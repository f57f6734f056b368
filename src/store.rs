//! Append-only, in-memory storage for one session

use crate::types::Memory;

/// Memory store for one journaling session.
///
/// Records are kept in insertion order and are never updated or removed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    memories: Vec<Memory>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a memory to the end of the store.
    ///
    /// No validation happens here; callers check the text before appending.
    pub fn append(&mut self, memory: Memory) -> &Memory {
        self.memories.push(memory);
        &self.memories[self.memories.len() - 1]
    }

    /// All memories in insertion order
    pub fn all(&self) -> &[Memory] {
        &self.memories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Memory> {
        self.memories.iter()
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }
}

impl<'a> IntoIterator for &'a MemoryStore {
    type Item = &'a Memory;
    type IntoIter = std::slice::Iter<'a, Memory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
