//! Generational arena backing the handler ring.
//!
//! Nodes live in a `Vec` of slots; freed slots are threaded onto a free list
//! and reused. Every slot carries a generation counter that is bumped on
//! removal, so a stale [`NodeKey`] never resolves to whatever was stored in
//! the slot afterwards.

use std::fmt;

/// Stable address of a handler node: slot index plus generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    index: u32,
    generation: u32,
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({}:{})", self.index, self.generation)
    }
}

enum Entry<V> {
    Occupied { value: V, generation: u32 },
    Vacant { next_free: Option<u32>, generation: u32 },
}

pub(crate) struct Arena<V> {
    entries: Vec<Entry<V>>,
    free_head: Option<u32>,
    len: usize,
}

impl<V> Arena<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, value: V) -> NodeKey {
        self.len += 1;
        if let Some(index) = self.free_head {
            let entry = &mut self.entries[index as usize];
            let (next_free, generation) = match *entry {
                Entry::Vacant {
                    next_free,
                    generation,
                } => (next_free, generation),
                Entry::Occupied { .. } => unreachable!("free list pointed to occupied slot"),
            };
            self.free_head = next_free;
            *entry = Entry::Occupied { value, generation };
            return NodeKey { index, generation };
        }

        let index = u32::try_from(self.entries.len()).unwrap_or_else(|_| {
            panic!("handler arena overflow: more than {} live handlers", u32::MAX)
        });
        self.entries.push(Entry::Occupied {
            value,
            generation: 0,
        });
        NodeKey {
            index,
            generation: 0,
        }
    }

    /// Removes and returns the value at `key`; `None` if `key` is stale.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<V> {
        let entry = self.entries.get_mut(key.index as usize)?;
        match entry {
            Entry::Occupied { generation, .. } if *generation == key.generation => {
                let vacant = Entry::Vacant {
                    next_free: self.free_head,
                    generation: generation.wrapping_add(1),
                };
                let old = std::mem::replace(entry, vacant);
                self.free_head = Some(key.index);
                self.len -= 1;
                match old {
                    Entry::Occupied { value, .. } => Some(value),
                    Entry::Vacant { .. } => unreachable!(),
                }
            }
            _ => None,
        }
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&V> {
        match self.entries.get(key.index as usize)? {
            Entry::Occupied { value, generation } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut V> {
        match self.entries.get_mut(key.index as usize)? {
            Entry::Occupied { value, generation } if *generation == key.generation => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.insert("a");
        let b = arena.insert("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_reused_slot_rejects_stale_key() {
        let mut arena = Arena::with_capacity(0);
        let old = arena.insert(1);
        arena.remove(old);

        let new = arena.insert(2);
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut arena = Arena::with_capacity(1);
        let k = arena.insert(10);
        if let Some(v) = arena.get_mut(k) {
            *v += 5;
        }
        assert_eq!(arena.get(k), Some(&15));
    }
}
