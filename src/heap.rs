//! Slot arena backing the shared object tables.
//!
//! Objects are addressed by generated numeric ids rather than references,
//! so a stale handle shows up as a failed lookup instead of a lifetime bug.
//! Freed slots are recycled most-recently-freed first, and an id generated
//! for a slot stays stable until that slot is freed.

use alloc::vec::Vec;

/// Identifier of an image slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Identifier of a backing-buffer slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Identifier of a rendering-context slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(pub u32);

impl core::fmt::Display for ImageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl core::fmt::Display for BufferId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl core::fmt::Display for ContextId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounded arena of `T` slots with id-based addressing.
pub struct Heap<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
    capacity: usize,
}

impl<T> Heap<T> {
    /// Create an arena holding at most `capacity` live objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Heap {
            slots: Vec::new(),
            free: Vec::new(),
            capacity,
        }
    }

    /// Allocate a slot for `value`, recycling the most recently freed slot
    /// if any. Returns `None` when the arena is exhausted.
    pub fn allocate(&mut self, value: T) -> Option<u32> {
        if let Some(id) = self.free.pop() {
            self.slots[id as usize] = Some(value);
            return Some(id);
        }
        if self.slots.len() >= self.capacity {
            return None;
        }
        let id = self.slots.len() as u32;
        self.slots.push(Some(value));
        Some(id)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.get(id as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.slots.get_mut(id as usize)?.as_mut()
    }

    /// Free a slot, returning its value. Freeing an empty or out-of-range
    /// slot returns `None` and changes nothing.
    pub fn free(&mut self, id: u32) -> Option<T> {
        let value = self.slots.get_mut(id as usize)?.take()?;
        self.free.push(id);
        Some(value)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_get_free() {
        let mut heap: Heap<u8> = Heap::with_capacity(4);
        let a = heap.allocate(10).unwrap();
        let b = heap.allocate(20).unwrap();
        assert_ne!(a, b);
        assert_eq!(heap.get(a), Some(&10));
        assert_eq!(heap.free(a), Some(10));
        assert_eq!(heap.get(a), None);
        assert_eq!(heap.get(b), Some(&20));
    }

    #[test]
    fn freed_slot_is_recycled_first() {
        let mut heap: Heap<u8> = Heap::with_capacity(4);
        let a = heap.allocate(1).unwrap();
        heap.allocate(2).unwrap();
        heap.free(a);
        assert_eq!(heap.allocate(3), Some(a));
    }

    #[test]
    fn double_free_is_a_no_op() {
        let mut heap: Heap<u8> = Heap::with_capacity(4);
        let a = heap.allocate(1).unwrap();
        assert_eq!(heap.free(a), Some(1));
        assert_eq!(heap.free(a), None);
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn exhaustion_returns_none() {
        let mut heap: Heap<u8> = Heap::with_capacity(2);
        heap.allocate(1).unwrap();
        heap.allocate(2).unwrap();
        assert_eq!(heap.allocate(3), None);
    }
}
