//! Slot arena addressing nodes by `u32` index.
//!
//! Released slots go on a free list and are handed out again by the next
//! [`Arena::alloc`]. Indexing a released slot panics: a live link must never
//! point at one.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<u32>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its slot index.
    pub fn alloc(&mut self, node: N) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(node);
                i
            }
            None => {
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Takes the node out of slot `i`, making the slot reusable.
    pub fn release(&mut self, i: u32) -> Option<N> {
        let node = self.slots.get_mut(i as usize)?.take()?;
        self.free.push(i);
        Some(node)
    }

    pub fn get(&self, i: u32) -> Option<&N> {
        self.slots.get(i as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, i: u32) -> Option<&mut N> {
        self.slots.get_mut(i as usize)?.as_mut()
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, i: u32) -> &N {
        self.slots[i as usize]
            .as_ref()
            .expect("link points at a live slot")
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, i: u32) -> &mut N {
        self.slots[i as usize]
            .as_mut()
            .expect("link points at a live slot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!((a, b), (0, 1));
        assert_eq!(arena.release(a), Some("a"));
        assert_eq!(arena.release(a), None);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.live(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(arena[c], "c");
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let mut arena: Arena<i32> = Arena::new();
        assert_eq!(arena.get(7), None);
        assert_eq!(arena.get_mut(7), None);
        assert_eq!(arena.release(7), None);
    }

    #[test]
    #[should_panic]
    fn indexing_a_released_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.release(a);
        let _ = arena[a];
    }
}
