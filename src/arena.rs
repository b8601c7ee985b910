//! Index-based node storage shared by the tree engines.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to a node stored in an `Arena<T>`.
///
/// Handles are only meaningful for the arena that produced them. A handle to a freed slot may be
/// handed out again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<NodeId>),
}

/// A slab of nodes addressed by `NodeId`.
///
/// Children refer to each other through handles instead of owning pointers, so a tree never forms
/// an ownership cycle and a lineage of ancestors is just a `Vec<NodeId>`. Freed slots are chained
/// into a free list and reused before the backing vector grows. Every object still in the arena is
/// dropped when the arena is dropped.
///
/// # Examples
///
/// ```
/// use balanced_trees::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    head: Option<NodeId>,
    slots: Vec<Slot<T>>,
    size: usize,
}

impl<T> Arena<T> {
    fn is_valid_id(&self, id: NodeId) -> bool {
        id.0 < self.slots.len()
    }

    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            slots: Vec::with_capacity(capacity),
            size: 0,
        }
    }

    /// Stores an object in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.size += 1;

        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            }
            Some(id) => {
                let vacant_slot = mem::replace(&mut self.slots[id.0], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next_id) => {
                        self.head = next_id;
                        id
                    }
                    Slot::Occupied(_) => panic!("Expected a vacant slot at the free list head."),
                }
            }
        }
    }

    /// Removes an object from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, id: NodeId) -> T {
        if !self.is_valid_id(id) {
            panic!("Error: attempting to free invalid slot.");
        }
        if let Slot::Vacant(_) = self.slots[id.0] {
            panic!("Error: attempting to free vacant slot.");
        }
        let old_slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.head.take()));
        match old_slot {
            Slot::Occupied(value) => {
                self.size -= 1;
                self.head = Some(id);
                value
            }
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a live object.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if !self.is_valid_id(id) {
            return None;
        }
        match self.slots[id.0] {
            Slot::Occupied(ref value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if !self.is_valid_id(id) {
            return None;
        }
        match self.slots[id.0] {
            Slot::Occupied(ref mut value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns mutable references to two distinct live objects at once.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or if either handle does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::arena::Arena;
    /// use std::mem;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(1);
    /// let y = arena.allocate(2);
    /// {
    ///     let (a, b) = arena.pair_mut(x, y);
    ///     mem::swap(a, b);
    /// }
    /// assert_eq!((arena[x], arena[y]), (2, 1));
    /// ```
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        assert_ne!(a, b, "Expected two distinct slots.");
        let (low, high, swapped) = if a.0 < b.0 {
            (a.0, b.0, false)
        } else {
            (b.0, a.0, true)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let low_value = match head[low] {
            Slot::Occupied(ref mut value) => value,
            Slot::Vacant(_) => panic!("Error: attempting to borrow vacant slot."),
        };
        let high_value = match tail[0] {
            Slot::Occupied(ref mut value) => value,
            Slot::Vacant(_) => panic!("Error: attempting to borrow vacant slot."),
        };
        if swapped {
            (high_value, low_value)
        } else {
            (low_value, high_value)
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every object in the arena and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.size = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: node id out of bounds.")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: node id out of bounds.")
    }
}
