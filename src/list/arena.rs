//! The node store of a [`List`](crate::List).
//!
//! Nodes live in the slots of a `Vec`. A vacant slot remembers the next
//! vacant slot, forming a free chain headed by `Arena::first_free`, so that
//! released slots are reused before the vector grows.
//!
//! Every slot carries a generation which is bumped when its node is
//! released. A [`NodeId`] records the generation it was issued with, so an
//! id of a released node never resolves again, even after the slot has been
//! reused. A slot whose generation is exhausted is retired instead of
//! reused.
//!
//! Every arena also carries a process-wide unique tag, recorded in each
//! [`NodeId`] it issues, so ids of two different arenas never compare equal
//! and never resolve in each other.

use log::{debug, trace};
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ARENA_TAG: AtomicUsize = AtomicUsize::new(0);

/// Identifies a node by its arena, its slot and the generation of that slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    arena: usize,
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.index
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}@{}", self.index, self.generation, self.arena)
    }
}

pub(crate) struct Node<T> {
    pub(crate) next: NodeId,
    pub(crate) prev: NodeId,
    pub(crate) element: T,
}

pub(crate) struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

enum Entry<T> {
    Occupied(Node<T>),
    /// Points to the next vacant slot.
    Vacant(Option<usize>),
}

impl<T> Slot<T> {
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        match &self.entry {
            Entry::Occupied(node) if self.generation == id.generation => Some(node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match &mut self.entry {
            Entry::Occupied(node) if self.generation == id.generation => Some(node),
            _ => None,
        }
    }
}

pub(crate) struct Arena<T> {
    tag: usize,
    slots: Vec<Slot<T>>,
    first_free: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: NEXT_ARENA_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            first_free: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Release unused capacity of the slot vector.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }

    /// Allocate a node holding `element`. The new node links to itself.
    pub(crate) fn insert(&mut self, element: T) -> NodeId {
        match self.first_free {
            Some(index) => {
                let slot = &mut self.slots[index];
                let id = NodeId {
                    arena: self.tag,
                    index,
                    generation: slot.generation,
                };
                let entry = Entry::Occupied(Node {
                    next: id,
                    prev: id,
                    element,
                });
                match mem::replace(&mut slot.entry, entry) {
                    Entry::Vacant(next_free) => self.first_free = next_free,
                    Entry::Occupied(_) => unreachable!("free chain points to an occupied slot"),
                }
                id
            }
            None => {
                if self.slots.len() == self.slots.capacity() {
                    trace!("node arena full at {} slots, growing", self.slots.len());
                }
                let id = NodeId {
                    arena: self.tag,
                    index: self.slots.len(),
                    generation: 0,
                };
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(Node {
                        next: id,
                        prev: id,
                        element,
                    }),
                });
                id
            }
        }
    }

    /// Release the node `id` and return it, or `None` if `id` does not
    /// resolve to a live node.
    ///
    /// A slot whose generation cannot be bumped any further is left vacant
    /// and off the free chain, so `id` stays unresolvable for good.
    pub(crate) fn try_remove(&mut self, id: NodeId) -> Option<Node<T>> {
        if id.arena != self.tag {
            return None;
        }
        let slot = self.slots.get_mut(id.index)?;
        slot.get(id)?;
        let entry = match slot.generation.checked_add(1) {
            Some(generation) => {
                slot.generation = generation;
                let entry = mem::replace(&mut slot.entry, Entry::Vacant(self.first_free));
                self.first_free = Some(id.index);
                entry
            }
            None => {
                debug!("retiring node slot {}, generations exhausted", id.index);
                mem::replace(&mut slot.entry, Entry::Vacant(None))
            }
        };
        match entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant(_) => None,
        }
    }

    /// Like [`Arena::try_remove`], for ids that are known to be live.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not resolve to a live node.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<T> {
        match self.try_remove(id) {
            Some(node) => node,
            None => panic!("dangling node link {:?}", id),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        if id.arena != self.tag {
            return None;
        }
        self.slots.get(id.index)?.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.arena != self.tag {
            return None;
        }
        self.slots.get_mut(id.index)?.get_mut(id)
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Raw access to the slots, used by iterators that hand out mutable
    /// references to several distinct nodes at once.
    pub(crate) fn slots_ptr(&mut self) -> NonNull<Slot<T>> {
        // `Vec::as_mut_ptr` is never null, dangling but aligned if empty.
        NonNull::new(self.slots.as_mut_ptr()).unwrap_or_else(NonNull::dangling)
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node link {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("dangling node link {:?}", id),
        }
    }
}
