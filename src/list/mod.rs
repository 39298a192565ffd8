use std::fmt::{Debug, Formatter};
use std::iter;
use std::mem;

use log::debug;
use snafu::{ensure, OptionExt};

use crate::error::{EmptyContainerSnafu, Error, InvalidPositionSnafu, Result, StaleCursorSnafu};
use crate::list::arena::{Arena, Node, NodeId};
use crate::list::cursor::Cursor;
use crate::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
pub(crate) mod arena;

/// The `List` is a circular doubly-linked list.
/// It allows inserting, removing elements at any given position in constant time.
/// In compromise, accessing or mutating elements at any position take *O*(*n*) time.
///
/// The `List` contains:
/// - the node store `arena`, which owns every node of the list;
/// - the id of the `head` node, or `None` if the list is empty;
/// - a length field `len` indicating the length of the list.
///
/// The predecessor of the head is the back element of the list. There is no
/// sentinel node: the end position is represented by the end
/// [`Cursor`], which refers to no node at all.
pub struct List<T> {
    pub(crate) arena: Arena<T>,
    pub(crate) head: Option<NodeId>,
    /// the length of the list
    pub(crate) len: usize,
}

// private methods
impl<T> List<T> {
    pub(crate) fn tail(&self) -> Option<NodeId> {
        self.head.map(|head| self.arena[head].prev)
    }

    fn connect(&mut self, prev: NodeId, next: NodeId) {
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
    }

    /// Splice the detached node `node` into the ring, right before `next`.
    ///
    /// The head is left unchanged.
    fn attach_before(&mut self, next: NodeId, node: NodeId) {
        let prev = self.arena[next].prev;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Allocate a node for `elt` and make it the back element.
    fn attach_back(&mut self, elt: T) -> NodeId {
        let node = self.arena.insert(elt);
        match self.head {
            Some(head) => self.attach_before(head, node),
            None => {
                self.head = Some(node);
                self.len += 1;
            }
        }
        node
    }

    /// Close the ring over the gap left by `node`, which has just been
    /// released from the arena under the id `id`.
    ///
    /// The head moves to the successor of `node` if `node` was the head, and
    /// the list becomes empty if `node` was the only node.
    fn close_gap(&mut self, id: NodeId, node: &Node<T>) {
        if node.next == id {
            debug_assert_eq!(self.len, 1);
            self.head = None;
        } else {
            self.connect(node.prev, node.next);
            if self.head == Some(id) {
                self.head = Some(node.next);
            }
        }
        self.len -= 1;
    }

    /// Remove the node a cursor refers to, returning it together with the
    /// cursor to the node that followed it.
    fn detach(&mut self, position: Cursor, operation: &'static str) -> Result<(Node<T>, Cursor)> {
        let id = position
            .node()
            .context(InvalidPositionSnafu { operation })?;
        ensure!(!self.is_empty(), EmptyContainerSnafu { operation });
        let node = self
            .arena
            .try_remove(id)
            .ok_or_else(|| stale_cursor(operation, id))?;
        let following = if self.head == Some(node.next) {
            Cursor::END
        } else {
            Cursor::at(node.next)
        };
        self.close_gap(id, &node);
        Ok((node, following))
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeId, next: NodeId) {
        assert_eq!(self.arena[prev].next, next);
        assert_eq!(self.arena[next].prev, prev);
    }

    /// Walk the whole ring in both directions and check that it is closed
    /// after exactly `len` steps.
    #[cfg(test)]
    pub(crate) fn assert_ring(&self) {
        let head = match self.head {
            Some(head) => head,
            None => return assert_eq!(self.len, 0),
        };
        let mut node = head;
        for _ in 0..self.len {
            let next = self.arena[node].next;
            assert_eq!(self.arena[next].prev, node);
            node = next;
        }
        assert_eq!(node, head, "ring is not closed after `len` steps forward");
        for step in 1..self.len {
            node = self.arena[node].prev;
            assert_ne!(node, head, "ring closed early after {} steps backward", step);
        }
        assert_eq!(self.arena[node].prev, head);
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use circular_list::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            len: 0,
        }
    }

    /// Create an empty `List` whose node store has room for `capacity`
    /// nodes before it reallocates.
    ///
    /// # Examples
    /// ```
    /// use circular_list::List;
    /// let list: List<u32> = List::with_capacity(16);
    /// assert!(list.capacity() >= 16);
    /// assert!(list.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    /// Returns the number of nodes the list can hold without reallocating
    /// its node store.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Releases the memory of the node store that is not needed by the
    /// current elements.
    ///
    /// An empty list drops its whole node store. Otherwise only the unused
    /// capacity is released, since vacant slots between live nodes cannot
    /// move. Cursors taken before the call stay stale either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from_iter(0..64);
    /// let cursor = list.cursor_start();
    /// list.clear();
    /// assert!(list.capacity() >= 64);
    ///
    /// list.shrink_to_fit();
    /// assert_eq!(list.capacity(), 0);
    /// assert!(cursor.current(&list).is_err());
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.is_empty() {
            self.arena = Arena::new();
        } else {
            self.arena.shrink_to_fit();
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`, front to back.
    ///
    /// The node store keeps its slots, so that later insertions reuse them
    /// and cursors taken before stay detectably stale. Use
    /// [`List::shrink_to_fit`] to release them.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Ok(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert!(list.front().is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), Err(Error::EmptyContainer { operation: "front" }));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Result<&T> {
        let head = self.head.context(EmptyContainerSnafu { operation: "front" })?;
        Ok(&self.arena[head].element)
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.front_mut().is_err());
    ///
    /// list.push_front(1);
    /// *list.front_mut().unwrap() = 5;
    /// assert_eq!(list.front(), Ok(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        let head = self.head.context(EmptyContainerSnafu {
            operation: "front_mut",
        })?;
        Ok(&mut self.arena[head].element)
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.back().is_err());
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Ok(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Result<&T> {
        let tail = self.tail().context(EmptyContainerSnafu { operation: "back" })?;
        Ok(&self.arena[tail].element)
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let tail = self.tail().context(EmptyContainerSnafu {
            operation: "back_mut",
        })?;
        Ok(&mut self.arena[tail].element)
    }

    /// Adds an element first in the list.
    ///
    /// The element is appended as the back element, and then the head is
    /// rotated one step backward onto it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Ok(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let node = self.attach_back(elt);
        self.head = Some(node);
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.pop_front().is_err());
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert!(list.pop_front().is_err());
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        let head = self.head.context(EmptyContainerSnafu {
            operation: "pop_front",
        })?;
        let node = self.arena.remove(head);
        self.close_gap(head, &node);
        Ok(node.element)
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        self.attach_back(elt);
    }

    /// Removes the last element from a list and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.pop_back().is_err());
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Ok(3));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        let tail = self.tail().context(EmptyContainerSnafu {
            operation: "pop_back",
        })?;
        let node = self.arena.remove(tail);
        self.close_gap(tail, &node);
        Ok(node.element)
    }

    /// Inserts an element right before the node at `position`, and returns
    /// a cursor to the new element.
    ///
    /// Inserting before the end cursor, or into an empty list, appends the
    /// element at the back. Inserting before the front element makes the new
    /// element the front.
    ///
    /// # Errors
    ///
    /// [`Error::StaleCursor`] if `position` refers to a removed node of a
    /// non-empty list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from([1, 2, 4]);
    ///
    /// let mut cursor = list.cursor_start();
    /// cursor.move_next(&list).unwrap();
    /// let inserted = list.insert(cursor, 99).unwrap();
    /// assert_eq!(inserted.current(&list), Ok(&99));
    /// assert_eq!(list, List::from([1, 99, 2, 4]));
    ///
    /// list.insert(list.cursor_end(), 5).unwrap();
    /// list.insert(list.cursor_start(), 0).unwrap();
    /// assert_eq!(list, List::from([0, 1, 99, 2, 4, 5]));
    /// ```
    pub fn insert(&mut self, position: Cursor, elt: T) -> Result<Cursor> {
        let (at, head) = match (position.node(), self.head) {
            (Some(at), Some(head)) => (at, head),
            _ => return Ok(Cursor::at(self.attach_back(elt))),
        };
        if !self.arena.contains(at) {
            return Err(stale_cursor("insert", at));
        }
        let node = self.arena.insert(elt);
        self.attach_before(at, node);
        if at == head {
            self.head = Some(node);
        }
        Ok(Cursor::at(node))
    }

    /// Removes the element at `position`, and returns a cursor to the
    /// element that followed it, or the end cursor if the back element was
    /// removed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPosition`] if `position` is the end cursor;
    /// - [`Error::EmptyContainer`] if the list is empty;
    /// - [`Error::StaleCursor`] if `position` refers to a removed node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// let cursor = list.cursor_start().successor(&list).unwrap();
    /// let following = list.erase(cursor).unwrap();
    /// assert_eq!(following.current(&list), Ok(&3));
    /// assert_eq!(list, List::from([1, 3]));
    ///
    /// assert_eq!(
    ///     list.erase(list.cursor_end()),
    ///     Err(Error::InvalidPosition { operation: "erase" })
    /// );
    /// ```
    pub fn erase(&mut self, position: Cursor) -> Result<Cursor> {
        self.detach(position, "erase").map(|(_, following)| following)
    }

    /// Removes the element at `position` and returns it.
    ///
    /// Fails in the same cases as [`List::erase`].
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from(['a', 'b', 'c']);
    /// let back = list.cursor_end().predecessor(&list).unwrap();
    /// assert_eq!(list.remove(back), Ok('c'));
    /// assert_eq!(list, List::from(['a', 'b']));
    /// ```
    pub fn remove(&mut self, position: Cursor) -> Result<T> {
        self.detach(position, "remove").map(|(node, _)| node.element)
    }

    /// Replaces the contents of the list with `n` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.assign(4, 7);
    /// assert_eq!(list, List::from([7, 7, 7, 7]));
    /// ```
    pub fn assign(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        self.extend(iter::repeat(value).take(n));
    }

    /// Swaps the contents of two lists.
    ///
    /// Nodes are not moved or reallocated, so cursors into either list keep
    /// referring to the same elements, now held by the other list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut a = List::from([1, 2]);
    /// let mut b = List::from([10, 20, 30]);
    /// let cursor = a.cursor_start();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(b.len(), 2);
    /// assert_eq!(cursor.current(&b), Ok(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is the end cursor if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_start();
    /// assert_eq!(cursor.current(&list), Ok(&1));
    ///
    /// let empty = List::<i32>::new();
    /// assert_eq!(empty.cursor_start(), empty.cursor_end());
    /// ```
    pub fn cursor_start(&self) -> Cursor {
        self.head.map(Cursor::at).unwrap_or(Cursor::END)
    }

    /// Provides the end cursor, the position one past the back element.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_end();
    /// assert!(cursor.current(&list).is_err());
    /// assert_eq!(cursor.predecessor(&list).unwrap().current(&list), Ok(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor {
        Cursor::END
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

pub(crate) fn stale_cursor(operation: &'static str, id: NodeId) -> Error {
    debug!("`{}` rejected stale cursor {:?}", operation, id);
    StaleCursorSnafu {
        operation,
        index: id.index(),
    }
    .build()
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: crate::IntoIter<&'static str>) -> crate::IntoIter<&'a str> {
        x
    }
}
