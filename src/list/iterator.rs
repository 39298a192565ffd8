use crate::list::arena::{Arena, Node, NodeId, Slot};
use crate::list::List;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `front..=back` and the number of remaining
/// elements `len` to represent the part of the ring not yielded yet. The
/// iteration ends when `len` drops to zero, so walking around the ring never
/// loops.
///
/// # Examples
///
/// ```compile_fail
/// use circular_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    arena: &'a Arena<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            arena: &list.arena,
            front: list.head,
            back: list.tail(),
            len: list.len,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*front` and move `front` to its successor, or return `None`
    /// if all elements have been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.arena[self.front?];
        self.front = Some(node.next);
        self.len -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Return `*back` and move `back` to its predecessor, or return `None`
    /// if all elements have been yielded.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.arena[self.back?];
        self.back = Some(node.prev);
        self.len -= 1;
        Some(&node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Though the `IterMut` does not hold a reference to the list, it
/// actually *borrows* (mutably) from the list, so a phantom marker of
/// `&'a mut T` is added to protect the list from being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use circular_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: NonNull<Slot<T>>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let front = list.head;
        let back = list.tail();
        let len = list.len;
        Self {
            slots: list.arena.slots_ptr(),
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }

    /// Resolve `id` to its node for the rest of the borrow `'a`.
    ///
    /// # Safety
    ///
    /// `id` must be a live node of the borrowed list, and no reference to the
    /// same node may have been handed out before.
    unsafe fn node(&mut self, id: NodeId) -> Option<(&'a mut T, NodeId, NodeId)> {
        let slot = &mut *self.slots.as_ptr().add(id.index());
        let node = slot.get_mut(id)?;
        Some((&mut node.element, node.next, node.prev))
    }

    /// Read the node `id` without taking a mutable reference.
    ///
    /// # Safety
    ///
    /// `id` must be a node of the borrowed list that has not been yielded.
    unsafe fn peek(&self, id: NodeId) -> Option<&Node<T>> {
        let slot = &*self.slots.as_ptr().add(id.index());
        slot.get(id)
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut remaining = Vec::with_capacity(self.len);
        let mut front = self.front;
        for _ in 0..self.len {
            // SAFETY: the remaining `len` nodes from `front` have not been
            // yielded, so no mutable reference to them exists, and `&self`
            // keeps the iterator from yielding one while they are read.
            let node = match front.and_then(|id| unsafe { self.peek(id) }) {
                Some(node) => node,
                None => break,
            };
            remaining.push(&node.element);
            front = Some(node.next);
        }
        f.debug_tuple("IterMut").field(&remaining).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    /// Return `*front` and move `front` to its successor, or return `None`
    /// if all elements have been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `front` walks the live ring of the mutably borrowed list, and
        // `len` stops it before it reaches a node yielded from either end.
        let (element, next, _) = unsafe { self.node(self.front?)? };
        self.front = Some(next);
        self.len -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    /// Return `*back` and move `back` to its predecessor, or return `None`
    /// if all elements have been yielded.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the same as `next`.
        let (element, _, prev) = unsafe { self.node(self.back?)? };
        self.back = Some(prev);
        self.len -= 1;
        Some(element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = List::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        let mut list = List::with_capacity(N);
        list.extend(array);
        list
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn test_iter_after_slot_reuse() {
        // slots are reused out of order, iteration still follows the ring
        let mut list = List::from_iter(0..6);
        let mut cursor = list.cursor_start();
        cursor.move_next(&list).unwrap();
        list.erase(cursor).unwrap();
        list.pop_back().unwrap();
        list.push_front(10);
        list.push_front(11);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![11, 10, 0, 2, 3, 4]);
        list.iter_mut().rev().for_each(|item| *item *= 2);
        assert_eq!(Vec::from_iter(list), vec![22, 20, 0, 4, 6, 8]);
    }

    #[test]
    fn test_into_iter() {
        let list = List::from(["a", "b", "c", "d"]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some("a"));
        assert_eq!(iter.next_back(), Some("d"));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_extend() {
        let mut list = List::from([1, 2]);
        list.extend(&[3, 4]);
        list.extend(vec![5]);
        assert_eq!(list, List::from_iter(1..=5));
        assert_eq!(format!("{:?}", list), "[1, 2, 3, 4, 5]");
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2, 3, 4, 5])");
        let mut iter = list.iter_mut();
        iter.next();
        iter.next_back();
        assert_eq!(format!("{:?}", iter), "IterMut([2, 3, 4])");
        iter.next();
        iter.next();
        iter.next();
        assert_eq!(format!("{:?}", iter), "IterMut([])");
    }
}
