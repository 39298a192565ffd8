use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    /// Clone the elements front to back into a new, independent list.
    fn clone(&self) -> Self {
        let mut list = List::with_capacity(self.len());
        list.extend(self.iter().cloned());
        list
    }

    /// Copy-and-swap: the clone of `other` is completed before `self` is
    /// touched, so a panicking `T::clone` leaves `self` unchanged.
    fn clone_from(&mut self, other: &Self) {
        let mut copy = other.clone();
        self.swap(&mut copy);
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}
