//! This crate provides a circular doubly-linked list whose nodes are owned by
//! an arena, together with cursors that do not borrow the list.
//!
//! The [`List`] allows inserting, removing elements at any given position in
//! constant time. In compromise, accessing or mutating elements at any position
//! take *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use circular_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let cursor = list.cursor_start();
//! list.insert(cursor, 0).unwrap(); // insert 0 at the beginning of the list
//! assert_eq!(cursor.current(&list), Ok(&1));
//! assert_eq!(list, List::from([0, 1, 2, 3, 4]));
//!
//! let third = cursor.successor(&list).unwrap().successor(&list).unwrap();
//! let following = list.erase(third).unwrap(); // removes 3
//! assert_eq!(following.current(&list), Ok(&4));
//! assert_eq!(list, List::from([0, 1, 2, 4]));
//!
//! list.push_front(5);
//! assert_eq!(list, List::from([5, 0, 1, 2, 4]));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌──────────────────────────────────────────────────────────┐
//!          ↓                                                          │
//!    ╔═══════════╗           ╔═══════════╗                    ╔═══════════╗
//!    ║   next    ║ ────────→ ║   next    ║ ────→ ┄┄ ────────→ ║   next    ║ ─┘
//!    ╟───────────╢           ╟───────────╢                    ╟───────────╢
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──── ┄┄ ←──────── ║   prev    ║
//! │  ╟───────────╢           ╟───────────╢                    ╟───────────╢
//! │  ║ payload T ║           ║ payload T ║                    ║ payload T ║
//! │  ╚═══════════╝           ╚═══════════╝                    ╚═══════════╝
//! │   Node 0 (head)             Node 1                         Node n-1 ↑
//! │       ↑                                                             │
//! └───────┼─────────────────────────────────────────────────────────────┘
//! ╔═══════════╗
//! ║   head    ║
//! ╟───────────╢
//! ║   len     ║
//! ╟───────────╢
//! ║   arena   ║  slots: [ Node | Node | vacant | Node | ... ]
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - the `arena`, a vector of slots that owns every node of the list;
//! - the id of the `head` node, absent if the list is empty;
//! - a length field `len` indicating the length of the list.
//!
//! Each node holds:
//! - the `next` link to the next element (the head, if it is the last element);
//! - the `prev` link to the previous element (the last element, if it is the head);
//! - the actual payload `T`.
//!
//! Links are not pointers but ids of arena slots, each carrying the generation
//! of its slot. A node in a single-element list links to itself.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1, ...,
//! *n* - 1 from the head, and the end position is indexed by *n*. There is no
//! node at the end position.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ```
//! use circular_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! A [`Cursor`] names a position in the list: a node, or the end position.
//! Cursors are plain `Copy` values and do not borrow the list, so they can be
//! kept while the list is mutated and passed back to [`List::insert`] and
//! [`List::erase`].
//!
//! - moving forward from the back element reaches the end position;
//! - moving backward from the end position reaches the back element;
//! - moving backward from the front element wraps around to the back element.
//!
//! A cursor to a removed node is stale. Using it fails with
//! [`Error::StaleCursor`], even if its arena slot has been reused since.
//!
//! ```
//! use circular_list::{Error, List};
//!
//! let mut list = List::from(['a', 'b', 'c']);
//! let b = list.cursor_start().successor(&list).unwrap();
//!
//! list.erase(b).unwrap();
//! list.push_back('d');
//! assert!(matches!(b.current(&list), Err(Error::StaleCursor { .. })));
//! ```
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::Cursor
//! [`Error::StaleCursor`]: crate::Error::StaleCursor

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;
