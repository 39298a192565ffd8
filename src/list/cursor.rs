use snafu::OptionExt;

use crate::error::{InvalidPositionSnafu, Result};
use crate::list::arena::NodeId;
use crate::list::{stale_cursor, List};

/// A position in a `List`.
///
/// A `Cursor` either refers to a node of the list, or is the *end* cursor,
/// the position one past the back element. The end cursor is a pure tag: it
/// carries no information about the list it was taken from, so all end
/// cursors are equal.
///
/// Cursors do not borrow the list. Every operation takes the list the cursor
/// was obtained from, which leaves the list free to be mutated in between.
/// When the node a cursor refers to is removed, the cursor becomes *stale*,
/// and any further use of it is reported as
/// [`Error::StaleCursor`](crate::Error::StaleCursor).
///
/// Moving forward past the back element yields the end cursor, and moving
/// backward from the end cursor yields the back element. Moving backward
/// from the front element wraps around to the back element.
///
/// # Examples
///
/// ```
/// use circular_list::List;
///
/// // [ A B C D # ], where `#` is the end position
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(&list), Ok(&'A'));
///
/// cursor.move_next(&list).unwrap();
/// assert_eq!(cursor.current(&list), Ok(&'B'));
///
/// let mut cursor = list.cursor_end();
/// assert!(cursor.current(&list).is_err());
///
/// cursor.move_prev(&list).unwrap();
/// assert_eq!(cursor.current(&list), Ok(&'D'));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    node: Option<NodeId>,
}

impl Cursor {
    /// The end cursor of any list.
    pub const END: Cursor = Cursor { node: None };

    pub(crate) fn at(node: NodeId) -> Self {
        Self { node: Some(node) }
    }

    pub(crate) fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Returns `true` if this is the end cursor.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns a reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// - [`InvalidPosition`](crate::Error::InvalidPosition) if this is the
    ///   end cursor;
    /// - [`StaleCursor`](crate::Error::StaleCursor) if the node has been
    ///   removed.
    pub fn current<'a, T>(&self, list: &'a List<T>) -> Result<&'a T> {
        let id = self.node.context(InvalidPositionSnafu {
            operation: "current",
        })?;
        list.arena
            .get(id)
            .map(|node| &node.element)
            .ok_or_else(|| stale_cursor("current", id))
    }

    /// Returns a mutable reference to the element at the cursor.
    ///
    /// Fails in the same cases as [`Cursor::current`].
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_start();
    /// *cursor.current_mut(&mut list).unwrap() *= 10;
    /// assert_eq!(list.front(), Ok(&10));
    /// ```
    pub fn current_mut<'a, T>(&self, list: &'a mut List<T>) -> Result<&'a mut T> {
        let id = self.node.context(InvalidPositionSnafu {
            operation: "current_mut",
        })?;
        list.arena
            .get_mut(id)
            .map(|node| &mut node.element)
            .ok_or_else(|| stale_cursor("current_mut", id))
    }

    /// Moves the cursor to the next node, or to the end position if the
    /// cursor is at the back element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`InvalidPosition`](crate::Error::InvalidPosition) if this is already
    /// the end cursor, [`StaleCursor`](crate::Error::StaleCursor) if the node
    /// has been removed. The cursor is left unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let list = List::from([1, 2]);
    /// let mut cursor = list.cursor_start();
    /// assert!(cursor.move_next(&list).is_ok());
    /// assert!(cursor.move_next(&list).is_ok());
    /// assert!(cursor.is_end());
    /// assert_eq!(
    ///     cursor.move_next(&list),
    ///     Err(Error::InvalidPosition { operation: "move_next" })
    /// );
    /// ```
    pub fn move_next<T>(&mut self, list: &List<T>) -> Result<()> {
        let id = self.node.context(InvalidPositionSnafu {
            operation: "move_next",
        })?;
        let next = list
            .arena
            .get(id)
            .ok_or_else(|| stale_cursor("move_next", id))?
            .next;
        self.node = if list.head == Some(next) {
            None
        } else {
            Some(next)
        };
        Ok(())
    }

    /// Moves the cursor to the previous node. From the end position this is
    /// the back element; from the front element it wraps around to the back
    /// element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`InvalidPosition`](crate::Error::InvalidPosition) if the list is
    /// empty, [`StaleCursor`](crate::Error::StaleCursor) if the node has
    /// been removed. The cursor is left unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// cursor.move_prev(&list).unwrap();
    /// assert_eq!(cursor.current(&list), Ok(&3));
    ///
    /// let mut cursor = list.cursor_start();
    /// cursor.move_prev(&list).unwrap();
    /// assert_eq!(cursor.current(&list), Ok(&3));
    ///
    /// let empty = List::<i32>::new();
    /// assert!(empty.cursor_end().move_prev(&empty).is_err());
    /// ```
    pub fn move_prev<T>(&mut self, list: &List<T>) -> Result<()> {
        let tail = list.tail().context(InvalidPositionSnafu {
            operation: "move_prev",
        })?;
        self.node = match self.node {
            None => Some(tail),
            Some(id) => Some(
                list.arena
                    .get(id)
                    .ok_or_else(|| stale_cursor("move_prev", id))?
                    .prev,
            ),
        };
        Ok(())
    }

    /// Like [`Cursor::move_next`], but returns the moved cursor and keeps
    /// `self` in place.
    pub fn successor<T>(&self, list: &List<T>) -> Result<Cursor> {
        let mut cursor = *self;
        cursor.move_next(list)?;
        Ok(cursor)
    }

    /// Like [`Cursor::move_prev`], but returns the moved cursor and keeps
    /// `self` in place.
    pub fn predecessor<T>(&self, list: &List<T>) -> Result<Cursor> {
        let mut cursor = *self;
        cursor.move_prev(list)?;
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::cursor::Cursor;
    use crate::{Error, List};

    #[test]
    fn cursor_walk_forward() {
        let list = List::from([1, 2, 3, 4, 5]);
        let mut cursor = list.cursor_start();
        let mut visited = Vec::new();
        while !cursor.is_end() {
            visited.push(*cursor.current(&list).unwrap());
            cursor.move_next(&list).unwrap();
        }
        assert_eq!(visited, vec![1, 2, 3, 4, 5]);
        assert_eq!(cursor, list.cursor_end());
    }

    #[test]
    fn cursor_walk_backward() {
        let list = List::from([1, 2, 3, 4, 5]);
        let mut cursor = list.cursor_end();
        let mut visited = Vec::new();
        for _ in 0..list.len() {
            cursor.move_prev(&list).unwrap();
            visited.push(*cursor.current(&list).unwrap());
        }
        assert_eq!(visited, vec![5, 4, 3, 2, 1]);
        assert_eq!(cursor, list.cursor_start());
    }

    #[test]
    fn cursor_single_node() {
        let list = List::from([7]);
        let mut cursor = list.cursor_start();
        assert_eq!(cursor.current(&list), Ok(&7));

        // the only node is both front and back
        assert_eq!(cursor.predecessor(&list), Ok(cursor));

        cursor.move_next(&list).unwrap();
        assert!(cursor.is_end());
        cursor.move_prev(&list).unwrap();
        assert_eq!(cursor.current(&list), Ok(&7));
    }

    #[test]
    fn cursor_empty_list() {
        let list = List::<i32>::new();
        let mut cursor = list.cursor_start();
        assert_eq!(cursor, list.cursor_end());
        assert_eq!(
            cursor.current(&list),
            Err(Error::InvalidPosition {
                operation: "current"
            })
        );
        assert_eq!(
            cursor.move_next(&list),
            Err(Error::InvalidPosition {
                operation: "move_next"
            })
        );
        assert_eq!(
            cursor.move_prev(&list),
            Err(Error::InvalidPosition {
                operation: "move_prev"
            })
        );
        assert!(cursor.is_end());
    }

    #[test]
    fn cursor_equality() {
        let mut list = List::new();
        assert_eq!(list.cursor_start(), list.cursor_start());

        list.push_back(5);
        let first = list.cursor_start();
        let second = first.successor(&list).unwrap();
        assert_ne!(first, second);
        assert_eq!(second, Cursor::END);

        // end cursors compare equal whatever list they come from
        let other = List::from([1, 2, 3]);
        assert_eq!(list.cursor_end(), other.cursor_end());
        assert_eq!(Cursor::default(), Cursor::END);
    }

    #[test]
    fn cursor_end_survives_head_change() {
        let mut list = List::from([2, 3]);
        let end = list.cursor_end();
        let front = list.cursor_start();
        list.push_front(1);

        assert_eq!(end, list.cursor_end());
        assert_eq!(front.current(&list), Ok(&2));
        assert_eq!(end.predecessor(&list).unwrap().current(&list), Ok(&3));
    }

    #[test]
    fn cursor_stale_after_erase() {
        let mut list = List::from([1, 2, 3]);
        let second = list.cursor_start().successor(&list).unwrap();
        list.erase(second).unwrap();

        let index = second.node().unwrap().index();
        let stale = |operation| Error::StaleCursor { operation, index };
        assert_eq!(second.current(&list), Err(stale("current")));
        assert_eq!(second.successor(&list), Err(stale("move_next")));
        assert_eq!(second.predecessor(&list), Err(stale("move_prev")));

        // reusing the slot does not revive the cursor
        let inserted = list.insert(Cursor::END, 4).unwrap();
        assert_eq!(inserted.node().unwrap().index(), index);
        assert_eq!(second.current(&list), Err(stale("current")));
        assert_eq!(inserted.current(&list), Ok(&4));
    }

    #[test]
    fn cursor_current_mut() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.cursor_start();
        while !cursor.is_end() {
            *cursor.current_mut(&mut list).unwrap() += 10;
            cursor.move_next(&list).unwrap();
        }
        assert_eq!(list, List::from([11, 12, 13]));
        assert!(Cursor::END.current_mut(&mut list).is_err());
    }
}
