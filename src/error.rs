use snafu::Snafu;

/// Errors reported by [`List`](crate::List) and
/// [`Cursor`](crate::list::cursor::Cursor) operations.
///
/// `operation` names the method that failed, e.g. `"pop_front"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The operation needs at least one element, but the list is empty.
    #[snafu(display("`{}` called on an empty list", operation))]
    EmptyContainer { operation: &'static str },

    /// The cursor is at the end position, or there is no node to move to.
    #[snafu(display("`{}` called with a cursor at an invalid position", operation))]
    InvalidPosition { operation: &'static str },

    /// The cursor refers to a node that has already been removed, or to a
    /// node of another list.
    #[snafu(display("`{}` called with a stale cursor (slot {})", operation, index))]
    StaleCursor {
        operation: &'static str,
        index: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
