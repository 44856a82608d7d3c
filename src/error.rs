use alloc::collections::TryReserveError;

/// Errors reported by [`Bst`](crate::Bst) and [`Cursor`](crate::Cursor).
///
/// Every failing operation leaves the tree and the cursor exactly as they were.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The cursor or position is at the end; there is no element to read, advance past or erase.
    #[error("position is past the end of the tree")]
    PastTheEnd,
    /// The cursor is at the first element and cannot move back.
    #[error("position is at the beginning of the tree")]
    BeforeTheBeginning,
    /// The position was taken from a different tree (or from this tree before it was cleared).
    #[error("position belongs to a different tree")]
    ForeignPosition,
    /// The node the position referred to has been erased.
    #[error("position refers to an erased element")]
    StalePosition,
    /// The tree already holds as many nodes as its handles can address.
    #[error("tree is at its maximum number of nodes")]
    CapacityExceeded,
    /// Growing the node storage failed.
    #[error("node allocation failed: {0}")]
    AllocationFailed(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(error: TryReserveError) -> Self {
        Error::AllocationFailed(error)
    }
}
