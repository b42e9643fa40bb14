//! Identifiers for cells, blocks and match values.
//!
//! Cells and blocks live in id-indexed arenas owned by the board, so every
//! cross reference between them (a cell's occupant, a block's placement, an
//! adjacency edge) is one of these small `Copy` ids rather than a pointer.
//!
//! [`Identity`] is a different kind of value: it is the number a block and
//! a cell are compared on to decide whether a placement is a match.

use std::fmt;

/// The value compared between a block and a cell to decide a match.
///
/// # Examples
///
/// ```
/// use slotmatch_core::identifier::Identity;
///
/// let block = Identity::new(7);
/// let cell = Identity::from(7);
/// assert!(block.matches(cell));
/// assert!(!block.matches(Identity::new(3)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(i32);

impl Identity {
    /// Creates an identity from its raw value.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` when both identities carry the same value.
    pub fn matches(self, other: Identity) -> bool {
        self == other
    }
}

impl From<i32> for Identity {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a cell in its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Creates a cell id from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell-{}", self.0)
    }
}

/// Index of a block in its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Creates a block id from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}
