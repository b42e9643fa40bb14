//! Drag sessions.
//!
//! A [`DragSession`] exists only while a block is being dragged. It is a
//! plain value held by the caller (usually the
//! [`DragController`](crate::DragController)); the block remembers the
//! [`SessionId`] of its live session so that stale or foreign sessions can be
//! told apart.

use std::fmt;

use slotmatch_core::{geometry::Point, identifier::BlockId};

/// Unique id of a drag session within a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Live state of one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    id: SessionId,
    block: BlockId,
    start_position: Point,
    proxy_position: Point,
    active: bool,
}

impl DragSession {
    pub(crate) fn new(id: SessionId, block: BlockId, start_position: Point) -> Self {
        Self {
            id,
            block,
            start_position,
            proxy_position: start_position,
            active: true,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The block being dragged.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Where the block was when the drag began.
    pub fn start_position(&self) -> Point {
        self.start_position
    }

    /// Where the drag proxy is now.
    pub fn proxy_position(&self) -> Point {
        self.proxy_position
    }

    /// `false` once the session has ended or been cancelled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_proxy_position(&mut self, position: Point) {
        self.proxy_position = position;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
