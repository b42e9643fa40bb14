//! Placement targets.

use log::trace;

use slotmatch_core::{
    geometry::{Bounds, Point, Size},
    identifier::{BlockId, CellId, Identity},
};

use crate::error::AlreadyOccupied;

/// A fixed slot on the board that accepts at most one block.
///
/// Cells do not own their occupant; they record its [`BlockId`]. Occupancy
/// is changed only by the [`Board`](crate::Board), which keeps it in step
/// with the block's own placement.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    identity: Identity,
    position: Point,
    auto_connect: bool,
    occupant: Option<BlockId>,
}

impl Cell {
    pub(crate) fn new(id: CellId, identity: Identity, position: Point) -> Self {
        Self {
            id,
            identity,
            position,
            auto_connect: false,
            occupant: None,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// World position of the cell's center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether this cell takes part in
    /// [`Board::auto_connect_flagged`](crate::Board::auto_connect_flagged).
    pub fn auto_connect(&self) -> bool {
        self.auto_connect
    }

    pub fn occupant(&self) -> Option<BlockId> {
        self.occupant
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// The square a pointer must fall in to hit this cell, edges included.
    pub fn hit_bounds(&self, hit_size: f32) -> Bounds {
        self.position.to_bounds(Size::square(hit_size))
    }

    pub(crate) fn set_auto_connect(&mut self, auto_connect: bool) {
        self.auto_connect = auto_connect;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Records `block` as the occupant if the cell is free.
    ///
    /// Leaves the cell untouched when it is already taken.
    pub(crate) fn place(&mut self, block: BlockId) -> Result<(), AlreadyOccupied> {
        match self.occupant {
            Some(occupant) => Err(AlreadyOccupied {
                cell: self.id,
                occupant,
            }),
            None => {
                self.occupant = Some(block);
                trace!(cell:% = self.id, block:%; "Cell occupied");
                Ok(())
            }
        }
    }

    /// Clears the occupant, returning the block that was there.
    pub(crate) fn release(&mut self) -> Option<BlockId> {
        self.occupant.take()
    }
}
