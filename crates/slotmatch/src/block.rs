//! Draggable pieces and their drag lifecycle.
//!
//! A [`Block`] is either idle or being dragged:
//!
//! ```text
//!          begin_drag
//!   Idle ─────────────▶ Dragging
//!    ▲                     │
//!    └──── finish_drag ────┘
//! ```
//!
//! Whether an idle block sits in a cell or at home is recorded by its
//! placement, not by a separate state. The block checks its own lifecycle;
//! everything that touches a cell goes through the [`Board`](crate::Board).

use log::{trace, warn};

use slotmatch_core::{
    content::BlockContent,
    geometry::{Bounds, Insets, Point, Size},
    identifier::{BlockId, CellId, Identity},
};

use crate::{
    error::PlacementError,
    grid::GridRect,
    session::{DragSession, SessionId},
};

/// A draggable piece seeking a cell with the same identity.
#[derive(Debug, Clone)]
pub struct Block {
    id: BlockId,
    identity: Identity,
    content: BlockContent,
    grid_rect: GridRect,
    position: Point,
    home: Point,
    footprint: Size,
    placement: Option<CellId>,
    active_session: Option<SessionId>,
}

impl Block {
    /// Creates an idle, unplaced block resting at `home`.
    pub(crate) fn new(
        id: BlockId,
        identity: Identity,
        content: BlockContent,
        grid_rect: GridRect,
        home: Point,
    ) -> Self {
        Self {
            id,
            identity,
            content,
            grid_rect,
            position: home,
            home,
            footprint: Size::default(),
            placement: None,
            active_session: None,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// The slots this block was laid out on when the board was built.
    pub fn grid_rect(&self) -> GridRect {
        self.grid_rect
    }

    /// Current world position of the block's center.
    ///
    /// While dragging this stays at the drag's start position; the moving
    /// representation is the session's proxy.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Where the block rests when it is not in a cell.
    pub fn home(&self) -> Point {
        self.home
    }

    /// Size of the block's visual and collision bounds.
    pub fn footprint(&self) -> Size {
        self.footprint
    }

    /// Collision bounds: the footprint centered on the current position.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.footprint)
    }

    /// The cell this block occupies, if any.
    pub fn placement(&self) -> Option<CellId> {
        self.placement
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.active_session.is_some()
    }

    /// Whether renderers should draw the block itself rather than a drag proxy.
    pub fn is_visible(&self) -> bool {
        !self.is_dragging()
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }

    /// Starts a drag session with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidState`] if a session is already active.
    pub(crate) fn begin_drag(&mut self, id: SessionId) -> Result<DragSession, PlacementError> {
        if self.active_session.is_some() {
            return Err(self.invalid_state("a drag session is already active"));
        }
        self.active_session = Some(id);
        Ok(DragSession::new(id, self.id, self.position))
    }

    /// Moves the session's proxy to `pointer`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidState`] if `session` is not this
    /// block's live session.
    pub(crate) fn update_drag(
        &self,
        session: &mut DragSession,
        pointer: Point,
    ) -> Result<(), PlacementError> {
        self.check_session(session)?;
        session.set_proxy_position(pointer);
        trace!(block:% = self.id, x = pointer.x(), y = pointer.y(); "Drag update");
        Ok(())
    }

    /// Terminates the live session, returning the block to the idle state.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidState`] if `session` is not this
    /// block's live session.
    pub(crate) fn finish_drag(&mut self, session: &mut DragSession) -> Result<(), PlacementError> {
        self.check_session(session)?;
        session.deactivate();
        self.active_session = None;
        Ok(())
    }

    /// Ensures `session` is the active session of this block.
    pub(crate) fn check_session(&self, session: &DragSession) -> Result<(), PlacementError> {
        if !session.is_active() {
            return Err(self.invalid_state("drag session is no longer active"));
        }
        if session.block() != self.id || self.active_session != Some(session.id()) {
            return Err(self.invalid_state("drag session does not belong to this block"));
        }
        Ok(())
    }

    /// Sets the footprint to the measured content size plus `padding` on
    /// every side, and returns it.
    ///
    /// Negative padding is treated as zero. The result depends only on the
    /// arguments, so repeating a call with the same bounds is a no-op.
    pub fn recompute_footprint(&mut self, measured: Bounds, padding: f32) -> Size {
        let padding = if padding >= 0.0 {
            padding
        } else {
            warn!(padding; "Negative footprint padding, using zero");
            0.0
        };
        self.footprint = measured.to_size().add_padding(Insets::uniform(padding));
        trace!(
            block:% = self.id,
            width = self.footprint.width(),
            height = self.footprint.height();
            "Footprint recomputed"
        );
        self.footprint
    }

    pub(crate) fn set_content(&mut self, content: BlockContent) {
        self.content = content;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_placement(&mut self, placement: Option<CellId>) {
        self.placement = placement;
    }

    fn invalid_state(&self, reason: &'static str) -> PlacementError {
        PlacementError::InvalidState {
            block: self.id,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn block() -> Block {
        Block::new(
            BlockId::new(0),
            Identity::new(7),
            BlockContent::plain_text("x"),
            GridRect::slot(1, 1),
            Point::new(1.5, 1.5),
        )
    }

    #[test]
    fn test_new_block_rests_at_home() {
        let block = block();
        assert_eq!(block.position(), block.home());
        assert!(!block.is_placed());
        assert!(!block.is_dragging());
        assert!(block.is_visible());
    }

    #[test]
    fn test_begin_drag_captures_start_position() {
        let mut block = block();
        let session = block.begin_drag(SessionId::new(1)).expect("idle block");
        assert_eq!(session.start_position(), Point::new(1.5, 1.5));
        assert_eq!(session.block(), block.id());
        assert!(block.is_dragging());
        assert!(!block.is_visible());
    }

    #[test]
    fn test_second_begin_drag_is_invalid() {
        let mut block = block();
        block.begin_drag(SessionId::new(1)).expect("idle block");
        let err = block.begin_drag(SessionId::new(2)).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidState { .. }));
        assert_eq!(block.active_session(), Some(SessionId::new(1)));
    }

    #[test]
    fn test_update_drag_moves_proxy_only() {
        let mut block = block();
        let mut session = block.begin_drag(SessionId::new(1)).expect("idle block");
        block
            .update_drag(&mut session, Point::new(4.0, 0.5))
            .expect("live session");
        assert_eq!(session.proxy_position(), Point::new(4.0, 0.5));
        assert_eq!(block.position(), Point::new(1.5, 1.5));
    }

    #[test]
    fn test_finished_session_is_rejected() {
        let mut block = block();
        let mut session = block.begin_drag(SessionId::new(1)).expect("idle block");
        block.finish_drag(&mut session).expect("live session");
        assert!(!block.is_dragging());
        assert!(!session.is_active());

        let err = block.update_drag(&mut session, Point::default()).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidState { .. }));
        let err = block.finish_drag(&mut session).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidState { .. }));
    }

    #[test]
    fn test_foreign_session_is_rejected() {
        let mut first = block();
        let mut other = Block::new(
            BlockId::new(1),
            Identity::new(3),
            BlockContent::default(),
            GridRect::slot(0, 0),
            Point::default(),
        );
        first.begin_drag(SessionId::new(1)).expect("idle block");
        let mut foreign = other.begin_drag(SessionId::new(2)).expect("idle block");
        let err = first.finish_drag(&mut foreign).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::InvalidState { block, .. } if block == BlockId::new(0)
        ));
        assert!(foreign.is_active());
    }

    #[test]
    fn test_recompute_footprint_adds_padding_on_each_side() {
        let mut block = block();
        let measured = Bounds::new_from_top_left(Point::default(), Size::new(2.0, 1.0));
        let footprint = block.recompute_footprint(measured, 0.25);
        assert_approx_eq!(f32, footprint.width(), 2.5);
        assert_approx_eq!(f32, footprint.height(), 1.5);
        assert_eq!(block.footprint(), footprint);
    }

    #[test]
    fn test_recompute_footprint_clamps_negative_padding() {
        let mut block = block();
        let measured = Bounds::new_from_top_left(Point::default(), Size::new(2.0, 1.0));
        let footprint = block.recompute_footprint(measured, -1.0);
        assert_approx_eq!(f32, footprint.width(), 2.0);
        assert_approx_eq!(f32, footprint.height(), 1.0);
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut block = block();
        block.recompute_footprint(
            Bounds::new_from_top_left(Point::default(), Size::new(1.0, 1.0)),
            0.0,
        );
        block.set_position(Point::new(5.0, 5.0));
        assert!(block.bounds().contains(Point::new(5.5, 4.5)));
        assert!(!block.bounds().contains(Point::new(1.5, 1.5)));
    }
}
