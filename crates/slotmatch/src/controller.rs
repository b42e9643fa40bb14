//! Pointer events to board operations.
//!
//! An input provider reports a drag as three kinds of events: a start on a
//! block, any number of moves, and a release (or an interruption). The
//! [`DragController`] turns that stream into calls on a [`Board`], holding
//! the live [`DragSession`] in between and resolving the drop target at the
//! release point.
//!
//! The proxy keeps the offset between the pointer and the block center that
//! existed when the drag started, so grabbing a block by its corner does not
//! make it jump.

use log::{debug, trace};

use slotmatch_core::{geometry::Point, identifier::BlockId, text::TextMeasure};

use crate::{
    board::{Board, BlockView, DragOutcome},
    error::PlacementError,
    session::DragSession,
};

/// Tracks one drag gesture at a time.
#[derive(Debug, Default)]
pub struct DragController {
    gesture: Option<Gesture>,
}

#[derive(Debug)]
struct Gesture {
    session: DragSession,
    grab_offset: Point,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The block being dragged, if a gesture is in progress.
    pub fn active_block(&self) -> Option<BlockId> {
        self.gesture.as_ref().map(|gesture| gesture.session.block())
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.gesture.as_ref().map(|gesture| &gesture.session)
    }

    /// Starts dragging `block`, grabbed at `pointer`.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidState`] if this controller is already
    /// tracking a drag, plus anything [`Board::begin_drag`] refuses.
    pub fn on_drag_start<M: TextMeasure>(
        &mut self,
        board: &mut Board<M>,
        block: BlockId,
        pointer: Point,
    ) -> Result<(), PlacementError> {
        if self.gesture.is_some() {
            return Err(PlacementError::InvalidState {
                block,
                reason: "another drag is in progress",
            });
        }
        let session = board.begin_drag(block)?;
        let grab_offset = session.start_position().sub_point(pointer);
        debug!(block:% = block, x = pointer.x(), y = pointer.y(); "Pointer drag started");
        self.gesture = Some(Gesture {
            session,
            grab_offset,
        });
        Ok(())
    }

    /// Moves the proxy to follow `pointer`. Ignored when no drag is active.
    pub fn on_drag_move<M: TextMeasure>(
        &mut self,
        board: &Board<M>,
        pointer: Point,
    ) -> Result<(), PlacementError> {
        let Some(gesture) = self.gesture.as_mut() else {
            trace!("Pointer move without drag");
            return Ok(());
        };
        board.update_drag(&mut gesture.session, pointer.add_point(gesture.grab_offset))
    }

    /// Ends the drag at `pointer`, dropping onto the cell under it.
    ///
    /// Returns `None` when no drag is active.
    pub fn on_drag_end<M: TextMeasure>(
        &mut self,
        board: &mut Board<M>,
        pointer: Point,
    ) -> Result<Option<DragOutcome>, PlacementError> {
        let Some(mut gesture) = self.gesture.take() else {
            return Ok(None);
        };
        let target = board.resolve_drop_target(pointer);
        match board.end_drag(&mut gesture.session, target) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) => {
                // keep the gesture so the caller can still cancel it
                self.gesture = Some(gesture);
                Err(err)
            }
        }
    }

    /// Abandons the drag, returning the block to its start position.
    ///
    /// Returns `None` when no drag is active.
    pub fn on_drag_cancel<M: TextMeasure>(
        &mut self,
        board: &mut Board<M>,
    ) -> Result<Option<DragOutcome>, PlacementError> {
        let Some(mut gesture) = self.gesture.take() else {
            return Ok(None);
        };
        match board.cancel_drag(&mut gesture.session) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) => {
                self.gesture = Some(gesture);
                Err(err)
            }
        }
    }

    /// Render state of `block`, including the proxy if it is being dragged
    /// by this controller.
    pub fn view<M: TextMeasure>(
        &self,
        board: &Board<M>,
        block: BlockId,
    ) -> Result<BlockView, PlacementError> {
        board.block_view(block, self.session())
    }
}

#[cfg(test)]
mod tests {
    use slotmatch_core::{
        content::BlockContent, identifier::Identity, text::FixedAdvanceMeasure,
    };

    use super::*;
    use crate::{board::ReturnReason, config::EngineConfig, grid::GridRect};

    fn board() -> Board<FixedAdvanceMeasure> {
        Board::new(EngineConfig::default(), FixedAdvanceMeasure::new(0.1, 0.2))
    }

    #[test]
    fn test_full_gesture_places_block() {
        let mut board = board();
        let cell = board.add_cell_at_slot(Identity::new(4), 3, 3);
        let block = board.add_block(
            Identity::new(4),
            BlockContent::plain_text("d"),
            GridRect::slot(0, 0),
        );
        let mut controller = DragController::new();

        controller
            .on_drag_start(&mut board, block, Point::new(0.75, 0.5))
            .unwrap();
        assert_eq!(controller.active_block(), Some(block));

        controller.on_drag_move(&board, Point::new(2.0, 2.0)).unwrap();
        let view = controller.view(&board, block).unwrap();
        assert!(!view.visible);
        assert_eq!(view.proxy_position, Some(Point::new(1.75, 2.0)));

        let outcome = controller
            .on_drag_end(&mut board, Point::new(3.6, 3.4))
            .unwrap();
        assert_eq!(outcome.and_then(|o| o.placed_cell()), Some(cell));
        assert_eq!(controller.active_block(), None);
        assert_eq!(controller.view(&board, block).unwrap().matched, Some(true));
    }

    #[test]
    fn test_release_over_nothing_returns_block() {
        let mut board = board();
        let block = board.add_block(
            Identity::new(1),
            BlockContent::plain_text("d"),
            GridRect::slot(1, 1),
        );
        let mut controller = DragController::new();

        controller
            .on_drag_start(&mut board, block, Point::new(1.5, 1.5))
            .unwrap();
        controller.on_drag_move(&board, Point::new(8.0, 8.0)).unwrap();
        let outcome = controller
            .on_drag_end(&mut board, Point::new(8.0, 8.0))
            .unwrap();

        assert_eq!(outcome, Some(DragOutcome::ReturnedHome(ReturnReason::NoTarget)));
        assert_eq!(board.block(block).unwrap().position(), Point::new(1.5, 1.5));
    }

    #[test]
    fn test_cancel_and_idle_events() {
        let mut board = board();
        let block = board.add_block(
            Identity::new(1),
            BlockContent::plain_text("d"),
            GridRect::slot(1, 1),
        );
        let mut controller = DragController::new();

        assert!(controller.on_drag_move(&board, Point::default()).is_ok());
        assert_eq!(controller.on_drag_end(&mut board, Point::default()).unwrap(), None);
        assert_eq!(controller.on_drag_cancel(&mut board).unwrap(), None);

        controller
            .on_drag_start(&mut board, block, Point::new(1.5, 1.5))
            .unwrap();
        let outcome = controller.on_drag_cancel(&mut board).unwrap();
        assert_eq!(outcome, Some(DragOutcome::ReturnedHome(ReturnReason::Cancelled)));
        assert!(!board.block(block).unwrap().is_dragging());
    }

    #[test]
    fn test_failed_cancel_keeps_gesture() {
        let mut other = board();
        let mut board = board();
        let block = board.add_block(
            Identity::new(1),
            BlockContent::plain_text("a"),
            GridRect::slot(0, 0),
        );
        other.add_block(
            Identity::new(1),
            BlockContent::plain_text("a"),
            GridRect::slot(0, 0),
        );
        let mut controller = DragController::new();

        controller
            .on_drag_start(&mut board, block, Point::new(0.5, 0.5))
            .unwrap();
        let err = controller.on_drag_cancel(&mut other).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidState { .. }));
        assert_eq!(controller.active_block(), Some(block));

        let outcome = controller.on_drag_cancel(&mut board).unwrap();
        assert_eq!(outcome, Some(DragOutcome::ReturnedHome(ReturnReason::Cancelled)));
        assert_eq!(controller.active_block(), None);
    }

    #[test]
    fn test_second_start_is_refused() {
        let mut board = board();
        let first = board.add_block(
            Identity::new(1),
            BlockContent::plain_text("a"),
            GridRect::slot(0, 0),
        );
        let second = board.add_block(
            Identity::new(2),
            BlockContent::plain_text("b"),
            GridRect::slot(1, 0),
        );
        let mut controller = DragController::new();

        controller
            .on_drag_start(&mut board, first, Point::new(0.5, 0.5))
            .unwrap();
        let err = controller
            .on_drag_start(&mut board, second, Point::new(1.5, 0.5))
            .unwrap_err();
        assert!(matches!(err, PlacementError::InvalidState { .. }));
        assert!(!board.block(second).unwrap().is_dragging());
        assert_eq!(controller.active_block(), Some(first));
    }
}
