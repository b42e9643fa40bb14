//! Slotmatch - a placement engine for grid-based matching puzzles.
//!
//! Draggable blocks, each tagged with an identity, are dropped onto cells of
//! a fixed grid. This crate keeps the grid, cell and block model, tracks drag
//! gestures, resolves which cell a block was released over, enforces one
//! block per cell, and reports whether a placed block matches its cell.
//! Rendering, input delivery and text shaping stay with the host; the engine
//! consumes text measurement through [`slotmatch_core::text::TextMeasure`].
//!
//! # Example
//!
//! ```
//! use slotmatch::{Board, DragController, config::EngineConfig, grid::GridRect};
//! use slotmatch_core::{
//!     content::BlockContent, geometry::Point, identifier::Identity, text::FixedAdvanceMeasure,
//! };
//!
//! let mut board = Board::new(EngineConfig::default(), FixedAdvanceMeasure::new(0.1, 0.2));
//! let target = board.add_cell_at_slot(Identity::new(7), 2, 3);
//! let block = board.add_block(
//!     Identity::new(7),
//!     BlockContent::formula("E", "n", "x"),
//!     GridRect::slot(0, 0),
//! );
//!
//! let mut controller = DragController::new();
//! controller.on_drag_start(&mut board, block, Point::new(0.5, 0.5))?;
//! controller.on_drag_move(&board, Point::new(2.5, 3.5))?;
//! let outcome = controller.on_drag_end(&mut board, Point::new(2.5, 3.5))?;
//!
//! assert_eq!(outcome.and_then(|outcome| outcome.placed_cell()), Some(target));
//! assert!(board.check_match(block)?);
//! # Ok::<(), slotmatch::PlacementError>(())
//! ```

pub mod adjacency;
pub mod block;
pub mod cell;
pub mod config;
pub mod grid;
pub mod session;

mod board;
mod controller;
mod error;

pub use board::{Board, BlockView, DragOutcome, PlacementResult, ReturnReason};
pub use controller::DragController;
pub use error::{AlreadyOccupied, ConfigError, PlacementError};
