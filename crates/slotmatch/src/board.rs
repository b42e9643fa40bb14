//! The placement engine.
//!
//! A [`Board`] owns the grid, every cell and block, and the adjacency graph,
//! and is the only place where a cell's occupant and a block's placement
//! change. Both sides are written together in [`Board::attempt_place`] (and
//! the helpers it shares with [`Board::end_drag`]) and cleared together when
//! a block is released, so that outside a single `&mut self` call
//! `cell.occupant() == Some(block)` holds exactly when
//! `block.placement() == Some(cell)`.
//!
//! # Example
//!
//! ```
//! # use slotmatch::{Board, DragOutcome, config::EngineConfig, grid::GridRect};
//! # use slotmatch_core::{content::BlockContent, identifier::Identity, text::FixedAdvanceMeasure};
//! let mut board = Board::new(EngineConfig::default(), FixedAdvanceMeasure::new(0.1, 0.2));
//! let cell = board.add_cell_at_slot(Identity::new(7), 2, 3);
//! let block = board.add_block(
//!     Identity::new(7),
//!     BlockContent::plain_text("x"),
//!     GridRect::slot(0, 0),
//! );
//!
//! let mut session = board.begin_drag(block).unwrap();
//! board.update_drag(&mut session, board.grid().cell_center(2, 3)).unwrap();
//! let target = board.resolve_drop_target(session.proxy_position());
//! let outcome = board.end_drag(&mut session, target).unwrap();
//!
//! assert!(matches!(
//!     outcome,
//!     DragOutcome::Placed(result) if result.cell == cell && result.matched
//! ));
//! assert!(board.is_solved());
//! ```

use log::{debug, info, trace, warn};

use slotmatch_core::{
    content::BlockContent,
    geometry::{Point, Size},
    identifier::{BlockId, CellId, Identity},
    text::TextMeasure,
};

use crate::{
    adjacency::Adjacency,
    block::Block,
    cell::Cell,
    config::EngineConfig,
    error::PlacementError,
    grid::{Grid, GridRect},
    session::{DragSession, SessionId},
};

/// A block bound to a cell, and whether their identities agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub cell: CellId,
    pub matched: bool,
}

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The block now occupies the cell.
    Placed(PlacementResult),
    /// The block went back to where the drag started.
    ReturnedHome(ReturnReason),
}

impl DragOutcome {
    /// The cell the block landed in, if it was placed.
    pub fn placed_cell(&self) -> Option<CellId> {
        match self {
            Self::Placed(result) => Some(result.cell),
            Self::ReturnedHome(_) => None,
        }
    }
}

/// Why a drag ended with the block back at its start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnReason {
    /// The drag was cancelled.
    Cancelled,
    /// The block was released over no cell.
    NoTarget,
    /// The target cell already holds another block.
    Occupied { cell: CellId, occupant: BlockId },
    /// The block was released over the cell it already occupies.
    SameCell(CellId),
}

/// What a renderer needs to draw one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView {
    /// Resting position of the block.
    pub position: Point,
    /// Position of the drag proxy while a drag is live.
    pub proxy_position: Option<Point>,
    /// `false` while the block is represented by its drag proxy.
    pub visible: bool,
    pub footprint: Size,
    /// Match state when the block sits in a cell.
    pub matched: Option<bool>,
}

/// Grid, cells, blocks and the rules that bind them.
#[derive(Debug)]
pub struct Board<M> {
    config: EngineConfig,
    grid: Grid,
    measure: M,
    cells: Vec<Cell>,
    blocks: Vec<Block>,
    adjacency: Adjacency,
    next_session: u64,
}

impl<M: TextMeasure> Board<M> {
    /// Creates an empty board.
    ///
    /// The grid is built from `config.grid()` and clamped there; block
    /// footprints are measured with `measure`.
    pub fn new(config: EngineConfig, measure: M) -> Self {
        let grid = Grid::from_config(config.grid());
        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            cell_size = grid.cell_size();
            "Board created"
        );
        Self {
            config,
            grid,
            measure,
            cells: Vec::new(),
            blocks: Vec::new(),
            adjacency: Adjacency::new(),
            next_session: 0,
        }
    }

    /// Configuration the board was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Coordinate authority for cells and block layout.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Text measurer used for block footprints.
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// All cells, indexed by [`CellId`].
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All blocks, indexed by [`BlockId`].
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Cell adjacency graph.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Edge length of the square each cell is hit-tested with.
    pub fn hit_size(&self) -> f32 {
        self.config
            .placement()
            .hit_size()
            .unwrap_or_else(|| self.grid.cell_size())
            .max(0.0)
    }

    /// Adds a cell centered on `position`.
    ///
    /// With an adjacency radius configured, the new cell is connected to
    /// every existing cell within it.
    pub fn add_cell(&mut self, identity: Identity, position: Point) -> CellId {
        let id = CellId::new(self.cells.len());
        self.cells.push(Cell::new(id, identity, position));
        self.adjacency.add_cell(id);
        if let Some(radius) = self.config.adjacency().radius() {
            self.adjacency.auto_connect(id, &self.cells, radius);
        }
        debug!(
            cell:% = id,
            identity:% = identity,
            x = position.x(),
            y = position.y();
            "Cell added"
        );
        id
    }

    /// Adds a cell centered on grid slot `(column, row)`.
    pub fn add_cell_at_slot(&mut self, identity: Identity, column: i32, row: i32) -> CellId {
        let position = self.grid.cell_center(column, row);
        self.add_cell(identity, position)
    }

    /// Adds an unplaced block laid out on `grid_rect`.
    ///
    /// The block's home is the center of the rectangle and its footprint is
    /// measured from `content` right away.
    pub fn add_block(
        &mut self,
        identity: Identity,
        content: BlockContent,
        grid_rect: GridRect,
    ) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        let home = self.grid.layout_rect(grid_rect).center();
        let mut block = Block::new(id, identity, content, grid_rect, home);
        let measured = block.content().measure(&self.measure);
        block.recompute_footprint(measured, self.config.footprint().padding());
        debug!(
            block:% = id,
            identity:% = identity,
            content = block.content().display_text();
            "Block added"
        );
        self.blocks.push(block);
        id
    }

    /// Looks up a cell by id.
    pub fn cell(&self, id: CellId) -> Result<&Cell, PlacementError> {
        self.cells
            .get(id.index())
            .ok_or(PlacementError::UnknownCell(id))
    }

    /// Looks up a block by id.
    pub fn block(&self, id: BlockId) -> Result<&Block, PlacementError> {
        self.blocks
            .get(id.index())
            .ok_or(PlacementError::UnknownBlock(id))
    }

    fn cell_mut(&mut self, id: CellId) -> Result<&mut Cell, PlacementError> {
        self.cells
            .get_mut(id.index())
            .ok_or(PlacementError::UnknownCell(id))
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, PlacementError> {
        self.blocks
            .get_mut(id.index())
            .ok_or(PlacementError::UnknownBlock(id))
    }

    /// Sets whether `cell` takes part in [`Board::auto_connect_flagged`].
    pub fn set_auto_connect(
        &mut self,
        cell: CellId,
        auto_connect: bool,
    ) -> Result<(), PlacementError> {
        self.cell_mut(cell)?.set_auto_connect(auto_connect);
        Ok(())
    }

    /// Starts dragging `block`.
    ///
    /// A block sitting in a cell keeps its placement for the duration of the
    /// drag.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidState`] if the block is already being dragged,
    /// or if it is placed and re-dragging out of cells is disabled.
    pub fn begin_drag(&mut self, block: BlockId) -> Result<DragSession, PlacementError> {
        let allow_redrag = self.config.placement().allow_redrag_from_cell();
        let session_id = SessionId::new(self.next_session);
        let target = self.block_mut(block)?;
        if target.is_placed() && !allow_redrag {
            warn!(block:% = block; "Drag refused, block is placed");
            return Err(PlacementError::InvalidState {
                block,
                reason: "block is placed and re-dragging from cells is disabled",
            });
        }
        let session = target.begin_drag(session_id).inspect_err(|err| {
            warn!(err:% = err; "Drag refused");
        })?;
        self.next_session += 1;
        debug!(block:% = block, session:% = session.id(); "Drag started");
        Ok(session)
    }

    /// Moves the drag proxy of a live session.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidState`] if the session has ended or does not
    /// belong to its block.
    pub fn update_drag(
        &self,
        session: &mut DragSession,
        pointer: Point,
    ) -> Result<(), PlacementError> {
        self.block(session.block())?.update_drag(session, pointer)
    }

    /// Ends a drag, placing the block on `resolved` when that cell is free.
    ///
    /// Every other case sends the block back to the session's start position
    /// with its placement unchanged. The session is terminated in all
    /// non-error cases.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidState`] if `session` is not the block's live
    /// session, [`PlacementError::UnknownCell`] if `resolved` is not on this
    /// board. Neither terminates the session.
    pub fn end_drag(
        &mut self,
        session: &mut DragSession,
        resolved: Option<CellId>,
    ) -> Result<DragOutcome, PlacementError> {
        let block = session.block();
        self.block(block)?
            .check_session(session)
            .inspect_err(|err| {
                warn!(session:% = session.id(), err:%; "Drop with stale session");
            })?;
        let occupant = match resolved {
            Some(cell) => Some(self.cell(cell)?.occupant()),
            None => None,
        };

        self.block_mut(block)?.finish_drag(session)?;

        let outcome = match (resolved, occupant) {
            (Some(cell), Some(None)) => DragOutcome::Placed(self.place_block(block, cell)?),
            (Some(cell), Some(Some(occupant))) if occupant == block => {
                DragOutcome::ReturnedHome(ReturnReason::SameCell(cell))
            }
            (Some(cell), Some(Some(occupant))) => {
                warn!(
                    block:% = block,
                    cell:% = cell,
                    occupant:% = occupant;
                    "Drop on occupied cell"
                );
                DragOutcome::ReturnedHome(ReturnReason::Occupied { cell, occupant })
            }
            _ => DragOutcome::ReturnedHome(ReturnReason::NoTarget),
        };

        if let DragOutcome::ReturnedHome(reason) = outcome {
            self.block_mut(block)?.set_position(session.start_position());
            debug!(block:% = block, reason:?; "Drag ended, block returned");
        }
        Ok(outcome)
    }

    /// Cancels a drag. Equivalent to [`Board::end_drag`] with no target.
    pub fn cancel_drag(
        &mut self,
        session: &mut DragSession,
    ) -> Result<DragOutcome, PlacementError> {
        let block = session.block();
        self.block(block)?.check_session(session)?;
        self.block_mut(block)?.finish_drag(session)?;
        self.block_mut(block)?.set_position(session.start_position());
        debug!(block:% = block; "Drag cancelled");
        Ok(DragOutcome::ReturnedHome(ReturnReason::Cancelled))
    }

    /// Places an idle block on `cell`.
    ///
    /// If the block already occupies another cell it moves, but only once
    /// `cell` is known to be free. Identity mismatches never prevent a
    /// placement; they are reported through [`PlacementResult::matched`].
    ///
    /// # Errors
    ///
    /// - [`PlacementError::CellOccupied`] if `cell` holds a block (this one
    ///   included); nothing changes.
    /// - [`PlacementError::InvalidState`] if the block is being dragged.
    pub fn attempt_place(
        &mut self,
        block: BlockId,
        cell: CellId,
    ) -> Result<PlacementResult, PlacementError> {
        if self.block(block)?.is_dragging() {
            warn!(block:% = block; "Direct placement of a dragging block");
            return Err(PlacementError::InvalidState {
                block,
                reason: "block is being dragged; place it by ending the drag",
            });
        }
        self.place_block(block, cell)
    }

    /// Writes both sides of a placement. The caller has checked the block's
    /// lifecycle.
    fn place_block(
        &mut self,
        block: BlockId,
        cell: CellId,
    ) -> Result<PlacementResult, PlacementError> {
        self.block(block)?;
        let target = self.cell(cell)?;
        if let Some(occupant) = target.occupant() {
            warn!(
                block:% = block,
                cell:% = cell,
                occupant:% = occupant;
                "Cell already occupied"
            );
            return Err(PlacementError::CellOccupied { cell, occupant });
        }
        let position = target.position();
        let matched = target.identity().matches(self.block(block)?.identity());

        if let Some(previous) = self.block(block)?.placement() {
            self.cell_mut(previous)?.release();
            debug!(block:% = block, cell:% = previous; "Block left cell");
        }
        self.cell_mut(cell)?.place(block)?;
        let placed = self.block_mut(block)?;
        placed.set_placement(Some(cell));
        placed.set_position(position);

        info!(block:% = block, cell:% = cell, matched; "Block placed");
        Ok(PlacementResult { cell, matched })
    }

    /// Clears both sides of a placement, returning the cell that was left.
    fn release_block(&mut self, block: BlockId) -> Result<Option<CellId>, PlacementError> {
        let Some(cell) = self.block(block)?.placement() else {
            return Ok(None);
        };
        self.cell_mut(cell)?.release();
        self.block_mut(block)?.set_placement(None);
        debug!(block:% = block, cell:% = cell; "Block released");
        Ok(Some(cell))
    }

    /// The cell under `pointer`, if any.
    ///
    /// When several cells' hit boxes contain the pointer the one whose
    /// center is nearest wins; equal distances go to the lowest id.
    pub fn resolve_drop_target(&self, pointer: Point) -> Option<CellId> {
        let target = select_drop_target(pointer, &self.cells, self.hit_size());
        debug!(x = pointer.x(), y = pointer.y(), target:?; "Drop target resolved");
        target
    }

    /// Takes a block out of its cell (if any) and moves it to its home.
    ///
    /// # Errors
    ///
    /// [`PlacementError::CannotReturnWhileDragging`] while a drag is live.
    pub fn return_home(&mut self, block: BlockId) -> Result<(), PlacementError> {
        if self.block(block)?.is_dragging() {
            return Err(PlacementError::CannotReturnWhileDragging(block));
        }
        self.release_block(block)?;
        let target = self.block_mut(block)?;
        let home = target.home();
        target.set_position(home);
        debug!(block:% = block; "Block returned home");
        Ok(())
    }

    /// Whether a placed block's identity matches its cell's.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotPlaced`] if the block is in no cell.
    pub fn check_match(&self, block: BlockId) -> Result<bool, PlacementError> {
        let placed = self.block(block)?;
        let cell = placed.placement().ok_or(PlacementError::NotPlaced(block))?;
        Ok(self.cell(cell)?.identity().matches(placed.identity()))
    }

    /// Replaces a block's content and recomputes its footprint.
    pub fn set_content(
        &mut self,
        block: BlockId,
        content: BlockContent,
    ) -> Result<Size, PlacementError> {
        self.block_mut(block)?.set_content(content);
        self.refresh_footprint(block)
    }

    /// Re-measures a block's content and updates its footprint.
    pub fn refresh_footprint(&mut self, block: BlockId) -> Result<Size, PlacementError> {
        let padding = self.config.footprint().padding();
        let measured = self.block(block)?.content().measure(&self.measure);
        Ok(self.block_mut(block)?.recompute_footprint(measured, padding))
    }

    /// Connects two cells; connecting a cell to itself is ignored.
    pub fn connect(&mut self, a: CellId, b: CellId) -> Result<bool, PlacementError> {
        self.cell(a)?;
        self.cell(b)?;
        Ok(self.adjacency.connect(a, b))
    }

    /// Replaces the connections of `cell` with every cell within `radius`.
    pub fn auto_connect(&mut self, cell: CellId, radius: f32) -> Result<(), PlacementError> {
        self.cell(cell)?;
        self.adjacency.auto_connect(cell, &self.cells, radius);
        Ok(())
    }

    /// Rebuilds the whole adjacency graph for `radius`.
    pub fn rebuild_adjacency(&mut self, radius: f32) {
        self.adjacency.rebuild(&self.cells, radius);
    }

    /// Runs [`Board::auto_connect`] for every cell flagged for it.
    pub fn auto_connect_flagged(&mut self, radius: f32) {
        let flagged: Vec<CellId> = self
            .cells
            .iter()
            .filter(|cell| cell.auto_connect())
            .map(Cell::id)
            .collect();
        for cell in &flagged {
            self.adjacency.auto_connect(*cell, &self.cells, radius);
        }
        info!(
            flagged = flagged.len(),
            edges = self.adjacency.edge_count();
            "Flagged cells auto-connected"
        );
    }

    /// Connected cells of `cell`, in ascending id order.
    pub fn neighbors(&self, cell: CellId) -> Result<Vec<CellId>, PlacementError> {
        self.cell(cell)?;
        Ok(self.adjacency.neighbors(cell))
    }

    /// Every cell reachable from `cell` over connections, breadth first.
    pub fn reachable_from(&self, cell: CellId) -> Result<Vec<CellId>, PlacementError> {
        self.cell(cell)?;
        Ok(self.adjacency.reachable_from(cell))
    }

    /// The idle block whose bounds contain `point`.
    ///
    /// Overlaps go to the block whose center is nearest, then the lowest id.
    pub fn pick_block(&self, point: Point) -> Option<BlockId> {
        let mut best: Option<(f32, BlockId)> = None;
        for block in &self.blocks {
            if block.is_dragging() || !block.bounds().contains(point) {
                continue;
            }
            let distance = block.position().distance_squared(point);
            trace!(block:% = block.id(), distance; "Pick candidate");
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, block.id()));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Render state of a block.
    ///
    /// `session` supplies the proxy position; it is ignored unless it is the
    /// block's live session.
    pub fn block_view(
        &self,
        block: BlockId,
        session: Option<&DragSession>,
    ) -> Result<BlockView, PlacementError> {
        let target = self.block(block)?;
        let proxy_position = session
            .filter(|session| target.check_session(session).is_ok())
            .map(DragSession::proxy_position);
        let matched = match target.placement() {
            Some(cell) => Some(self.cell(cell)?.identity().matches(target.identity())),
            None => None,
        };
        Ok(BlockView {
            position: target.position(),
            proxy_position,
            visible: target.is_visible(),
            footprint: target.footprint(),
            matched,
        })
    }

    /// Number of cells holding a block with the same identity.
    pub fn matched_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| self.cell_is_matched(cell))
            .count()
    }

    /// Whether the board has cells and every one holds a matching block.
    pub fn is_solved(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|cell| self.cell_is_matched(cell))
    }

    fn cell_is_matched(&self, cell: &Cell) -> bool {
        cell.occupant()
            .and_then(|occupant| self.blocks.get(occupant.index()))
            .is_some_and(|block| block.identity().matches(cell.identity()))
    }

    /// Moves a cell onto the center of the grid slot containing it.
    ///
    /// Positions outside the grid go to the nearest slot inside it. A block
    /// occupying the cell moves with it. Returns the slot.
    pub fn snap_cell_to_grid(&mut self, cell: CellId) -> Result<(i32, i32), PlacementError> {
        let position = self.cell(cell)?.position();
        let (column, row) = self.grid.clamp_slot(self.grid.slot_at(position));
        let center = self.grid.cell_center(column, row);

        let target = self.cell_mut(cell)?;
        target.set_position(center);
        if let Some(occupant) = target.occupant() {
            self.block_mut(occupant)?.set_position(center);
        }
        debug!(cell:% = cell, column, row; "Cell snapped to grid");
        Ok((column, row))
    }
}

/// Picks the cell whose hit box contains `pointer`, nearest center first,
/// then lowest id. The result does not depend on the order of `cells`.
pub(crate) fn select_drop_target<'a>(
    pointer: Point,
    cells: impl IntoIterator<Item = &'a Cell>,
    hit_size: f32,
) -> Option<CellId> {
    let mut best: Option<(f32, CellId)> = None;
    for cell in cells {
        if !cell.hit_bounds(hit_size).contains(pointer) {
            continue;
        }
        let distance = cell.position().distance_squared(pointer);
        trace!(cell:% = cell.id(), distance; "Drop candidate");
        let better = match best {
            None => true,
            Some((best_distance, best_id)) => {
                distance < best_distance || (distance == best_distance && cell.id() < best_id)
            }
        };
        if better {
            best = Some((distance, cell.id()));
        }
    }
    best.map(|(_, id)| id)
}
