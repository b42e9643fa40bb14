//! Grid coordinate math.
//!
//! The [`Grid`] maps `(column, row)` slots to world positions and back. It
//! owns no puzzle state: cells and blocks consult it for positions, and it is
//! read-only once the board is built.

use log::warn;

use slotmatch_core::geometry::{Bounds, Point, Size};

use crate::config::GridConfig;

/// Smallest cell size a grid accepts; smaller values are clamped up.
pub const MIN_CELL_SIZE: f32 = 0.1;

/// Largest column or row count a grid accepts, so every slot fits an `i32`.
pub const MAX_SLOTS: u32 = i32::MAX as u32;

/// A block's initial rectangle on the grid, in slots.
///
/// `width` and `height` count slots and are treated as at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub column: i32,
    pub row: i32,
    pub width: u32,
    pub height: u32,
}

impl GridRect {
    /// Creates a grid rectangle.
    pub fn new(column: i32, row: i32, width: u32, height: u32) -> Self {
        Self {
            column,
            row,
            width,
            height,
        }
    }

    /// A single slot.
    pub fn slot(column: i32, row: i32) -> Self {
        Self::new(column, row, 1, 1)
    }
}

/// Coordinate authority for a board.
///
/// # Examples
///
/// ```
/// # use slotmatch::grid::Grid;
/// # use slotmatch_core::geometry::Point;
/// let grid = Grid::new(Point::new(0.0, 0.0), 1.0, 5, 5);
/// assert_eq!(grid.cell_center(2, 3), Point::new(2.5, 3.5));
/// assert_eq!(grid.slot_at(Point::new(2.5, 3.5)), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    origin: Point,
    cell_size: f32,
    columns: u32,
    rows: u32,
}

impl Grid {
    /// Creates a grid, clamping degenerate settings.
    ///
    /// `cell_size` below [`MIN_CELL_SIZE`] (or not a number) becomes
    /// [`MIN_CELL_SIZE`]; zero columns or rows become one, and counts above
    /// [`MAX_SLOTS`] become [`MAX_SLOTS`]. Each clamp is logged.
    pub fn new(origin: Point, cell_size: f32, columns: u32, rows: u32) -> Self {
        // NaN fails this comparison too
        let cell_size = if cell_size >= MIN_CELL_SIZE {
            cell_size
        } else {
            warn!(cell_size, min = MIN_CELL_SIZE; "Cell size below minimum, clamping");
            MIN_CELL_SIZE
        };
        let columns = clamp_count("columns", columns);
        let rows = clamp_count("rows", rows);
        Self {
            origin,
            cell_size,
            columns,
            rows,
        }
    }

    /// Creates a grid from its configuration section.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(
            config.origin(),
            config.cell_size(),
            config.columns(),
            config.rows(),
        )
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// World position of the center of slot `(column, row)`.
    ///
    /// Slots outside the grid are extrapolated with the same spacing.
    pub fn cell_center(&self, column: i32, row: i32) -> Point {
        let half = self.cell_size / 2.0;
        self.origin.add_point(Point::new(
            column as f32 * self.cell_size + half,
            row as f32 * self.cell_size + half,
        ))
    }

    /// Rounds a world position to the nearest grid line intersection.
    ///
    /// Computes `round((position - origin) / cell_size)` per axis, halves
    /// rounding away from zero. Used by re-fit tooling, never during a drag.
    pub fn snap_to_grid(&self, position: Point) -> (i32, i32) {
        let local = position.sub_point(self.origin);
        (
            (local.x() / self.cell_size).round() as i32,
            (local.y() / self.cell_size).round() as i32,
        )
    }

    /// The slot whose square contains `position`.
    ///
    /// May lie outside the grid; see [`Grid::clamp_slot`].
    pub fn slot_at(&self, position: Point) -> (i32, i32) {
        let local = position.sub_point(self.origin);
        (
            (local.x() / self.cell_size).floor() as i32,
            (local.y() / self.cell_size).floor() as i32,
        )
    }

    /// Clamps a slot into `0..columns` x `0..rows`.
    pub fn clamp_slot(&self, (column, row): (i32, i32)) -> (i32, i32) {
        (
            column.clamp(0, self.columns as i32 - 1),
            row.clamp(0, self.rows as i32 - 1),
        )
    }

    /// Returns `true` when the slot lies inside the grid.
    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= 0 && row >= 0 && (column as u32) < self.columns && (row as u32) < self.rows
    }

    /// The square occupied by slot `(column, row)`.
    pub fn cell_bounds(&self, column: i32, row: i32) -> Bounds {
        self.cell_center(column, row)
            .to_bounds(Size::square(self.cell_size))
    }

    /// The world rectangle covered by a multi-slot [`GridRect`].
    ///
    /// Its top-left corner sits at `origin + (column, row) * cell_size` and it
    /// spans `(width, height) * cell_size`.
    pub fn layout_rect(&self, rect: GridRect) -> Bounds {
        let top_left = self.origin.add_point(Point::new(
            rect.column as f32 * self.cell_size,
            rect.row as f32 * self.cell_size,
        ));
        let size = Size::new(
            rect.width.max(1) as f32 * self.cell_size,
            rect.height.max(1) as f32 * self.cell_size,
        );
        Bounds::new_from_top_left(top_left, size)
    }

    /// The extent of the whole grid.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(
            self.origin,
            Size::new(
                self.columns as f32 * self.cell_size,
                self.rows as f32 * self.cell_size,
            ),
        )
    }

    /// Every slot in the grid, column by column.
    pub fn slots(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let rows = self.rows as i32;
        (0..self.columns as i32)
            .flat_map(move |column| (0..rows).map(move |row| (column, row)))
    }
}

fn clamp_count(axis: &str, count: u32) -> u32 {
    if count == 0 {
        warn!(axis; "Grid has zero slots on an axis, clamping to 1");
        1
    } else if count > MAX_SLOTS {
        warn!(axis, count, max = MAX_SLOTS; "Grid slot count above maximum, clamping");
        MAX_SLOTS
    } else {
        count
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn unit_grid() -> Grid {
        Grid::new(Point::new(0.0, 0.0), 1.0, 5, 5)
    }

    #[test]
    fn test_cell_center_unit_grid() {
        assert_eq!(unit_grid().cell_center(2, 3), Point::new(2.5, 3.5));
        assert_eq!(unit_grid().cell_center(0, 0), Point::new(0.5, 0.5));
    }

    #[test]
    fn test_cell_center_with_origin_and_size() {
        let grid = Grid::new(Point::new(-1.0, 2.0), 2.0, 3, 3);
        let center = grid.cell_center(1, 2);
        assert_approx_eq!(f32, center.x(), 2.0);
        assert_approx_eq!(f32, center.y(), 7.0);
    }

    #[test]
    fn test_clamps_degenerate_settings() {
        let grid = Grid::new(Point::default(), 0.01, 0, 0);
        assert_approx_eq!(f32, grid.cell_size(), MIN_CELL_SIZE);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 1);

        let grid = Grid::new(Point::default(), f32::NAN, 2, 2);
        assert_approx_eq!(f32, grid.cell_size(), MIN_CELL_SIZE);

        let grid = Grid::new(Point::default(), -3.0, 2, 2);
        assert_approx_eq!(f32, grid.cell_size(), MIN_CELL_SIZE);
    }

    #[test]
    fn test_caps_huge_slot_counts() {
        let grid = Grid::new(Point::default(), 1.0, 3_000_000_000, 5);
        assert_eq!(grid.columns(), MAX_SLOTS);
        assert_eq!(grid.clamp_slot((1, 1)), (1, 1));
        assert_eq!(grid.clamp_slot((i32::MAX, 9)), (i32::MAX - 1, 4));
        assert!(grid.contains(i32::MAX - 1, 0));
        assert_eq!(grid.slots().take(6).last(), Some((1, 0)));
    }

    #[test]
    fn test_snap_to_grid_rounds() {
        let grid = unit_grid();
        assert_eq!(grid.snap_to_grid(Point::new(2.4, 3.6)), (2, 4));
        assert_eq!(grid.snap_to_grid(Point::new(2.5, 0.0)), (3, 0));
        assert_eq!(grid.snap_to_grid(Point::new(-0.6, -0.4)), (-1, 0));
    }

    #[test]
    fn test_slot_at_floors() {
        let grid = unit_grid();
        assert_eq!(grid.slot_at(Point::new(2.9, 3.1)), (2, 3));
        assert_eq!(grid.slot_at(Point::new(-0.1, 0.0)), (-1, 0));
        assert_eq!(grid.slot_at(grid.cell_center(4, 1)), (4, 1));
    }

    #[test]
    fn test_clamp_slot_and_contains() {
        let grid = unit_grid();
        assert_eq!(grid.clamp_slot((-3, 7)), (0, 4));
        assert_eq!(grid.clamp_slot((2, 2)), (2, 2));
        assert!(grid.contains(0, 0));
        assert!(grid.contains(4, 4));
        assert!(!grid.contains(5, 0));
        assert!(!grid.contains(0, -1));
    }

    #[test]
    fn test_cell_bounds() {
        let bounds = unit_grid().cell_bounds(1, 1);
        assert_approx_eq!(f32, bounds.min_x(), 1.0);
        assert_approx_eq!(f32, bounds.max_x(), 2.0);
        assert_approx_eq!(f32, bounds.min_y(), 1.0);
        assert_approx_eq!(f32, bounds.max_y(), 2.0);
    }

    #[test]
    fn test_layout_rect_spans_slots() {
        let grid = Grid::new(Point::new(1.0, 1.0), 0.5, 4, 4);
        let rect = grid.layout_rect(GridRect::new(2, 1, 2, 1));
        assert_approx_eq!(f32, rect.min_x(), 2.0);
        assert_approx_eq!(f32, rect.min_y(), 1.5);
        assert_approx_eq!(f32, rect.width(), 1.0);
        assert_approx_eq!(f32, rect.height(), 0.5);
    }

    #[test]
    fn test_layout_rect_treats_zero_extent_as_one() {
        let rect = unit_grid().layout_rect(GridRect::new(0, 0, 0, 0));
        assert_approx_eq!(f32, rect.width(), 1.0);
        assert_approx_eq!(f32, rect.height(), 1.0);
        assert_eq!(rect.center(), unit_grid().cell_center(0, 0));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(Point::new(-1.0, 0.0), 2.0, 3, 2);
        let bounds = grid.bounds();
        assert_approx_eq!(f32, bounds.min_x(), -1.0);
        assert_approx_eq!(f32, bounds.max_x(), 5.0);
        assert_approx_eq!(f32, bounds.max_y(), 4.0);
    }

    #[test]
    fn test_slots_visits_every_slot_once() {
        let grid = Grid::new(Point::default(), 1.0, 3, 2);
        let slots: Vec<_> = grid.slots().collect();
        assert_eq!(slots, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_from_config() {
        let config = GridConfig::new(Point::new(3.0, 4.0), 0.0, 0, 6);
        let grid = Grid::from_config(&config);
        assert_eq!(grid.origin(), Point::new(3.0, 4.0));
        assert_approx_eq!(f32, grid.cell_size(), MIN_CELL_SIZE);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 6);
    }
}
