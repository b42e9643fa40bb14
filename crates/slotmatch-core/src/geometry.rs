//! Geometric primitives for board layout, hit-testing and block sizing.
//!
//! This module provides the value types every other part of Slotmatch uses
//! to talk about world space.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in world space
//! - [`Size`] - A width and a height
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! World space is a plain Cartesian plane measured in world units. The grid
//! grows along `+X` with its column index and along `+Y` with its row index:
//!
//! ```text
//!   origin ────────► +X (columns)
//!     │
//!     │
//!     ▼
//!    +Y (rows)
//! ```
//!
//! Nothing in the engine depends on which way `+Y` points on screen; that is
//! the renderer's concern.

/// A 2D point in world space.
///
/// # Examples
///
/// ```
/// # use slotmatch_core::geometry::Point;
/// let pointer = Point::new(2.0, 3.0);
/// let cell_center = Point::new(2.5, 3.5);
///
/// assert_eq!(pointer.distance_squared(cell_center), 0.5);
/// assert_eq!(pointer.add_point(Point::new(1.0, 1.0)), Point::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Component-wise addition.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Component-wise subtraction.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Bounds of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element, such as a block footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Grows the size by `insets` on each side.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Places `other` to the right of this size: widths add, the taller height wins.
    pub fn merge_horizontal(self, other: Size) -> Self {
        Self {
            width: self.width + other.width,
            height: self.height.max(other.height),
        }
    }

    /// Stacks `other` below this size: heights add, the wider width wins.
    pub fn merge_vertical(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height + other.height,
        }
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Used for measured text extents, cell hit boxes, block footprints placed in
/// the world, and the extent of the whole grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Bounds of `size` centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Bounds of `size` whose smallest corner is `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Midpoint of the rectangle.
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Width and height of the rectangle, dropping its position.
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Checks whether `point` lies inside the bounds.
    ///
    /// Edges are inclusive, so a point on the shared edge of two adjacent
    /// cells is contained by both of them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slotmatch_core::geometry::{Bounds, Point, Size};
    /// let cell = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(1.0, 1.0));
    ///
    /// assert!(cell.contains(Point::new(0.5, 0.5)));
    /// assert!(cell.contains(Point::new(1.0, 1.0)));
    /// assert!(!cell.contains(Point::new(1.01, 0.5)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Padding on the four sides of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same inset on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Total inset across the width.
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Total inset across the height.
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
