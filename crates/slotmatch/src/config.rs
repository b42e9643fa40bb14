//! Configuration types for the placement engine.
//!
//! This module provides the settings a level loader hands to a
//! [`Board`](crate::Board). All types implement [`serde::Deserialize`] so
//! they can come from TOML as easily as from code.
//!
//! # Overview
//!
//! - [`EngineConfig`] - Top-level configuration combining every section.
//! - [`GridConfig`] - Grid origin, cell size and dimensions.
//! - [`PlacementConfig`] - Drag and hit-test behavior.
//! - [`FootprintConfig`] - Padding added around measured block content.
//! - [`AdjacencyConfig`] - Automatic cell connection settings.
//!
//! # Example
//!
//! ```
//! # use slotmatch::config::EngineConfig;
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     [grid]
//!     cell_size = 2.0
//!     columns = 3
//!     rows = 4
//!
//!     [adjacency]
//!     radius = 2.5
//!     "#,
//! )
//! .expect("valid configuration");
//!
//! assert_eq!(config.grid().columns(), 3);
//! assert_eq!(config.adjacency().radius(), Some(2.5));
//! assert!(config.placement().allow_redrag_from_cell());
//! ```

use serde::Deserialize;

use slotmatch_core::geometry::Point;

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Grid section.
    #[serde(default)]
    grid: GridConfig,

    /// Placement section.
    #[serde(default)]
    placement: PlacementConfig,

    /// Footprint section.
    #[serde(default)]
    footprint: FootprintConfig,

    /// Adjacency section.
    #[serde(default)]
    adjacency: AdjacencyConfig,
}

impl EngineConfig {
    /// Creates a new [`EngineConfig`] from its sections.
    pub fn new(
        grid: GridConfig,
        placement: PlacementConfig,
        footprint: FootprintConfig,
        adjacency: AdjacencyConfig,
    ) -> Self {
        Self {
            grid,
            placement,
            footprint,
            adjacency,
        }
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for non-finite numbers.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every numeric setting is a finite number.
    ///
    /// Out-of-range but finite values (a tiny cell size, negative padding)
    /// are not errors; they are clamped where they are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("grid.origin_x", Some(self.grid.origin_x)),
            ("grid.origin_y", Some(self.grid.origin_y)),
            ("grid.cell_size", Some(self.grid.cell_size)),
            ("placement.hit_size", self.placement.hit_size),
            ("footprint.padding", Some(self.footprint.padding)),
            ("adjacency.radius", self.adjacency.radius),
        ];
        for (field, value) in checks {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ConfigError::Validation(format!(
                        "{field} must be a finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the footprint configuration.
    pub fn footprint(&self) -> &FootprintConfig {
        &self.footprint
    }

    /// Returns the adjacency configuration.
    pub fn adjacency(&self) -> &AdjacencyConfig {
        &self.adjacency
    }
}

/// Grid origin, cell size and dimensions.
///
/// Defaults describe a 5x5 grid of unit cells at the world origin.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    origin_x: f32,

    #[serde(default)]
    origin_y: f32,

    #[serde(default = "default_cell_size")]
    cell_size: f32,

    #[serde(default = "default_dimension")]
    columns: u32,

    #[serde(default = "default_dimension")]
    rows: u32,
}

impl GridConfig {
    /// Creates a grid configuration.
    pub fn new(origin: Point, cell_size: f32, columns: u32, rows: u32) -> Self {
        Self {
            origin_x: origin.x(),
            origin_y: origin.y(),
            cell_size,
            columns,
            rows,
        }
    }

    /// Returns the world position of the grid's corner.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Returns the configured cell size, before clamping.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns the configured column count, before clamping.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the configured row count, before clamping.
    pub fn rows(&self) -> u32 {
        self.rows
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: default_cell_size(),
            columns: default_dimension(),
            rows: default_dimension(),
        }
    }
}

/// Drag and hit-test behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    /// Whether a block sitting in a cell may be dragged straight out of it.
    #[serde(default = "default_true")]
    allow_redrag_from_cell: bool,

    /// Edge length of a cell's square hit box; the grid cell size when unset.
    #[serde(default)]
    hit_size: Option<f32>,
}

impl PlacementConfig {
    /// Creates a placement configuration.
    pub fn new(allow_redrag_from_cell: bool, hit_size: Option<f32>) -> Self {
        Self {
            allow_redrag_from_cell,
            hit_size,
        }
    }

    /// Returns whether placed blocks may be re-dragged.
    pub fn allow_redrag_from_cell(&self) -> bool {
        self.allow_redrag_from_cell
    }

    /// Returns the configured hit box edge length, if any.
    pub fn hit_size(&self) -> Option<f32> {
        self.hit_size
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            allow_redrag_from_cell: true,
            hit_size: None,
        }
    }
}

/// Padding added around measured block content.
#[derive(Debug, Clone, Deserialize)]
pub struct FootprintConfig {
    #[serde(default = "default_padding")]
    padding: f32,
}

impl FootprintConfig {
    /// Creates a footprint configuration.
    pub fn new(padding: f32) -> Self {
        Self { padding }
    }

    /// Returns the padding added on each side of the content.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
        }
    }
}

/// Automatic cell connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjacencyConfig {
    /// Connection radius; when set, the board connects cells as they are added.
    #[serde(default)]
    radius: Option<f32>,
}

impl AdjacencyConfig {
    /// Creates an adjacency configuration.
    pub fn new(radius: Option<f32>) -> Self {
        Self { radius }
    }

    /// Returns the connection radius, if automatic connection is enabled.
    pub fn radius(&self) -> Option<f32> {
        self.radius
    }
}

fn default_cell_size() -> f32 {
    1.0
}

fn default_dimension() -> u32 {
    5
}

fn default_padding() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}
