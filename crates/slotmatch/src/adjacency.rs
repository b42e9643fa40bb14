//! Cell adjacency graph.
//!
//! Connections between cells are stored in a single undirected
//! [`UnGraphMap`], so `a` is connected to `b` exactly when `b` is connected
//! to `a`. Self-loops are never inserted.
//!
//! Two ways to fill the graph by proximity:
//!
//! - [`Adjacency::auto_connect`] re-derives the connections of one cell:
//!   its existing edges are cleared, then it is connected to every other cell
//!   within the radius.
//! - [`Adjacency::rebuild`] throws away every edge and connects all pairs
//!   within the radius. Cells are bucketed into a square grid of side
//!   `radius`, so only the 3x3 neighborhood of each bucket is compared.

use std::collections::HashMap;

use log::{debug, info};
use petgraph::{graphmap::UnGraphMap, visit::Bfs};

use slotmatch_core::{geometry::Point, identifier::CellId};

use crate::cell::Cell;

/// Symmetric connection relation between cells.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    graph: UnGraphMap<CellId, ()>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cell with no connections.
    pub fn add_cell(&mut self, cell: CellId) {
        self.graph.add_node(cell);
    }

    /// Connects two cells.
    ///
    /// Returns `true` if a new connection was made. Connecting a cell to
    /// itself, or connecting an already connected pair, does nothing.
    pub fn connect(&mut self, a: CellId, b: CellId) -> bool {
        if a == b || self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Removes every connection of `cell`.
    pub fn clear(&mut self, cell: CellId) {
        let neighbors: Vec<CellId> = self.graph.neighbors(cell).collect();
        for neighbor in neighbors {
            self.graph.remove_edge(cell, neighbor);
        }
    }

    /// Replaces the connections of `cell` with every other cell in `cells`
    /// whose center lies within `radius` of its own (inclusive).
    ///
    /// Other cells keep their remaining connections. Nothing is connected if
    /// `cell` is not part of `cells`.
    pub fn auto_connect(&mut self, cell: CellId, cells: &[Cell], radius: f32) {
        self.clear(cell);
        let Some(origin) = cells.iter().find(|c| c.id() == cell).map(Cell::position) else {
            return;
        };
        let radius_squared = radius * radius;
        let mut connected = 0usize;
        for other in cells {
            if radius >= 0.0
                && other.position().distance_squared(origin) <= radius_squared
                && self.connect(cell, other.id())
            {
                connected += 1;
            }
        }
        debug!(cell:% = cell, radius, connected; "Auto-connected cell");
    }

    /// Drops all connections, then connects every pair of cells within
    /// `radius` of each other.
    ///
    /// A negative or non-numeric radius leaves the graph without edges.
    pub fn rebuild(&mut self, cells: &[Cell], radius: f32) {
        self.graph.clear();
        for cell in cells {
            self.graph.add_node(cell.id());
        }

        if radius > 0.0 {
            self.connect_bucketed(cells, radius);
        } else if radius == 0.0 {
            self.connect_pairwise(cells, radius);
        }

        info!(
            cells = cells.len(),
            radius,
            edges = self.edge_count();
            "Adjacency rebuilt"
        );
    }

    /// Compares every pair of cells.
    fn connect_pairwise(&mut self, cells: &[Cell], radius: f32) {
        let radius_squared = radius * radius;
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                if a.position().distance_squared(b.position()) <= radius_squared {
                    self.connect(a.id(), b.id());
                }
            }
        }
    }

    /// Compares only cells in neighboring buckets of side `radius`.
    fn connect_bucketed(&mut self, cells: &[Cell], radius: f32) {
        let radius_squared = radius * radius;
        let bucket_of = |position: Point| {
            (
                (position.x() / radius).floor() as i64,
                (position.y() / radius).floor() as i64,
            )
        };

        let mut buckets: HashMap<(i64, i64), Vec<&Cell>> = HashMap::new();
        for cell in cells {
            buckets.entry(bucket_of(cell.position())).or_default().push(cell);
        }

        for cell in cells {
            let (bx, by) = bucket_of(cell.position());
            for dx in -1..=1i64 {
                for dy in -1..=1i64 {
                    let key = (bx.saturating_add(dx), by.saturating_add(dy));
                    let Some(bucket) = buckets.get(&key) else {
                        continue;
                    };
                    for other in bucket {
                        if other.id() > cell.id()
                            && cell.position().distance_squared(other.position()) <= radius_squared
                        {
                            self.connect(cell.id(), other.id());
                        }
                    }
                }
            }
        }
    }

    /// Connected cells of `cell`, in ascending id order.
    pub fn neighbors(&self, cell: CellId) -> Vec<CellId> {
        let mut neighbors: Vec<CellId> = self.graph.neighbors(cell).collect();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn are_connected(&self, a: CellId, b: CellId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Every cell reachable from `cell` (itself included), breadth first.
    ///
    /// Empty when `cell` is unknown to the graph.
    pub fn reachable_from(&self, cell: CellId) -> Vec<CellId> {
        if !self.graph.contains_node(cell) {
            return Vec::new();
        }
        let mut bfs = Bfs::new(&self.graph, cell);
        let mut reached = Vec::new();
        while let Some(next) = bfs.next(&self.graph) {
            reached.push(next);
        }
        reached
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every connection as an ordered `(lower, higher)` pair, sorted.
    pub fn edges(&self) -> Vec<(CellId, CellId)> {
        let mut edges: Vec<(CellId, CellId)> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges
    }
}
