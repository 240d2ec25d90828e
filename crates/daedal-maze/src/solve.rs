//! Multi-exit shortest-path solving.
//!
//! [`solve_all`] screens the start and exits against the grid, then runs one
//! independent A* search per exit over the shared read-only grid. Every exit
//! always yields a [`PathResult`]; an unreachable exit never aborts the rest.

use std::fmt;

use daedal_core::Point;
use daedal_paths::{AstarPather, PathRange, Pather, WeightedPather, chebyshev, manhattan};
use log::{info, warn};

use crate::grid::MazeGrid;
use crate::mazegen::Maze;

/// Neighbor connectivity, fixed for a whole solve run.
///
/// Every move costs 1 in both models, so the matching admissible heuristic
/// is Manhattan distance for [`Cardinal`](Adjacency::Cardinal) and Chebyshev
/// distance for [`Eight`](Adjacency::Eight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// Orthogonal moves only (4-connected).
    #[default]
    Cardinal,
    /// Orthogonal and diagonal moves (8-connected).
    Eight,
}

/// Outcome of a single exit search.
///
/// Either a complete path from the start to that exit, or an explicit
/// marker; never a partial path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// Complete path, start and exit included.
    Path(Vec<Point>),
    /// No path exists under the current walls. An expected outcome, not an
    /// error.
    Unreachable,
}

impl PathResult {
    /// The path cells, or `None` for an unreachable exit.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Path(p) => Some(p),
            PathResult::Unreachable => None,
        }
    }

    /// Whether this exit was unreachable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, PathResult::Unreachable)
    }
}

/// Invalid start/exit configuration, rejected before any search runs.
///
/// These are fatal to the whole solve call, unlike per-exit
/// [`PathResult::Unreachable`] outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An endpoint lies outside the grid.
    OutOfBounds { name: String, pos: Point },
    /// An endpoint sits on a wall tile.
    Blocked { name: String, pos: Point },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfBounds { name, pos } => {
                write!(f, "{name} {pos} is outside the grid")
            }
            ConfigError::Blocked { name, pos } => {
                write!(f, "{name} {pos} is a wall cell")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Borrow of the grid implementing the pathfinding trait stack.
struct GridPather<'a> {
    grid: &'a MazeGrid,
    adjacency: Adjacency,
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        match self.adjacency {
            Adjacency::Cardinal => {
                for n in p.neighbors_4() {
                    if self.grid.is_open(n) {
                        buf.push(n);
                    }
                }
            }
            Adjacency::Eight => {
                for n in p.neighbors_8() {
                    if self.grid.is_open(n) {
                        buf.push(n);
                    }
                }
            }
        }
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        match self.adjacency {
            Adjacency::Cardinal => manhattan(from, to),
            Adjacency::Eight => chebyshev(from, to),
        }
    }
}

fn check_endpoint(grid: &MazeGrid, name: impl Into<String>, pos: Point) -> Result<(), ConfigError> {
    if !grid.contains(pos) {
        return Err(ConfigError::OutOfBounds {
            name: name.into(),
            pos,
        });
    }
    if !grid.is_open(pos) {
        return Err(ConfigError::Blocked {
            name: name.into(),
            pos,
        });
    }
    Ok(())
}

/// Find the shortest path from `start` to every exit, in exit order.
///
/// All endpoints are validated before the first search; a bad one fails the
/// whole call with a [`ConfigError`]. After that each exit is searched
/// independently, and the returned vector always has one entry per exit,
/// whatever their reachability. Duplicate exits simply produce identical
/// paths.
pub fn solve_all(
    grid: &MazeGrid,
    start: Point,
    exits: &[Point],
    adjacency: Adjacency,
) -> Result<Vec<PathResult>, ConfigError> {
    check_endpoint(grid, "start", start)?;
    for (i, &e) in exits.iter().enumerate() {
        check_endpoint(grid, format!("exit {i}"), e)?;
    }

    let pather = GridPather { grid, adjacency };
    let mut range = PathRange::new(grid.bounds());
    let mut results = Vec::with_capacity(exits.len());

    for (i, &exit) in exits.iter().enumerate() {
        match range.astar_path(&pather, start, exit) {
            Some(path) => {
                info!("exit {i} at {exit}: path of {} cells", path.len());
                results.push(PathResult::Path(path));
            }
            None => {
                warn!("exit {i} at {exit}: unreachable");
                results.push(PathResult::Unreachable);
            }
        }
    }
    Ok(results)
}

impl Maze {
    /// Solve this maze's exits from its entrance. See [`solve_all`].
    pub fn solve_all(&self, adjacency: Adjacency) -> Result<Vec<PathResult>, ConfigError> {
        solve_all(&self.grid, self.start, &self.exits, adjacency)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_round_trip() {
        let results = [
            PathResult::Path(vec![Point::new(0, 0), Point::new(1, 0)]),
            PathResult::Unreachable,
        ];
        for r in &results {
            let json = serde_json::to_string(r).unwrap();
            let back: PathResult = serde_json::from_str(&json).unwrap();
            assert_eq!(*r, back);
        }
    }
}
