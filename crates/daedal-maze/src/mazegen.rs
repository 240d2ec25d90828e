//! Depth-first maze generation.
//!
//! The generator carves a *perfect* maze (every open cell connected, no
//! loops) on a lattice grid: logical cells sit at odd coordinates of a
//! `(2w+1) × (2h+1)` tile field, separated by wall tiles that the carver
//! knocks out one by one. An entrance is opened on the left edge and a
//! configurable number of exits is carved into the boundary.

use daedal_core::Point;
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::grid::{MazeGrid, Tile};

/// Error for invalid generator dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// Zero or negative logical dimensions.
    Empty,
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenError::Empty => write!(f, "maze dimensions must be positive"),
        }
    }
}

impl std::error::Error for GenError {}

/// A generated maze: the grid plus its entrance and exits.
///
/// Generation guarantees that `start` and every exit are open; since the
/// maze is perfect, every exit is also reachable from `start`.
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: MazeGrid,
    /// The entrance cell on the left edge.
    pub start: Point,
    /// Boundary exit cells, in sampling order. The order is what downstream
    /// consumers key colors and result positions on.
    pub exits: Vec<Point>,
}

/// Maze generator owning its randomness source.
pub struct MazeGen<R: Rng> {
    rng: R,
    width: i32,
    height: i32,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator for a maze of `width × height` logical cells.
    pub fn new(width: i32, height: i32, rng: R) -> Result<Self, GenError> {
        if width < 1 || height < 1 {
            return Err(GenError::Empty);
        }
        Ok(Self { rng, width, height })
    }

    /// Generate the maze and carve up to `num_exits` boundary exits.
    ///
    /// Fewer exits than requested are carved when the boundary does not
    /// offer enough candidates; that is logged, not an error.
    pub fn generate(mut self, num_exits: usize) -> Maze {
        info!(
            "generating {}x{} maze with up to {num_exits} exits",
            self.width, self.height
        );

        // Lattice field: logical cells at odd coordinates, walls between.
        let mut grid = MazeGrid::filled(2 * self.width + 1, 2 * self.height + 1, Tile::Wall);

        self.carve(&mut grid);

        // Entrance on the left edge, next to the first logical cell.
        let start = Point::new(0, 1);
        grid.set(start, Tile::Open);

        let exits = self.carve_exits(&mut grid, num_exits);
        info!("maze generated: start {start}, {} exits", exits.len());

        Maze { grid, start, exits }
    }

    /// Iterative depth-first carving from the first logical cell.
    ///
    /// Each step jumps two tiles to a neighboring logical cell; still-walled
    /// logical cells are unvisited. Carving opens both the target cell and
    /// the wall tile between.
    fn carve(&mut self, grid: &mut MazeGrid) {
        let first = Point::new(1, 1);
        grid.set(first, Tile::Open);
        let mut stack = vec![first];

        let interior = grid.bounds();
        let in_interior = |p: Point| {
            p.x > interior.min.x
                && p.x < interior.max.x - 1
                && p.y > interior.min.y
                && p.y < interior.max.y - 1
        };

        while let Some(p) = stack.last().copied() {
            let mut dirs = [
                Point::new(2, 0),
                Point::new(-2, 0),
                Point::new(0, 2),
                Point::new(0, -2),
            ];
            dirs.shuffle(&mut self.rng);

            let next = dirs.iter().map(|&d| (d, p + d)).find(|&(_, np)| {
                in_interior(np) && grid.at(np) == Some(Tile::Wall)
            });

            match next {
                Some((d, np)) => {
                    grid.set(p.shift(d.x / 2, d.y / 2), Tile::Open);
                    grid.set(np, Tile::Open);
                    stack.push(np);
                }
                None => {
                    stack.pop();
                }
            }
        }

        debug!("carved {} open tiles", grid.count(Tile::Open));
    }

    /// Sample and carve exits on the boundary.
    ///
    /// Candidates are boundary tiles adjacent to an already-carved cell:
    /// left/right edges at odd y, top/bottom edges at odd x.
    fn carve_exits(&mut self, grid: &mut MazeGrid, num_exits: usize) -> Vec<Point> {
        let w = grid.width();
        let h = grid.height();
        let mut candidates = Vec::new();

        for y in (1..h - 1).step_by(2) {
            if grid.is_open(Point::new(w - 2, y)) {
                candidates.push(Point::new(w - 1, y));
            }
            if grid.is_open(Point::new(1, y)) {
                candidates.push(Point::new(0, y));
            }
        }
        for x in (1..w - 1).step_by(2) {
            if grid.is_open(Point::new(x, h - 2)) {
                candidates.push(Point::new(x, h - 1));
            }
            if grid.is_open(Point::new(x, 1)) {
                candidates.push(Point::new(x, 0));
            }
        }

        if candidates.len() < num_exits {
            warn!(
                "only {} exit candidates for {num_exits} requested exits",
                candidates.len()
            );
        }

        let exits: Vec<Point> = candidates
            .choose_multiple(&mut self.rng, num_exits)
            .copied()
            .collect();
        for &e in &exits {
            grid.set(e, Tile::Open);
        }
        exits
    }
}
