//! Maze domain for the *daedal* workbench: an immutable occupancy grid,
//! a depth-first maze generator, and a multi-exit shortest-path solver.
//!
//! The typical flow constructs everything once and then only reads:
//!
//! ```
//! use daedal_maze::{Adjacency, MazeGen};
//!
//! let maze = MazeGen::new(8, 8, rand::rng()).unwrap().generate(3);
//! let results = maze.solve_all(Adjacency::Cardinal).unwrap();
//! assert_eq!(results.len(), maze.exits.len());
//! ```

pub mod grid;
pub mod mazegen;
pub mod solve;

pub use grid::{GridError, MazeGrid, Tile};
pub use mazegen::{GenError, Maze, MazeGen};
pub use solve::{Adjacency, ConfigError, PathResult, solve_all};
