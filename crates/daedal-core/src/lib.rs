//! **daedal-core** — geometry primitives shared across the *daedal* maze
//! workbench: integer points and half-open grid rectangles.

pub mod geom;

pub use geom::{Point, Range};
