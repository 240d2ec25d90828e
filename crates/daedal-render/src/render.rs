use std::fmt;

use daedal_core::Point;
use daedal_maze::{Maze, PathResult};
use image::{Rgba, RgbaImage};
use log::debug;

use crate::colors;

/// Error type for maze rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The requested cell size is zero pixels.
    ZeroCell,
    /// The result sequence does not match the maze's exits.
    ResultMismatch { exits: usize, results: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ZeroCell => write!(f, "cell size must be at least one pixel"),
            RenderError::ResultMismatch { exits, results } => {
                write!(f, "{results} results for {exits} exits")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Paint a solved maze into an RGBA image.
///
/// Each grid cell becomes a `cell_px` × `cell_px` block: black walls, white
/// corridors. Path cells are overpainted with an inset square in the exit's
/// cycle color, then the start (green) and exits (red) are marked on top.
/// An unreachable exit keeps a hollow red outline instead of a filled
/// marker. `results` must have one entry per exit, as produced by
/// `solve_all`.
pub fn render(maze: &Maze, results: &[PathResult], cell_px: u32) -> Result<RgbaImage, RenderError> {
    if cell_px == 0 {
        return Err(RenderError::ZeroCell);
    }
    if results.len() != maze.exits.len() {
        return Err(RenderError::ResultMismatch {
            exits: maze.exits.len(),
            results: results.len(),
        });
    }

    let size = maze.grid.size();
    let mut img = RgbaImage::new(size.x as u32 * cell_px, size.y as u32 * cell_px);

    for p in maze.grid.bounds().iter() {
        let color = if maze.grid.is_open(p) {
            colors::OPEN
        } else {
            colors::WALL
        };
        fill_cell(&mut img, p, cell_px, 0, color);
    }

    // Paths first; an inset keeps a crossing's most recent coat from hiding
    // the corridor entirely.
    let inset = cell_px / 4;
    for (i, result) in results.iter().enumerate() {
        if let Some(path) = result.path() {
            let color = colors::path_color(i);
            for &p in path {
                fill_cell(&mut img, p, cell_px, inset, color);
            }
        }
    }

    // Markers on top, as the final coat.
    fill_cell(&mut img, maze.start, cell_px, 0, colors::START);
    for (i, &exit) in maze.exits.iter().enumerate() {
        if results[i].is_unreachable() {
            outline_cell(&mut img, exit, cell_px, colors::EXIT);
        } else {
            fill_cell(&mut img, exit, cell_px, 0, colors::EXIT);
        }
    }

    debug!(
        "rendered {}x{} maze at {cell_px}px/cell",
        size.x, size.y
    );
    Ok(img)
}

/// Fill the block for grid cell `p`, shrunk by `inset` pixels on every side.
fn fill_cell(img: &mut RgbaImage, p: Point, cell_px: u32, inset: u32, color: colors::Rgba) {
    let x0 = p.x as u32 * cell_px + inset;
    let y0 = p.y as u32 * cell_px + inset;
    let x1 = (p.x as u32 + 1) * cell_px - inset;
    let y1 = (p.y as u32 + 1) * cell_px - inset;
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgba(color));
        }
    }
}

/// Draw only the border ring of the block for grid cell `p`.
fn outline_cell(img: &mut RgbaImage, p: Point, cell_px: u32, color: colors::Rgba) {
    let t = (cell_px / 8).max(1);
    let x0 = p.x as u32 * cell_px;
    let y0 = p.y as u32 * cell_px;
    for y in 0..cell_px {
        for x in 0..cell_px {
            let on_ring = x < t || y < t || x >= cell_px - t || y >= cell_px - t;
            if on_ring {
                img.put_pixel(x0 + x, y0 + y, Rgba(color));
            }
        }
    }
}
