//! daedal — generate a maze, solve every exit with A*, render to PNG.

use clap::Parser;
use daedal_maze::{Adjacency, MazeGen};
use daedal_render::render;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generate a random maze, find the shortest path to every exit, and write
/// a color-coded PNG.
#[derive(Parser, Debug)]
#[command(name = "daedal", version, about)]
struct Args {
    /// Maze width in logical cells.
    #[arg(long, default_value_t = 15)]
    width: i32,

    /// Maze height in logical cells.
    #[arg(long, default_value_t = 15)]
    height: i32,

    /// Number of boundary exits to carve.
    #[arg(long, default_value_t = 4)]
    exits: usize,

    /// RNG seed for a reproducible maze.
    #[arg(long)]
    seed: Option<u64>,

    /// Allow diagonal movement (8-connected) when solving.
    #[arg(long)]
    diagonal: bool,

    /// Pixel size of one grid cell in the output image.
    #[arg(long, default_value_t = 16)]
    cell_px: u32,

    /// Output PNG path.
    #[arg(long, default_value = "maze.png")]
    out: std::path::PathBuf,

    /// Also print the maze as text to stdout.
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let maze = MazeGen::new(args.width, args.height, rng)?.generate(args.exits);
    if args.ascii {
        print!("{}", maze.grid);
    }

    let adjacency = if args.diagonal {
        Adjacency::Eight
    } else {
        Adjacency::Cardinal
    };
    let results = maze.solve_all(adjacency)?;
    let reached = results.iter().filter(|r| !r.is_unreachable()).count();
    info!("{reached}/{} exits reachable", results.len());

    let img = render(&maze, &results, args.cell_px)?;
    img.save(&args.out)?;
    info!("wrote {}", args.out.display());

    Ok(())
}
