use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use image::Rgb;
use log::{info, warn, LevelFilter};
use mazegraph::{render_path, solve, ImageMaze, SolveOptions};

#[derive(Parser)]
#[command(name = "mazegraph")]
#[command(author, version, about)]
#[command(long_about = "Solves a black and white maze image.\n\n\
    White pixels are passages, everything else is a wall. The entrance is the white pixel on \
    the top row and the exit the white pixel on the bottom row.\n\n\
    Examples:\n  \
    mazegraph maze.bmp                 Solve and save maze-solved.bmp\n  \
    mazegraph maze.png --optimize      Collapse straight corridors before searching\n  \
    mazegraph maze.png --json --no-render")]
struct Cli {
    /// Maze image to solve
    image: PathBuf,

    /// Collapse straight corridors before searching (the path may no longer be the shortest)
    #[arg(long)]
    optimize: bool,

    /// Repeat the corridor collapsing until nothing changes
    #[arg(long, requires = "optimize")]
    exhaustive: bool,

    /// Where to save the solved image, defaults to <name>-solved.<ext> next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not save an image with the path drawn on it
    #[arg(long, conflicts_with = "output")]
    no_render: bool,

    /// Print the solution as JSON
    #[arg(long)]
    json: bool,

    /// Color of the drawn path as R,G,B
    #[arg(long, value_parser = parse_color, default_value = "255,0,0")]
    path_color: Rgb<u8>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_color(s: &str) -> Result<Rgb<u8>, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("{}: {}", c, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(format!("expected three channels, got {}", channels.len())),
    }
}

fn solved_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}-solved.{}", stem, ext.to_string_lossy()),
        None => format!("{}-solved", stem),
    };
    input.with_file_name(name)
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let img = image::open(&cli.image)
        .with_context(|| format!("failed to open {}", cli.image.display()))?
        .to_rgb8();
    let maze = ImageMaze::new(&img);

    let options = SolveOptions {
        optimize: cli.optimize,
        exhaustive_optimize: cli.exhaustive,
    };
    let solution = solve(&maze, &options)
        .with_context(|| format!("failed to solve {}", cli.image.display()))?;

    if solution.is_solved() {
        info!(
            "found path from {} to {} ({} pixels)",
            solution.start,
            solution.stop,
            solution.pixel_length()
        );
    } else {
        warn!("no path from {} to {}", solution.start, solution.stop);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    }

    if !cli.no_render && solution.is_solved() {
        let output = cli.output.unwrap_or_else(|| solved_name(&cli.image));
        info!("saving...");
        render_path(&img, &solution.path, cli.path_color)?
            .save(&output)
            .with_context(|| format!("failed to save {}", output.display()))?;
        info!("saved as {}", output.display());
    }

    Ok(())
}
