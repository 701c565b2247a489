use std::{fmt::Display, time::Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub mod endpoints;
pub mod find;
pub mod graph;
pub mod grid;
pub mod render;
pub mod util;

pub use endpoints::{find_start_stop, Border};
pub use find::{shortest_path, PathFinder, PathFinderState, PathResult};
pub use graph::Graph;
pub use grid::{Cell, GridMap, Maze, Point};
pub use render::{draw_path, render_path, PATH_COLOR};
pub use util::{parse_img, ImageMaze, PASSAGE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No passage pixel on the border the entrance or exit is expected on
    MissingEndpoint { border: Border },
    /// Two consecutive path nodes that are not on a common row or column
    InvalidPathSegment { from: Point, to: Point },
    PointOutsideImage(Point),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingEndpoint { border } => {
                write!(f, "no passage pixel on the {} border", border)
            }
            Error::InvalidPathSegment { from, to } => {
                write!(f, "path segment {} -> {} is not axis-aligned", from, to)
            }
            Error::PointOutsideImage(p) => write!(f, "path point {} is outside the image", p),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Collapse straight corridors before searching
    pub optimize: bool,
    /// Repeat the optimization until nothing changes, only used together with `optimize`
    pub exhaustive_optimize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub start: Point,
    pub stop: Point,
    /// Nodes from start to stop, empty if the stop can not be reached
    pub path: Vec<Point>,
    pub optimized: bool,
    /// Graph size straight out of the builder
    pub nodes_before: usize,
    /// Graph size the search ran on
    pub nodes_after: usize,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of pixel steps along the path, also for paths over collapsed corridors
    pub fn pixel_length(&self) -> usize {
        self.path
            .windows(2)
            .map(|pair| pair[0].x.abs_diff(pair[1].x) + pair[0].y.abs_diff(pair[1].y))
            .sum()
    }
}

/// Runs the whole pipeline on a maze: locate the endpoints, build the graph, optionally
/// optimize it and search it.
pub fn solve<M: Maze>(maze: &M, options: &SolveOptions) -> Result<Solution, Error> {
    let (start, stop) = find_start_stop(maze)?;

    let timer = Instant::now();
    let mut graph = Graph::build(maze);
    let nodes_before = graph.node_count();
    info!("Parsed: {:.3} seconds.", timer.elapsed().as_secs_f64());

    if options.optimize {
        let timer = Instant::now();
        // the endpoints are the last passage on their row, so they never sit between two
        // aligned neighbors and always survive
        if options.exhaustive_optimize {
            graph.optimize_fully();
        } else {
            graph.optimize();
        }
        info!("Optimized: {:.3} seconds.", timer.elapsed().as_secs_f64());
        warn!("running bfs with optimized graph does not guarantee the shortest solution");
    }
    debug!(
        "searching graph with {} nodes (was {})",
        graph.node_count(),
        nodes_before
    );

    let timer = Instant::now();
    let path = shortest_path(&graph, start, stop);
    info!("Solved: {:.3} seconds.", timer.elapsed().as_secs_f64());
    info!("Path length (nodes): {}", path.len());

    Ok(Solution {
        start,
        stop,
        path,
        optimized: options.optimize,
        nodes_before,
        nodes_after: graph.node_count(),
    })
}
