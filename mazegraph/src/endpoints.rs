use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    grid::{Maze, Point},
    Error,
};

/// The image border an endpoint is searched on
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Border {
    Top,
    Bottom,
}

impl Display for Border {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Border::Top => "top",
                Border::Bottom => "bottom",
            }
        )
    }
}

/// The last passage pixel (highest `x`) on the given border row, if any
pub fn find_on_border<M: Maze>(maze: &M, border: Border) -> Option<Point> {
    let y = match border {
        Border::Top => 0,
        Border::Bottom => maze.height().checked_sub(1)?,
    };

    (0..maze.width())
        .map(|x| Point { x, y })
        .filter(|p| maze.is_passage(*p))
        .last()
}

/// Locates the entrance on the top row and the exit on the bottom row
pub fn find_start_stop<M: Maze>(maze: &M) -> Result<(Point, Point), Error> {
    let start = find_on_border(maze, Border::Top).ok_or(Error::MissingEndpoint {
        border: Border::Top,
    })?;
    let stop = find_on_border(maze, Border::Bottom).ok_or(Error::MissingEndpoint {
        border: Border::Bottom,
    })?;

    debug!("start = {}, stop = {}", start, stop);
    Ok((start, stop))
}
