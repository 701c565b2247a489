use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A pixel coordinate, `x` is the column and `y` the row
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the four axis-aligned neighbors in the order left, up, right, down.
    /// Neighbors that would have a negative coordinate are skipped, the upper bound is
    /// left for the caller to check against the maze dimensions.
    pub fn neighbors_four(self) -> impl Iterator<Item = Point> {
        let mut points = Vec::with_capacity(4);

        if self.x > 0 {
            points.push(Point {
                x: self.x - 1,
                y: self.y,
            });
        }
        if self.y > 0 {
            points.push(Point {
                x: self.x,
                y: self.y - 1,
            });
        }
        points.push(Point {
            x: self.x + 1,
            y: self.y,
        });
        points.push(Point {
            x: self.x,
            y: self.y + 1,
        });

        points.into_iter()
    }

    /// Two points are aligned when they share a column or a row
    pub fn is_aligned_with(&self, other: &Point) -> bool {
        self.x == other.x || self.y == other.y
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The pixel oracle the graph is built from
pub trait Maze {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Whether the pixel at `point` is a passage. Must return `false` for points
    /// outside the maze instead of failing.
    fn is_passage(&self, point: Point) -> bool;

    fn contains(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }
}

impl<M: Maze + ?Sized> Maze for &M {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn is_passage(&self, point: Point) -> bool {
        (**self).is_passage(point)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Invalid,
    Valid,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Invalid => "X",
                Cell::Valid => " ",
            }
        )
    }
}

/// A Maze implementation that uses a rectangular grid of cells, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl GridMap {
    /// Create a map with every cell being a wall
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Invalid; columns]; rows],
        }
    }

    pub fn get(&self, point: Point) -> Option<Cell> {
        self.cells.get(point.y).and_then(|row| row.get(point.x)).copied()
    }

    pub fn set(&mut self, point: Point, cell: Cell) {
        if let Some(c) = self
            .cells
            .get_mut(point.y)
            .and_then(|row| row.get_mut(point.x))
        {
            *c = cell;
        }
    }

    /// Scales the map by the given factor, i.e. to make it twice as large, pass 2.
    /// Interpolates the cells by repeating the existing cells in the new grid.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_cells = vec![vec![Cell::default(); self.columns * factor]; self.rows * factor];

        for row in 0..self.rows {
            for col in 0..self.columns {
                for r in 0..factor {
                    for c in 0..factor {
                        new_cells[row * factor + r][col * factor + c] = self.cells[row][col];
                    }
                }
            }
        }

        self.rows *= factor;
        self.columns *= factor;
        self.cells = new_cells;
    }
}

impl Maze for GridMap {
    fn width(&self) -> usize {
        self.columns
    }

    fn height(&self) -> usize {
        self.rows
    }

    fn is_passage(&self, point: Point) -> bool {
        self.get(point) == Some(Cell::Valid)
    }
}

impl Display for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses a text drawing of a maze, one line per row. `#` or `X` is a wall,
/// `.` or a space is a passage.
impl FromStr for GridMap {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();

        for (row, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, c)| match c {
                    '#' | 'X' => Ok(Cell::Invalid),
                    '.' | ' ' => Ok(Cell::Valid),
                    _ => Err(anyhow::anyhow!(
                        "Invalid cell {:?} at row {}, column {}",
                        c,
                        row,
                        col
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }

        let columns = cells.first().map_or(0, Vec::len);
        if let Some(row) = cells.iter().position(|r| r.len() != columns) {
            return Err(anyhow::anyhow!(
                "Row {} has {} cells, expected {}",
                row,
                cells[row].len(),
                columns
            ));
        }

        Ok(GridMap {
            rows: cells.len(),
            columns,
            cells,
        })
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_neighbors_four_skips_negative() {
        let n: Vec<Point> = Point::new(0, 0).neighbors_four().collect();
        assert_eq!(n, vec![Point::new(1, 0), Point::new(0, 1)]);

        let n: Vec<Point> = Point::new(2, 3).neighbors_four().collect();
        assert_eq!(
            n,
            vec![
                Point::new(1, 3),
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(2, 4)
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map: GridMap = "...\n...".parse().unwrap();

        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert!(map.is_passage(Point::new(2, 1)));
        assert!(!map.is_passage(Point::new(3, 1)));
        assert!(!map.is_passage(Point::new(0, 2)));
        assert!(!map.contains(Point::new(3, 0)));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!("#.#\n#.".parse::<GridMap>().is_err());
        assert!("#o#".parse::<GridMap>().is_err());
    }

    #[test]
    fn test_scale_up() {
        let mut map: GridMap = "#.\n..".parse().unwrap();
        map.scale_up(2);

        assert_eq!(map.rows, 4);
        assert_eq!(map.columns, 4);
        assert!(!map.is_passage(Point::new(1, 1)));
        assert!(map.is_passage(Point::new(2, 0)));
        assert!(map.is_passage(Point::new(0, 3)));
    }

    #[test]
    fn test_display() {
        let map: GridMap = "#.#".parse().unwrap();
        assert_eq!(map.to_string(), "X X\n");
    }
}
