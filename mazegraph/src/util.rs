use image::{DynamicImage, Rgb, RgbImage};

use crate::grid::{Cell, GridMap, Maze, Point};

/// Color of a passage pixel, anything else is a wall
pub const PASSAGE: Rgb<u8> = Rgb([255, 255, 255]);

/// Reads passage pixels straight from an RGB image. A pixel is a passage only if it
/// matches the passage color exactly.
#[derive(Debug, Clone, Copy)]
pub struct ImageMaze<'a> {
    image: &'a RgbImage,
    passage: Rgb<u8>,
}

impl<'a> ImageMaze<'a> {
    pub fn new(image: &'a RgbImage) -> Self {
        Self::with_passage(image, PASSAGE)
    }

    pub fn with_passage(image: &'a RgbImage, passage: Rgb<u8>) -> Self {
        Self { image, passage }
    }

    pub fn image(&self) -> &RgbImage {
        self.image
    }
}

impl Maze for ImageMaze<'_> {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn is_passage(&self, point: Point) -> bool {
        self.contains(point) && *self.image.get_pixel(point.x as u32, point.y as u32) == self.passage
    }
}

/// Copies the passage mask of an image into a [`GridMap`]
pub fn parse_img(img: &DynamicImage) -> Result<GridMap, anyhow::Error> {
    let rgb = img.to_rgb8();
    let maze = ImageMaze::new(&rgb);

    let mut map = GridMap::new(maze.height(), maze.width());
    for y in 0..map.rows {
        for x in 0..map.columns {
            if maze.is_passage(Point { x, y }) {
                map.cells[y][x] = Cell::Valid;
            }
        }
    }

    Ok(map)
}
