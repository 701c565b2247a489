use image::{Rgb, RgbImage};

use crate::{grid::Point, Error};

/// Color the original tool drew solutions in
pub const PATH_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Draws `path` onto `image`, filling every pixel of the straight segment between
/// consecutive nodes. Nothing is drawn if any node lies outside the image or any segment
/// is not horizontal or vertical.
pub fn draw_path(image: &mut RgbImage, path: &[Point], color: Rgb<u8>) -> Result<(), Error> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    if let Some(p) = path.iter().find(|p| p.x >= width || p.y >= height) {
        return Err(Error::PointOutsideImage(*p));
    }
    if let Some(pair) = path.windows(2).find(|pair| !pair[0].is_aligned_with(&pair[1])) {
        return Err(Error::InvalidPathSegment {
            from: pair[0],
            to: pair[1],
        });
    }

    if let [single] = path {
        image.put_pixel(single.x as u32, single.y as u32, color);
    }

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if from.x == to.x {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                image.put_pixel(from.x as u32, y as u32, color);
            }
        } else {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                image.put_pixel(x as u32, from.y as u32, color);
            }
        }
    }

    Ok(())
}

/// Returns a copy of `image` with `path` drawn on it
pub fn render_path(image: &RgbImage, path: &[Point], color: Rgb<u8>) -> Result<RgbImage, Error> {
    let mut rendered = image.clone();
    draw_path(&mut rendered, path, color)?;
    Ok(rendered)
}
