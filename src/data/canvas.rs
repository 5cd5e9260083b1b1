use raqote::{AntialiasMode, DrawOptions, DrawTarget, LineCap, LineJoin, PathBuilder, SolidSource, Source, StrokeStyle};

use super::geometry::Segment;
use super::tile::Color;
use crate::errors::{Error, ErrorKind, Result};

/// Something straight lines can be drawn onto.
pub trait Canvas {
    fn draw_line(&mut self, segment: Segment, color: Color, width: i32);
}

impl From<Color> for SolidSource {
    fn from(value: Color) -> Self {
        SolidSource::from_unpremultiplied_argb(0xff, value.r, value.g, value.b)
    }
}

/// Square raster canvas cleared to `background`.
///
/// raqote indexes its pixel buffer with an `i32`, so the pixel count must fit one.
pub fn new_canvas(width: i32, background: Color) -> Result<DrawTarget> {
    if width < 1 || width.checked_mul(width).is_none() {
        return Err(Error::new(
            ErrorKind::CanvasTooLarge,
            format!("canvas of {}x{} pixels is too large, try a smaller pixel size", width, width),
        ));
    }
    let mut dt = DrawTarget::new(width, width);
    dt.clear(background.into());
    Ok(dt)
}

/// Color of an opaque pixel of a draw target.
pub fn pixel_color(pixel: u32) -> Color {
    Color::rgb(
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
    )
}

fn stroke(width: f32) -> StrokeStyle {
    StrokeStyle {
        // ends stop at the endpoints; a 1px line is one pixel shorter than an inclusive one
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        width,
        miter_limit: 2.0,
        dash_array: Vec::new(),
        dash_offset: 0.0,
    }
}

impl Canvas for DrawTarget {
    fn draw_line(&mut self, (from, to): Segment, color: Color, width: i32) {
        // integer coordinates address pixel centres
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32 + 0.5, from.y as f32 + 0.5);
        pb.line_to(to.x as f32 + 0.5, to.y as f32 + 0.5);
        let raqote_path = pb.finish();

        let mut draw_options = DrawOptions::new();
        draw_options.antialias = AntialiasMode::None;

        self.stroke(
            &raqote_path,
            &Source::Solid(color.into()),
            &stroke(width as f32),
            &draw_options,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::Point;

    fn pixel_at(dt: &DrawTarget, x: i32, y: i32) -> Color {
        pixel_color(dt.get_data()[(y * dt.width() + x) as usize])
    }

    #[test]
    fn new_canvas_is_square_and_filled() {
        let dt = new_canvas(12, Color::WHITE).unwrap();
        assert_eq!((dt.width(), dt.height()), (12, 12));
        assert!(dt.get_data().iter().all(|px| pixel_color(*px) == Color::WHITE));
    }

    #[test]
    fn draw_line_paints_along_the_segment() {
        let mut dt = new_canvas(20, Color::WHITE).unwrap();
        dt.draw_line((Point::new(2, 10), Point::new(17, 10)), Color::BROWN, 3);
        assert_eq!(pixel_at(&dt, 10, 10), Color::BROWN);
        assert_eq!(pixel_at(&dt, 10, 9), Color::BROWN);
        assert_eq!(pixel_at(&dt, 10, 2), Color::WHITE);
        assert_eq!(pixel_at(&dt, 0, 10), Color::WHITE);
    }

    #[test]
    fn line_ends_at_its_endpoints() {
        let mut dt = new_canvas(20, Color::WHITE).unwrap();
        dt.draw_line((Point::new(2, 10), Point::new(17, 10)), Color::BLACK, 3);
        assert_eq!(pixel_at(&dt, 3, 10), Color::BLACK);
        assert_eq!(pixel_at(&dt, 16, 10), Color::BLACK);
        assert_eq!(pixel_at(&dt, 1, 10), Color::WHITE);
        assert_eq!(pixel_at(&dt, 18, 10), Color::WHITE);
    }

    #[test]
    fn oversized_canvas_is_refused() {
        assert_eq!(new_canvas(46341, Color::WHITE).err().unwrap().kind, ErrorKind::CanvasTooLarge);
        assert_eq!(new_canvas(0, Color::WHITE).err().unwrap().kind, ErrorKind::CanvasTooLarge);
    }
}
