use super::geometry::{Point, Segment};
use super::tile::TilePos;

/// Grid dimensions taken from the header line of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    pub x: i32,
    pub y: i32,
}

/// Maps tile-local points onto the canvas of an isometric map.
///
/// Tile diamonds are rotated by 45 degrees: moving one tile along either grid axis moves
/// the diamond center by `2 * pixel_size` on both canvas axes. The whole map is shifted
/// right so that the westmost corner of the grid starts at the left edge of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    pixel_size: i32,
    center_offset: (i32, i32),
}

impl Projector {
    pub fn new(size: MapSize, pixel_size: i32) -> Self {
        // left half of the tile plus the distance between neighbouring tile axes
        let offset_x = pixel_size + (size.x - 1) * 2 * pixel_size;
        let offset_y = pixel_size;

        Projector {
            pixel_size,
            center_offset: (offset_x, offset_y),
        }
    }

    pub fn center_offset(&self) -> (i32, i32) {
        self.center_offset
    }

    pub fn tile_offset(&self, pos: TilePos) -> (i32, i32) {
        let diff_x = 2 * self.pixel_size * (pos.y - pos.x);
        let diff_y = 2 * self.pixel_size * (pos.y + pos.x) - 4 * self.pixel_size;
        (diff_x, diff_y)
    }

    /// Moves an already scaled local point of the tile at `pos` onto the canvas.
    pub fn project(&self, point: Point, pos: TilePos) -> Point {
        let (diff_x, diff_y) = self.tile_offset(pos);
        let (offset_x, offset_y) = self.center_offset();
        point
            .translate(diff_x, diff_y)
            .translate(offset_x, offset_y)
    }

    pub fn project_segment(&self, (from, to): Segment, pos: TilePos) -> Segment {
        (self.project(from, pos), self.project(to, pos))
    }
}
