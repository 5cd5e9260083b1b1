/// Integer point on the canvas or in tile-local space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A straight line from the first point to the second.
pub type Segment = (Point, Point);

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub const fn scale(self, amount: i32) -> Self {
        Point {
            x: self.x * amount,
            y: self.y * amount,
        }
    }

    pub const fn translate(self, diff_x: i32, diff_y: i32) -> Self {
        Point {
            x: self.x + diff_x,
            y: self.y + diff_y,
        }
    }
}
