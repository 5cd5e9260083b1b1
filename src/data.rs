pub mod canvas;
pub mod geometry;
pub mod map;
pub mod projection;
pub mod tile;

/// Plain text map export as produced by the game's exporter script: a `size_x;size_y` header
/// followed by one `kind;x;y;directions` record per tile.
pub const INPUT_SEPARATOR: char = ';';
