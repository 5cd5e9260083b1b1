use std::io::{self, BufRead};

use log::debug;
use raqote::DrawTarget;

use super::canvas::{new_canvas, Canvas};
use super::projection::{MapSize, Projector};
use super::tile::{Color, Tile};
use super::INPUT_SEPARATOR;
use crate::errors::{Error, ErrorKind, Result};

pub const DEFAULT_PIXEL_SIZE: u32 = 3;
pub const MAX_PIXEL_SIZE: u32 = 1024;

/// A map that has not been loaded yet.
#[derive(Debug, Clone)]
pub struct TtdMap {
    pixel_size: i32,
    background: Color,
}

impl TtdMap {
    pub fn new(pixel_size: u32) -> Result<Self> {
        if !(1..=MAX_PIXEL_SIZE).contains(&pixel_size) {
            return Err(Error::new(
                ErrorKind::InvalidPixelSize,
                format!("pixel size must be between 1 and {}, got {}", MAX_PIXEL_SIZE, pixel_size),
            ));
        }
        Ok(TtdMap {
            pixel_size: i32::try_from(pixel_size)?,
            background: Color::WHITE,
        })
    }

    pub fn pixel_size(&self) -> i32 {
        self.pixel_size
    }

    /// Reads the size header from `source` and binds the rest of it as the tile sequence.
    ///
    /// Tiles are not read here. They are parsed one line at a time while the map renders.
    pub fn load<R: BufRead>(self, mut source: R) -> Result<LoadedMap<R>> {
        let mut header = String::new();
        source.read_line(&mut header).map_err(|err| Error::new(
            ErrorKind::MalformedHeader,
            format!("line 1: could not read map header: {}", err),
        ))?;
        let size = parse_header(&header)?;

        Ok(LoadedMap {
            size,
            pixel_size: self.pixel_size,
            background: self.background,
            tiles: Tiles::new(source),
        })
    }
}

fn parse_header(line: &str) -> Result<MapSize> {
    let malformed = || Error::new(
        ErrorKind::MalformedHeader,
        format!("line 1: expected 'size_x;size_y', found {:?}", line.trim()),
    );

    let chunks: Vec<&str> = line.trim().split(INPUT_SEPARATOR).collect();
    if chunks.len() != 2 {
        return Err(malformed());
    }
    let dimension = |value: &str| {
        value
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|v| *v >= 1)
            .map(i32::from)
            .ok_or_else(malformed)
    };
    Ok(MapSize {
        x: dimension(chunks[0])?,
        y: dimension(chunks[1])?,
    })
}

/// Width and height of the square canvas for a map.
pub fn canvas_width(size: MapSize, pixel_size: i32) -> i32 {
    ((size.x - 1) + (size.y - 1)) * 2 * pixel_size + 2 * pixel_size
}

/// Lazy sequence of tiles, one per remaining input line. Blank lines are skipped.
pub struct Tiles<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Tiles<R> {
    fn new(source: R) -> Self {
        Tiles {
            lines: source.lines(),
            // the header was line 1
            line_no: 1,
        }
    }
}

impl<R: BufRead> Iterator for Tiles<R> {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(Tile::parse(&line, self.line_no));
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub tiles: usize,
    pub segments: usize,
}

/// A map with a known size and a pending tile sequence. Rendering consumes it.
pub struct LoadedMap<R> {
    size: MapSize,
    pixel_size: i32,
    background: Color,
    tiles: Tiles<R>,
}

impl<R: BufRead> LoadedMap<R> {
    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn canvas_width(&self) -> i32 {
        canvas_width(self.size, self.pixel_size)
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.size, self.pixel_size)
    }

    /// Draws every tile onto `canvas` in input order. The first bad tile aborts rendering.
    pub fn render_onto<C: Canvas>(self, canvas: &mut C) -> Result<RenderStats> {
        let projector = self.projector();
        let mut stats = RenderStats::default();

        for tile in self.tiles {
            let tile = tile?;
            let color = tile.color();
            for segment in tile.local_segments(self.pixel_size) {
                canvas.draw_line(
                    projector.project_segment(segment, tile.pos),
                    color,
                    self.pixel_size,
                );
                stats.segments += 1;
            }
            stats.tiles += 1;
        }

        debug!(tiles = stats.tiles, segments = stats.segments; "Rendered tiles");
        Ok(stats)
    }

    pub fn render(self) -> Result<DrawTarget> {
        let mut dt = new_canvas(self.canvas_width(), self.background)?;
        self.render_onto(&mut dt)?;
        Ok(dt)
    }
}
