use std::str::FromStr;

use super::geometry::{Point, Segment};
use super::INPUT_SEPARATOR;
use crate::errors::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const BROWN: Color = Color::rgb(0xa5, 0x2a, 0x2a);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Track direction code as exported by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
    N,
    S,
    W,
    E,
}

impl Direction {
    /// Drawing order.
    pub const ALL: [Direction; 6] = [
        Direction::X,
        Direction::Y,
        Direction::N,
        Direction::S,
        Direction::W,
        Direction::E,
    ];

    const STRAIGHT: [Direction; 2] = [Direction::X, Direction::Y];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Direction::X),
            'y' => Some(Direction::Y),
            'n' => Some(Direction::N),
            's' => Some(Direction::S),
            'w' => Some(Direction::W),
            'e' => Some(Direction::E),
            _ => None,
        }
    }

    /// Endpoints of the direction's line inside a tile of half-width 1.
    pub const fn unit_segment(self) -> Segment {
        match self {
            Direction::X => (Point::new(-1, 1), Point::new(1, -1)),
            Direction::Y => (Point::new(-1, -1), Point::new(1, 1)),
            Direction::N => (Point::new(-1, -1), Point::new(1, -1)),
            Direction::S => (Point::new(-1, 1), Point::new(1, 1)),
            Direction::W => (Point::new(-1, -1), Point::new(-1, 1)),
            Direction::E => (Point::new(1, -1), Point::new(1, 1)),
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of direction codes, filled from the characters of a direction string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Directions(u8);

impl Directions {
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }
}

impl From<&str> for Directions {
    fn from(value: &str) -> Self {
        let mut directions = Directions::default();
        for direction in value.chars().filter_map(Direction::from_char) {
            directions.insert(direction);
        }
        directions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Rail,
    Station,
    Bridge,
    Tunnel,
}

impl TileKind {
    pub fn color(self) -> Color {
        match self {
            TileKind::Rail => Color::BLACK,
            TileKind::Station => Color::RED,
            TileKind::Bridge => Color::BROWN,
            TileKind::Tunnel => Color::GRAY,
        }
    }

    /// Direction codes this kind of tile draws, in drawing order.
    pub fn drawn_directions(self) -> &'static [Direction] {
        match self {
            TileKind::Rail => &Direction::ALL,
            TileKind::Station | TileKind::Bridge | TileKind::Tunnel => &Direction::STRAIGHT,
        }
    }
}

impl FromStr for TileKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rail" => Ok(TileKind::Rail),
            "station" => Ok(TileKind::Station),
            "bridge" => Ok(TileKind::Bridge),
            "tunnel" => Ok(TileKind::Tunnel),
            _ => Err(()),
        }
    }
}

/// Grid position of a tile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: TilePos,
    pub directions: Directions,
}

impl Tile {
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Segments of the tile around its own center, scaled by `pixel_size`.
    pub fn local_segments(&self, pixel_size: i32) -> Vec<Segment> {
        self.kind
            .drawn_directions()
            .iter()
            .filter(|direction| self.directions.contains(**direction))
            .map(|direction| {
                let (from, to) = direction.unit_segment();
                (from.scale(pixel_size), to.scale(pixel_size))
            })
            .collect()
    }

    /// Parses a `kind;x;y;directions` record. `line_no` only feeds error messages.
    pub fn parse(line: &str, line_no: usize) -> Result<Tile> {
        let record = line.trim();
        let chunks: Vec<&str> = record.split(INPUT_SEPARATOR).collect();

        let kind: TileKind = chunks[0].parse().map_err(|_| {
            Error::tile_record(ErrorKind::UnknownTileType, line_no, record, "unknown tile type")
        })?;

        if chunks.len() != 4 {
            return Err(Error::tile_record(
                ErrorKind::MalformedTileRecord,
                line_no,
                record,
                &format!("expected 4 fields, found {}", chunks.len()),
            ));
        }

        let coord = |value: &str| -> Result<i32> {
            value.trim().parse::<u16>().map(i32::from).map_err(|_| Error::tile_record(
                ErrorKind::MalformedTileRecord,
                line_no,
                record,
                &format!("invalid coordinate {:?}", value),
            ))
        };

        Ok(Tile {
            kind,
            pos: TilePos {
                x: coord(chunks[1])?,
                y: coord(chunks[2])?,
            },
            directions: Directions::from(chunks[3]),
        })
    }
}
