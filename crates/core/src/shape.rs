//! The seven tetromino shapes and their canonical grids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GridError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Every shape-dependent constant lives here, indexed by `Shape as usize`.
struct ShapeInfo {
    letter: char,
    /// Canonical grid, row 0 at the top. Non-zero cells carry the color code.
    canonical: &'static [&'static [u8]],
    spawn_column: usize,
    /// Left edge of the bounding box relative to the spawn column, per rotation.
    column_offsets: [i8; 4],
}

const SHAPE_TABLE: [ShapeInfo; 7] = [
    ShapeInfo {
        letter: 'I',
        canonical: &[&[1, 1, 1, 1]],
        spawn_column: 3,
        column_offsets: [0, 2, 0, 1],
    },
    ShapeInfo {
        letter: 'O',
        canonical: &[&[2, 2], &[2, 2]],
        spawn_column: 4,
        column_offsets: [0, 0, 0, 0],
    },
    ShapeInfo {
        letter: 'T',
        canonical: &[&[0, 3, 0], &[3, 3, 3]],
        spawn_column: 3,
        column_offsets: [0, 1, 0, 0],
    },
    ShapeInfo {
        letter: 'S',
        canonical: &[&[0, 4, 4], &[4, 4, 0]],
        spawn_column: 3,
        column_offsets: [0, 1, 0, 0],
    },
    ShapeInfo {
        letter: 'Z',
        canonical: &[&[5, 5, 0], &[0, 5, 5]],
        spawn_column: 3,
        column_offsets: [0, 1, 0, 0],
    },
    ShapeInfo {
        letter: 'J',
        canonical: &[&[6, 0, 0], &[6, 6, 6]],
        spawn_column: 3,
        column_offsets: [0, 1, 0, 0],
    },
    ShapeInfo {
        letter: 'L',
        canonical: &[&[0, 0, 7], &[7, 7, 7]],
        spawn_column: 3,
        column_offsets: [0, 1, 0, 0],
    },
];

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    #[inline(always)]
    fn info(self) -> &'static ShapeInfo {
        &SHAPE_TABLE[self as usize]
    }

    /// Canonical (rotation 0) grid rows, top row first.
    pub fn canonical(self) -> &'static [&'static [u8]] {
        self.info().canonical
    }

    /// Color code written into the grid when a piece of this shape locks.
    pub fn color(self) -> u8 {
        self as u8 + 1
    }

    pub fn letter(self) -> char {
        self.info().letter
    }

    pub fn spawn_column(self) -> usize {
        self.info().spawn_column
    }

    pub fn rotation_column_offset(self, rotation: u8) -> i8 {
        self.info().column_offsets[(rotation % 4) as usize]
    }

    pub fn from_char(c: char) -> Result<Self, GridError> {
        let upper = c.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|shape| shape.letter() == upper)
            .ok_or_else(|| GridError::UnrecognizedShape(c.to_string()))
    }

    pub fn from_color(code: u8) -> Option<Self> {
        Self::ALL.get(code.checked_sub(1)? as usize).copied()
    }
}

impl FromStr for Shape {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(GridError::UnrecognizedShape(s.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
