//! A shape at a given rotation.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GridError, Shape};

/// Largest bounding box side across all shapes and rotations.
pub const MAX_SIZE: usize = 4;

/// Value type: two pieces with the same shape and rotation are interchangeable.
///
/// The cell buffer is always derived from the canonical grid and the rotation
/// count, never edited in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PieceSpec", into = "PieceSpec")]
pub struct Piece {
    shape: Shape,
    rotation: u8,
    width: u8,
    height: u8,
    cells: [[u8; MAX_SIZE]; MAX_SIZE],
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct PieceSpec {
    shape: Shape,
    #[serde(default)]
    rotation: u8,
}

impl From<PieceSpec> for Piece {
    fn from(spec: PieceSpec) -> Self {
        Piece::with_rotation(spec.shape, spec.rotation as i32)
    }
}

impl From<Piece> for PieceSpec {
    fn from(piece: Piece) -> Self {
        PieceSpec {
            shape: piece.shape,
            rotation: piece.rotation,
        }
    }
}

impl Piece {
    pub fn new(shape: Shape) -> Self {
        Self::with_rotation(shape, 0)
    }

    pub fn with_rotation(shape: Shape, rotations: i32) -> Self {
        let mut piece = Self {
            shape,
            rotation: 0,
            width: 0,
            height: 0,
            cells: [[0; MAX_SIZE]; MAX_SIZE],
        };
        piece.rotate(rotations);
        piece
    }

    /// Uniformly random shape at its canonical rotation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Shape::ALL[rng.gen_range(0..Shape::ALL.len())])
    }

    /// Rotate clockwise `n` quarter turns (negative turns counter-clockwise).
    pub fn rotate(&mut self, n: i32) -> &mut Self {
        self.rotation = (self.rotation as i32 + n).rem_euclid(4) as u8;
        self.rebuild();
        self
    }

    pub fn rotated(mut self, n: i32) -> Self {
        self.rotate(n);
        self
    }

    pub fn reset_rotation(&mut self) -> &mut Self {
        let current = self.rotation as i32;
        self.rotate(-current)
    }

    fn rebuild(&mut self) {
        let canonical = self.shape.canonical();
        let (h, w) = (canonical.len(), canonical[0].len());
        let mut cells = [[0u8; MAX_SIZE]; MAX_SIZE];
        let (height, width) = if self.rotation % 2 == 0 { (h, w) } else { (w, h) };
        for (r, row) in cells.iter_mut().enumerate().take(height) {
            for (c, cell) in row.iter_mut().enumerate().take(width) {
                // source cell for a clockwise rotation by `rotation` quarter turns
                let (sr, sc) = match self.rotation {
                    0 => (r, c),
                    1 => (h - 1 - c, r),
                    2 => (h - 1 - r, w - 1 - c),
                    _ => (c, w - 1 - r),
                };
                *cell = canonical[sr][sc];
            }
        }
        self.cells = cells;
        self.width = width as u8;
        self.height = height as u8;
    }

    #[inline(always)]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline(always)]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn color(&self) -> u8 {
        self.shape.color()
    }

    /// Cell value inside the bounding box, 0 when empty or outside.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        if row < self.height() && col < self.width() {
            self.cells[row][col]
        } else {
            0
        }
    }

    /// Filled cells as `(row, col, color)` relative to the bounding box.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width()).filter_map(move |c| {
                let v = self.cells[r][c];
                (v != 0).then_some((r, c, v))
            })
        })
    }

    /// Empty rows between the bounding box floor and the lowest filled cell of `col`.
    pub fn elevation(&self, col: usize) -> Result<usize, GridError> {
        if col >= self.width() {
            return Err(GridError::out_of_bounds("piece column", col, self.width()));
        }
        Ok((0..self.height())
            .rev()
            .position(|r| self.cells[r][col] != 0)
            .unwrap_or(self.height()))
    }

    pub fn spawn_column(&self) -> usize {
        self.shape.spawn_column()
    }

    pub fn rotation_column_offset(&self) -> i8 {
        self.shape.rotation_column_offset(self.rotation)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({}, r{})", self.shape, self.rotation)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)
    }
}
