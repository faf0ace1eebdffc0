//! playfield - fixed-size matrix of color codes, row 0 at the top
//! all surface metrics are recomputed from the cells on every call

use serde::{Deserialize, Serialize};

use crate::{GridError, Piece, Shape};

pub const DEFAULT_HEIGHT: usize = 22;
pub const DEFAULT_WIDTH: usize = 10;

/// Rectangular cell matrix. 0 is empty, anything else is a locked color code.
///
/// Dimensions never change after construction. `Clone` produces a fully
/// independent grid, which is what the solver relies on for speculative drops.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<u8>,
    rows_cleared: u32,
    pieces_placed: u32,
}

#[derive(Clone, Serialize, Deserialize)]
struct GridRepr {
    rows: Vec<Vec<u8>>,
    #[serde(default)]
    rows_cleared: u32,
    #[serde(default)]
    pieces_placed: u32,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = Grid::from_rows(repr.rows)?;
        grid.rows_cleared = repr.rows_cleared;
        grid.pieces_placed = repr.pieces_placed;
        Ok(grid)
    }
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        GridRepr {
            rows: grid.rows().map(<[u8]>::to_vec).collect(),
            rows_cleared: grid.rows_cleared,
            pieces_placed: grid.pieces_placed,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(DEFAULT_HEIGHT, DEFAULT_WIDTH)
    }
}

fn check_dimensions(height: usize, width: usize) -> Result<(), GridError> {
    if height == 0 || width == 0 {
        return Err(GridError::InvalidDimensions(format!("{height}x{width}")));
    }
    Ok(())
}

fn check_color(value: u8) -> Result<(), GridError> {
    if value == 0 || Shape::from_color(value).is_some() {
        Ok(())
    } else {
        Err(GridError::InvalidColor(value))
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty grid of the given size. Both dimensions must be non-zero.
    pub fn with_size(height: usize, width: usize) -> Result<Self, GridError> {
        check_dimensions(height, width)?;
        Ok(Self::empty(height, width))
    }

    fn empty(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![0; height * width],
            rows_cleared: 0,
            pieces_placed: 0,
        }
    }

    /// Build from explicit rows, top row first. Rows must be non-empty and
    /// equal length, and every cell 0 or a shape color.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(height, width)?;
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(GridError::InvalidDimensions(format!(
                "row {r} has {} cells, expected {width}",
                row.len()
            )));
        }
        rows.iter().flatten().try_for_each(|&c| check_color(c))?;
        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
            rows_cleared: 0,
            pieces_placed: 0,
        })
    }

    /// Parse a picture of the grid, one line per row. `.` or `0` is empty, a
    /// digit 1-7 is that color code and a shape letter is the shape's color.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        Self::from_rows(parse_ascii_rows(text)?)
    }

    /// Like [`Grid::from_ascii`] but the picture is placed against the floor of
    /// an otherwise empty `height x width` grid.
    pub fn with_stack(height: usize, width: usize, text: &str) -> Result<Self, GridError> {
        let rows = parse_ascii_rows(text)?;
        if rows.len() > height {
            return Err(GridError::InvalidDimensions(format!(
                "{} stack rows do not fit in height {height}",
                rows.len()
            )));
        }
        let mut grid = Self::with_size(height, width)?;
        let offset = height - rows.len();
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::InvalidDimensions(format!(
                    "stack row {r} has {} cells, expected {width}",
                    row.len()
                )));
            }
            grid.row_mut(offset + r).copy_from_slice(&row);
        }
        Ok(grid)
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn get(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.check(row, col)?;
        Ok(self.cells[row * self.width + col])
    }

    /// `value` must be 0 (empty) or a shape color.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<(), GridError> {
        self.check(row, col)?;
        check_color(value)?;
        self.cells[row * self.width + col] = value;
        Ok(())
    }

    fn check(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.height {
            return Err(GridError::out_of_bounds("row", row, self.height));
        }
        if col >= self.width {
            return Err(GridError::out_of_bounds("column", col, self.width));
        }
        Ok(())
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> Result<&[u8], GridError> {
        if row >= self.height {
            return Err(GridError::out_of_bounds("row", row, self.height));
        }
        Ok(self.row_cells(row))
    }

    #[inline]
    fn row_cells(&self, row: usize) -> &[u8] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        &mut self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Index of the topmost filled row in `col`, or `height` (the floor) when empty.
    #[inline]
    fn column_top(&self, col: usize) -> usize {
        (0..self.height)
            .find(|&r| self.at(r, col) != 0)
            .unwrap_or(self.height)
    }

    /// Row of the piece's bounding-box top edge once hard-dropped with its left
    /// edge at `start_col`. Negative when the piece would stick out over the top.
    pub fn compute_drop_row(&self, piece: &Piece, start_col: usize) -> Result<i32, GridError> {
        let end_col = start_col.saturating_add(piece.width());
        if end_col > self.width {
            return Err(GridError::out_of_bounds(
                "placement column",
                start_col,
                self.width + 1 - piece.width().min(self.width),
            ));
        }
        let mut drop_row = self.height as i32;
        for (piece_col, grid_col) in (start_col..end_col).enumerate() {
            let stack_top = self.column_top(grid_col) as i32;
            let col_row = stack_top - piece.height() as i32 + piece.elevation(piece_col)? as i32;
            // the column that stops the piece earliest wins
            drop_row = drop_row.min(col_row);
        }
        Ok(drop_row)
    }

    /// Write the piece's filled cells with its top-left corner at `(row, col)`.
    /// Existing cells are overwritten. Cells above the top edge are discarded.
    pub fn lock(&mut self, piece: &Piece, row: i32, col: usize) -> Result<(), GridError> {
        if col.saturating_add(piece.width()) > self.width {
            return Err(GridError::out_of_bounds("lock column", col, self.width));
        }
        let bottom = row
            .checked_add(piece.height() as i32)
            .ok_or_else(|| GridError::out_of_bounds("lock row", row, self.height))?;
        if bottom > self.height as i32 {
            return Err(GridError::out_of_bounds("lock row", row, self.height));
        }
        for (dr, dc, color) in piece.cells() {
            let r = row + dr as i32;
            if r >= 0 {
                let idx = r as usize * self.width + col + dc;
                self.cells[idx] = color;
            }
        }
        Ok(())
    }

    /// Remove every full row in one pass, compacting the rest downwards.
    pub fn clear_filled_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_row = self.height;
        for r in (0..self.height).rev() {
            if self.row_cells(r).iter().all(|&c| c != 0) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != r {
                let (lo, hi) = (r * self.width, write_row * self.width);
                self.cells.copy_within(lo..lo + self.width, hi);
            }
        }
        self.cells[..write_row * self.width].fill(0);
        cleared
    }

    /// Hard-drop, lock and clear. Returns the locking row.
    pub fn drop(&mut self, piece: &Piece, col: usize) -> Result<i32, GridError> {
        let row = self.compute_drop_row(piece, col)?;
        self.lock(piece, row, col)?;
        let cleared = self.clear_filled_rows();
        self.rows_cleared += cleared as u32;
        self.pieces_placed += 1;
        Ok(row)
    }

    /// Height of every column measured from the floor.
    pub fn heights(&self) -> Vec<usize> {
        (0..self.width)
            .map(|c| self.height - self.column_top(c))
            .collect()
    }

    pub fn max_height(&self) -> usize {
        self.heights().into_iter().max().unwrap_or(0)
    }

    /// Empty cells covered by a filled cell in the same column.
    pub fn gap_count(&self) -> usize {
        (0..self.width)
            .map(|c| {
                (self.column_top(c)..self.height)
                    .filter(|&r| self.at(r, c) == 0)
                    .count()
            })
            .sum()
    }

    /// Sum over columns of the rows spanned from the surface down to the lowest
    /// hole, both ends included. Columns without holes add nothing.
    pub fn gap_depth(&self) -> usize {
        (0..self.width)
            .map(|c| {
                let top = self.column_top(c);
                (top..self.height)
                    .rev()
                    .find(|&r| self.at(r, c) == 0)
                    .map_or(0, |lowest| lowest - top + 1)
            })
            .sum()
    }

    /// Columns more than 2 lower than both neighbours; the walls count as height 0.
    pub fn well_count(&self) -> usize {
        let heights = self.heights();
        (0..self.width)
            .filter(|&c| {
                let left = if c == 0 { 0 } else { heights[c - 1] };
                let right = heights.get(c + 1).copied().unwrap_or(0);
                left > heights[c] + 2 && right > heights[c] + 2
            })
            .count()
    }

    pub fn is_game_over(&self) -> bool {
        self.max_height() == self.height
    }
}

fn parse_ascii_rows(text: &str) -> Result<Vec<Vec<u8>>, GridError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(parse_ascii_cell).collect::<Result<Vec<u8>, _>>())
        .collect()
}

fn parse_ascii_cell(c: char) -> Result<u8, GridError> {
    match c {
        '.' => Ok(0),
        '0'..='7' => Ok(c as u8 - b'0'),
        _ => Shape::from_char(c).map(Shape::color),
    }
}
