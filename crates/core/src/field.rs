//! Field module - manages the playing grid
//!
//! The field is a `width x height` grid of [`FieldCell`]s stored as a flat,
//! row-major buffer (`y * width + x`). Column 0, column `width - 1` and row
//! `height - 1` are boundary cells; they are laid out once and never rewritten.
//! Coordinates are signed so that piece poses hanging off the field can be
//! expressed; out-of-range accessors return `None`/`false` instead of panicking.

use crate::pieces;
use crate::types::{FieldCell, PieceId, MASK_SIZE};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<FieldCell>,
}

impl Field {
    /// Create a field with boundary walls and an empty interior
    pub fn new(width: u16, height: u16) -> Self {
        let mut field = Self {
            width,
            height,
            cells: vec![FieldCell::Empty; width as usize * height as usize],
        };
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if field.is_boundary_position(x, y) {
                    field.set(x, y, FieldCell::Boundary);
                }
            }
        }
        field
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<FieldCell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: FieldCell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is one of the permanent wall positions
    pub fn is_boundary_position(&self, x: i32, y: i32) -> bool {
        x == 0 || x == self.width as i32 - 1 || y == self.height as i32 - 1
    }

    /// Row `y` as a slice, boundary columns included
    pub fn row(&self, y: u16) -> &[FieldCell] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    pub fn cells(&self) -> &[FieldCell] {
        &self.cells
    }

    /// Collision test for a piece pose.
    ///
    /// Only filled mask cells landing inside the field are checked; cells that
    /// fall outside the grid never cause a collision on their own.
    pub fn fits(&self, id: PieceId, rotation: i32, x: i32, y: i32) -> bool {
        for ly in 0..MASK_SIZE {
            for lx in 0..MASK_SIZE {
                if !pieces::mask_cell(id, lx, ly, rotation) {
                    continue;
                }
                match self.get(x + lx as i32, y + ly as i32) {
                    Some(cell) if !cell.is_empty() => return false,
                    _ => {}
                }
            }
        }
        true
    }

    /// Write `Block` into every in-bounds cell covered by the piece.
    ///
    /// Returns the number of cells written.
    pub fn lock_piece(&mut self, id: PieceId, rotation: i32, x: i32, y: i32) -> usize {
        let mut written = 0;
        for (lx, ly) in pieces::cells(id, rotation) {
            if self.set(x + lx, y + ly, FieldCell::Block) {
                written += 1;
            }
        }
        written
    }

    /// A row is complete when every interior cell is non-empty.
    ///
    /// The bottom boundary row and rows outside the field never count.
    pub fn is_row_complete(&self, y: i32) -> bool {
        if y < 0 || y >= self.height as i32 - 1 {
            return false;
        }
        let row = self.row(y as u16);
        row[1..row.len() - 1].iter().all(|cell| !cell.is_empty())
    }

    /// Flag the interior of row `y` as `LineToRemove`
    pub fn mark_row(&mut self, y: u16) {
        for x in 1..self.width as i32 - 1 {
            self.set(x, y as i32, FieldCell::LineToRemove);
        }
    }

    /// Remove row `y` by shifting every row above it down by one.
    ///
    /// Destination rows run from `y` up to row 2; rows 0 and 1 are never
    /// written here.
    pub fn collapse_row(&mut self, y: u16) {
        let width = self.width as usize;
        for dst in (2..=y as usize).rev() {
            let src_start = (dst - 1) * width;
            // copy_within handles the overlapping ranges
            self.cells
                .copy_within(src_start..src_start + width, dst * width);
        }
    }

    /// Reset the interior to empty, keeping the walls
    pub fn clear_interior(&mut self) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if !self.is_boundary_position(x, y) {
                    self.set(x, y, FieldCell::Empty);
                }
            }
        }
    }

    /// Build a field from text rows using the display characters (`' '`, `X`, `#`, `=`)
    ///
    /// Unknown characters are read as empty. Handy for tests and debugging.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut field = Self {
            width,
            height,
            cells: vec![FieldCell::Empty; width as usize * height as usize],
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let cell = FieldCell::from_char(c).unwrap_or_default();
                field.set(x as i32, y as i32, cell);
            }
        }
        field
    }

    /// Render the grid back into text rows
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| self.row(y).iter().map(FieldCell::as_char).collect())
            .collect()
    }
}
