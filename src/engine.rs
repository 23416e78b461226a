//! Seam between the canvas and the simulation engine.

use std::borrow::Cow;

use crate::model::{Cell, GridSize};

/// The narrow surface of a cellular-automaton engine the canvas relies on.
///
/// Dimensions are fixed for the lifetime of the engine. A [`CellView`] borrows the
/// engine, so it cannot outlive the next `tick` or `toggle_cell`.
pub trait Engine {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn tick(&mut self);
    fn toggle_cell(&mut self, row: u32, col: u32);
    fn cells(&self) -> CellView<'_>;

    fn size(&self) -> GridSize {
        GridSize {
            width: self.width(),
            height: self.height(),
        }
    }
}

/// Read-only snapshot of the cell buffer, one byte per cell, row-major.
pub struct CellView<'a> {
    size: GridSize,
    bytes: Cow<'a, [u8]>,
}

impl<'a> CellView<'a> {
    pub fn new(size: GridSize, bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        let bytes = bytes.into();
        debug_assert_eq!(bytes.len(), size.cell_count());
        Self { size, bytes }
    }

    #[cfg(test)]
    pub fn get(&self, row: u32, col: u32) -> Cell {
        self.bytes
            .get(self.size.index(row, col))
            .copied()
            .map(Cell::from_byte)
            .unwrap_or(Cell::Dead)
    }

    /// Every `(row, col)` holding `state`, in row-major order.
    pub fn positions(&self, state: Cell) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.size.width.max(1);
        self.bytes
            .iter()
            .enumerate()
            .filter(move |(_, b)| Cell::from_byte(**b) == state)
            .map(move |(i, _)| ((i as u32) / width, (i as u32) % width))
    }
}
