use web_sys::CanvasRenderingContext2d;

use crate::engine::CellView;
use crate::model::{Cell, GridSize, ViewConfig};

/// The handful of 2D canvas calls the grid renderer needs.
pub trait Surface {
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn set_fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }
    fn set_stroke(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }
    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }
    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }
}

/// Pixel geometry of the grid: square cells separated by 1px borders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub cell_size: u32,
    pub size: GridSize,
}

impl GridLayout {
    pub fn new(cell_size: u32, size: GridSize) -> Self {
        Self { cell_size, size }
    }

    pub fn pitch(&self) -> u32 {
        self.cell_size + 1
    }

    pub fn canvas_width(&self) -> u32 {
        self.pitch() * self.size.width + 1
    }

    pub fn canvas_height(&self) -> u32 {
        self.pitch() * self.size.height + 1
    }

    /// Top-left corner of the filled square for `(row, col)`.
    pub fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        let pitch = f64::from(self.pitch());
        (f64::from(col) * pitch + 1.0, f64::from(row) * pitch + 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub grid: String,
    pub dead: String,
    pub alive: String,
}

impl From<&ViewConfig> for Palette {
    fn from(config: &ViewConfig) -> Self {
        Self {
            grid: config.grid_color.clone(),
            dead: config.dead_color.clone(),
            alive: config.alive_color.clone(),
        }
    }
}

/// Stateless painter for gridlines and cells.
#[derive(Clone, Debug)]
pub struct GridRenderer {
    layout: GridLayout,
    palette: Palette,
}

impl GridRenderer {
    pub fn new(layout: GridLayout, palette: Palette) -> Self {
        Self { layout, palette }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn draw_grid(&self, surface: &mut impl Surface) {
        let pitch = f64::from(self.layout.pitch());
        let right = f64::from(self.layout.canvas_width());
        let bottom = f64::from(self.layout.canvas_height());
        surface.begin_path();
        surface.set_stroke(&self.palette.grid);
        for i in 0..=self.layout.size.width {
            let x = f64::from(i) * pitch + 1.0;
            surface.move_to(x, 0.0);
            surface.line_to(x, bottom);
        }
        for j in 0..=self.layout.size.height {
            let y = f64::from(j) * pitch + 1.0;
            surface.move_to(0.0, y);
            surface.line_to(right, y);
        }
        surface.stroke();
    }

    /// Fills every cell, dead ones first, so the fill style changes only twice.
    pub fn draw_cells(&self, surface: &mut impl Surface, cells: &CellView<'_>) {
        let side = f64::from(self.layout.cell_size);
        surface.begin_path();
        for (state, color) in [(Cell::Dead, &self.palette.dead), (Cell::Alive, &self.palette.alive)] {
            surface.set_fill(color);
            for (row, col) in cells.positions(state) {
                let (x, y) = self.layout.cell_origin(row, col);
                surface.fill_rect(x, y, side, side);
            }
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, cells: &CellView<'_>) {
        self.draw_grid(surface);
        self.draw_cells(surface, cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingSurface};

    fn renderer(width: u32, height: u32) -> GridRenderer {
        GridRenderer::new(
            GridLayout::new(5, GridSize { width, height }),
            Palette::from(&ViewConfig::default()),
        )
    }

    #[test]
    fn layout_matches_canvas_backing_size() {
        let layout = GridLayout::new(5, GridSize { width: 64, height: 48 });
        assert_eq!(layout.pitch(), 6);
        assert_eq!(layout.canvas_width(), 385);
        assert_eq!(layout.canvas_height(), 289);
        assert_eq!(layout.cell_origin(2, 3), (19.0, 13.0));
    }

    #[test]
    fn grid_has_one_line_per_boundary() {
        for (w, h) in [(1, 1), (7, 3), (64, 64)] {
            let mut surface = RecordingSurface::default();
            renderer(w, h).draw_grid(&mut surface);
            let segments = surface.segments();
            let vertical = segments.iter().filter(|(a, b)| a.0 == b.0).count();
            let horizontal = segments.iter().filter(|(a, b)| a.1 == b.1).count();
            assert_eq!(vertical, w as usize + 1);
            assert_eq!(horizontal, h as usize + 1);
            assert_eq!(surface.count(|op| matches!(op, Op::Stroke)), 1);
        }
    }

    #[test]
    fn gridlines_span_the_whole_canvas() {
        let mut surface = RecordingSurface::default();
        renderer(4, 2).draw_grid(&mut surface);
        let segments = surface.segments();
        assert_eq!(segments[0], ((1.0, 0.0), (1.0, 13.0)));
        assert_eq!(segments[4], ((25.0, 0.0), (25.0, 13.0)));
        assert_eq!(segments[5], ((0.0, 1.0), (25.0, 1.0)));
    }

    #[test]
    fn cells_fill_in_two_passes() {
        let size = GridSize { width: 3, height: 2 };
        let bytes = [1u8, 0, 0, 0, 1, 1];
        let mut surface = RecordingSurface::default();
        renderer(3, 2).draw_cells(&mut surface, &CellView::new(size, &bytes[..]));

        let fills: Vec<&str> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(c) => Some(c.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec!["#FFFFFF", "#000000"]);

        let rects = surface.rects();
        assert_eq!(rects.len(), 6);
        // dead cells come first: (0,1), (0,2), (1,0)
        assert_eq!(rects[0], (7.0, 1.0, 5.0, 5.0));
        assert_eq!(rects[2], (1.0, 7.0, 5.0, 5.0));
        // then alive: (0,0), (1,1), (1,2)
        assert_eq!(rects[3], (1.0, 1.0, 5.0, 5.0));
        assert_eq!(rects[5], (13.0, 7.0, 5.0, 5.0));
    }
}
