// Pointer-to-cell mapping and drag-paint bookkeeping
use std::collections::HashSet;

use web_sys::HtmlCanvasElement;

use crate::render::GridLayout;

/// Where the canvas sits on screen and how big its backing store is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasBox {
    pub left: f64,
    pub top: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub backing_width: f64,
    pub backing_height: f64,
}

impl CanvasBox {
    pub fn measure(canvas: &HtmlCanvasElement) -> Self {
        let rect = canvas.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            css_width: rect.width(),
            css_height: rect.height(),
            backing_width: f64::from(canvas.width()),
            backing_height: f64::from(canvas.height()),
        }
    }

    /// Maps a client-space position to `(row, col)`, clamped into the grid.
    pub fn cell_at(&self, client_x: f64, client_y: f64, layout: &GridLayout) -> (u32, u32) {
        let scale_x = scale(self.backing_width, self.css_width);
        let scale_y = scale(self.backing_height, self.css_height);
        let x = (client_x - self.left) * scale_x;
        let y = (client_y - self.top) * scale_y;
        let pitch = f64::from(layout.pitch());
        let row = axis_index(y, pitch, layout.size.height);
        let col = axis_index(x, pitch, layout.size.width);
        (row, col)
    }
}

fn scale(backing: f64, css: f64) -> f64 {
    if css > 0.0 { backing / css } else { 1.0 }
}

fn axis_index(px: f64, pitch: f64, cells: u32) -> u32 {
    let last = f64::from(cells.saturating_sub(1));
    // NaN casts to 0
    (px / pitch).floor().clamp(0.0, last) as u32
}

/// Cells already toggled during one pointer-down..pointer-up gesture.
#[derive(Debug, Default)]
pub struct DragSession {
    visited: HashSet<(u32, u32)>,
}

impl DragSession {
    /// Returns true the first time `cell` is seen in this gesture.
    pub fn visit(&mut self, cell: (u32, u32)) -> bool {
        self.visited.insert(cell)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridSize;

    fn layout() -> GridLayout {
        GridLayout::new(5, GridSize { width: 64, height: 48 })
    }

    fn unscaled(layout: &GridLayout) -> CanvasBox {
        let w = f64::from(layout.canvas_width());
        let h = f64::from(layout.canvas_height());
        CanvasBox {
            left: 10.0,
            top: 20.0,
            css_width: w,
            css_height: h,
            backing_width: w,
            backing_height: h,
        }
    }

    #[test]
    fn origin_maps_to_first_cell() {
        let layout = layout();
        let bbox = unscaled(&layout);
        assert_eq!(bbox.cell_at(10.0, 20.0, &layout), (0, 0));
        assert_eq!(bbox.cell_at(15.9, 25.9, &layout), (0, 0));
        assert_eq!(bbox.cell_at(16.0, 20.0, &layout), (0, 1));
    }

    #[test]
    fn in_bounds_pointers_stay_in_grid() {
        let layout = layout();
        let bbox = unscaled(&layout);
        let mut y = 20.0;
        while y < 20.0 + bbox.css_height {
            let mut x = 10.0;
            while x < 10.0 + bbox.css_width {
                let (row, col) = bbox.cell_at(x, y, &layout);
                assert!(row < 48 && col < 64, "({x},{y}) -> ({row},{col})");
                x += 3.7;
            }
            y += 2.9;
        }
    }

    #[test]
    fn edge_and_beyond_clamp_to_last_cell() {
        let layout = layout();
        let bbox = unscaled(&layout);
        let right = 10.0 + bbox.css_width;
        let bottom = 20.0 + bbox.css_height;
        assert_eq!(bbox.cell_at(right, bottom, &layout), (47, 63));
        assert_eq!(bbox.cell_at(right + 500.0, bottom + 500.0, &layout), (47, 63));
        assert_eq!(bbox.cell_at(-100.0, -100.0, &layout), (0, 0));
    }

    #[test]
    fn css_scaling_is_undone_per_axis() {
        let layout = layout();
        let mut bbox = unscaled(&layout);
        // displayed at half width, full height
        bbox.css_width /= 2.0;
        // 30 css px -> 60 backing px -> column 10
        assert_eq!(bbox.cell_at(10.0 + 30.0, 20.0 + 30.0, &layout), (5, 10));
    }

    #[test]
    fn collapsed_canvas_does_not_divide_by_zero() {
        let layout = layout();
        let mut bbox = unscaled(&layout);
        bbox.css_width = 0.0;
        bbox.css_height = 0.0;
        assert_eq!(bbox.cell_at(22.0, 32.0, &layout), (2, 2));
    }

    #[test]
    fn drag_session_visits_each_cell_once() {
        let mut session = DragSession::default();
        assert!(session.visit((1, 1)));
        assert!(session.visit((1, 2)));
        assert!(!session.visit((1, 1)));
        assert_eq!(session.len(), 2);
    }
}
