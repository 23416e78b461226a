//! In-memory stand-ins for the engine, canvas and frame scheduler.

use crate::engine::{CellView, Engine};
use crate::error::AppError;
use crate::model::GridSize;
use crate::render::Surface;
use crate::scheduler::{FrameHandle, FrameScheduler};

pub struct FakeEngine {
    pub size: GridSize,
    pub cells: Vec<u8>,
    pub generation: u64,
    pub toggles: Vec<(u32, u32)>,
}

impl FakeEngine {
    pub fn new(width: u32, height: u32) -> Self {
        let size = GridSize { width, height };
        Self {
            size,
            cells: vec![0; size.cell_count()],
            generation: 0,
            toggles: Vec::new(),
        }
    }

    pub fn toggle_count(&self, cell: (u32, u32)) -> usize {
        self.toggles.iter().filter(|c| **c == cell).count()
    }
}

impl Engine for FakeEngine {
    fn width(&self) -> u32 {
        self.size.width
    }
    fn height(&self) -> u32 {
        self.size.height
    }
    fn tick(&mut self) {
        self.generation += 1;
    }
    fn toggle_cell(&mut self, row: u32, col: u32) {
        let idx = self.size.index(row, col);
        self.cells[idx] ^= 1;
        self.toggles.push((row, col));
    }
    fn cells(&self) -> CellView<'_> {
        CellView::new(self.size, &self.cells[..])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fill(String),
    StrokeStyle(String),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    FillRect(f64, f64, f64, f64),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Pairs every `MoveTo` with the `LineTo` that follows it.
    pub fn segments(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.ops
            .windows(2)
            .filter_map(|pair| match pair {
                [Op::MoveTo(x0, y0), Op::LineTo(x1, y1)] => Some(((*x0, *y0), (*x1, *y1))),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::FillRect(x, y, w, h) => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn repaints(&self) -> usize {
        self.count(|op| matches!(op, Op::Stroke))
    }
}

impl Surface for RecordingSurface {
    fn set_fill(&mut self, color: &str) {
        self.ops.push(Op::Fill(color.to_string()));
    }
    fn set_stroke(&mut self, color: &str) {
        self.ops.push(Op::StrokeStyle(color.to_string()));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
}

/// Scheduler driven by hand: a test "fires" the pending frame when it wants.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: i32,
    pub pending: Option<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub fail_requests: bool,
}

impl ManualScheduler {
    /// A scheduler whose every request is refused.
    pub fn failing() -> Self {
        Self {
            fail_requests: true,
            ..Self::default()
        }
    }

    /// Consumes the pending frame, if any, as the browser would when it fires.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> Result<FrameHandle, AppError> {
        if self.fail_requests {
            return Err(AppError::NoFrameCallback);
        }
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
