//! Playback and pointer handling for one canvas.
//!
//! The controller owns the engine, the drawing surface, the pending frame, the drag
//! session and the FPS window. Browser glue only forwards events and timestamps.

use log::{debug, warn};

use crate::engine::Engine;
use crate::model::{PlaybackSpeed, SpeedError, SpeedPolicy, ViewConfig};
use crate::render::{GridLayout, GridRenderer, Palette, Surface};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::state::metrics::{FrameMetrics, FrameStats};
use crate::state::pointer::DragSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    pub running: bool,
    pub speed: PlaybackSpeed,
}

impl Playback {
    /// Button glyph: the action a click would take.
    pub fn glyph(&self) -> &'static str {
        if self.running { "⏸" } else { "▶" }
    }
}

pub struct Controller<E, S> {
    engine: E,
    surface: S,
    renderer: GridRenderer,
    speed: PlaybackSpeed,
    speed_policy: SpeedPolicy,
    speed_bounds: (PlaybackSpeed, PlaybackSpeed),
    pending: Option<FrameHandle>,
    drag: Option<DragSession>,
    metrics: FrameMetrics,
}

impl<E: Engine, S: Surface> Controller<E, S> {
    pub fn new(engine: E, surface: S, config: &ViewConfig, now_ms: f64) -> Self {
        let layout = GridLayout::new(config.cell_size, engine.size());
        Self {
            renderer: GridRenderer::new(layout, Palette::from(config)),
            engine,
            surface,
            speed: config.initial_speed(),
            speed_policy: config.speed_policy,
            speed_bounds: config.speed_bounds(),
            pending: None,
            drag: None,
            metrics: FrameMetrics::new(config.fps_window, now_ms),
        }
    }

    pub fn layout(&self) -> &GridLayout {
        self.renderer.layout()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_paused(&self) -> bool {
        self.pending.is_none()
    }

    pub fn playback(&self) -> Playback {
        Playback {
            running: !self.is_paused(),
            speed: self.speed,
        }
    }

    #[cfg(test)]
    pub fn frame_stats(&self) -> FrameStats {
        self.metrics.stats()
    }

    /// Repaints grid and cells from a fresh snapshot.
    pub fn redraw(&mut self) {
        let cells = self.engine.cells();
        self.renderer.draw(&mut self.surface, &cells);
    }

    /// One scheduled frame: metrics, `speed` generations, repaint, re-arm.
    pub fn frame(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> FrameStats {
        self.pending = None;
        let stats = self.metrics.record(now_ms);
        for _ in 0..self.speed.get() {
            self.engine.tick();
        }
        self.redraw();
        match scheduler.request() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => warn!("frame loop stopped: {err}"),
        }
        stats
    }

    /// Starts the loop with an immediate frame. Does nothing while already running.
    pub fn play(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> Playback {
        if self.is_paused() {
            debug!("play at speed {}", self.speed);
            self.frame(now_ms, scheduler);
        }
        self.playback()
    }

    pub fn pause(&mut self, scheduler: &mut impl FrameScheduler) -> Playback {
        if let Some(handle) = self.pending.take() {
            debug!("pause");
            scheduler.cancel(handle);
        }
        self.playback()
    }

    pub fn toggle_play(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> Playback {
        if self.is_paused() {
            self.play(now_ms, scheduler)
        } else {
            self.pause(scheduler)
        }
    }

    /// Applies raw slider text; on rejection the previous speed stays in effect.
    pub fn set_speed_input(&mut self, raw: &str) -> Result<PlaybackSpeed, SpeedError> {
        let (min, max) = self.speed_bounds;
        match PlaybackSpeed::parse(raw, self.speed_policy, min, max) {
            Ok(speed) => {
                if speed != self.speed {
                    debug!("playback speed {} -> {}", self.speed, speed);
                }
                self.speed = speed;
                Ok(speed)
            }
            Err(err) => {
                warn!("ignoring speed input: {err}");
                Err(err)
            }
        }
    }

    #[cfg(test)]
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn click(&mut self, (row, col): (u32, u32)) {
        self.engine.toggle_cell(row, col);
        self.redraw();
    }

    pub fn pointer_down(&mut self) {
        self.drag = Some(DragSession::default());
    }

    /// Paints `cell` if a drag is in progress and the gesture has not touched it yet.
    pub fn pointer_move(&mut self, (row, col): (u32, u32)) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if !drag.visit((row, col)) {
            return false;
        }
        self.engine.toggle_cell(row, col);
        self.redraw();
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
