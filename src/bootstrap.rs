//! Page start-up: config lookup, engine and canvas setup, listener wiring.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    MouseEvent, Window,
};
use yew::Callback;

use crate::engine::Engine;
use crate::error::AppError;
use crate::model::{PlaybackSpeed, SpeedError, ViewConfig};
use crate::render::GridLayout;
use crate::scheduler::RafScheduler;
use crate::state::{CanvasBox, Controller, FrameStats, Playback};
use crate::universe::UniverseEngine;

/// Id of the optional `<script type="application/json">` holding a [`ViewConfig`].
pub const CONFIG_ELEMENT_ID: &str = "life-config";

pub type BrowserController = Controller<UniverseEngine, CanvasRenderingContext2d>;
pub type SharedSession = Rc<RefCell<Option<Session>>>;

/// Reads the page config, falling back to defaults when the page carries none.
pub fn page_config() -> Result<ViewConfig, AppError> {
    let window = web_sys::window().ok_or(AppError::NoWindow)?;
    let document = window.document().ok_or(AppError::NoDocument)?;
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(raw) if !raw.trim().is_empty() => ViewConfig::from_json(&raw),
        _ => Ok(ViewConfig::default()),
    }
}

/// Live controller plus the browser handles it needs between events.
pub struct Session {
    controller: BrowserController,
    scheduler: RafScheduler,
    canvas: HtmlCanvasElement,
    window: Window,
}

impl Session {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_default()
    }

    fn cell_for(&self, e: &MouseEvent) -> (u32, u32) {
        CanvasBox::measure(&self.canvas).cell_at(
            f64::from(e.client_x()),
            f64::from(e.client_y()),
            self.controller.layout(),
        )
    }

    /// Runs one scheduled frame, timed on the same clock as `play`.
    fn frame(&mut self) -> (FrameStats, Playback) {
        let now = self.now();
        let stats = self.controller.frame(now, &mut self.scheduler);
        (stats, self.controller.playback())
    }

    pub fn play(&mut self) -> Playback {
        let now = self.now();
        self.controller.play(now, &mut self.scheduler)
    }

    pub fn toggle_play(&mut self) -> Playback {
        let now = self.now();
        self.controller.toggle_play(now, &mut self.scheduler)
    }

    pub fn set_speed_input(&mut self, raw: &str) -> Result<PlaybackSpeed, SpeedError> {
        self.controller.set_speed_input(raw)
    }

    pub fn playback(&self) -> Playback {
        self.controller.playback()
    }

    fn click(&mut self, e: &MouseEvent) {
        let cell = self.cell_for(e);
        self.controller.click(cell);
    }

    fn pointer_move(&mut self, e: &MouseEvent) {
        if self.controller.is_dragging() {
            let cell = self.cell_for(e);
            self.controller.pointer_move(cell);
        }
    }

    fn shutdown(&mut self) {
        self.controller.pause(&mut self.scheduler);
        self.scheduler.release();
    }
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(Event)>);

/// Everything attached to the page by [`mount`]; [`Mounted::detach`] undoes it.
pub struct Mounted {
    session: SharedSession,
    listeners: Vec<Listener>,
}

impl Mounted {
    pub fn detach(self) {
        for (target, kind, cb) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
        }
        if let Some(mut session) = self.session.borrow_mut().take() {
            session.shutdown();
        }
        debug!("life canvas detached");
    }
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, AppError> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .map_err(AppError::js("addEventListener"))?;
    Ok((target.clone(), kind, cb))
}

/// Builds the engine and controller around `canvas`, paints the first frame,
/// optionally starts playback and wires every input listener.
pub fn mount(
    canvas: HtmlCanvasElement,
    config: &ViewConfig,
    slot: SharedSession,
    on_frame: Callback<FrameStats>,
    on_playback: Callback<Playback>,
) -> Result<Mounted, AppError> {
    let window = web_sys::window().ok_or(AppError::NoWindow)?;
    let now = window.performance().map(|p| p.now()).unwrap_or_default();

    let engine = UniverseEngine::new();
    let layout = GridLayout::new(config.cell_size, engine.size());
    canvas.set_width(layout.canvas_width());
    canvas.set_height(layout.canvas_height());
    let ctx = canvas
        .get_context("2d")
        .map_err(AppError::js("getContext"))?
        .ok_or(AppError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| AppError::NoContext)?;
    info!(
        "life canvas: {}x{} cells, {}x{} px",
        layout.size.width,
        layout.size.height,
        layout.canvas_width(),
        layout.canvas_height()
    );

    let scheduler = RafScheduler::new(window.clone());
    {
        let slot = slot.clone();
        let on_playback = on_playback.clone();
        scheduler.install(move |_| {
            let outcome = slot.borrow_mut().as_mut().map(Session::frame);
            if let Some((stats, playback)) = outcome {
                on_frame.emit(stats);
                if !playback.running {
                    on_playback.emit(playback);
                }
            }
        });
    }

    let mut session = Session {
        controller: Controller::new(engine, ctx, config, now),
        scheduler,
        canvas: canvas.clone(),
        window: window.clone(),
    };
    session.controller.redraw();
    let playback = if config.autoplay {
        session.play()
    } else {
        session.playback()
    };
    *slot.borrow_mut() = Some(session);
    on_playback.emit(playback);

    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();
    let mut listeners = Vec::new();
    {
        let slot = slot.clone();
        listeners.push(listen(canvas_target, "click", move |e| {
            if let (Some(e), Some(s)) = (e.dyn_ref::<MouseEvent>(), slot.borrow_mut().as_mut()) {
                s.click(e);
            }
        })?);
    }
    {
        let slot = slot.clone();
        listeners.push(listen(canvas_target, "mousedown", move |_| {
            if let Some(s) = slot.borrow_mut().as_mut() {
                s.controller.pointer_down();
            }
        })?);
    }
    {
        let slot = slot.clone();
        listeners.push(listen(canvas_target, "mousemove", move |e| {
            if let (Some(e), Some(s)) = (e.dyn_ref::<MouseEvent>(), slot.borrow_mut().as_mut()) {
                s.pointer_move(e);
            }
        })?);
    }
    // window-level so releasing outside the canvas still ends the gesture
    {
        let slot = slot.clone();
        listeners.push(listen(window_target, "mouseup", move |_| {
            if let Some(s) = slot.borrow_mut().as_mut() {
                s.controller.pointer_up();
            }
        })?);
    }
    {
        let slot = slot.clone();
        listeners.push(listen(window_target, "keydown", move |e| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.code() != "Space" || key.repeat() || typing_target(&e) {
                return;
            }
            e.prevent_default();
            let playback = slot.borrow_mut().as_mut().map(|s| s.toggle_play());
            if let Some(playback) = playback {
                on_playback.emit(playback);
            }
        })?);
    }

    Ok(Mounted {
        session: slot,
        listeners,
    })
}

/// Space on a focused control already activates it; don't toggle twice.
fn typing_target(e: &Event) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "BUTTON" | "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}
