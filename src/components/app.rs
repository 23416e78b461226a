use log::error;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::{controls_panel::ControlsPanel, fps_panel::FpsPanel};
use crate::bootstrap::{self, Session};
use crate::error::AppError;
use crate::model::ViewConfig;
use crate::state::{FrameStats, Playback};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| bootstrap::page_config().map_err(|e| e.to_string()));
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| None::<Session>);
    let playback = use_state(|| None::<Playback>);
    let fps = use_state(FrameStats::default);
    let failure = use_state(|| None::<String>);

    // Mount: engine, canvas, frame loop, listeners
    {
        let canvas_ref = canvas_ref.clone();
        let config = config.clone();
        let session = session.clone();
        let playback = playback.clone();
        let fps = fps.clone();
        let failure = failure.clone();
        use_effect_with((), move |_| {
            let mounted = match (*config).as_ref() {
                Ok(config) => {
                    let canvas = canvas_ref.cast::<HtmlCanvasElement>();
                    let on_frame = {
                        let fps = fps.clone();
                        Callback::from(move |stats: FrameStats| fps.set(stats))
                    };
                    let on_playback = {
                        let playback = playback.clone();
                        Callback::from(move |p: Playback| playback.set(Some(p)))
                    };
                    canvas
                        .ok_or(AppError::NoCanvas)
                        .and_then(|canvas| {
                            bootstrap::mount(canvas, config, session, on_frame, on_playback)
                        })
                        .map_err(|e| e.to_string())
                }
                Err(msg) => Err(msg.clone()),
            };
            let mounted = match mounted {
                Ok(m) => Some(m),
                Err(msg) => {
                    error!("life canvas failed to start: {msg}");
                    failure.set(Some(msg));
                    None
                }
            };
            move || {
                if let Some(m) = mounted {
                    m.detach();
                }
            }
        });
    }

    let toggle_play_cb: Callback<()> = {
        let session = session.clone();
        let playback = playback.clone();
        Callback::from(move |()| {
            let next = session.borrow_mut().as_mut().map(|s| s.toggle_play());
            if let Some(next) = next {
                playback.set(Some(next));
            }
        })
    };
    let speed_input_cb: Callback<String> = {
        let session = session.clone();
        let playback = playback.clone();
        Callback::from(move |raw: String| {
            let next = session.borrow_mut().as_mut().map(|s| {
                // rejected input is logged by the controller; the slider snaps back
                let _ = s.set_speed_input(&raw);
                s.playback()
            });
            if let Some(next) = next {
                playback.set(Some(next));
            }
        })
    };

    let defaults = ViewConfig::default();
    let view_config = (*config).as_ref().unwrap_or(&defaults);
    let current = (*playback).unwrap_or(Playback {
        running: false,
        speed: view_config.initial_speed(),
    });
    let (speed_min, speed_max) = view_config.speed_bounds();

    html! {<div style="display:flex; flex-direction:column; align-items:center; gap:8px; padding:16px; font-family:sans-serif;">
        <ControlsPanel
            glyph={current.glyph()}
            speed={current.speed.get()}
            speed_min={speed_min.get()}
            speed_max={speed_max.get()}
            on_toggle_play={toggle_play_cb}
            on_speed_input={speed_input_cb}
        />
        <FpsPanel stats={*fps} />
        { if let Some(msg) = &*failure {
            html!{ <div style="color:#f85149; font-size:13px;">{ format!("Could not start: {msg}") }</div> }
        } else { html!{} } }
        <canvas ref={canvas_ref.clone()} id="game-of-life-canvas"></canvas>
    </div>}
}
