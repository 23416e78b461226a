use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub glyph: AttrValue,
    pub speed: u32,
    pub speed_min: u32,
    pub speed_max: u32,
    pub on_toggle_play: Callback<()>,
    pub on_speed_input: Callback<String>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let play_cb = {
        let cb = props.on_toggle_play.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let speed_cb = {
        let cb = props.on_speed_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    html! {<div style="display:flex; align-items:center; gap:12px; padding:8px 0;">
        <button id="play-pause" onclick={play_cb} style="min-width:40px; font-size:18px;">{ props.glyph.to_string() }</button>
        <label style="display:flex; align-items:center; gap:6px;">
            <span>{"Speed"}</span>
            <input
                id="playback-speed"
                type="range"
                min={props.speed_min.to_string()}
                max={props.speed_max.to_string()}
                step="1"
                value={props.speed.to_string()}
                oninput={speed_cb}
            />
            <span style="min-width:24px; font-variant-numeric:tabular-nums;">{ format!("{}×", props.speed) }</span>
        </label>
    </div>}
}
