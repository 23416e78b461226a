use yew::prelude::*;

use crate::state::FrameStats;

#[derive(Properties, PartialEq, Clone)]
pub struct FpsPanelProps {
    pub stats: FrameStats,
}

#[function_component]
pub fn FpsPanel(props: &FpsPanelProps) -> Html {
    html! {
        <pre id="fps" style="font-family:monospace; font-size:12px; line-height:1.3; margin:0; font-variant-numeric:tabular-nums;">
            { props.stats.to_string() }
        </pre>
    }
}
