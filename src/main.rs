mod bootstrap;
mod components;
mod engine;
mod error;
mod model;
mod render;
mod scheduler;
mod state;
mod universe;

#[cfg(test)]
mod testing;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
