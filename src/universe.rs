//! Bindings to the external `wasm-game-of-life` engine package.
//!
//! The engine lives in its own wasm instance, so its cell buffer is not part of this
//! module's memory. `cells()` copies `width * height` bytes out of the engine's
//! exported `memory` at the offset it reports.

use js_sys::{Uint8Array, WebAssembly};
use wasm_bindgen::prelude::*;

use crate::engine::{CellView, Engine};
use crate::model::GridSize;

#[wasm_bindgen(module = "wasm-game-of-life")]
extern "C" {
    pub type Universe;

    #[wasm_bindgen(static_method_of = Universe, js_name = new)]
    fn create() -> Universe;

    #[wasm_bindgen(method)]
    fn width(this: &Universe) -> u32;

    #[wasm_bindgen(method)]
    fn height(this: &Universe) -> u32;

    #[wasm_bindgen(method)]
    fn tick(this: &Universe);

    #[wasm_bindgen(method)]
    fn cells(this: &Universe) -> u32;

    #[wasm_bindgen(method)]
    fn toggle_cell(this: &Universe, row: u32, col: u32);
}

#[wasm_bindgen(module = "wasm-game-of-life/wasm_game_of_life_bg")]
extern "C" {
    #[wasm_bindgen(thread_local_v2, js_name = memory)]
    static ENGINE_MEMORY: WebAssembly::Memory;
}

pub struct UniverseEngine {
    universe: Universe,
    size: GridSize,
}

impl UniverseEngine {
    pub fn new() -> Self {
        let universe = Universe::create();
        let size = GridSize {
            width: universe.width(),
            height: universe.height(),
        };
        Self { universe, size }
    }
}

impl Engine for UniverseEngine {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }

    fn tick(&mut self) {
        self.universe.tick();
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.universe.toggle_cell(row, col);
    }

    fn cells(&self) -> CellView<'_> {
        // Re-read every call: the engine may reallocate its buffer between ticks.
        let offset = self.universe.cells();
        let len = self.size.cell_count() as u32;
        let bytes = ENGINE_MEMORY.with(|memory| {
            Uint8Array::new_with_byte_offset_and_length(&memory.buffer(), offset, len).to_vec()
        });
        CellView::new(self.size, bytes)
    }
}
