//! Inkspread Engine - territory ink-spread simulation in WASM
//!
//! Hand-drawn strokes become fluid territory: ink flows to open neighbors,
//! colors fight over cells, and drawing style (wall / attack / fill) shapes
//! how a stroke spreads.
//!
//! Architecture:
//! - core/       - grid keys, logging macros
//! - domain/     - cell, stroke and config records
//! - systems/    - intent classifier, combat, flow, surface tension, texture
//! - spatial/    - chunk manager and cell-store backends
//! - simulation/ - orchestration only
//! - api/        - public API

// Utils with logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("inkspread engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::Territory;
pub use crate::core::CellKey;
pub use domain::{Backend, Cell, ChunkConfig, InkColor, SimConfig, Stroke, StrokeIntent, StrokePoint};
pub use simulation::{SpreadSimulation, TerritoryStats};
pub use spatial::Viewport;
pub use systems::{classify_stroke, Classification, SpreadParams};
