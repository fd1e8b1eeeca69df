use wasm_bindgen::prelude::*;

use crate::systems::TickCounters;

/// Timings and work counts for the last tick
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) texture_ms: f64,
    pub(super) flow_ms: f64,
    pub(super) tension_ms: f64,
    pub(super) cleanup_ms: f64,
    pub(super) cells_scanned: u32,
    pub(super) transfers: u32,
    pub(super) combats: u32,
    pub(super) cells_created: u32,
    pub(super) cells_removed: u32,
    pub(super) cell_count: u32,
    pub(super) chunk_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn record_counters(&mut self, counters: &TickCounters) {
        self.cells_scanned = counters.cells_scanned;
        self.transfers = counters.transfers;
        self.combats = counters.combats;
        self.cells_created = counters.cells_created;
        self.cells_removed = counters.cells_removed;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn texture_ms(&self) -> f64 { self.texture_ms }
    #[wasm_bindgen(getter)]
    pub fn flow_ms(&self) -> f64 { self.flow_ms }
    #[wasm_bindgen(getter)]
    pub fn tension_ms(&self) -> f64 { self.tension_ms }
    #[wasm_bindgen(getter)]
    pub fn cleanup_ms(&self) -> f64 { self.cleanup_ms }
    #[wasm_bindgen(getter)]
    pub fn cells_scanned(&self) -> u32 { self.cells_scanned }
    #[wasm_bindgen(getter)]
    pub fn transfers(&self) -> u32 { self.transfers }
    #[wasm_bindgen(getter)]
    pub fn combats(&self) -> u32 { self.combats }
    #[wasm_bindgen(getter)]
    pub fn cells_created(&self) -> u32 { self.cells_created }
    #[wasm_bindgen(getter)]
    pub fn cells_removed(&self) -> u32 { self.cells_removed }
    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> u32 { self.cell_count }
    #[wasm_bindgen(getter)]
    pub fn chunk_count(&self) -> u32 { self.chunk_count }
}
