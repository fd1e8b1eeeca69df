use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

use crate::domain::{InkColor, Stroke, StrokePoint};
use crate::spatial::Viewport;
use crate::systems::classify_stroke;

use super::perf_stats::PerfStats;
use super::SpreadSimulation;

fn to_js(e: String) -> JsValue {
    JsValue::from_str(&e)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// JS handle to one territory simulation
#[wasm_bindgen]
pub struct Territory {
    core: SpreadSimulation,
}

#[wasm_bindgen]
impl Territory {
    /// Create a simulation with default tuning (sparse backend)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: SpreadSimulation::default(),
        }
    }

    /// Create a simulation from a JSON `SimConfig`; missing fields use defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: String) -> Result<Territory, JsValue> {
        let core = SpreadSimulation::from_config_json(&json).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> u32 { self.core.cell_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn backend(&self) -> String { self.core.backend_name().to_string() }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    pub fn set_flow_rate(&mut self, rate: f32) {
        self.core.set_flow_rate(rate);
    }

    pub fn set_surface_tension(&mut self, threshold: f32) {
        self.core.set_surface_tension(threshold);
    }

    pub fn set_source_strength(&mut self, strength: f32) {
        self.core.set_source_strength(strength);
    }

    pub fn set_combat_ratio(&mut self, ratio: f32) {
        self.core.set_combat_ratio(ratio);
    }

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        let config = crate::domain::SimConfig::from_json(&json).map_err(to_js)?;
        self.core.set_config(config).map_err(to_js)
    }

    /// Deposit a stroke given as JSON. Returns the number of cells touched.
    pub fn spawn_stroke(&mut self, json: String) -> Result<u32, JsValue> {
        let stroke = Stroke::from_json(&json).map_err(to_js)?;
        Ok(self.core.spawn_from_stroke(&stroke).len() as u32)
    }

    /// Deposit a stroke from a flat [x0, y0, x1, y1, ...] array
    pub fn spawn_points(&mut self, xy: Vec<f32>, color: u32, size: f32, peer_id: Option<String>) -> u32 {
        let points = xy.chunks_exact(2).map(|p| StrokePoint::new(p[0], p[1])).collect();
        let mut stroke = Stroke::new(points, InkColor(color), size);
        stroke.peer_id = peer_id;
        self.core.spawn_from_stroke(&stroke).len() as u32
    }

    /// Classify a stroke (JSON) without depositing it
    pub fn classify(&self, json: String) -> Result<String, JsValue> {
        let stroke = Stroke::from_json(&json).map_err(to_js)?;
        to_json(&classify_stroke(&stroke.points, stroke.size))
    }

    pub fn erase_at(&mut self, x: f32, y: f32, radius: f32) -> u32 {
        self.core.erase_at(x, y, radius) as u32
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.core.update(dt);
    }

    /// Cell JSON at a world position, or undefined
    pub fn territory_at(&self, x: f32, y: f32) -> Result<Option<String>, JsValue> {
        self.core.territory_at(x, y).map(to_json).transpose()
    }

    pub fn texture_at(&self, x: f32, y: f32) -> Result<Option<String>, JsValue> {
        self.core.texture_at(x, y).map(to_json).transpose()
    }

    pub fn stats(&self) -> Result<String, JsValue> {
        to_json(&self.core.stats())
    }

    /// Paper texture as a "gx,gy" -> entry map
    pub fn paper_texture(&self) -> Result<String, JsValue> {
        let entries: BTreeMap<String, _> = self
            .core
            .paper_texture()
            .iter()
            .map(|(key, entry)| (key.to_string(), entry))
            .collect();
        to_json(&entries)
    }

    pub fn combat_effects(&self) -> Result<String, JsValue> {
        to_json(&self.core.combat_effects())
    }

    pub fn serialize_territory(&self) -> Result<String, JsValue> {
        self.core.serialize_territory_json().map_err(to_js)
    }

    /// Replace state from a snapshot. Returns the number of cells loaded.
    pub fn load_territory(&mut self, json: String) -> Result<u32, JsValue> {
        let loaded = self.core.load_territory_json(&json).map_err(to_js)?;
        Ok(loaded as u32)
    }

    // === Render buffers ===

    /// Fill render buffers for a world-space rectangle; returns the cell count
    pub fn extract_visible(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> u32 {
        let viewport = Viewport::new(min_x, min_y, max_x, max_y);
        self.core.extract_visible(&viewport) as u32
    }

    /// [gx, gy, volume, contested] quads from the last extract
    pub fn render_cells_ptr(&self) -> *const f32 {
        self.core.render_cells().as_ptr()
    }

    pub fn render_cells_len(&self) -> usize {
        self.core.render_cells().len()
    }

    pub fn render_colors_ptr(&self) -> *const u32 {
        self.core.render_colors().as_ptr()
    }

    pub fn render_colors_len(&self) -> usize {
        self.core.render_colors().len()
    }
}

impl Default for Territory {
    fn default() -> Self {
        Self::new()
    }
}
