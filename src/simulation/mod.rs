//! Spread simulation - one owned instance per game session
//!
//! Orchestration only. The per-tick passes live in `systems/`, storage in
//! `spatial/`; this module wires them together and owns the state:
//! - cells, behind the `CellStore` selected by `SimConfig::backend`
//! - paper texture (outlives the ink it documents)
//! - transient combat effects for the renderer
//!
//! Nothing here is process-global, so any number of simulations can run
//! side by side.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::CellKey;
use crate::domain::{Cell, CombatEffect, InkColor, SimConfig, Stroke, StrokeIntent, TextureEntry};
use crate::spatial::{CellStore, Viewport};
use crate::systems::{DepositOutcome, PaperTexture, SpreadParams, SystemContext, TickCounters};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/stroke_walk.rs"]
mod stroke_walk;
#[path = "step/step.rs"]
mod step;
#[path = "query/query.rs"]
mod query;
#[path = "query/stats.rs"]
mod stats;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Territory;
pub use perf_stats::PerfStats;
pub use stats::TerritoryStats;

use perf_timer::PerfTimer;

/// Reusable buffers for `extract_visible`
#[derive(Default)]
pub(crate) struct RenderBuffers {
    /// [gx, gy, volume, contested] per visible cell
    cells: Vec<f32>,
    colors: Vec<u32>,
}

/// The territory simulation
pub struct SpreadSimulation {
    config: SimConfig,
    store: Box<dyn CellStore>,
    texture: PaperTexture,
    effects: Vec<CombatEffect>,

    // State
    /// Simulated seconds since construction
    clock: f64,
    frame: u64,
    counters: TickCounters,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SpreadSimulation {
    /// Create a simulation. `config` is trusted; use `from_config_json` for
    /// untrusted input.
    pub fn new(config: SimConfig) -> Self {
        init::create_simulation(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self, String> {
        let config = SimConfig::from_json(json)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn cell_count(&self) -> usize {
        self.store.len()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    // === Settings ===

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }

    pub fn set_flow_rate(&mut self, rate: f32) {
        settings::set_flow_rate(self, rate);
    }

    pub fn set_surface_tension(&mut self, threshold: f32) {
        settings::set_surface_tension(self, threshold);
    }

    pub fn set_source_strength(&mut self, strength: f32) {
        settings::set_source_strength(self, strength);
    }

    pub fn set_combat_ratio(&mut self, ratio: f32) {
        settings::set_combat_ratio(self, ratio);
    }

    /// Swap tuning at runtime. The backend cannot change after construction.
    pub fn set_config(&mut self, config: SimConfig) -> Result<(), String> {
        settings::set_config(self, config)
    }

    // === Commands ===

    /// Classify and deposit a finished stroke. Returns the cells it touched.
    pub fn spawn_from_stroke(&mut self, stroke: &Stroke) -> BTreeSet<CellKey> {
        commands::spawn_from_stroke(self, stroke)
    }

    /// Deposit ink into one cell, resolving combat
    pub fn add_ink_volume(
        &mut self,
        key: CellKey,
        volume: f32,
        color: InkColor,
        owner_id: Option<&str>,
        intent: StrokeIntent,
        params: SpreadParams,
    ) -> DepositOutcome {
        commands::add_ink_volume(self, key, volume, color, owner_id, intent, params)
    }

    /// Remove every cell whose center is within `radius` of (x, y)
    pub fn erase_at(&mut self, x: f32, y: f32, radius: f32) -> usize {
        commands::erase_at(self, x, y, radius)
    }

    /// Drop all cells, texture and effects
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Tick ===

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        step::update(self, dt);
    }

    // === Queries ===

    pub fn territory_at(&self, x: f32, y: f32) -> Option<&Cell> {
        query::territory_at(self, x, y)
    }

    pub fn texture_at(&self, x: f32, y: f32) -> Option<&TextureEntry> {
        query::texture_at(self, x, y)
    }

    pub fn stats(&self) -> TerritoryStats {
        stats::collect(self)
    }

    /// Flat "gx,gy" -> cell snapshot
    pub fn serialize_territory(&self) -> BTreeMap<String, Cell> {
        query::serialize_territory(self)
    }

    pub fn serialize_territory_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.serialize_territory()).map_err(|e| e.to_string())
    }

    /// Replace all state with a snapshot. On error nothing changes.
    pub fn load_territory(&mut self, snapshot: BTreeMap<String, Cell>) -> Result<usize, String> {
        query::load_territory(self, snapshot)
    }

    pub fn load_territory_json(&mut self, json: &str) -> Result<usize, String> {
        let snapshot: BTreeMap<String, Cell> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.load_territory(snapshot)
    }

    /// Read-only view of the cells for renderers
    pub fn territory(&self) -> &dyn CellStore {
        self.store.as_ref()
    }

    pub fn paper_texture(&self) -> &PaperTexture {
        &self.texture
    }

    pub fn combat_effects(&self) -> &[CombatEffect] {
        &self.effects
    }

    // === Render extraction ===

    /// Fill the render buffers with the cells inside `viewport`.
    /// Returns the number of cells written.
    pub fn extract_visible(&mut self, viewport: &Viewport) -> usize {
        render_extract::extract_visible(self, viewport)
    }

    pub fn render_cells(&self) -> &[f32] {
        &self.render.cells
    }

    pub fn render_colors(&self) -> &[u32] {
        &self.render.colors
    }

    fn context(&mut self) -> SystemContext<'_> {
        SystemContext {
            store: self.store.as_mut(),
            texture: &mut self.texture,
            effects: &mut self.effects,
            config: &self.config,
            counters: &mut self.counters,
        }
    }
}

impl Default for SpreadSimulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
