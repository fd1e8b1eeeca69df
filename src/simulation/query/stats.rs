use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{InkColor, StrokeIntent};
use crate::spatial::ChunkStats;

use super::SpreadSimulation;

/// Aggregate snapshot for HUDs and tests
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryStats {
    pub territory_cells: usize,
    /// Cells not yet settled
    pub active_cells: usize,
    pub total_volume: f32,
    /// Cell count per color
    pub color_breakdown: BTreeMap<InkColor, usize>,
    pub intent_breakdown: BTreeMap<StrokeIntent, usize>,
    pub combat_effects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkStats>,
}

impl TerritoryStats {
    pub fn cells_of(&self, color: InkColor) -> usize {
        self.color_breakdown.get(&color).copied().unwrap_or(0)
    }
}

pub(super) fn collect(sim: &SpreadSimulation) -> TerritoryStats {
    let mut stats = TerritoryStats {
        combat_effects: sim.effects.len(),
        chunks: sim.store.chunk_stats(),
        ..TerritoryStats::default()
    };
    // Key order keeps the float sum identical across runs
    for key in sim.store.sorted_keys() {
        let Some(cell) = sim.store.get(key) else { continue };
        stats.territory_cells += 1;
        if !cell.settled {
            stats.active_cells += 1;
        }
        stats.total_volume += cell.volume;
        *stats.color_breakdown.entry(cell.color).or_insert(0) += 1;
        *stats.intent_breakdown.entry(cell.intent).or_insert(0) += 1;
    }
    stats
}
