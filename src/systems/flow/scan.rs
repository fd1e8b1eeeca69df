use super::FlowPlan;
use crate::core::{CellKey, NEIGHBORS_4};
use crate::domain::SimConfig;
use crate::spatial::CellStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Share of a cell's volume that may leave it in one tick
const MAX_OUTFLOW_SHARE: f32 = 0.5;

/// Plan every cell in `keys` order. Cells that cannot flow are skipped.
pub(super) fn plan_all(store: &dyn CellStore, keys: &[CellKey], cfg: &SimConfig, dt: f32) -> Vec<FlowPlan> {
    #[cfg(feature = "parallel")]
    let plans: Vec<FlowPlan> = keys
        .par_iter()
        .filter_map(|&key| plan_cell(store, key, cfg, dt))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let plans: Vec<FlowPlan> = keys
        .iter()
        .filter_map(|&key| plan_cell(store, key, cfg, dt))
        .collect();

    plans
}

/// Outflow for a single cell, read-only
pub(super) fn plan_cell(store: &dyn CellStore, key: CellKey, cfg: &SimConfig, dt: f32) -> Option<FlowPlan> {
    let cell = store.get(key)?;
    if cell.volume < cfg.min_volume || (cell.settled && !cell.has_source()) {
        return None;
    }

    let mut blocked = 0u32;
    let mut open: [Option<(CellKey, f32)>; 4] = [None; 4];
    let mut open_count = 0usize;

    for (slot, (sample, (dx, dy))) in store.neighborhood(key).into_iter().zip(NEIGHBORS_4).enumerate() {
        match sample {
            Some(n) if n.color != cell.color => blocked += 1,
            other => {
                open[slot] = Some((key.offset(dx, dy), other.map_or(0.0, |n| n.volume)));
                open_count += 1;
            }
        }
    }

    let pressure = if blocked > 0 {
        (cell.pressure + cfg.pressure_gain * blocked as f32).min(1.0)
    } else {
        cell.pressure * cfg.pressure_decay
    };
    let boost = 1.0 + pressure;
    let rate_cap = cfg.flow_rate * dt * boost / open_count.max(1) as f32;

    let mut transfers: Vec<(CellKey, f32)> = Vec::with_capacity(open_count);
    let mut total = 0.0f32;
    for (target, target_volume) in open.into_iter().flatten() {
        let diff = cell.volume - target_volume;
        if diff <= cfg.surface_tension {
            continue;
        }
        let amount = (diff * cfg.flow_fraction * boost).min(rate_cap);
        if amount > 0.0 {
            transfers.push((target, amount));
            total += amount;
        }
    }

    let limit = cell.volume * MAX_OUTFLOW_SHARE;
    if total > limit {
        let scale = limit / total;
        for (_, amount) in transfers.iter_mut() {
            *amount *= scale;
        }
    }

    Some(FlowPlan { key, pressure, transfers })
}
