use std::collections::BTreeSet;

use crate::core::CellKey;
use crate::domain::{InkColor, Stroke, StrokeIntent};
use crate::systems::{add_ink_volume as resolve_deposit, classify_stroke, Deposit, DepositOutcome, SpreadParams};

use super::stroke_walk::{falloff_offsets, sample_path};
use super::SpreadSimulation;

/// Brush size that deposits one unit of volume
const VOLUME_PER_SIZE: f32 = 10.0;

pub(super) fn spawn_from_stroke(sim: &mut SpreadSimulation, stroke: &Stroke) -> BTreeSet<CellKey> {
    let mut affected = BTreeSet::new();
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if stroke.points.len() < 2 || stroke.is_eraser() || !usable(stroke.size) || !usable(stroke.path_length()) {
        return affected;
    }

    let classification = classify_stroke(&stroke.points, stroke.size);
    let params = classification.params();
    let cell_size = sim.config.cell_size;

    let samples = sample_path(&stroke.points, cell_size * 0.5);
    let base_volume = stroke.size / VOLUME_PER_SIZE * params.resistance;
    let per_sample = base_volume / samples.len().max(1) as f32;
    if !(per_sample > 0.0) {
        return affected;
    }

    // Thick brushes also wet the surrounding cells
    let offsets = if stroke.size > cell_size {
        let radius = (stroke.size / cell_size * 0.5 * params.max_radius).round();
        falloff_offsets(radius.min(sim.config.max_brush_radius as f32).max(0.0) as i32)
    } else {
        Vec::new()
    };

    let owner = stroke.peer_id.as_deref();
    for (x, y) in samples {
        let center = CellKey::from_world(x, y, cell_size);
        let outcome = add_ink_volume(sim, center, per_sample, stroke.color, owner, classification.intent, params);
        if outcome != DepositOutcome::Rejected {
            affected.insert(center);
        }

        for &(dx, dy, weight) in &offsets {
            let key = center.offset(dx, dy);
            let volume = per_sample * weight * params.spread_rate;
            let outcome = add_ink_volume(sim, key, volume, stroke.color, owner, classification.intent, params);
            if outcome != DepositOutcome::Rejected {
                affected.insert(key);
            }
        }
    }
    affected
}

pub(super) fn add_ink_volume(
    sim: &mut SpreadSimulation,
    key: CellKey,
    volume: f32,
    color: InkColor,
    owner_id: Option<&str>,
    intent: StrokeIntent,
    params: SpreadParams,
) -> DepositOutcome {
    let deposit = Deposit {
        key,
        volume,
        color,
        owner_id,
        intent,
        params,
    };
    resolve_deposit(&mut sim.context(), &deposit)
}

pub(super) fn erase_at(sim: &mut SpreadSimulation, x: f32, y: f32, radius: f32) -> usize {
    if !(radius >= 0.0) {
        return 0;
    }
    let cell_size = sim.config.cell_size;
    let r2 = radius * radius;
    let within = |key: CellKey| {
        let (cx, cy) = key.center(cell_size);
        let (dx, dy) = (cx - x, cy - y);
        dx * dx + dy * dy <= r2
    };

    let min = CellKey::from_world(x - radius, y - radius, cell_size);
    let max = CellKey::from_world(x + radius, y + radius, cell_size);
    let mut doomed = Vec::new();
    sim.store.cells_in_rect(min.coords(), max.coords(), &mut |key, _| {
        if within(key) {
            doomed.push(key);
        }
    });
    doomed.sort_unstable();

    for key in doomed.iter() {
        sim.store.remove(*key);
        sim.texture.remove(*key);
    }
    sim.counters.cells_removed += doomed.len() as u32;
    doomed.len()
}

pub(super) fn clear(sim: &mut SpreadSimulation) {
    sim.store.clear();
    sim.texture.clear();
    sim.effects.clear();
    sim.render.cells.clear();
    sim.render.colors.clear();
}
