use std::collections::BTreeMap;

use crate::core::CellKey;
use crate::domain::{Cell, TextureEntry};

use super::SpreadSimulation;

pub(super) fn territory_at(sim: &SpreadSimulation, x: f32, y: f32) -> Option<&Cell> {
    sim.store.get(CellKey::from_world(x, y, sim.config.cell_size))
}

pub(super) fn texture_at(sim: &SpreadSimulation, x: f32, y: f32) -> Option<&TextureEntry> {
    sim.texture.get(CellKey::from_world(x, y, sim.config.cell_size))
}

pub(super) fn serialize_territory(sim: &SpreadSimulation) -> BTreeMap<String, Cell> {
    let mut snapshot = BTreeMap::new();
    sim.store.for_each(&mut |key, cell| {
        snapshot.insert(key.to_string(), cell.clone());
    });
    snapshot
}

/// Keys are validated before anything is touched, so a bad snapshot leaves
/// the current state intact.
pub(super) fn load_territory(sim: &mut SpreadSimulation, snapshot: BTreeMap<String, Cell>) -> Result<usize, String> {
    let cap = sim.config.volume_cap();
    let mut cells: Vec<(CellKey, Cell)> = Vec::with_capacity(snapshot.len());
    for (raw, mut cell) in snapshot {
        let key: CellKey = raw.parse()?;
        if cell.color.is_eraser() || !cell.volume.is_finite() {
            console_warn!("snapshot cell {} skipped: unusable color or volume", raw);
            continue;
        }
        cell.set_volume(cell.volume, cap);
        cell.source = if cell.source.is_finite() { cell.source.clamp(0.0, 1.0) } else { 0.0 };
        cell.pressure = if cell.pressure.is_finite() { cell.pressure.clamp(0.0, 1.0) } else { 0.0 };
        cells.push((key, cell));
    }
    cells.sort_unstable_by_key(|(key, _)| *key);

    sim.store.clear();
    sim.texture.clear();
    sim.effects.clear();

    let mut loaded = 0;
    for (key, cell) in cells {
        if sim.store.insert(key, cell) {
            loaded += 1;
        }
    }
    console_log!("territory loaded: {} cells", loaded);
    Ok(loaded)
}
