use crate::core::CellKey;
use crate::spatial::Viewport;

use super::SpreadSimulation;

pub(super) fn extract_visible(sim: &mut SpreadSimulation, viewport: &Viewport) -> usize {
    let (min, max) = viewport.grid_bounds(sim.config.cell_size);

    let mut visible: Vec<(CellKey, f32, u32)> = Vec::new();
    sim.store.cells_in_rect(min, max, &mut |key, cell| {
        visible.push((key, cell.volume, cell.color.0));
    });
    visible.sort_unstable_by_key(|(key, _, _)| *key);

    let render = &mut sim.render;
    render.cells.clear();
    render.colors.clear();
    render.cells.reserve(visible.len() * 4);
    render.colors.reserve(visible.len());

    for (key, volume, color) in visible.iter() {
        let contested = sim.texture.get(*key).map_or(0.0, |t| t.contested);
        let (gx, gy) = key.coords();
        render.cells.extend_from_slice(&[gx as f32, gy as f32, *volume, contested]);
        render.colors.push(*color);
    }
    visible.len()
}
