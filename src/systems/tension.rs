//! Surface tension - isolated ink drifts toward its blob
//!
//! A cell with fewer than two same-color neighbors looks for same-color ink
//! within `tension_radius`, takes the volume-weighted centroid and moves a
//! fraction of itself one step (diagonals allowed) toward it. This rounds
//! the diamond shapes 4-connected flow produces.

use super::SystemContext;
use crate::core::CellKey;
use crate::domain::{Cell, InkColor};

/// Centroid offsets shorter than this are treated as "already there"
const MIN_PULL: f32 = 0.5;

/// One pass in key order. Returns the number of cells that moved ink.
pub fn apply_surface_tension(ctx: &mut SystemContext) -> usize {
    let cfg = ctx.config;
    let cap = cfg.volume_cap();
    let mut moved = 0;

    for key in ctx.store.sorted_keys() {
        let Some(cell) = ctx.store.get(key) else { continue };
        if cell.volume < cfg.tension_min_volume {
            continue;
        }
        let color = cell.color;
        let volume = cell.volume;

        let same_neighbors = key
            .neighbors()
            .iter()
            .filter(|n| ctx.store.get(**n).map_or(false, |c| c.color == color))
            .count();
        if same_neighbors >= 2 {
            continue;
        }

        let Some((dx, dy)) = blob_step(ctx, key, color, cfg.tension_radius) else { continue };
        let target = key.offset(dx, dy);
        let amount = volume * cfg.tension_fraction;

        let credited = match ctx.store.get_mut(target) {
            Some(dest) if dest.color != color => continue,
            Some(dest) => {
                let room = (cap - dest.volume).max(0.0);
                let credited = amount.min(room);
                dest.set_volume(dest.volume + credited, cap);
                dest.settled = false;
                credited
            }
            None => {
                let (owner_id, intent) = match ctx.store.get(key) {
                    Some(c) => (c.owner_id.clone(), c.intent),
                    None => continue,
                };
                let mut fresh = Cell::new(color, 0.0, owner_id, intent);
                fresh.set_volume(amount, cap);
                let credited = fresh.volume;
                if !ctx.store.insert(target, fresh) {
                    continue;
                }
                ctx.counters.cells_created += 1;
                credited
            }
        };

        if credited > 0.0 {
            if let Some(origin) = ctx.store.get_mut(key) {
                origin.set_volume(origin.volume - credited, cap);
                origin.settled = false;
            }
            moved += 1;
        }
    }
    moved
}

/// Unit step toward the volume-weighted centroid of same-color cells within
/// `radius` (circular, excluding the cell itself)
fn blob_step(ctx: &SystemContext, key: CellKey, color: InkColor, radius: i32) -> Option<(i32, i32)> {
    let r2 = radius * radius;
    let (mut wx, mut wy, mut total) = (0.0f32, 0.0f32, 0.0f32);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if (dx == 0 && dy == 0) || dx * dx + dy * dy > r2 {
                continue;
            }
            if let Some(other) = ctx.store.get(key.offset(dx, dy)) {
                if other.color == color {
                    wx += dx as f32 * other.volume;
                    wy += dy as f32 * other.volume;
                    total += other.volume;
                }
            }
        }
    }
    if total <= 0.0 {
        return None;
    }

    let (cx, cy) = (wx / total, wy / total);
    let dist = (cx * cx + cy * cy).sqrt();
    if dist < MIN_PULL {
        return None;
    }
    let step = ((cx / dist).round() as i32, (cy / dist).round() as i32);
    (step != (0, 0)).then_some(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CombatEffect, SimConfig, StrokeIntent};
    use crate::spatial::{CellStore, SparseStore};
    use crate::systems::{PaperTexture, TickCounters};

    fn run(cells: &[(i32, i32, u32, f32)]) -> (SparseStore, usize) {
        let mut store = SparseStore::new();
        for &(gx, gy, color, volume) in cells {
            store.insert(
                CellKey::new(gx, gy),
                Cell::new(InkColor(color), volume, None, StrokeIntent::Territory),
            );
        }
        let mut texture = PaperTexture::new();
        let mut effects: Vec<CombatEffect> = Vec::new();
        let config = SimConfig::default();
        let mut counters = TickCounters::default();
        let moved = {
            let mut ctx = SystemContext {
                store: &mut store,
                texture: &mut texture,
                effects: &mut effects,
                config: &config,
                counters: &mut counters,
            };
            apply_surface_tension(&mut ctx)
        };
        (store, moved)
    }

    #[test]
    fn droplet_moves_toward_nearby_blob() {
        // Droplet at origin, blob two cells east
        let (store, moved) = run(&[(0, 0, 1, 1.0), (2, 0, 1, 1.0), (3, 0, 1, 1.0), (2, 1, 1, 1.0)]);
        assert!(moved >= 1);
        let bridge = store.get(CellKey::new(1, 0)).unwrap();
        assert_eq!(bridge.color, InkColor(1));
        assert!((bridge.volume - 0.1).abs() < 1e-6);
        assert!((store.get(CellKey::new(0, 0)).unwrap().volume - 0.9).abs() < 1e-6);
    }

    #[test]
    fn step_into_foreign_color_is_skipped() {
        let (store, _) = run(&[(0, 0, 1, 1.0), (1, 0, 2, 1.0), (2, 0, 1, 1.0), (3, 0, 1, 1.0)]);
        assert_eq!(store.get(CellKey::new(1, 0)).unwrap().color, InkColor(2));
        assert_eq!(store.get(CellKey::new(1, 0)).unwrap().volume, 1.0);
        assert_eq!(store.get(CellKey::new(0, 0)).unwrap().volume, 1.0);
    }

    #[test]
    fn well_connected_or_thin_cells_are_left_alone() {
        // Cross: the center has four same-color neighbors and never gives
        // ink away; the arms lean back into it
        let cross = [(0, 0, 1, 1.0), (1, 0, 1, 1.0), (-1, 0, 1, 1.0), (0, 1, 1, 1.0), (0, -1, 1, 1.0)];
        let (store, _) = run(&cross);
        assert_eq!(store.len(), 5);
        assert!(store.get(CellKey::new(0, 0)).unwrap().volume > 1.0);
        assert!(store.get(CellKey::new(1, 0)).unwrap().volume < 1.0);

        // Below the minimum volume nothing moves
        let (store, moved) = run(&[(0, 0, 1, 0.05), (2, 0, 1, 0.05)]);
        assert_eq!(moved, 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lone_cell_without_company_stays() {
        let (store, moved) = run(&[(0, 0, 1, 1.0), (10, 0, 1, 1.0)]);
        assert_eq!(moved, 0);
        assert_eq!(store.len(), 2);
    }
}
