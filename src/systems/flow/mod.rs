//! Flow - volume equalizes toward open neighbors
//!
//! Three phases per tick:
//! 1. sources feed their own cell (serial)
//! 2. every eligible cell plans its outflow against a frozen view (parallel
//!    with the `parallel` feature)
//! 3. plans are applied serially in key order
//!
//! Planning never mutates, so no cell sees a half-applied neighbor and the
//! result does not depend on thread scheduling.

mod apply;
mod scan;

use super::SystemContext;
use crate::core::CellKey;

/// Planned outflow of one cell
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FlowPlan {
    pub key: CellKey,
    pub pressure: f32,
    /// (destination, amount), at most one per open neighbor
    pub transfers: Vec<(CellKey, f32)>,
}

/// One flow step. Returns the number of transfers applied.
pub fn simulate_flow(ctx: &mut SystemContext, dt: f32) -> usize {
    let keys = ctx.store.sorted_keys();
    if keys.is_empty() {
        return 0;
    }
    let before: Vec<f32> = keys
        .iter()
        .map(|k| ctx.store.get(*k).map_or(0.0, |c| c.volume))
        .collect();

    absorb_sources(ctx, &keys, dt);

    ctx.store.sync_boundaries();
    let plans = scan::plan_all(&*ctx.store, &keys, ctx.config, dt);
    ctx.counters.cells_scanned += plans.len() as u32;

    let applied = apply::apply_plans(ctx, &plans);
    ctx.counters.transfers += applied as u32;

    mark_settled(ctx, &keys, &before);
    applied
}

/// Active sources pour into their own cell and burn down
fn absorb_sources(ctx: &mut SystemContext, keys: &[CellKey], dt: f32) {
    let cfg = ctx.config;
    let cap = cfg.volume_cap();
    for key in keys {
        let sourced = ctx.store.get(*key).map_or(false, |c| c.has_source());
        if !sourced {
            continue;
        }
        if let Some(cell) = ctx.store.get_mut(*key) {
            cell.set_volume(cell.volume + cell.source * cfg.source_strength * dt, cap);
            cell.source = (cell.source - cfg.source_decay * dt).max(0.0);
        }
    }
}

/// Settled = barely changed this tick and no source left
fn mark_settled(ctx: &mut SystemContext, keys: &[CellKey], before: &[f32]) {
    let threshold = ctx.config.settle_threshold;
    for (key, prev) in keys.iter().zip(before) {
        let Some(cell) = ctx.store.get(*key) else { continue };
        let settled = (cell.volume - prev).abs() < threshold && !cell.has_source();
        if settled != cell.settled {
            if let Some(cell) = ctx.store.get_mut(*key) {
                cell.settled = settled;
            }
        }
    }
}
