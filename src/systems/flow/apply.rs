use super::{FlowPlan, SystemContext};
use crate::domain::Cell;

/// Apply plans in order. A destination that changed color since planning, or
/// that storage refuses, keeps its volume with the origin.
pub(super) fn apply_plans(ctx: &mut SystemContext, plans: &[FlowPlan]) -> usize {
    let cap = ctx.config.volume_cap();
    let mut applied = 0;

    for plan in plans {
        let Some(origin) = ctx.store.get(plan.key) else { continue };
        let color = origin.color;
        let pressure_changed = origin.pressure != plan.pressure;
        let intent = origin.intent;
        let owner_id = if plan.transfers.is_empty() { None } else { origin.owner_id.clone() };

        if pressure_changed {
            if let Some(cell) = ctx.store.get_mut(plan.key) {
                cell.pressure = plan.pressure;
            }
        }

        let mut drained = 0.0f32;
        for &(target, amount) in &plan.transfers {
            let credited = match ctx.store.get_mut(target) {
                Some(dest) if dest.color == color => {
                    let moved = amount.min((cap - dest.volume).max(0.0));
                    dest.set_volume(dest.volume + moved, cap);
                    dest.settled = false;
                    moved
                }
                Some(_) => 0.0,
                None => {
                    let mut cell = Cell::new(color, 0.0, owner_id.clone(), intent);
                    cell.set_volume(amount, cap);
                    let moved = cell.volume;
                    if ctx.store.insert(target, cell) {
                        ctx.counters.cells_created += 1;
                        moved
                    } else {
                        0.0
                    }
                }
            };
            if credited > 0.0 {
                drained += credited;
                applied += 1;
            }
        }

        if drained > 0.0 {
            if let Some(cell) = ctx.store.get_mut(plan.key) {
                cell.set_volume(cell.volume - drained, cap);
                cell.settled = false;
            }
        }
    }
    applied
}
