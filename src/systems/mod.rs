//! Systems - the per-tick passes and the deposit resolver
//!
//! Every pass receives a `SystemContext` borrowing the simulation's state, so
//! the same code runs against any `CellStore` backend.

pub mod cleanup;
pub mod combat;
pub mod flow;
pub mod intent;
pub mod tension;
pub mod texture;

pub use cleanup::cleanup_empty_cells;
pub use combat::{add_ink_volume, Deposit, DepositOutcome};
pub use flow::simulate_flow;
pub use intent::{classify_stroke, Classification, SpreadParams, StrokeMetrics};
pub use tension::apply_surface_tension;
pub use texture::PaperTexture;

use crate::domain::{CombatEffect, SimConfig};
use crate::spatial::CellStore;

/// Work counters gathered during one tick (reset by the caller)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickCounters {
    pub cells_scanned: u32,
    pub transfers: u32,
    pub combats: u32,
    pub cells_created: u32,
    pub cells_removed: u32,
}

/// Mutable view of the simulation state handed to each system
pub struct SystemContext<'a> {
    pub store: &'a mut dyn CellStore,
    pub texture: &'a mut PaperTexture,
    pub effects: &'a mut Vec<CombatEffect>,
    pub config: &'a SimConfig,
    pub counters: &'a mut TickCounters,
}
