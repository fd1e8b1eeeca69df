//! Grid - cell storage behind one trait
//!
//! Two strategies share the `CellStore` interface:
//! - `SparseStore`: a single hash map, no spatial bound
//! - `ChunkedStore`: fixed-size chunks with ghost borders and capacity-bounded
//!   eviction (see `spatial::chunks`)
//!
//! Systems only ever see `&dyn CellStore` / `&mut dyn CellStore`, so the tick
//! behaves identically on either backend.

use crate::core::{CellKey, NEIGHBORS_4};
use crate::domain::Cell;
use crate::spatial::chunks::{ChunkStats, NeighborSample};

mod chunked;
mod sparse;

pub use chunked::ChunkedStore;
pub use sparse::SparseStore;

/// Storage contract every backend implements
pub trait CellStore: Send + Sync {
    fn get(&self, key: CellKey) -> Option<&Cell>;

    fn get_mut(&mut self, key: CellKey) -> Option<&mut Cell>;

    /// Store a cell, replacing any previous occupant.
    /// Returns false if the backend refused it (chunk capacity exhausted).
    fn insert(&mut self, key: CellKey, cell: Cell) -> bool;

    fn remove(&mut self, key: CellKey) -> Option<Cell>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn contains(&self, key: CellKey) -> bool {
        self.get(key).is_some()
    }

    /// All occupied keys in ascending (gx, gy) order
    fn sorted_keys(&self) -> Vec<CellKey>;

    /// Visit every cell. Order is unspecified.
    fn for_each(&self, f: &mut dyn FnMut(CellKey, &Cell));

    /// Visit cells with gx in [min.0, max.0] and gy in [min.1, max.1]
    fn cells_in_rect(&self, min: (i32, i32), max: (i32, i32), f: &mut dyn FnMut(CellKey, &Cell));

    fn clear(&mut self);

    /// N, S, W, E neighbors of `key`. Chunked storage answers from its ghost
    /// border, which is only current right after `sync_boundaries`.
    fn neighborhood(&self, key: CellKey) -> [Option<NeighborSample>; 4] {
        NEIGHBORS_4.map(|(dx, dy)| self.get(key.offset(dx, dy)).map(NeighborSample::of))
    }

    /// Bring any cached boundary data up to date before a read-only scan
    fn sync_boundaries(&mut self) {}

    /// Simulation time (seconds) used to stamp activity
    fn set_clock(&mut self, _now: f64) {}

    /// End-of-tick bookkeeping (summaries, unloads)
    fn end_tick(&mut self, _now: f64) {}

    fn chunk_stats(&self) -> Option<ChunkStats> {
        None
    }

    fn backend_name(&self) -> &'static str;
}
