use crate::domain::{Backend, SimConfig};
use crate::spatial::{CellStore, ChunkedStore, SparseStore};
use crate::systems::{PaperTexture, TickCounters};

use super::perf_stats::PerfStats;
use super::RenderBuffers;
use super::SpreadSimulation;

pub(super) fn create_store(backend: &Backend) -> Box<dyn CellStore> {
    match backend {
        Backend::Sparse => Box::new(SparseStore::new()),
        Backend::Chunked(chunks) => Box::new(ChunkedStore::new(chunks.clone())),
    }
}

pub(super) fn create_simulation(config: SimConfig) -> SpreadSimulation {
    let store = create_store(&config.backend);
    SpreadSimulation {
        store,
        config,
        texture: PaperTexture::new(),
        effects: Vec::new(),
        clock: 0.0,
        frame: 0,
        counters: TickCounters::default(),
        render: RenderBuffers {
            cells: Vec::with_capacity(4 * 1024),
            colors: Vec::with_capacity(1024),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
