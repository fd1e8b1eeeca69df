use super::*;
use crate::domain::ChunkConfig;
use crate::spatial::chunks::ChunkManager;

/// Chunk-partitioned storage. Every write stamps its chunk active; chunks
/// that stay settled and empty are unloaded at the end of a tick.
pub struct ChunkedStore {
    chunks: ChunkManager,
    now: f64,
}

impl ChunkedStore {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            chunks: ChunkManager::new(config),
            now: 0.0,
        }
    }

    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }
}

impl CellStore for ChunkedStore {
    #[inline]
    fn get(&self, key: CellKey) -> Option<&Cell> {
        let (coord, lx, ly) = self.chunks.locate(key);
        self.chunks.get(coord)?.cell(lx, ly)
    }

    fn get_mut(&mut self, key: CellKey) -> Option<&mut Cell> {
        let (coord, lx, ly) = self.chunks.locate(key);
        self.chunks.get(coord)?.cell(lx, ly)?;
        self.chunks.mark_active(coord, self.now);
        self.chunks.get_mut(coord)?.cell_mut(lx, ly)
    }

    fn insert(&mut self, key: CellKey, cell: Cell) -> bool {
        let (coord, lx, ly) = self.chunks.locate(key);
        let Some(chunk) = self.chunks.get_or_create_chunk(coord, self.now) else {
            console_warn!("cell {} dropped: no chunk available", key);
            return false;
        };
        chunk.put(lx, ly, cell);
        self.chunks.mark_active(coord, self.now)
    }

    fn remove(&mut self, key: CellKey) -> Option<Cell> {
        let (coord, lx, ly) = self.chunks.locate(key);
        let removed = self.chunks.get_mut(coord)?.take(lx, ly);
        if removed.is_some() {
            self.chunks.mark_active(coord, self.now);
        }
        removed
    }

    fn len(&self) -> usize {
        self.chunks.cell_count()
    }

    fn sorted_keys(&self) -> Vec<CellKey> {
        let mut keys = Vec::with_capacity(self.len());
        self.for_each(&mut |key, _| keys.push(key));
        keys.sort_unstable();
        keys
    }

    fn for_each(&self, f: &mut dyn FnMut(CellKey, &Cell)) {
        for coord in self.chunks.coords() {
            let Some(chunk) = self.chunks.get(coord) else { continue };
            let (ox, oy) = self.chunks.chunk_origin(coord);
            for (lx, ly, cell) in chunk.cells() {
                f(CellKey::new(ox + lx as i32, oy + ly as i32), cell);
            }
        }
    }

    fn cells_in_rect(&self, min: (i32, i32), max: (i32, i32), f: &mut dyn FnMut(CellKey, &Cell)) {
        for coord in self.chunks.chunks_in_grid_rect(min, max) {
            let Some(chunk) = self.chunks.get(coord) else { continue };
            let (ox, oy) = self.chunks.chunk_origin(coord);
            for (lx, ly, cell) in chunk.cells() {
                let (gx, gy) = (ox + lx as i32, oy + ly as i32);
                if gx >= min.0 && gx <= max.0 && gy >= min.1 && gy <= max.1 {
                    f(CellKey::new(gx, gy), cell);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.chunks.clear();
    }

    fn neighborhood(&self, key: CellKey) -> [Option<NeighborSample>; 4] {
        let (coord, lx, ly) = self.chunks.locate(key);
        match self.chunks.get(coord) {
            Some(chunk) => {
                let (lx, ly) = (lx as i32, ly as i32);
                NEIGHBORS_4.map(|(dx, dy)| chunk.sample(lx + dx, ly + dy))
            }
            None => NEIGHBORS_4.map(|(dx, dy)| self.get(key.offset(dx, dy)).map(NeighborSample::of)),
        }
    }

    fn sync_boundaries(&mut self) {
        self.chunks.refresh_ghosts();
    }

    fn set_clock(&mut self, now: f64) {
        self.now = now;
    }

    fn end_tick(&mut self, now: f64) {
        self.now = now;
        self.chunks.refresh_summaries();
        self.chunks.schedule_cleanup(now);
    }

    fn chunk_stats(&self) -> Option<ChunkStats> {
        Some(self.chunks.stats())
    }

    fn backend_name(&self) -> &'static str {
        "chunked"
    }
}
