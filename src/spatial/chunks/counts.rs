use super::*;

impl Chunk {
    // === Cell count tracking ===

    /// Store a cell, returning whatever was there before
    pub(crate) fn put(&mut self, lx: u32, ly: u32, cell: Cell) -> Option<Cell> {
        let idx = self.local_index(lx, ly);
        let prev = self.cells[idx].replace(cell);
        if prev.is_none() {
            self.cell_count += 1;
        }
        prev
    }

    pub(crate) fn take(&mut self, lx: u32, ly: u32) -> Option<Cell> {
        let idx = self.local_index(lx, ly);
        let prev = self.cells[idx].take();
        if prev.is_some() {
            self.cell_count = self.cell_count.saturating_sub(1);
        }
        prev
    }

    /// Recompute volume and the aggregated settled flag from the cells.
    /// An empty chunk counts as settled.
    pub fn refresh_summary(&mut self) {
        let mut count = 0u32;
        let mut volume = 0.0f32;
        let mut settled = true;
        for cell in self.cells.iter().flatten() {
            count += 1;
            volume += cell.volume;
            settled &= cell.settled && !cell.has_source();
        }
        self.cell_count = count;
        self.total_volume = volume;
        self.settled = settled;
    }
}

impl ChunkManager {
    /// Refresh every chunk's summary (end of tick)
    pub fn refresh_summaries(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.refresh_summary();
        }
    }

    /// Total cells across resident chunks
    pub fn cell_count(&self) -> usize {
        self.chunks.values().map(|c| c.cell_count as usize).sum()
    }
}
