use super::*;

impl ChunkManager {
    // === Ghost border ===

    /// Mirror every chunk's facing neighbor edges into its ghost border.
    /// Missing neighbors read as empty.
    pub fn refresh_ghosts(&mut self) {
        let size = self.config.chunk_size as usize;
        let last = self.config.chunk_size - 1;

        for coord in self.coords() {
            let mut ghost = vec![None; 4 * size];
            let [north, south, west, east] = self.neighbor_chunks(coord);

            for i in 0..size {
                let l = i as u32;
                // North neighbor's bottom row, south neighbor's top row
                ghost[i] = north.and_then(|c| c.cell(l, last)).map(NeighborSample::of);
                ghost[size + i] = south.and_then(|c| c.cell(l, 0)).map(NeighborSample::of);
                // West neighbor's right column, east neighbor's left column
                ghost[2 * size + i] = west.and_then(|c| c.cell(last, l)).map(NeighborSample::of);
                ghost[3 * size + i] = east.and_then(|c| c.cell(0, l)).map(NeighborSample::of);
            }

            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.ghost = ghost;
            }
        }
    }
}
