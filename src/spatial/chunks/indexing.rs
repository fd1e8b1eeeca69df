use super::*;
use crate::core::CellKey;

impl ChunkManager {
    // === Coordinate mapping ===

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.config.chunk_size as i32
    }

    /// Chunk containing grid cell (gx, gy). Floor division, so -1 maps to chunk -1.
    #[inline]
    pub fn world_to_chunk(&self, gx: i32, gy: i32) -> ChunkCoord {
        let size = self.chunk_size();
        ChunkCoord::new(gx.div_euclid(size), gy.div_euclid(size))
    }

    /// Position of grid cell (gx, gy) inside its chunk
    #[inline]
    pub fn world_to_local(&self, gx: i32, gy: i32) -> (u32, u32) {
        let size = self.chunk_size();
        (gx.rem_euclid(size) as u32, gy.rem_euclid(size) as u32)
    }

    #[inline]
    pub fn locate(&self, key: CellKey) -> (ChunkCoord, u32, u32) {
        let (gx, gy) = key.coords();
        let (lx, ly) = self.world_to_local(gx, gy);
        (self.world_to_chunk(gx, gy), lx, ly)
    }

    /// Grid coordinate of a chunk's (0, 0) cell
    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> (i32, i32) {
        let size = self.chunk_size();
        (coord.cx * size, coord.cy * size)
    }
}

impl Chunk {
    #[inline]
    pub(super) fn local_index(&self, lx: u32, ly: u32) -> usize {
        debug_assert!(
            lx < self.size && ly < self.size,
            "local_index: out of bounds ({}, {}) for chunk of size {}",
            lx,
            ly,
            self.size
        );
        (ly * self.size + lx) as usize
    }

    #[inline]
    pub fn cell(&self, lx: u32, ly: u32) -> Option<&Cell> {
        self.cells[self.local_index(lx, ly)].as_ref()
    }

    #[inline]
    pub fn cell_mut(&mut self, lx: u32, ly: u32) -> Option<&mut Cell> {
        let idx = self.local_index(lx, ly);
        self.cells[idx].as_mut()
    }

    /// Read (lx, ly) where either axis may sit one cell outside the chunk.
    /// Off-chunk reads come from the ghost border; corners are never sampled.
    #[inline]
    pub fn sample(&self, lx: i32, ly: i32) -> Option<NeighborSample> {
        let size = self.size as i32;
        let inside_x = (0..size).contains(&lx);
        let inside_y = (0..size).contains(&ly);
        let ghost_idx = match (inside_x, inside_y) {
            (true, true) => {
                return self.cell(lx as u32, ly as u32).map(NeighborSample::of);
            }
            (true, false) if ly == -1 => lx,
            (true, false) if ly == size => size + lx,
            (false, true) if lx == -1 => 2 * size + ly,
            (false, true) if lx == size => 3 * size + ly,
            _ => return None,
        };
        self.ghost[ghost_idx as usize]
    }

    /// Occupied cells as (lx, ly, cell), row-major
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, c)| c.as_ref().map(|cell| (idx as u32 % size, idx as u32 / size, cell)))
    }
}
