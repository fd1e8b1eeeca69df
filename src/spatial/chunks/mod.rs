//! Chunk System - fixed-size chunks partitioning the unbounded territory grid
//!
//! Each chunk owns a `size x size` block of cells plus a 1-cell ghost border
//! mirroring the facing edges of its four neighbors, so the flow scan never
//! has to leave the chunk to read a neighbor. Chunks are allocated on demand
//! and evicted/unloaded only once settled and empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Cell, ChunkConfig, InkColor};

mod counts;
mod ghosts;
mod indexing;
mod lifecycle;
mod query;

pub use query::Viewport;

/// Chunk position in chunk units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// N, S, W, E neighbors
    pub fn neighbors(self) -> [ChunkCoord; 4] {
        [
            ChunkCoord::new(self.cx, self.cy - 1),
            ChunkCoord::new(self.cx, self.cy + 1),
            ChunkCoord::new(self.cx - 1, self.cy),
            ChunkCoord::new(self.cx + 1, self.cy),
        ]
    }
}

/// What the flow scan needs to know about a neighboring cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborSample {
    pub color: InkColor,
    pub volume: f32,
}

impl NeighborSample {
    #[inline]
    pub fn of(cell: &Cell) -> Self {
        Self { color: cell.color, volume: cell.volume }
    }
}

/// One resident chunk
pub struct Chunk {
    coord: ChunkCoord,
    size: u32,
    cells: Vec<Option<Cell>>,
    // Border layout: north row, south row, west column, east column.
    ghost: Vec<Option<NeighborSample>>,

    cell_count: u32,
    total_volume: f32,
    settled: bool,
    last_active: f64,
    /// Set while settled and empty; cleared by any activity
    empty_since: Option<f64>,
}

impl Chunk {
    fn new(coord: ChunkCoord, size: u32, now: f64) -> Self {
        let area = (size * size) as usize;
        Self {
            coord,
            size,
            cells: vec![None; area],
            ghost: vec![None; 4 * size as usize],
            cell_count: 0,
            total_volume: 0.0,
            settled: false,
            last_active: now,
            empty_since: None,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord { self.coord }

    #[inline]
    pub fn size(&self) -> u32 { self.size }

    #[inline]
    pub fn cell_count(&self) -> u32 { self.cell_count }

    #[inline]
    pub fn total_volume(&self) -> f32 { self.total_volume }

    #[inline]
    pub fn is_settled(&self) -> bool { self.settled }

    #[inline]
    pub fn last_active(&self) -> f64 { self.last_active }

    /// Settled with nothing left in it: the only state eviction may touch
    #[inline]
    pub fn is_evictable(&self) -> bool {
        self.settled && self.cell_count == 0
    }
}

/// Chunk lifecycle counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStats {
    pub loaded: usize,
    pub settled: usize,
    pub evictions: u64,
    pub unloads: u64,
    /// Allocations turned away at capacity
    pub refused: u64,
}

/// Manages chunk-based spatial partitioning
pub struct ChunkManager {
    config: ChunkConfig,
    chunks: HashMap<ChunkCoord, Chunk>,
    evictions: u64,
    unloads: u64,
    refused: u64,
}

impl ChunkManager {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            chunks: HashMap::with_capacity(config.max_chunks),
            config,
            evictions: 0,
            unloads: 0,
            refused: 0,
        }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Resident chunk coordinates in ascending order
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    pub fn stats(&self) -> ChunkStats {
        ChunkStats {
            loaded: self.chunks.len(),
            settled: self.chunks.values().filter(|c| c.settled).count(),
            evictions: self.evictions,
            unloads: self.unloads,
            refused: self.refused,
        }
    }
}

#[cfg(test)]
mod tests;
