//! Spatial storage - where cells live between ticks

pub mod chunks;
pub mod grid;

pub use chunks::{ChunkCoord, ChunkManager, ChunkStats, Viewport};
pub use grid::{CellStore, ChunkedStore, SparseStore};
