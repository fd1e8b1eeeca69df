//! Grid keys - packed integer coordinates for the sparse territory grid
//!
//! Cells live at integer grid coordinates (gx, gy). Instead of building
//! "gx,gy" strings in the hot flow loop we pack both halves into one u64.
//! The string form only exists at the snapshot boundary.

use std::fmt;
use std::str::FromStr;

/// 4-connected neighbor offsets: north, south, west, east
pub const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Packed (gx, gy) grid coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u64);

impl CellKey {
    #[inline]
    pub fn new(gx: i32, gy: i32) -> Self {
        // Bias by i32::MIN so the packed ordering matches (gx, gy) ordering.
        let hi = (gx as u32 ^ 0x8000_0000) as u64;
        let lo = (gy as u32 ^ 0x8000_0000) as u64;
        CellKey((hi << 32) | lo)
    }

    /// Grid key containing world position (x, y)
    #[inline]
    pub fn from_world(x: f32, y: f32, cell_size: f32) -> Self {
        Self::new((x / cell_size).floor() as i32, (y / cell_size).floor() as i32)
    }

    #[inline]
    pub fn gx(self) -> i32 {
        ((self.0 >> 32) as u32 ^ 0x8000_0000) as i32
    }

    #[inline]
    pub fn gy(self) -> i32 {
        (self.0 as u32 ^ 0x8000_0000) as i32
    }

    #[inline]
    pub fn coords(self) -> (i32, i32) {
        (self.gx(), self.gy())
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.gx().wrapping_add(dx), self.gy().wrapping_add(dy))
    }

    /// World-space center of this cell
    #[inline]
    pub fn center(self, cell_size: f32) -> (f32, f32) {
        (
            (self.gx() as f32 + 0.5) * cell_size,
            (self.gy() as f32 + 0.5) * cell_size,
        )
    }

    /// The four edge-adjacent keys (N, S, W, E)
    #[inline]
    pub fn neighbors(self) -> [CellKey; 4] {
        NEIGHBORS_4.map(|(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.gx(), self.gy())
    }
}

impl FromStr for CellKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("malformed cell key {:?}: expected \"gx,gy\"", s))?;
        let gx = x
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("malformed cell key {:?}: {}", s, e))?;
        let gy = y
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("malformed cell key {:?}: {}", s, e))?;
        Ok(CellKey::new(gx, gy))
    }
}
