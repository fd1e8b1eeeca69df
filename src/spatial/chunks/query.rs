use super::*;

/// World-space rectangle, inclusive on both ends
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Viewport {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Inclusive grid-cell range covered by this viewport
    pub fn grid_bounds(&self, cell_size: f32) -> ((i32, i32), (i32, i32)) {
        (
            ((self.min_x / cell_size).floor() as i32, (self.min_y / cell_size).floor() as i32),
            ((self.max_x / cell_size).floor() as i32, (self.max_y / cell_size).floor() as i32),
        )
    }
}

impl ChunkManager {
    // === Spatial queries ===

    /// Resident N, S, W, E neighbors of a chunk
    pub fn neighbor_chunks(&self, coord: ChunkCoord) -> [Option<&Chunk>; 4] {
        coord.neighbors().map(|n| self.chunks.get(&n))
    }

    /// Resident chunks overlapping the viewport, in ascending order
    pub fn visible_chunks(&self, viewport: &Viewport, cell_size: f32) -> Vec<ChunkCoord> {
        let (min, max) = viewport.grid_bounds(cell_size);
        self.chunks_in_grid_rect(min, max)
    }

    /// Resident chunks overlapping an inclusive grid-cell range
    pub fn chunks_in_grid_rect(&self, min: (i32, i32), max: (i32, i32)) -> Vec<ChunkCoord> {
        if min.0 > max.0 || min.1 > max.1 {
            return Vec::new();
        }
        let lo = self.world_to_chunk(min.0, min.1);
        let hi = self.world_to_chunk(max.0, max.1);

        let span = ((hi.cx - lo.cx + 1) as i64) * ((hi.cy - lo.cy + 1) as i64);
        let mut visible: Vec<ChunkCoord> = if span <= self.chunks.len() as i64 {
            // Small viewport: probe the covered range directly
            let mut out = Vec::new();
            for cy in lo.cy..=hi.cy {
                for cx in lo.cx..=hi.cx {
                    let coord = ChunkCoord::new(cx, cy);
                    if self.chunks.contains_key(&coord) {
                        out.push(coord);
                    }
                }
            }
            out
        } else {
            self.chunks
                .keys()
                .filter(|c| c.cx >= lo.cx && c.cx <= hi.cx && c.cy >= lo.cy && c.cy <= hi.cy)
                .copied()
                .collect()
        };
        visible.sort_unstable();
        visible
    }
}
