use super::*;

impl ChunkManager {
    // === Allocation / eviction ===

    /// Fetch a chunk, allocating it on demand.
    ///
    /// At capacity the least-recently-active evictable chunk (settled AND empty)
    /// makes room. If every resident chunk still holds cells or unsettled flow
    /// the allocation is refused and `None` comes back.
    pub fn get_or_create_chunk(&mut self, coord: ChunkCoord, now: f64) -> Option<&mut Chunk> {
        if !self.chunks.contains_key(&coord) {
            if self.chunks.len() >= self.config.max_chunks {
                match self.eviction_candidate() {
                    Some(victim) => {
                        self.chunks.remove(&victim);
                        self.evictions += 1;
                    }
                    None => {
                        self.refused += 1;
                        console_warn!(
                            "chunk ({}, {}) refused: {} chunks resident, none evictable",
                            coord.cx,
                            coord.cy,
                            self.chunks.len()
                        );
                        return None;
                    }
                }
            }
            let size = self.config.chunk_size;
            self.chunks.insert(coord, Chunk::new(coord, size, now));
        }
        self.chunks.get_mut(&coord)
    }

    /// Least-recently-active chunk that is settled and holds no cells.
    /// Ties break on coordinate so the choice is reproducible.
    pub fn eviction_candidate(&self) -> Option<ChunkCoord> {
        self.chunks
            .values()
            .filter(|c| c.is_evictable())
            .min_by(|a, b| {
                a.last_active
                    .total_cmp(&b.last_active)
                    .then_with(|| a.coord.cmp(&b.coord))
            })
            .map(|c| c.coord)
    }

    /// Touch a chunk: refresh its activity time and cancel any pending unload.
    /// Returns false if the chunk is not resident.
    pub fn mark_active(&mut self, coord: ChunkCoord, now: f64) -> bool {
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.touch(now);
                true
            }
            None => false,
        }
    }

    /// Unload chunks that have been settled and empty for longer than the
    /// unload delay. Idempotent; safe to skip under pressure.
    pub fn schedule_cleanup(&mut self, now: f64) -> usize {
        let delay = self.config.unload_delay;
        let mut expired = Vec::new();

        for chunk in self.chunks.values_mut() {
            if chunk.is_evictable() {
                let since = *chunk.empty_since.get_or_insert(now);
                if now - since >= delay {
                    expired.push(chunk.coord);
                }
            } else {
                chunk.empty_since = None;
            }
        }

        expired.sort_unstable();
        for coord in expired.iter() {
            self.chunks.remove(coord);
        }
        if !expired.is_empty() {
            self.unloads += expired.len() as u64;
            console_log!("unloaded {} idle chunks ({} resident)", expired.len(), self.chunks.len());
        }
        expired.len()
    }
}

impl Chunk {
    #[inline]
    pub(crate) fn touch(&mut self, now: f64) {
        self.last_active = now;
        self.settled = false;
        self.empty_since = None;
    }

    /// Seconds this chunk has been pending unload, if it is
    pub fn idle_for(&self, now: f64) -> Option<f64> {
        self.empty_since.map(|since| now - since)
    }
}
