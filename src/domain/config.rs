//! Simulation tuning
//!
//! Every constant the tick uses lives here so a host can ship one JSON
//! blob instead of recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

// Upper bounds for the integer extents the tick squares
const MAX_TENSION_RADIUS: i32 = 64;
const MAX_BRUSH_RADIUS: i32 = 64;
const MAX_CHUNK_SIZE: u32 = 4096;

/// Storage strategy selected at construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// One hash map over the whole world
    Sparse,
    /// Fixed-size chunks with capacity-bounded eviction
    Chunked(ChunkConfig),
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Sparse
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkConfig {
    /// Chunk edge length in cells
    pub chunk_size: u32,
    /// Maximum chunks resident at once
    pub max_chunks: usize,
    /// Seconds a chunk must stay settled and empty before it is unloaded
    pub unload_delay: f64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 32,
            max_chunks: 256,
            unload_delay: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// World units per grid cell
    pub cell_size: f32,
    pub max_volume: f32,
    /// Same-color deposits may overfill up to max_volume * (1 + compression)
    pub compression: f32,
    /// Cells below this are reclaimed by cleanup
    pub min_volume: f32,

    // Sources
    pub source_strength: f32,
    /// Source lost per second
    pub source_decay: f32,

    // Flow
    pub flow_rate: f32,
    /// Share of a volume difference that may move per tick
    pub flow_fraction: f32,
    /// Minimum volume difference before anything flows
    pub surface_tension: f32,
    pub settle_threshold: f32,
    pub pressure_gain: f32,
    pub pressure_decay: f32,

    // Blob attraction
    pub tension_radius: i32,
    pub tension_min_volume: f32,
    pub tension_fraction: f32,

    // Paper texture
    /// Per-tick multiplier
    pub texture_decay: f32,
    pub texture_floor: f32,
    pub max_texture: f32,

    // Combat
    pub combat_ratio: f32,
    pub steal_fraction: f32,
    /// Seconds a combat effect stays visible
    pub effect_lifetime: f32,

    /// Widest falloff brush, in cells
    pub max_brush_radius: i32,

    pub backend: Backend,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 4.0,
            max_volume: 1.0,
            compression: 0.5,
            min_volume: 0.01,
            source_strength: 0.5,
            source_decay: 0.5,
            flow_rate: 2.0,
            flow_fraction: 0.3,
            surface_tension: 0.05,
            settle_threshold: 0.001,
            pressure_gain: 0.1,
            pressure_decay: 0.95,
            tension_radius: 3,
            tension_min_volume: 0.1,
            tension_fraction: 0.1,
            texture_decay: 0.995,
            texture_floor: 0.01,
            max_texture: 1.0,
            combat_ratio: 1.15,
            steal_fraction: 0.3,
            effect_lifetime: 1.0,
            max_brush_radius: 16,
            backend: Backend::Sparse,
        }
    }
}

impl SimConfig {
    pub fn chunked() -> Self {
        Self {
            backend: Backend::Chunked(ChunkConfig::default()),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: SimConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Hard cap for a single cell's volume
    #[inline]
    pub fn volume_cap(&self) -> f32 {
        self.max_volume * (1.0 + self.compression)
    }

    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("cellSize", self.cell_size),
            ("maxVolume", self.max_volume),
            ("minVolume", self.min_volume),
            ("flowRate", self.flow_rate),
            ("maxTexture", self.max_texture),
            ("combatRatio", self.combat_ratio),
            ("effectLifetime", self.effect_lifetime),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        if self.compression < 0.0 {
            return Err(format!("compression must be >= 0, got {}", self.compression));
        }
        if self.min_volume >= self.max_volume {
            return Err(format!(
                "minVolume ({}) must be below maxVolume ({})",
                self.min_volume, self.max_volume
            ));
        }
        let unit = [
            ("flowFraction", self.flow_fraction),
            ("pressureDecay", self.pressure_decay),
            ("tensionFraction", self.tension_fraction),
            ("textureDecay", self.texture_decay),
            ("stealFraction", self.steal_fraction),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if !(1..=MAX_TENSION_RADIUS).contains(&self.tension_radius) {
            return Err(format!(
                "tensionRadius must be within [1, {}], got {}",
                MAX_TENSION_RADIUS, self.tension_radius
            ));
        }
        if !(0..=MAX_BRUSH_RADIUS).contains(&self.max_brush_radius) {
            return Err(format!(
                "maxBrushRadius must be within [0, {}], got {}",
                MAX_BRUSH_RADIUS, self.max_brush_radius
            ));
        }
        if let Backend::Chunked(chunks) = &self.backend {
            if chunks.chunk_size == 0 || chunks.max_chunks == 0 {
                return Err("chunked backend needs chunkSize > 0 and maxChunks > 0".to_string());
            }
            if chunks.chunk_size > MAX_CHUNK_SIZE {
                return Err(format!(
                    "chunkSize must be at most {}, got {}",
                    MAX_CHUNK_SIZE, chunks.chunk_size
                ));
            }
        }
        Ok(())
    }
}
