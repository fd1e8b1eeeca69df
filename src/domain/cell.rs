//! Cell, paper texture and combat event records

use serde::{Deserialize, Serialize};

/// Ink color identifier (packed RGBA). `InkColor::ERASER` is reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InkColor(pub u32);

impl InkColor {
    /// Sentinel carried by eraser strokes. Never owns a cell.
    pub const ERASER: InkColor = InkColor(0);

    #[inline]
    pub fn is_eraser(self) -> bool {
        self == Self::ERASER
    }
}

/// What the depositing stroke was trying to do
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrokeIntent {
    #[default]
    Territory,
    Wall,
    Attack,
}

/// One grid cell of ink. Fixed schema: every field has an explicit default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub color: InkColor,
    pub volume: f32,
    /// Combat power, tracked equal to volume
    pub strength: f32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub intent: StrokeIntent,
    #[serde(default)]
    pub settled: bool,
    /// Residual generator power from a fresh deposit
    #[serde(default)]
    pub source: f32,
    /// Accumulated push from blocked neighbors, in [0, 1]
    #[serde(default)]
    pub pressure: f32,
}

impl Cell {
    pub fn new(color: InkColor, volume: f32, owner_id: Option<String>, intent: StrokeIntent) -> Self {
        Self {
            color,
            volume,
            strength: volume,
            owner_id,
            intent,
            settled: false,
            source: 0.0,
            pressure: 0.0,
        }
    }

    /// Set volume (clamped to [0, cap]) and keep strength in lockstep
    #[inline]
    pub fn set_volume(&mut self, volume: f32, cap: f32) {
        self.volume = volume.clamp(0.0, cap);
        self.strength = self.volume;
    }

    #[inline]
    pub fn has_source(&self) -> bool {
        self.source > SOURCE_EPSILON
    }
}

/// Below this a cell's source counts as exhausted
pub const SOURCE_EPSILON: f32 = 0.01;

/// Paper memory at one grid coordinate. Outlives the ink it documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureEntry {
    pub saturation: f32,
    pub contested: f32,
    pub last_color: Option<InkColor>,
}

impl TextureEntry {
    #[inline]
    pub fn add_saturation(&mut self, amount: f32, max: f32) {
        self.saturation = (self.saturation + amount).clamp(0.0, max);
    }

    #[inline]
    pub fn add_contested(&mut self, amount: f32, max: f32) {
        self.contested = (self.contested + amount).clamp(0.0, max);
    }
}

/// Output event for the renderer: a cell changed hands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatEffect {
    /// World-space cell center
    pub position: (f32, f32),
    pub winner_color: InkColor,
    pub loser_color: InkColor,
    pub intensity: f32,
    pub age: f32,
}
