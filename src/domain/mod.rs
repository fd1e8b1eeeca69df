//! Domain records - cells, strokes and tuning shared by every system

pub mod cell;
pub mod config;
pub mod stroke;

pub use cell::{Cell, CombatEffect, InkColor, StrokeIntent, TextureEntry, SOURCE_EPSILON};
pub use config::{Backend, ChunkConfig, SimConfig};
pub use stroke::{Stroke, StrokePoint};
