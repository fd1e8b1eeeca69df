//! Stroke input contract
//!
//! The input layer turns pointer events into strokes. Coordinates are world
//! space and must already be finite; nothing here re-validates them.

use serde::{Deserialize, Serialize};

use super::cell::InkColor;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    /// Capture time in milliseconds, when the input layer provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, t: None }
    }

    pub fn timed(x: f32, y: f32, t: f64) -> Self {
        Self { x, y, t: Some(t) }
    }

    #[inline]
    pub fn distance(&self, other: &StrokePoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub color: InkColor,
    /// Brush diameter in world units
    pub size: f32,
    #[serde(default)]
    pub peer_id: Option<String>,
}

impl Stroke {
    pub fn new(points: Vec<StrokePoint>, color: InkColor, size: f32) -> Self {
        Self { points, color, size, peer_id: None }
    }

    pub fn with_peer(mut self, peer_id: impl Into<String>) -> Self {
        self.peer_id = Some(peer_id.into());
        self
    }

    /// Build from plain (x, y) pairs
    pub fn from_xy(points: &[(f32, f32)], color: InkColor, size: f32) -> Self {
        Self::new(points.iter().map(|&(x, y)| StrokePoint::new(x, y)).collect(), color, size)
    }

    pub fn is_eraser(&self) -> bool {
        self.color.is_eraser()
    }

    pub fn path_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
