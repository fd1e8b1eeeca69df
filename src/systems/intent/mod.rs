//! Stroke intent classifier
//!
//! Pure function of stroke geometry. A tight back-and-forth scribble reads as
//! a WALL, a long fast straight sweep as an ATTACK, anything else as plain
//! TERRITORY. The result feeds spread/combat multipliers to the simulation.

mod metrics;
mod params;

use serde::Serialize;

use crate::domain::{StrokeIntent, StrokePoint};

pub use metrics::StrokeMetrics;
pub use params::SpreadParams;

const WALL_THRESHOLD: f32 = 2.5;
const ATTACK_THRESHOLD: f32 = 2.0;
const ATTACK_SPEED: f32 = 500.0;
const TERRITORY_CONFIDENCE: f32 = 0.7;
const DEFAULT_CONFIDENCE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub intent: StrokeIntent,
    pub confidence: f32,
    pub metrics: StrokeMetrics,
}

impl Classification {
    pub fn params(&self) -> SpreadParams {
        SpreadParams::for_intent(self.intent, self.confidence)
    }
}

/// Classify a stroke by its geometry. `thickness` is the brush diameter.
pub fn classify_stroke(points: &[StrokePoint], thickness: f32) -> Classification {
    if points.len() < 3 {
        return Classification {
            intent: StrokeIntent::Territory,
            confidence: DEFAULT_CONFIDENCE,
            metrics: StrokeMetrics::default(),
        };
    }

    let m = metrics::measure(points, thickness);
    if m.path_length <= f32::EPSILON {
        return Classification {
            intent: StrokeIntent::Territory,
            confidence: DEFAULT_CONFIDENCE,
            metrics: m,
        };
    }

    let wall_score = 3.0 * m.reversal_rate
        + 2.0 * m.angular_variance
        + 4.0 * m.self_overlap
        + if m.bbox_ratio < 0.3 { 1.0 } else { 0.0 };

    let attack_score = [m.speed > ATTACK_SPEED, m.angular_variance < 0.3, m.bbox_ratio > 0.7]
        .iter()
        .filter(|&&hit| hit)
        .count() as f32;

    let (intent, confidence) = if wall_score > WALL_THRESHOLD {
        (StrokeIntent::Wall, (wall_score / 5.0).min(1.0))
    } else if attack_score > ATTACK_THRESHOLD {
        (StrokeIntent::Attack, (attack_score / 3.0).min(1.0))
    } else {
        (StrokeIntent::Territory, TERRITORY_CONFIDENCE)
    };

    Classification { intent, confidence, metrics: m }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(xy: &[(f32, f32)]) -> Vec<StrokePoint> {
        xy.iter().map(|&(x, y)| StrokePoint::new(x, y)).collect()
    }

    #[test]
    fn short_strokes_default_to_territory() {
        let c = classify_stroke(&pts(&[(0.0, 0.0), (100.0, 0.0)]), 10.0);
        assert_eq!(c.intent, StrokeIntent::Territory);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn zigzag_scribble_is_a_wall() {
        let xy: Vec<(f32, f32)> = (0..20)
            .map(|i| (if i % 2 == 0 { 0.0 } else { 12.0 }, i as f32 * 2.0))
            .collect();
        let c = classify_stroke(&pts(&xy), 8.0);
        assert_eq!(c.intent, StrokeIntent::Wall);
        assert!(c.confidence > 0.5);
    }

    #[test]
    fn fast_straight_sweep_is_an_attack() {
        let points: Vec<StrokePoint> = (0..10)
            .map(|i| StrokePoint::timed(i as f32 * 60.0, 0.0, i as f64 * 16.0))
            .collect();
        let c = classify_stroke(&points, 8.0);
        assert_eq!(c.intent, StrokeIntent::Attack);
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn slow_gentle_curve_stays_territory() {
        let xy: Vec<(f32, f32)> = (0..12)
            .map(|i| {
                let a = i as f32 * 0.25;
                (40.0 * a.cos(), 40.0 * a.sin())
            })
            .collect();
        let c = classify_stroke(&pts(&xy), 6.0);
        assert_eq!(c.intent, StrokeIntent::Territory);
        assert_eq!(c.confidence, 0.7);
    }

    #[test]
    fn params_blend_by_confidence() {
        let half = SpreadParams::for_intent(StrokeIntent::Wall, 0.5);
        assert!((half.resistance - 2.5).abs() < 1e-6);
        assert!((half.spread_rate - 0.65).abs() < 1e-6);
        assert_eq!(SpreadParams::for_intent(StrokeIntent::Territory, 1.0), SpreadParams::NEUTRAL);
        assert_eq!(SpreadParams::for_intent(StrokeIntent::Attack, 0.0), SpreadParams::NEUTRAL);
    }
}
