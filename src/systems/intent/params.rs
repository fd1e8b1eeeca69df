use serde::{Deserialize, Serialize};

use crate::domain::StrokeIntent;

/// Multipliers the spread simulation reads from a classified stroke
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadParams {
    pub spread_rate: f32,
    pub resistance: f32,
    pub max_radius: f32,
    pub combat_bonus: f32,
}

impl SpreadParams {
    pub const NEUTRAL: SpreadParams = SpreadParams {
        spread_rate: 1.0,
        resistance: 1.0,
        max_radius: 1.0,
        combat_bonus: 1.0,
    };

    /// Fully-confident extreme for each intent
    pub const fn extreme(intent: StrokeIntent) -> SpreadParams {
        match intent {
            StrokeIntent::Wall => SpreadParams {
                spread_rate: 0.3,
                resistance: 4.0,
                max_radius: 0.5,
                combat_bonus: 2.0,
            },
            StrokeIntent::Attack => SpreadParams {
                spread_rate: 1.8,
                resistance: 0.6,
                max_radius: 1.5,
                combat_bonus: 1.3,
            },
            StrokeIntent::Territory => SpreadParams::NEUTRAL,
        }
    }

    /// Linear blend from neutral toward the intent's extreme
    pub fn for_intent(intent: StrokeIntent, confidence: f32) -> SpreadParams {
        let c = confidence.clamp(0.0, 1.0);
        let target = Self::extreme(intent);
        let lerp = |from: f32, to: f32| from + (to - from) * c;
        SpreadParams {
            spread_rate: lerp(1.0, target.spread_rate),
            resistance: lerp(1.0, target.resistance),
            max_radius: lerp(1.0, target.max_radius),
            combat_bonus: lerp(1.0, target.combat_bonus),
        }
    }
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
