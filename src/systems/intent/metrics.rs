use std::f32::consts::PI;

use serde::Serialize;

use crate::domain::StrokePoint;

/// Turn angle (radians) beyond which a segment counts as a reversal
const REVERSAL_ANGLE: f32 = 0.6 * PI;

/// Upper bound on samples used for the O(n^2) overlap check
const OVERLAP_SAMPLES: usize = 48;

/// Geometry measured over a stroke's consecutive segments
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeMetrics {
    pub reversals: u32,
    /// reversals / turn count
    pub reversal_rate: f32,
    /// 0 = dead straight, 1 = incoherent
    pub angular_variance: f32,
    pub self_overlap: f32,
    /// World units per second when timed, else average step distance
    pub speed: f32,
    /// Bounding-box diagonal / path length
    pub bbox_ratio: f32,
    pub path_length: f32,
}

pub(super) fn measure(points: &[StrokePoint], thickness: f32) -> StrokeMetrics {
    // Zero-length segments carry no direction; drop them up front.
    let segments: Vec<(f32, f32, f32)> = points
        .windows(2)
        .filter_map(|w| {
            let dx = w[1].x - w[0].x;
            let dy = w[1].y - w[0].y;
            let len = (dx * dx + dy * dy).sqrt();
            (len > f32::EPSILON).then_some((dx, dy, len))
        })
        .collect();

    let path_length: f32 = segments.iter().map(|s| s.2).sum();
    if segments.is_empty() {
        return StrokeMetrics::default();
    }

    let (reversals, reversal_rate) = count_reversals(&segments);

    StrokeMetrics {
        reversals,
        reversal_rate,
        angular_variance: circular_variance(&segments),
        self_overlap: self_overlap(points, thickness),
        speed: speed(points, path_length, segments.len()),
        bbox_ratio: bbox_diagonal(points) / path_length,
        path_length,
    }
}

fn count_reversals(segments: &[(f32, f32, f32)]) -> (u32, f32) {
    let turns = segments.len().saturating_sub(1);
    if turns == 0 {
        return (0, 0.0);
    }
    let mut reversals = 0u32;
    for pair in segments.windows(2) {
        let (ax, ay, al) = pair[0];
        let (bx, by, bl) = pair[1];
        let cos = ((ax * bx + ay * by) / (al * bl)).clamp(-1.0, 1.0);
        if cos.acos() > REVERSAL_ANGLE {
            reversals += 1;
        }
    }
    (reversals, reversals as f32 / turns as f32)
}

/// 1 - mean resultant length of the segment direction unit vectors
fn circular_variance(segments: &[(f32, f32, f32)]) -> f32 {
    let (mut sx, mut sy) = (0.0f32, 0.0f32);
    for &(dx, dy, len) in segments {
        sx += dx / len;
        sy += dy / len;
    }
    let n = segments.len() as f32;
    let resultant = (sx * sx + sy * sy).sqrt() / n;
    (1.0 - resultant).clamp(0.0, 1.0)
}

/// Fraction of sampled point pairs that sit within one brush diameter of each
/// other while being more than two diameters apart along the path.
fn self_overlap(points: &[StrokePoint], thickness: f32) -> f32 {
    let diameter = thickness.max(f32::EPSILON);
    let stride = (points.len() / OVERLAP_SAMPLES).max(1);

    let mut arc = Vec::with_capacity(points.len() / stride + 1);
    let mut sampled = Vec::with_capacity(points.len() / stride + 1);
    let mut travelled = 0.0f32;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            travelled += points[i - 1].distance(p);
        }
        if i % stride == 0 {
            arc.push(travelled);
            sampled.push(*p);
        }
    }

    let mut pairs = 0u32;
    let mut close = 0u32;
    for i in 0..sampled.len() {
        for j in (i + 2)..sampled.len() {
            pairs += 1;
            // Samples within two diameters along the path overlap by brush
            // width alone; only a return to earlier ink counts
            let along = arc[j] - arc[i];
            if along > 2.0 * diameter && sampled[i].distance(&sampled[j]) < diameter {
                close += 1;
            }
        }
    }
    if pairs == 0 {
        0.0
    } else {
        close as f32 / pairs as f32
    }
}

fn speed(points: &[StrokePoint], path_length: f32, segment_count: usize) -> f32 {
    let first = points.first().and_then(|p| p.t);
    let last = points.last().and_then(|p| p.t);
    let all_timed = points.iter().all(|p| p.t.is_some());
    if let (true, Some(t0), Some(t1)) = (all_timed, first, last) {
        let seconds = (t1 - t0) / 1000.0;
        if seconds > 0.0 {
            return (path_length as f64 / seconds) as f32;
        }
    }
    path_length / segment_count.max(1) as f32
}

fn bbox_diagonal(points: &[StrokePoint]) -> f32 {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let w = max_x - min_x;
    let h = max_y - min_y;
    (w * w + h * h).sqrt()
}
