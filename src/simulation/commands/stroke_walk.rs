use crate::domain::StrokePoint;

/// Most samples one segment may contribute
const MAX_SEGMENT_SAMPLES: f32 = 4096.0;

/// Sample points along a polyline roughly every `spacing` units.
/// Zero-length segments contribute nothing; the last point is always included.
pub(super) fn sample_path(points: &[StrokePoint], spacing: f32) -> Vec<(f32, f32)> {
    let mut samples = Vec::new();
    if points.is_empty() || !(spacing > 0.0) {
        return samples;
    }

    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let len = a.distance(b);
        if !(len > 0.0) {
            continue;
        }
        let steps = (len / spacing).ceil().clamp(1.0, MAX_SEGMENT_SAMPLES) as usize;
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            samples.push((a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }

    if let Some(last) = points.last() {
        samples.push((last.x, last.y));
    }
    samples
}

/// Grid offsets within `radius` cells and their falloff weight,
/// excluding the center
pub(super) fn falloff_offsets(radius: i32) -> Vec<(i32, i32, f32)> {
    let mut offsets = Vec::new();
    let reach = radius as f32 + 1.0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            let d = (dx as f32).hypot(dy as f32);
            if d <= radius as f32 {
                offsets.push((dx, dy, 1.0 - d / reach));
            }
        }
    }
    offsets
}
