//! Global tone mapping from floating point intensity to 8 bits.

use ndarray::Array2;
use tracing::debug;

use crate::scan_pipeline::common::config::PointCloudConfig;

const OUTPUT_MAX: f64 = u8::MAX as f64;

/// Maps `raw` into `[0, 255]`, using the configured band or the texture's own range.
pub fn tone_map(raw: &Array2<f32>, config: &PointCloudConfig) -> Array2<u8> {
    if config.uses_auto_range() {
        auto_range(raw)
    } else {
        manual_range(
            raw,
            config.texture_min_intensity as f64,
            config.texture_max_intensity as f64,
        )
    }
}

/// Stretches the observed finite min/max onto `[0, 255]`.
///
/// A flat texture maps to all zeros. Non-finite samples map to 0.
pub fn auto_range(raw: &Array2<f32>) -> Array2<u8> {
    let (min, max) = raw
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v as f64), max.max(v as f64))
        });

    if min > max {
        debug!("Texture has no finite samples, mapping to black");
        return Array2::zeros(raw.dim());
    }

    let scale = if max - min > f64::EPSILON {
        OUTPUT_MAX / (max - min)
    } else {
        0.0
    };
    debug!(min, max, scale, "Auto tone mapping");

    raw.mapv(|v| {
        if v.is_finite() {
            saturate_u8((v as f64 - min) * scale)
        } else {
            0
        }
    })
}

/// Linear mapping of `[min, max]` onto `[0, 255]`; values outside the band saturate.
///
/// `min` itself maps to 0 (`out = (v - min) * 255 / (max - min)`), so the
/// band is shifted as well as scaled.
pub fn manual_range(raw: &Array2<f32>, min: f64, max: f64) -> Array2<u8> {
    let scale = OUTPUT_MAX / (max - min);
    debug!(min, max, scale, "Manual tone mapping");
    raw.mapv(|v| saturate_u8((v as f64 - min) * scale))
}

/// Rounds half to even and clamps into the u8 range. NaN becomes 0.
pub(crate) fn saturate_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, OUTPUT_MAX) as u8
}
