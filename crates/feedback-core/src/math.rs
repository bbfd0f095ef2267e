//! Scalar helpers shared by the synthesis components.

use rand::Rng;

/// Clamp to the unit interval. NaN maps to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Unclamped linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to \[0, 1\].
///
/// A degenerate range (`a == b`) yields 0.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        0.0
    } else {
        clamp01((value - a) / (b - a))
    }
}

/// Map `value` from `[min, max]` onto \[0, 1\] with clamping.
#[inline]
pub fn remap01(value: f32, min: f32, max: f32) -> f32 {
    inverse_lerp(min, max, value)
}

/// Uniform draw in `[lo, hi)`; returns `lo` when the range is empty.
///
/// `Rng::gen_range` panics on empty ranges, which tuning values can produce.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        lo + (hi - lo) * rng.gen::<f32>()
    }
}

/// Golden-ratio seed mixing so sibling components get decorrelated streams.
#[inline]
pub fn mix_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
