use crate::hand::Hand;

/// Failure taxonomy for the feedback pipeline.
///
/// None of these are fatal: callers log them and skip the affected output.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FeedbackError {
    /// A required config or asset reference is absent.
    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),
    /// A tuning value was out of range and has been corrected.
    #[error("invalid range for `{field}`: {detail}")]
    InvalidRange { field: &'static str, detail: String },
    /// The requested hand has no bound actuator.
    #[error("no actuator bound for {0:?} hand")]
    UnavailableActuator(Hand),
}

impl FeedbackError {
    pub(crate) fn corrected(field: &'static str, from: f32, to: f32) -> Self {
        FeedbackError::InvalidRange {
            field,
            detail: format!("{from:.4} corrected to {to:.4}"),
        }
    }
}

/// Clamp `value` to at least `floor`, logging the correction.
pub(crate) fn floor_at(tag: &str, field: &'static str, value: f32, floor: f32) -> f32 {
    if value >= floor {
        value
    } else {
        log::warn!("[{tag}] {}", FeedbackError::corrected(field, value, floor));
        floor
    }
}

/// Clamp `value` into \[0, 1\], logging the correction.
pub(crate) fn unit(tag: &str, field: &'static str, value: f32) -> f32 {
    let v = crate::math::clamp01(value);
    if v != value {
        log::warn!("[{tag}] {}", FeedbackError::corrected(field, value, v));
    }
    v
}

/// Order a `[lo, hi]` pair after flooring `lo`, logging any correction.
pub(crate) fn ordered_range(tag: &str, field: &'static str, range: [f32; 2], floor: f32) -> [f32; 2] {
    let lo = range[0].min(range[1]).max(floor);
    let hi = range[1].max(lo);
    if lo != range[0] || hi != range[1] {
        log::warn!(
            "[{tag}] {}",
            FeedbackError::InvalidRange {
                field,
                detail: format!(
                    "[{:.4}, {:.4}] corrected to [{lo:.4}, {hi:.4}]",
                    range[0], range[1]
                ),
            }
        );
    }
    [lo, hi]
}
