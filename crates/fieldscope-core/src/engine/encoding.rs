use crate::core::models::sample::FieldKind;

/// Hue assigned to the weakest field (blue); the strongest maps to 0 (red).
pub const MAX_HUE: f64 = 0.66;

/// `ln(1 + magnitude)`, the log scale used for color normalization.
#[inline]
pub fn log_magnitude(magnitude: f64) -> f64 {
    magnitude.ln_1p()
}

/// Scales a magnitude on a log scale relative to `log_max`.
///
/// Returns 0 while no positive maximum is known yet. Magnitudes above the current maximum
/// map past 1, so their hue drops below 0 until colors are refreshed.
#[inline]
pub fn normalized_magnitude(magnitude: f64, log_max: f64) -> f64 {
    if log_max > 0.0 {
        log_magnitude(magnitude) / log_max
    } else {
        0.0
    }
}

#[inline]
pub fn hue_for(magnitude: f64, log_max: f64) -> f64 {
    (1.0 - normalized_magnitude(magnitude, log_max)) * MAX_HUE
}

/// Per-store policy deciding the field family tag and the color stored with each sample.
pub trait Encoding {
    const FIELD: FieldKind;

    fn encode(magnitude: f64, log_max: f64) -> Option<f64>;
}

/// Log-scaled hue encoding used for electric fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct HueEncoding;

impl Encoding for HueEncoding {
    const FIELD: FieldKind = FieldKind::Electric;

    #[inline]
    fn encode(magnitude: f64, log_max: f64) -> Option<f64> {
        Some(hue_for(magnitude, log_max))
    }
}

/// No color encoding; samples are stored as plain vectors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unencoded;

impl Encoding for Unencoded {
    const FIELD: FieldKind = FieldKind::Magnetic;

    #[inline]
    fn encode(_magnitude: f64, _log_max: f64) -> Option<f64> {
        None
    }
}
