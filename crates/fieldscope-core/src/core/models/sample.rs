use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;
use std::fmt;

/// The field family a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Electric,
    Magnetic,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Electric => "electric",
            FieldKind::Magnetic => "magnetic",
        }
    }
}

/// A single free-form metadata value attached to a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Flag(bool),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Number(v) => write!(f, "{v}"),
            MetaValue::Integer(v) => write!(f, "{v}"),
            MetaValue::Text(v) => f.write_str(v),
            MetaValue::Flag(v) => write!(f, "{v}"),
        }
    }
}

/// Free-form key/value annotations carried by a sample.
pub type Metadata = BTreeMap<String, MetaValue>;

/// A snapshot of the field at one sampled position.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSample {
    /// The raw (unquantized) position the sample was written at.
    pub position: Point3<f64>,
    /// The field vector at `position`.
    pub vector: Vector3<f64>,
    /// `|vector|`, computed once at write time.
    pub magnitude: f64,
    /// Perceptual color encoding in `[0, 0.66]` (0 is red, 0.66 is blue), when the
    /// store applies one.
    pub hue: Option<f64>,
    /// The field family of the store that produced the sample.
    pub field: FieldKind,
    pub metadata: Metadata,
}

impl FieldSample {
    pub fn direction(&self) -> Option<Vector3<f64>> {
        self.vector.try_normalize(f64::EPSILON)
    }
}

/// A position rounded to a fixed number of decimal places, used as a store key.
///
/// Each coordinate is kept as an integer count of `10^-precision` steps, so keys hash and
/// compare exactly and never suffer from `-0.0` or formatting ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey {
    cells: [i64; 3],
    precision: u32,
}

impl SampleKey {
    pub fn quantize(position: &Point3<f64>, precision: u32) -> Self {
        let scale = scale_for(precision);
        let cell = |v: f64| (v * scale).round() as i64;
        Self {
            cells: [cell(position.x), cell(position.y), cell(position.z)],
            precision,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn cells(&self) -> [i64; 3] {
        self.cells
    }

    /// The center of the quantization cell this key names.
    pub fn to_point(&self) -> Point3<f64> {
        let scale = scale_for(self.precision);
        Point3::new(
            self.cells[0] as f64 / scale,
            self.cells[1] as f64 / scale,
            self.cells[2] as f64 / scale,
        )
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.to_point();
        let digits = self.precision as usize;
        write!(f, "{:.digits$},{:.digits$},{:.digits$}", p.x, p.y, p.z)
    }
}

fn scale_for(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

/// Anything the store can resolve to a key: a raw position or a precomputed key.
pub trait AsSampleKey {
    fn as_sample_key(&self, precision: u32) -> SampleKey;
}

impl AsSampleKey for SampleKey {
    fn as_sample_key(&self, _precision: u32) -> SampleKey {
        *self
    }
}

impl AsSampleKey for Point3<f64> {
    fn as_sample_key(&self, precision: u32) -> SampleKey {
        SampleKey::quantize(self, precision)
    }
}

impl AsSampleKey for [f64; 3] {
    fn as_sample_key(&self, precision: u32) -> SampleKey {
        SampleKey::quantize(&Point3::from(*self), precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_within_half_a_step_share_a_key() {
        let a = SampleKey::quantize(&Point3::new(1.001, -2.004, 0.0), 2);
        let b = SampleKey::quantize(&Point3::new(0.996, -1.996, 0.004), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn positions_a_full_step_apart_get_distinct_keys() {
        let a = SampleKey::quantize(&Point3::new(1.0, 0.0, 0.0), 2);
        let b = SampleKey::quantize(&Point3::new(1.01, 0.0, 0.0), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn requantizing_a_key_center_is_idempotent() {
        let key = SampleKey::quantize(&Point3::new(0.123456, -7.891, 3.3333), 3);
        assert_eq!(SampleKey::quantize(&key.to_point(), 3), key);
    }

    #[test]
    fn negative_zero_and_zero_share_a_key() {
        let a = SampleKey::quantize(&Point3::new(-0.0, -0.001, 0.0), 2);
        let b = SampleKey::quantize(&Point3::new(0.0, 0.0, 0.0), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn display_uses_fixed_precision() {
        let key = SampleKey::quantize(&Point3::new(1.0, -0.5, 2.346), 2);
        assert_eq!(key.to_string(), "1.00,-0.50,2.35");
    }

    #[test]
    fn keys_at_different_precisions_do_not_collide() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_ne!(SampleKey::quantize(&p, 1), SampleKey::quantize(&p, 2));
    }

    #[test]
    fn precomputed_key_resolves_to_itself() {
        let key = SampleKey::quantize(&Point3::new(3.0, 2.0, 1.0), 2);
        assert_eq!(key.as_sample_key(5), key);
        assert_eq!([3.0, 2.0, 1.0].as_sample_key(2), key);
    }
}
