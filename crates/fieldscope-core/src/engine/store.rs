use super::encoding::{Encoding, HueEncoding, Unencoded, log_magnitude};
use crate::core::models::sample::{AsSampleKey, FieldKind, FieldSample, Metadata, MetaValue, SampleKey};
use indexmap::IndexMap;
use nalgebra::{Point3, Vector3};
use std::marker::PhantomData;

/// Decimal places used to quantize positions unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 2;

/// Summary of the magnitudes held by a store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub avg_magnitude: f64,
    /// `ln(1 + max_magnitude)`, the normalization base for color encoding.
    pub log_max_magnitude: f64,
}

/// The capability set the sampler needs from a store.
pub trait FieldStore {
    fn insert(
        &mut self,
        position: Point3<f64>,
        vector: Vector3<f64>,
        metadata: Metadata,
    ) -> SampleKey;

    fn lookup(&self, key: &SampleKey) -> Option<&FieldSample>;

    /// Full scan; `None` when the store is empty.
    fn stats(&self) -> Option<FieldStats>;

    fn clear(&mut self);

    /// Re-encodes every sample against the current maximum magnitude.
    fn refresh_colors(&mut self);
}

/// Running maximum magnitude, recomputed lazily after the current maximum is removed
/// or overwritten.
#[derive(Debug, Clone, Copy, Default)]
struct Peak {
    magnitude: f64,
    stale: bool,
}

/// A keyed cache of field samples, one per quantized position.
///
/// Writes at an existing key overwrite the previous sample in place; iteration follows
/// first-insertion order of the keys. The encoding parameter decides the field family tag
/// and whether samples carry a hue.
#[derive(Debug, Clone)]
pub struct SampleStore<E: Encoding = Unencoded> {
    samples: IndexMap<SampleKey, FieldSample>,
    precision: u32,
    peak: Peak,
    encoding: PhantomData<E>,
}

/// Store for electric fields, colored by log-scaled magnitude.
pub type ElectricFieldStore = SampleStore<HueEncoding>;

/// Store for magnetic fields; samples carry no color.
pub type MagneticFieldStore = SampleStore<Unencoded>;

impl<E: Encoding> Default for SampleStore<E> {
    fn default() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }
}

impl<E: Encoding> SampleStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: u32) -> Self {
        Self {
            samples: IndexMap::new(),
            precision,
            peak: Peak::default(),
            encoding: PhantomData,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn field_kind(&self) -> FieldKind {
        E::FIELD
    }

    pub fn key_for(&self, position: &Point3<f64>) -> SampleKey {
        SampleKey::quantize(position, self.precision)
    }

    /// Stores a snapshot of `vector` at the quantized `position`, replacing any earlier
    /// sample at the same key.
    ///
    /// The store's default metadata (`field`) is merged under `metadata`, so caller-provided
    /// entries win. The hue, if any, is computed against the maximum magnitude held before
    /// this write; call [`Self::refresh_colors`] once a pass is complete.
    pub fn set(
        &mut self,
        position: Point3<f64>,
        vector: Vector3<f64>,
        metadata: Metadata,
    ) -> SampleKey {
        let key = self.key_for(&position);
        let magnitude = vector.norm();
        let hue = E::encode(magnitude, log_magnitude(self.current_peak()));

        let mut merged = Metadata::new();
        merged.insert("field".to_string(), MetaValue::Text(E::FIELD.as_str().to_string()));
        merged.extend(metadata);

        let sample = FieldSample {
            position,
            vector,
            magnitude,
            hue,
            field: E::FIELD,
            metadata: merged,
        };

        if let Some(previous) = self.samples.insert(key, sample) {
            if previous.magnitude >= self.peak.magnitude && magnitude < previous.magnitude {
                self.peak.stale = true;
            }
        }
        if !self.peak.stale && magnitude > self.peak.magnitude {
            self.peak.magnitude = magnitude;
        }
        key
    }

    pub fn get<K: AsSampleKey + ?Sized>(&self, at: &K) -> Option<&FieldSample> {
        self.samples.get(&at.as_sample_key(self.precision))
    }

    pub fn has<K: AsSampleKey + ?Sized>(&self, at: &K) -> bool {
        self.samples.contains_key(&at.as_sample_key(self.precision))
    }

    /// Removes and returns the sample at `at`, keeping the order of the remaining samples.
    pub fn remove<K: AsSampleKey + ?Sized>(&mut self, at: &K) -> Option<FieldSample> {
        let removed = self
            .samples
            .shift_remove(&at.as_sample_key(self.precision))?;
        if removed.magnitude >= self.peak.magnitude {
            self.peak.stale = true;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.peak = Peak::default();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SampleKey, &FieldSample)> {
        self.samples.iter()
    }

    /// Snapshot of every sample in insertion order.
    pub fn values(&self) -> Vec<FieldSample> {
        self.samples.values().cloned().collect()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Vec<&FieldSample>
    where
        P: FnMut(&FieldSample) -> bool,
    {
        self.samples.values().filter(|s| predicate(s)).collect()
    }

    pub fn stats(&self) -> Option<FieldStats> {
        if self.samples.is_empty() {
            return None;
        }

        let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
        for sample in self.samples.values() {
            min = min.min(sample.magnitude);
            max = max.max(sample.magnitude);
            sum += sample.magnitude;
        }

        let count = self.samples.len();
        Some(FieldStats {
            count,
            min_magnitude: min,
            max_magnitude: max,
            avg_magnitude: sum / count as f64,
            log_max_magnitude: log_magnitude(max),
        })
    }

    pub fn refresh_colors(&mut self) {
        let Some(stats) = self.stats() else {
            return;
        };
        for sample in self.samples.values_mut() {
            sample.hue = E::encode(sample.magnitude, stats.log_max_magnitude);
        }
        self.peak = Peak {
            magnitude: stats.max_magnitude,
            stale: false,
        };
    }

    fn current_peak(&mut self) -> f64 {
        if self.peak.stale {
            self.peak = Peak {
                magnitude: self
                    .samples
                    .values()
                    .map(|s| s.magnitude)
                    .fold(0.0, f64::max),
                stale: false,
            };
        }
        self.peak.magnitude
    }
}

impl<E: Encoding> FieldStore for SampleStore<E> {
    fn insert(
        &mut self,
        position: Point3<f64>,
        vector: Vector3<f64>,
        metadata: Metadata,
    ) -> SampleKey {
        self.set(position, vector, metadata)
    }

    fn lookup(&self, key: &SampleKey) -> Option<&FieldSample> {
        self.get(key)
    }

    fn stats(&self) -> Option<FieldStats> {
        SampleStore::stats(self)
    }

    fn clear(&mut self) {
        SampleStore::clear(self)
    }

    fn refresh_colors(&mut self) {
        SampleStore::refresh_colors(self)
    }
}
