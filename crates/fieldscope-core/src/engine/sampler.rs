use super::progress::{Progress, ProgressReporter};
use super::store::{FieldStats, FieldStore};
use crate::core::models::domain::SamplingDomain;
use crate::core::models::sample::{MetaValue, Metadata};
use crate::core::models::source::{ChargeSource, SourceKind};
use crate::core::physics::field_at;
use nalgebra::{Point3, Vector3};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Net field at one point together with bookkeeping about its contributors.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub vector: Vector3<f64>,
    /// Number of sources with a non-zero contribution.
    pub source_count: usize,
    /// The source with the strongest individual contribution, if any contributed.
    pub dominant: Option<SourceKind>,
}

impl Superposition {
    pub fn magnitude(&self) -> f64 {
        self.vector.norm()
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(
            "source-count".to_string(),
            MetaValue::Integer(self.source_count as i64),
        );
        if let Some(kind) = self.dominant {
            metadata.insert(
                "dominant-source".to_string(),
                MetaValue::Text(kind.as_str().to_string()),
            );
        }
        metadata
    }
}

/// Sums the fields of every source at `point`.
pub fn superpose(sources: &[ChargeSource], point: &Point3<f64>) -> Superposition {
    let mut vector = Vector3::zeros();
    let mut source_count = 0;
    let mut dominant: Option<(SourceKind, f64)> = None;

    for source in sources {
        let contribution = field_at(source, point);
        let magnitude = contribution.norm();
        if magnitude == 0.0 {
            continue;
        }
        source_count += 1;
        if dominant.is_none_or(|(_, strongest)| magnitude > strongest) {
            dominant = Some((source.kind(), magnitude));
        }
        vector += contribution;
    }

    Superposition {
        vector,
        source_count,
        dominant: dominant.map(|(kind, _)| kind),
    }
}

/// Outcome of one full sampling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSummary {
    pub samples: usize,
    pub stats: Option<FieldStats>,
}

/// Clears `store`, evaluates the superposed field at every position of `domain`, and
/// refreshes colors once all samples are written.
///
/// Positions are evaluated concurrently when `parallel` is set and the `parallel` feature
/// is enabled; writes always happen afterwards from this thread, in domain order.
#[instrument(skip_all, name = "sampling_pass", fields(sources = sources.len(), positions = domain.len()))]
pub fn run_pass<S: FieldStore>(
    store: &mut S,
    sources: &[ChargeSource],
    domain: &SamplingDomain,
    parallel: bool,
    reporter: &ProgressReporter,
) -> PassSummary {
    store.clear();

    if domain.is_empty() {
        warn!("Sampling domain is empty; the store stays empty.");
        return PassSummary {
            samples: 0,
            stats: None,
        };
    }
    if sources.is_empty() {
        warn!("No active sources; every sample will be the zero vector.");
    }

    info!("Starting sampling pass.");
    reporter.report(Progress::PhaseStart { name: "Sampling" });

    let positions = domain.positions();
    reporter.report(Progress::TaskStart {
        total_steps: positions.len() as u64,
    });

    let evaluate = |position: &Point3<f64>| {
        let result = superpose(sources, position);
        reporter.report(Progress::TaskIncrement);
        (*position, result)
    };

    let evaluated = evaluate_all(&positions, parallel, evaluate);
    reporter.report(Progress::TaskFinish);

    for (position, result) in evaluated {
        store.insert(position, result.vector, result.metadata());
    }
    store.refresh_colors();

    let stats = store.stats();
    let samples = stats.map_or(0, |s| s.count);
    info!(
        samples,
        max_magnitude = stats.map_or(0.0, |s| s.max_magnitude),
        "Sampling pass complete."
    );
    reporter.report(Progress::PhaseFinish);

    PassSummary { samples, stats }
}

#[cfg(feature = "parallel")]
fn evaluate_all<F>(
    positions: &[Point3<f64>],
    parallel: bool,
    evaluate: F,
) -> Vec<(Point3<f64>, Superposition)>
where
    F: Fn(&Point3<f64>) -> (Point3<f64>, Superposition) + Sync + Send,
{
    if parallel {
        positions.par_iter().map(evaluate).collect()
    } else {
        positions.iter().map(evaluate).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<F>(
    positions: &[Point3<f64>],
    _parallel: bool,
    evaluate: F,
) -> Vec<(Point3<f64>, Superposition)>
where
    F: Fn(&Point3<f64>) -> (Point3<f64>, Superposition),
{
    positions.iter().map(evaluate).collect()
}

/// A store bound to a source set and a domain, kept consistent with both.
///
/// Replacing either input clears the store and re-runs the full pass.
#[derive(Debug)]
pub struct SamplingSession<S: FieldStore> {
    store: S,
    sources: Vec<ChargeSource>,
    domain: SamplingDomain,
    parallel: bool,
    last_pass: PassSummary,
}

impl<S: FieldStore> SamplingSession<S> {
    pub fn new(
        mut store: S,
        sources: Vec<ChargeSource>,
        domain: SamplingDomain,
        parallel: bool,
        reporter: &ProgressReporter,
    ) -> Self {
        let last_pass = run_pass(&mut store, &sources, &domain, parallel, reporter);
        Self {
            store,
            sources,
            domain,
            parallel,
            last_pass,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn sources(&self) -> &[ChargeSource] {
        &self.sources
    }

    pub fn domain(&self) -> &SamplingDomain {
        &self.domain
    }

    pub fn last_pass(&self) -> PassSummary {
        self.last_pass
    }

    pub fn set_sources(
        &mut self,
        sources: Vec<ChargeSource>,
        reporter: &ProgressReporter,
    ) -> PassSummary {
        self.sources = sources;
        self.resample(reporter)
    }

    pub fn set_domain(&mut self, domain: SamplingDomain, reporter: &ProgressReporter) -> PassSummary {
        self.domain = domain;
        self.resample(reporter)
    }

    fn resample(&mut self, reporter: &ProgressReporter) -> PassSummary {
        self.last_pass = run_pass(
            &mut self.store,
            &self.sources,
            &self.domain,
            self.parallel,
            reporter,
        );
        self.last_pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::source::{InfinitePlane, PointCharge};
    use crate::engine::encoding::MAX_HUE;
    use crate::engine::store::{ElectricFieldStore, SampleStore};
    use std::sync::Mutex;

    fn point_charge(x: f64, charge: f64) -> ChargeSource {
        ChargeSource::Point(PointCharge {
            position: Point3::new(x, 0.0, 0.0),
            charge,
        })
    }

    fn plane(charge_density: f64) -> ChargeSource {
        ChargeSource::Plane(InfinitePlane {
            position: Point3::new(0.0, 0.0, -10.0),
            normal: Vector3::z_axis(),
            charge_density,
        })
    }

    fn line_domain() -> SamplingDomain {
        SamplingDomain::grid(Point3::new(-2.0, 1.0, 0.0), Point3::new(2.0, 1.0, 0.0), [5, 1, 1])
            .unwrap()
    }

    #[test]
    fn superposition_is_sum_of_individual_fields() {
        let sources = vec![point_charge(-1.0, 1e-9), point_charge(1.0, -2e-9), plane(1e-12)];
        let point = Point3::new(0.3, 0.7, -0.2);

        let total = superpose(&sources, &point);
        let expected: Vector3<f64> = sources.iter().map(|s| field_at(s, &point)).sum();
        assert!((total.vector - expected).norm() <= 1e-12 * expected.norm());
        assert_eq!(total.source_count, 3);
    }

    #[test]
    fn dominant_source_is_strongest_contributor() {
        let sources = vec![plane(1e-15), point_charge(0.0, 1e-6)];
        let result = superpose(&sources, &Point3::new(0.0, 1.0, 0.0));
        assert_eq!(result.dominant, Some(SourceKind::PointCharge));
    }

    #[test]
    fn vanishing_contributions_are_not_counted() {
        // Evaluated exactly at the charge, where its field is defined as zero.
        let sources = vec![point_charge(0.0, 1e-9)];
        let result = superpose(&sources, &Point3::origin());
        assert_eq!(result.vector, Vector3::zeros());
        assert_eq!(result.source_count, 0);
        assert_eq!(result.dominant, None);
    }

    #[test]
    fn pass_fills_store_in_domain_order_with_metadata() {
        let mut store = ElectricFieldStore::new();
        let sources = vec![point_charge(0.0, 1e-9)];
        let summary = run_pass(
            &mut store,
            &sources,
            &line_domain(),
            false,
            &ProgressReporter::new(),
        );

        assert_eq!(summary.samples, 5);
        let xs: Vec<f64> = store.values().iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);

        let center = store.get(&Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(center.metadata.get("source-count"), Some(&MetaValue::Integer(1)));
        assert_eq!(
            center.metadata.get("dominant-source"),
            Some(&MetaValue::Text("point-charge".to_string()))
        );
    }

    #[test]
    fn pass_leaves_colors_normalized_to_final_maximum() {
        let mut store = ElectricFieldStore::new();
        let sources = vec![point_charge(0.0, 1e-9)];
        run_pass(&mut store, &sources, &line_domain(), false, &ProgressReporter::new());

        // The sample nearest the charge is the strongest and maps to red.
        let strongest = store.get(&Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(strongest.hue.unwrap().abs() < 1e-12);
        for sample in store.values() {
            let hue = sample.hue.unwrap();
            assert!((0.0..=MAX_HUE).contains(&hue));
        }
    }

    #[test]
    fn parallel_and_serial_passes_agree() {
        let sources = vec![point_charge(-0.5, 1e-9), point_charge(0.5, -1e-9)];
        let domain =
            SamplingDomain::grid(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0), [4, 4, 4])
                .unwrap();

        let mut serial = ElectricFieldStore::new();
        let mut concurrent = ElectricFieldStore::new();
        run_pass(&mut serial, &sources, &domain, false, &ProgressReporter::new());
        run_pass(&mut concurrent, &sources, &domain, true, &ProgressReporter::new());

        assert_eq!(serial.values(), concurrent.values());
    }

    #[test]
    fn pass_clears_previous_samples() {
        let mut store = SampleStore::<crate::engine::encoding::Unencoded>::new();
        store.set(Point3::new(50.0, 50.0, 50.0), Vector3::x(), Metadata::new());

        run_pass(
            &mut store,
            &[point_charge(0.0, 1e-9)],
            &line_domain(),
            false,
            &ProgressReporter::new(),
        );
        assert!(!store.has(&Point3::new(50.0, 50.0, 50.0)));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn empty_domain_yields_empty_summary() {
        let mut store = ElectricFieldStore::new();
        let domain = SamplingDomain::points(Vec::new()).unwrap();
        let summary = run_pass(
            &mut store,
            &[point_charge(0.0, 1e-9)],
            &domain,
            false,
            &ProgressReporter::new(),
        );
        assert_eq!(summary.samples, 0);
        assert!(summary.stats.is_none());
    }

    #[test]
    fn pass_reports_one_increment_per_position() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let mut store = ElectricFieldStore::new();
        run_pass(&mut store, &[point_charge(0.0, 1e-9)], &line_domain(), true, &reporter);
        drop(reporter);

        let events = events.into_inner().unwrap();
        let increments = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement))
            .count();
        assert_eq!(increments, 5);
        assert_eq!(events.first(), Some(&Progress::PhaseStart { name: "Sampling" }));
        assert_eq!(events.last(), Some(&Progress::PhaseFinish));
    }

    #[test]
    fn session_resamples_when_inputs_change() {
        let reporter = ProgressReporter::new();
        let mut session = SamplingSession::new(
            ElectricFieldStore::new(),
            vec![point_charge(0.0, 1e-9)],
            line_domain(),
            false,
            &reporter,
        );
        let before = session.store().get(&Point3::new(1.0, 1.0, 0.0)).unwrap().vector;

        let summary = session.set_sources(vec![point_charge(0.0, -1e-9)], &reporter);
        assert_eq!(summary.samples, 5);
        let after = session.store().get(&Point3::new(1.0, 1.0, 0.0)).unwrap().vector;
        assert!((before + after).norm() < 1e-12 * before.norm());

        let points = SamplingDomain::points(vec![Point3::new(3.0, 0.0, 0.0)]).unwrap();
        let summary = session.set_domain(points, &reporter);
        assert_eq!(summary.samples, 1);
        assert_eq!(session.store().len(), 1);
    }
}
