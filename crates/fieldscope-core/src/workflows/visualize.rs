use crate::core::models::scene::Scene;
use crate::core::models::source::{ChargeSource, SourceKind};
use crate::engine::config::SamplingConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::sampler::{self, PassSummary, Superposition};
use crate::engine::store::ElectricFieldStore;
use nalgebra::Point3;
use tracing::{debug, info, instrument};

/// Solved charge distribution of one layered object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBreakdown {
    /// Position of the object in the scene's object list.
    pub object_index: usize,
    pub kind: SourceKind,
    pub radii: Vec<f64>,
    pub surface_charges: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Visualization {
    pub store: ElectricFieldStore,
    pub summary: PassSummary,
    pub layers: Vec<LayerBreakdown>,
}

#[instrument(skip_all, name = "visualize_workflow")]
pub fn run(
    scene: &Scene,
    config: &SamplingConfig,
    reporter: &ProgressReporter,
) -> Result<Visualization, EngineError> {
    let indexed = reporter.phase("Preparation", || load_sources(scene))?;

    let layers = collect_layers(&indexed);
    let sources: Vec<ChargeSource> = indexed.into_iter().map(|(_, source)| source).collect();

    let mut store = ElectricFieldStore::with_precision(config.precision);
    let summary = sampler::run_pass(
        &mut store,
        &sources,
        &config.domain,
        config.parallel,
        reporter,
    );

    info!(
        samples = summary.samples,
        layered_objects = layers.len(),
        "Visualization workflow complete."
    );
    Ok(Visualization {
        store,
        summary,
        layers,
    })
}

/// Evaluates the superposed field of every active scene object at a single point.
pub fn probe(scene: &Scene, point: &Point3<f64>) -> Result<Superposition, EngineError> {
    let sources: Vec<ChargeSource> = load_sources(scene)?
        .into_iter()
        .map(|(_, source)| source)
        .collect();
    Ok(sampler::superpose(&sources, point))
}

fn load_sources(scene: &Scene) -> Result<Vec<(usize, ChargeSource)>, EngineError> {
    let sources = scene.active_sources()?;
    debug!(
        active = sources.len(),
        total = scene.objects.len(),
        "Converted scene objects into charge sources."
    );
    Ok(sources)
}

fn collect_layers(sources: &[(usize, ChargeSource)]) -> Vec<LayerBreakdown> {
    sources
        .iter()
        .filter_map(|(index, source)| {
            source.shell_system().map(|system| LayerBreakdown {
                object_index: *index,
                kind: source.kind(),
                radii: system.radii().to_vec(),
                surface_charges: system.surface_charges().to_vec(),
            })
        })
        .collect()
}
