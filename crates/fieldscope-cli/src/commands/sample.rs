use crate::cli::SampleArgs;
use crate::config::{SamplingOverrides, resolve_sampling_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fieldscope::core::models::scene::Scene;
use fieldscope::engine::error::EngineError;
use fieldscope::engine::progress::ProgressReporter;
use fieldscope::workflows::visualize::{self, LayerBreakdown, Visualization};
use std::fmt::Write as _;
use tracing::{info, warn};

pub fn run(args: SampleArgs, quiet: bool) -> Result<()> {
    info!("Loading scene from {:?}", &args.scene);
    let scene = Scene::load(&args.scene).map_err(EngineError::from)?;

    let overrides = SamplingOverrides::from_args(&args)?;
    info!("Merging sampling settings from scene file and CLI arguments...");
    let config = resolve_sampling_config(&scene, &overrides)?;

    let progress_handler = CliProgressHandler::for_output(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Sampling {} position(s)...", config.domain.len());
    let visualization = visualize::run(&scene, &config, &reporter)?;

    if visualization.summary.samples == 0 {
        warn!("Sampling finished without producing any samples.");
        println!("Warning: the sampling domain produced no samples.");
    }
    print!("{}", render_report(&visualization, args.show.unwrap_or(0)));
    Ok(())
}

fn render_report(visualization: &Visualization, show: usize) -> String {
    let mut out = String::new();

    if let Some(stats) = visualization.summary.stats {
        let _ = writeln!(out, "Samples:        {}", stats.count);
        let _ = writeln!(out, "Min |E| (V/m):  {:.6e}", stats.min_magnitude);
        let _ = writeln!(out, "Max |E| (V/m):  {:.6e}", stats.max_magnitude);
        let _ = writeln!(out, "Mean |E| (V/m): {:.6e}", stats.avg_magnitude);
    }

    for layer in &visualization.layers {
        out.push_str(&render_layers(layer));
    }

    if show > 0 {
        let _ = writeln!(out, "\n{:<28} {:>14} {:>6}  dominant", "key", "|E| (V/m)", "hue");
        for (key, sample) in visualization.store.iter().take(show) {
            let hue = sample.hue.map_or_else(|| "-".to_string(), |h| format!("{h:.3}"));
            let dominant = sample
                .metadata
                .get("dominant-source")
                .map_or_else(|| "-".to_string(), ToString::to_string);
            let _ = writeln!(
                out,
                "{:<28} {:>14.6e} {:>6}  {}",
                key.to_string(),
                sample.magnitude,
                hue,
                dominant
            );
        }
    }
    out
}

fn render_layers(layer: &LayerBreakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nObject #{} ({}) surface charges:",
        layer.object_index, layer.kind
    );
    for (radius, charge) in layer.radii.iter().zip(&layer.surface_charges) {
        let _ = writeln!(out, "  r = {radius:<10} q = {charge:.6e}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldscope::core::models::source::SourceKind;
    use fieldscope::engine::sampler::PassSummary;
    use fieldscope::engine::store::ElectricFieldStore;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn report_lists_requested_samples_and_layers() {
        let mut store = ElectricFieldStore::new();
        store.set(Point3::new(1.0, 0.0, 0.0), Vector3::x() * 2.0, Default::default());
        store.set(Point3::new(2.0, 0.0, 0.0), Vector3::x(), Default::default());
        store.refresh_colors();
        let visualization = Visualization {
            summary: PassSummary {
                samples: store.len(),
                stats: store.stats(),
            },
            store,
            layers: vec![LayerBreakdown {
                object_index: 3,
                kind: SourceKind::SphericalShells,
                radii: vec![1.0, 2.0],
                surface_charges: vec![0.0, 7.0],
            }],
        };

        let report = render_report(&visualization, 1);
        assert!(report.contains("Samples:        2"));
        assert!(report.contains("Object #3 (concentric-spheres)"));
        assert!(report.contains("1.00,0.00,0.00"));
        assert!(!report.contains("2.00,0.00,0.00"));
    }
}
