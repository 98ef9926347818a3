use crate::cli::ProbeArgs;
use crate::error::Result;
use fieldscope::core::models::scene::Scene;
use fieldscope::engine::error::EngineError;
use fieldscope::workflows::visualize;
use nalgebra::Point3;
use tracing::info;

pub fn run(args: ProbeArgs) -> Result<()> {
    info!("Loading scene from {:?}", &args.scene);
    let scene = Scene::load(&args.scene).map_err(EngineError::from)?;

    let point = Point3::from(args.at);
    let result = visualize::probe(&scene, &point)?;
    info!(
        sources = result.source_count,
        magnitude = result.magnitude(),
        "Probe evaluated."
    );

    println!(
        "E({:.4}, {:.4}, {:.4}) = ({:.6e}, {:.6e}, {:.6e}) V/m",
        point.x, point.y, point.z, result.vector.x, result.vector.y, result.vector.z
    );
    println!("|E| = {:.6e} V/m", result.magnitude());
    match result.dominant {
        Some(kind) => println!(
            "{} contributing source(s); strongest: {}",
            result.source_count, kind
        ),
        None => println!("No source contributes at this point."),
    }
    Ok(())
}
