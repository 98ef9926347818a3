use crate::cli::LayersArgs;
use crate::error::{CliError, Result};
use fieldscope::core::models::shell::Material;
use fieldscope::core::physics::layers::solve_surface_charges;
use tracing::info;

pub fn run(args: LayersArgs) -> Result<()> {
    let materials = parse_materials(&args.materials)?;
    let surface_charges = solve_surface_charges(&args.radii, &args.charges, &materials)?;
    info!(layers = surface_charges.len(), "Solved layer surface charges.");

    println!("{:>4} {:>12} {:>11} {:>14}", "#", "radius", "material", "surface q");
    for (index, ((radius, material), charge)) in args
        .radii
        .iter()
        .zip(&materials)
        .zip(&surface_charges)
        .enumerate()
    {
        println!("{index:>4} {radius:>12} {material:>11} {charge:>14.6e}");
    }
    Ok(())
}

fn parse_materials(tags: &[String]) -> Result<Vec<Material>> {
    tags.iter()
        .map(|tag| tag.parse::<Material>().map_err(CliError::Argument))
        .collect()
}
