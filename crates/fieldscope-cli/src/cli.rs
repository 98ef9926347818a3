use crate::utils::parser::parse_point;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "FieldScope Developers",
    version,
    about = "FieldScope CLI - Sample closed-form electrostatic fields of charges, wires, planes, spheres and layered shells.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel sampling.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample the superposed field of a scene over its domain and print a summary.
    Sample(SampleArgs),
    /// Evaluate the superposed field of a scene at a single point.
    Probe(ProbeArgs),
    /// Solve the surface charges of an ad-hoc concentric layer system.
    Layers(LayersArgs),
}

/// Arguments for the `sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Path to the scene description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scene: PathBuf,

    // --- Domain Overrides ---
    /// Override the grid resolution: one value for all axes or three comma-separated values.
    #[arg(short, long, value_name = "N[,N,N]", value_delimiter = ',')]
    pub resolution: Option<Vec<usize>>,

    /// Override the number of decimal places used to key samples.
    #[arg(short, long, value_name = "INT")]
    pub precision: Option<u32>,

    /// Evaluate sample positions on the calling thread only.
    #[arg(long)]
    pub serial: bool,

    // --- Output ---
    /// List the first N samples after the summary.
    #[arg(long, value_name = "N")]
    pub show: Option<usize>,
}

/// Arguments for the `probe` subcommand.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Path to the scene description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scene: PathBuf,

    /// Position to evaluate, as comma-separated coordinates.
    #[arg(long, required = true, value_name = "X,Y,Z", value_parser = parse_point, allow_hyphen_values = true)]
    pub at: [f64; 3],
}

/// Arguments for the `layers` subcommand.
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Strictly increasing layer radii, innermost first.
    #[arg(long, required = true, value_name = "R,...", value_delimiter = ',', allow_hyphen_values = true)]
    pub radii: Vec<f64>,

    /// Material of each layer ('conductor' or 'dielectric').
    #[arg(long, required = true, value_name = "MATERIAL,...", value_delimiter = ',')]
    pub materials: Vec<String>,

    /// Declared charge of each layer.
    #[arg(long, required = true, value_name = "Q,...", value_delimiter = ',', allow_hyphen_values = true)]
    pub charges: Vec<f64>,
}
