use crate::cli::SampleArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use fieldscope::core::models::scene::{DomainDescriptor, ResolutionSpec, Scene};
use fieldscope::engine::config::{SamplingConfig, SamplingConfigBuilder};
use fieldscope::engine::error::EngineError;
use tracing::debug;

/// Command-line overrides applied on top of the scene file's sampling settings.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SamplingOverrides {
    pub resolution: Option<[usize; 3]>,
    pub precision: Option<u32>,
    pub serial: bool,
}

impl SamplingOverrides {
    pub fn from_args(args: &SampleArgs) -> Result<Self> {
        let resolution = args
            .resolution
            .as_deref()
            .map(parser::parse_resolution)
            .transpose()?;
        Ok(Self {
            resolution,
            precision: args.precision,
            serial: args.serial,
        })
    }
}

/// Merges the scene's domain with CLI overrides into the core sampling configuration.
pub fn resolve_sampling_config(
    scene: &Scene,
    overrides: &SamplingOverrides,
) -> Result<SamplingConfig> {
    let mut descriptor = scene
        .domain
        .clone()
        .ok_or(EngineError::MissingDomain)?;

    if let Some(axes) = overrides.resolution {
        match &mut descriptor {
            DomainDescriptor::Grid { resolution, .. } => {
                debug!(?axes, "Overriding grid resolution from the command line.");
                *resolution = ResolutionSpec::PerAxis(axes);
            }
            DomainDescriptor::Points { .. } => {
                return Err(CliError::Argument(
                    "--resolution only applies to grid domains".to_string(),
                ));
            }
        }
    }

    let domain = descriptor.to_domain().map_err(EngineError::from)?;
    let mut builder = SamplingConfigBuilder::new()
        .domain(domain)
        .parallel(!overrides.serial);
    if let Some(precision) = overrides.precision {
        builder = builder.precision(precision);
    }
    Ok(builder.build().map_err(EngineError::from)?)
}
