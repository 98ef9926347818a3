use super::store::DEFAULT_PRECISION;
use crate::core::models::domain::SamplingDomain;
use thiserror::Error;

/// Largest supported key precision; beyond this, grid coordinates overflow `i64` cells
/// well before they reach realistic scene extents.
pub const MAX_PRECISION: u32 = 12;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Key precision {0} exceeds the supported maximum of {MAX_PRECISION} decimal places")]
    InvalidPrecision(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub domain: SamplingDomain,
    /// Decimal places used to quantize sample positions.
    pub precision: u32,
    /// Evaluate positions concurrently when the `parallel` feature is enabled.
    pub parallel: bool,
}

#[derive(Default)]
pub struct SamplingConfigBuilder {
    domain: Option<SamplingDomain>,
    precision: Option<u32>,
    parallel: Option<bool>,
}

impl SamplingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: SamplingDomain) -> Self {
        self.domain = Some(domain);
        self
    }
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> Result<SamplingConfig, ConfigError> {
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        if precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(precision));
        }
        Ok(SamplingConfig {
            domain: self.domain.ok_or(ConfigError::MissingParameter("domain"))?,
            precision,
            parallel: self.parallel.unwrap_or(true),
        })
    }
}
