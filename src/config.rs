use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::{
    matcher::{Matcher, DEFAULT_PARALLEL_THRESHOLD},
    ranking::{Ranker, DEFAULT_MAX_RESULTS},
    scoring::{validate_weights, ScoreError},
};
use crate::models::ScoringWeights;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid {section} weights: {source}")]
    InvalidWeights {
        section: &'static str,
        #[source]
        source: ScoreError,
    },
}

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub brand_fit: BrandFitWeightsConfig,
    #[serde(default)]
    pub property_fit: PropertyFitWeightsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub max_results: Option<usize>,
    pub parallel_threshold: Option<usize>,
}

/// Brand Fit Index weights
#[derive(Debug, Clone, Deserialize)]
pub struct BrandFitWeightsConfig {
    #[serde(default = "default_bfi_location")]
    pub location: f64,
    #[serde(default = "default_bfi_size")]
    pub size: f64,
    #[serde(default = "default_bfi_budget")]
    pub budget: f64,
    #[serde(default = "default_bfi_type", alias = "type")]
    pub property_type: f64,
}

impl Default for BrandFitWeightsConfig {
    fn default() -> Self {
        Self {
            location: default_bfi_location(),
            size: default_bfi_size(),
            budget: default_bfi_budget(),
            property_type: default_bfi_type(),
        }
    }
}

impl From<&BrandFitWeightsConfig> for ScoringWeights {
    fn from(value: &BrandFitWeightsConfig) -> Self {
        Self {
            location: value.location,
            size: value.size,
            budget: value.budget,
            property_type: value.property_type,
        }
    }
}

fn default_bfi_location() -> f64 { ScoringWeights::brand_fit().location }
fn default_bfi_size() -> f64 { ScoringWeights::brand_fit().size }
fn default_bfi_budget() -> f64 { ScoringWeights::brand_fit().budget }
fn default_bfi_type() -> f64 { ScoringWeights::brand_fit().property_type }

/// Property Fit Index weights
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyFitWeightsConfig {
    #[serde(default = "default_pfi_location")]
    pub location: f64,
    #[serde(default = "default_pfi_size")]
    pub size: f64,
    #[serde(default = "default_pfi_budget")]
    pub budget: f64,
    #[serde(default = "default_pfi_type", alias = "type")]
    pub property_type: f64,
}

impl Default for PropertyFitWeightsConfig {
    fn default() -> Self {
        Self {
            location: default_pfi_location(),
            size: default_pfi_size(),
            budget: default_pfi_budget(),
            property_type: default_pfi_type(),
        }
    }
}

impl From<&PropertyFitWeightsConfig> for ScoringWeights {
    fn from(value: &PropertyFitWeightsConfig) -> Self {
        Self {
            location: value.location,
            size: value.size,
            budget: value.budget,
            property_type: value.property_type,
        }
    }
}

fn default_pfi_location() -> f64 { ScoringWeights::property_fit().location }
fn default_pfi_size() -> f64 { ScoringWeights::property_fit().size }
fn default_pfi_budget() -> f64 { ScoringWeights::property_fit().budget }
fn default_pfi_type() -> f64 { ScoringWeights::property_fit().property_type }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BRANDFIT_)
    pub fn load() -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BRANDFIT__MATCHING__MAX_RESULTS -> matching.max_results
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn brand_fit_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.brand_fit)
    }

    pub fn property_fit_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.property_fit)
    }

    /// Reject weight sets the composer would refuse at scoring time
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_weights(&self.brand_fit_weights()).map_err(|source| {
            SettingsError::InvalidWeights { section: "scoring.brand_fit", source }
        })?;
        validate_weights(&self.property_fit_weights()).map_err(|source| {
            SettingsError::InvalidWeights { section: "scoring.property_fit", source }
        })?;
        Ok(())
    }

    pub fn build_matcher(&self) -> Matcher {
        Matcher::new(self.brand_fit_weights(), self.property_fit_weights())
            .with_parallel_threshold(
                self.matching.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            )
    }

    pub fn build_ranker(&self) -> Ranker {
        Ranker::new(
            self.build_matcher(),
            self.matching.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        )
    }
}

fn environment() -> Environment {
    Environment::with_prefix("BRANDFIT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
