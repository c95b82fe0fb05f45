//! YAML input documents
//!
//! Every command reads one document. Range validation happens here, at the
//! caller boundary; the engines themselves trust their inputs.

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use finrisk_core::model::{FinancialProfile, RiskScoreSet, RiskToleranceProfile};
use finrisk_core::EngineConfig;
use serde::{Deserialize, de::DeserializeOwned};

/// Read and parse a YAML file
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_saphyr::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

/// Engine configuration from `path`, or the defaults
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => load_yaml(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Profiles consumed by `assess` and `allocate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub financial: Option<FinancialProfile>,
    pub tolerance: Option<RiskToleranceProfile>,
    /// Previous assessment kept on record
    pub prior: Option<RiskScoreSet>,
}

impl ProfileDocument {
    pub fn validate(&self) -> Result<()> {
        if let Some(financial) = &self.financial {
            financial.validate().wrap_err("Invalid financial profile")?;
        }
        if let Some(tolerance) = &self.tolerance {
            tolerance.validate().wrap_err("Invalid risk tolerance profile")?;
        }
        Ok(())
    }
}
