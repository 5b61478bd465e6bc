use crate::boundary_cond::NodeParams;
use crate::error::{RichardsError, RichardsResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Thomas solver switches
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub strict: bool,          // Reject non-finite solutions instead of returning them
    pub check_dominance: bool, // Warn about rows that are not diagonally dominant
}

impl SolverConfig {
    pub fn new() -> Self {
        SolverConfig::default()
    }

    pub fn strict() -> Self {
        SolverConfig {
            strict: true,
            check_dominance: true,
        }
    }
}

/// Contents of a `richards.toml` file: solver switches plus named boundary nodes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    boundary: BTreeMap<String, NodeParams>,
}

impl ModelConfig {
    pub fn from_toml_str(toml_str: &str) -> RichardsResult<Self> {
        let config: ModelConfig = toml::from_str(toml_str)?;
        // Table names are looked up case-insensitively
        let boundary = config
            .boundary
            .into_iter()
            .map(|(name, params)| (name.to_lowercase(), params))
            .collect();
        Ok(ModelConfig {
            solver: config.solver,
            boundary,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> RichardsResult<Self> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    // Parameters of the boundary node stored under `[boundary.<name>]`
    pub fn boundary(&self, name: &str) -> RichardsResult<NodeParams> {
        self.boundary
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| RichardsError::Config(format!("Missing boundary '{}'", name)))
    }

    pub fn boundary_names(&self) -> impl Iterator<Item = &str> {
        self.boundary.keys().map(String::as_str)
    }
}
