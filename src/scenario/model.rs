use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{AdGraphError, AdGraphResult},
    graph::record::Record,
    scenario::{
        ad_linkage::ad_linkage,
        giant_component::{GiantComponentConfig, giant_component},
        stolen_image::{StolenImageConfig, stolen_image},
    },
    snapshot::pipeline::{Pipeline, PipelineConfig, PipelineRun},
};

/// A narrated scene as data: the records it shows and how they are placed.
///
/// This is also the JSON shape `adgraph run --in` accepts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub records: Vec<Record>,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Scenario {
    pub fn from_json_str(s: &str) -> AdGraphResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdGraphResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn run(&self) -> AdGraphResult<PipelineRun> {
        Pipeline::run(&self.records, &self.pipeline)
    }
}

/// Selects one of the built-in scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioConfig {
    AdLinkage,
    GiantComponent(GiantComponentConfig),
    StolenImage(StolenImageConfig),
}

impl ScenarioConfig {
    pub fn build(&self) -> AdGraphResult<Scenario> {
        match self {
            Self::AdLinkage => Ok(ad_linkage()),
            Self::GiantComponent(cfg) => giant_component(cfg),
            Self::StolenImage(cfg) => stolen_image(cfg),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdGraphResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario config '{}'", path.display()))?;
        serde_json::from_str(&s).map_err(|e| AdGraphError::serde(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/model.rs"]
mod tests;
