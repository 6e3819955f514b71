use crate::{
    foundation::core::Point,
    foundation::error::{AdGraphError, AdGraphResult},
    graph::record::{AttributeKind, Record, RecordGraph},
    layout::star::{layout_clusters, row_centers},
    matching::matcher::{MatchSet, find_matches},
    merge::components::Component,
    merge::merger::{MergedGraph, merge},
    snapshot::model::{Snapshot, Stage},
};

/// Inputs the renderer supplies to the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// One center per record. When absent, records are placed on a row
    /// `spacing` apart around `origin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centers: Option<Vec<Point>>,
    pub spacing: f64,
    pub origin: Point,
    /// Radius of each record's star.
    pub radius: f64,
    /// Attribute kind records are linked on.
    pub match_kind: AttributeKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            centers: None,
            spacing: 6.0,
            origin: Point::ORIGIN,
            radius: 1.5,
            match_kind: AttributeKind::Phone,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> AdGraphResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(AdGraphError::validation("radius must be finite and >= 0"));
        }
        if !self.spacing.is_finite() {
            return Err(AdGraphError::validation("spacing must be finite"));
        }
        if let Some(centers) = &self.centers
            && centers.iter().any(|c| !c.is_finite())
        {
            return Err(AdGraphError::validation("cluster centers must be finite"));
        }
        Ok(())
    }

    fn centers_for(&self, count: usize) -> AdGraphResult<Vec<Point>> {
        match &self.centers {
            Some(centers) => Ok(centers.clone()),
            None => row_centers(count, self.spacing, self.origin),
        }
    }
}

/// Every intermediate value of one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineRun {
    /// Record graphs with layout positions applied.
    pub graphs: Vec<RecordGraph>,
    pub matches: MatchSet,
    pub merged: MergedGraph,
    /// One snapshot per [`Stage`], in stage order.
    pub snapshots: Vec<Snapshot>,
}

impl PipelineRun {
    pub fn snapshot(&self, stage: Stage) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.stage == stage)
    }

    pub fn components(&self) -> Vec<Component> {
        self.merged.components()
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Runs build, layout, match and merge over `records`, snapshotting each stage.
    #[tracing::instrument(skip(records, config), fields(records = records.len()))]
    pub fn run(records: &[Record], config: &PipelineConfig) -> AdGraphResult<PipelineRun> {
        config.validate()?;
        if records.is_empty() {
            return Err(AdGraphError::empty_input("pipeline needs at least one record"));
        }

        let built = records
            .iter()
            .map(Record::to_graph)
            .collect::<AdGraphResult<Vec<_>>>()?;
        let mut snapshots = vec![Snapshot::of_records(Stage::Build, &built, &MatchSet::empty())];

        let centers = config.centers_for(built.len())?;
        let graphs = layout_clusters(&built, &centers, config.radius)?.apply(&built)?;
        snapshots.push(Snapshot::of_records(Stage::Layout, &graphs, &MatchSet::empty()));

        let matches = find_matches(&graphs, &config.match_kind);
        snapshots.push(Snapshot::of_records(Stage::Match, &graphs, &matches));

        let merged = merge(&graphs, &matches)?;
        snapshots.push(Snapshot::of_merged(&merged, graphs.len()));

        tracing::info!(
            groups = matches.len(),
            components = merged.components().len(),
            "pipeline finished"
        );
        Ok(PipelineRun {
            graphs,
            matches,
            merged,
            snapshots,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/pipeline.rs"]
mod tests;
