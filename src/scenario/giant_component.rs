use crate::{
    foundation::core::Point,
    foundation::error::{AdGraphError, AdGraphResult},
    foundation::math::SplitMix64,
    graph::record::{AttributeKind, Field, Record},
    layout::star::ring_centers,
    scenario::model::Scenario,
    snapshot::pipeline::PipelineConfig,
};

/// Parameters of the "false linkage at scale" scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GiantComponentConfig {
    /// Number of independent records (one per individual).
    pub clusters: usize,
    /// Unique attributes per record, besides the title.
    pub spokes: usize,
    pub ring_radius: f64,
    pub origin: Point,
    pub cluster_radius: f64,
    /// Spurious shared phone numbers, each tying two distinct clusters.
    pub false_links: usize,
    pub seed: u64,
}

impl Default for GiantComponentConfig {
    fn default() -> Self {
        Self {
            clusters: 8,
            spokes: 5,
            ring_radius: 3.0,
            origin: Point::new(0.0, -1.5),
            cluster_radius: 0.8,
            false_links: 8,
            seed: 0,
        }
    }
}

const SPOKE_KINDS: [AttributeKind; 3] = [AttributeKind::Image, AttributeKind::Phone, AttributeKind::Text];

impl GiantComponentConfig {
    pub fn validate(&self) -> AdGraphResult<()> {
        if self.clusters == 0 {
            return Err(AdGraphError::validation("giant component needs at least one cluster"));
        }
        if self.false_links > 0 && self.clusters < 2 {
            return Err(AdGraphError::validation(
                "false links need at least two clusters",
            ));
        }
        Ok(())
    }

    /// Cluster pairs tied by each false link, in link order. Never pairs a
    /// cluster with itself; the same pair may repeat.
    pub fn false_link_pairs(&self) -> Vec<(usize, usize)> {
        if self.clusters < 2 {
            return Vec::new();
        }
        let mut rng = SplitMix64::new(self.seed);
        (0..self.false_links)
            .map(|_| {
                let a = rng.next_index(self.clusters);
                let mut b = rng.next_index(self.clusters - 1);
                if b >= a {
                    b += 1;
                }
                (a, b)
            })
            .collect()
    }

    pub fn build(&self) -> AdGraphResult<Scenario> {
        self.validate()?;

        let mut records: Vec<Record> = (0..self.clusters)
            .map(|c| {
                let mut fields = vec![Field::new(AttributeKind::Title, format!("Cluster {c}"))];
                fields.extend((0..self.spokes).map(|s| {
                    let kind = SPOKE_KINDS[s % SPOKE_KINDS.len()].clone();
                    Field::new(kind.clone(), format!("c{c}-{kind}-{s}"))
                }));
                Record {
                    name: format!("Cluster {c}"),
                    fields,
                }
            })
            .collect();

        for (link, (a, b)) in self.false_link_pairs().into_iter().enumerate() {
            let value = format!("false-link-{link}");
            records[a].fields.push(Field::new(AttributeKind::Phone, value.clone()));
            records[b].fields.push(Field::new(AttributeKind::Phone, value));
        }

        let centers = ring_centers(self.clusters, self.ring_radius, self.origin)?;
        tracing::debug!(
            clusters = self.clusters,
            false_links = self.false_links,
            seed = self.seed,
            "built giant component scenario"
        );
        Ok(Scenario {
            name: "giant-component".to_string(),
            records,
            pipeline: PipelineConfig {
                centers: Some(centers),
                radius: self.cluster_radius,
                match_kind: AttributeKind::Phone,
                ..PipelineConfig::default()
            },
        })
    }
}

/// The "false linkage at scale" scene for `config`.
pub fn giant_component(config: &GiantComponentConfig) -> AdGraphResult<Scenario> {
    config.build()
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/giant_component.rs"]
mod tests;
