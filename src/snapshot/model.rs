use crate::{
    foundation::core::{NodeKey, Point},
    foundation::math::Fnv1a64,
    graph::record::{AttributeKind, Edge, GraphView, RecordGraph},
    matching::matcher::{MatchGroup, MatchSet},
    merge::merger::MergedGraph,
};

/// Pipeline stage a snapshot was taken after.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Build,
    Layout,
    Match,
    Merge,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Build, Stage::Layout, Stage::Match, Stage::Merge];

    fn tag(self) -> u8 {
        match self {
            Self::Build => 0,
            Self::Layout => 1,
            Self::Match => 2,
            Self::Merge => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotNode {
    pub key: NodeKey,
    pub kind: AttributeKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Set on nodes that belong to a match group at the `Match` stage.
    #[serde(default)]
    pub highlighted: bool,
    /// Keys, in the previous snapshot, of the nodes a merged node replaced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<NodeKey>,
}

/// Read-only view of the graph state after one stage, for the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub stage: Stage,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchGroup>,
}

impl Snapshot {
    /// Snapshot of several record graphs side by side.
    ///
    /// Keys follow the same scoping as [`crate::merge`], so nodes a merge
    /// carries through keep their key from this snapshot to the next.
    pub fn of_records(stage: Stage, graphs: &[RecordGraph], matches: &MatchSet) -> Self {
        let scoped = graphs.len() > 1;
        let rekey = |gi: usize, key: &NodeKey| if scoped { key.scoped(gi) } else { key.clone() };

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (gi, graph) in graphs.iter().enumerate() {
            for node in graph.nodes() {
                let highlighted = matches
                    .members()
                    .any(|m| m.graph == gi && m.key == node.id);
                nodes.push(SnapshotNode {
                    key: rekey(gi, &node.id),
                    kind: node.kind.clone(),
                    value: node.value.clone(),
                    position: node.position,
                    highlighted,
                    sources: Vec::new(),
                });
            }
            edges.extend(
                graph
                    .edges()
                    .iter()
                    .map(|e| Edge::new(rekey(gi, &e.from), rekey(gi, &e.to))),
            );
        }

        Self {
            stage,
            nodes,
            edges,
            matches: matches.groups().to_vec(),
        }
    }

    /// Snapshot of a merge over `inputs` record graphs.
    pub fn of_merged(merged: &MergedGraph, inputs: usize) -> Self {
        let scoped = inputs > 1;
        let nodes = merged
            .nodes()
            .iter()
            .map(|node| {
                let sources = match node.id.top_level_merged() {
                    Some(_) => merged
                        .members_of(&node.id)
                        .unwrap_or_default()
                        .iter()
                        .map(|m| if scoped { m.key.scoped(m.graph) } else { m.key.clone() })
                        .collect(),
                    None => Vec::new(),
                };
                SnapshotNode {
                    key: node.id.clone(),
                    kind: node.kind.clone(),
                    value: node.value.clone(),
                    position: node.position,
                    highlighted: false,
                    sources,
                }
            })
            .collect();

        Self {
            stage: Stage::Merge,
            nodes,
            edges: merged.edges().to_vec(),
            matches: Vec::new(),
        }
    }

    pub fn node(&self, key: &NodeKey) -> Option<&SnapshotNode> {
        self.nodes.iter().find(|n| &n.key == key)
    }

    /// Stable content hash; equal snapshots always share a fingerprint, so a
    /// renderer can skip re-drawing an unchanged stage.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u8(self.stage.tag());
        h.write_u64(self.nodes.len() as u64);
        for n in &self.nodes {
            h.write_str(&n.key.to_string());
            h.write_str(&n.kind.to_string());
            h.write_str(&n.value);
            match n.position {
                Some(p) => {
                    h.write_u8(1);
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
                None => h.write_u8(0),
            }
            h.write_u8(u8::from(n.highlighted));
        }
        h.write_u64(self.edges.len() as u64);
        for e in &self.edges {
            h.write_str(&e.from.to_string());
            h.write_str(&e.to.to_string());
        }
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/model.rs"]
mod tests;
