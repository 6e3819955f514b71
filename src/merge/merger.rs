use std::collections::{HashMap, HashSet};

use crate::{
    foundation::core::{MemberRef, NodeKey, Point, centroid},
    foundation::error::{AdGraphError, AdGraphResult},
    graph::record::{AttributeNode, Edge, GraphView, RecordGraph},
    matching::matcher::{MatchGroup, MatchSet},
    merge::components::{Component, connected_components},
};

/// Which input nodes a merged node replaced.
///
/// `members` are relative to the inputs of the merge that created `node`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Provenance {
    pub node: NodeKey,
    pub members: Vec<MemberRef>,
}

/// Anything [`merge`] accepts: record graphs and the output of earlier merges.
pub trait MergeInput: GraphView {
    fn provenance(&self) -> &[Provenance] {
        &[]
    }
}

impl MergeInput for RecordGraph {}

/// The union of several graphs with each match group collapsed into one node.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MergedGraph {
    nodes: Vec<AttributeNode>,
    edges: Vec<Edge>,
    #[serde(default)]
    provenance: Vec<Provenance>,
}

impl MergedGraph {
    /// Members collapsed into `node`, when `node` is a merged node.
    pub fn members_of(&self, node: &NodeKey) -> Option<&[MemberRef]> {
        self.provenance
            .iter()
            .find(|p| &p.node == node)
            .map(|p| p.members.as_slice())
    }

    pub fn merged_nodes(&self) -> impl Iterator<Item = &AttributeNode> {
        self.nodes
            .iter()
            .filter(move |n| self.provenance.iter().any(|p| p.node == n.id))
    }

    pub fn components(&self) -> Vec<Component> {
        connected_components(self)
    }
}

impl GraphView for MergedGraph {
    fn nodes(&self) -> &[AttributeNode] {
        &self.nodes
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl MergeInput for MergedGraph {
    fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }
}

/// Collapses every group of `matches` into a single merged node.
///
/// With two or more inputs every carried node key is scoped by its input index.
/// A single input keeps its keys, so merging one graph with an empty match set
/// returns it unchanged. Edges between members of the same group are dropped and
/// undirected duplicates produced by re-pointing are kept once.
#[tracing::instrument(skip(graphs, matches), fields(graphs = graphs.len(), groups = matches.len()))]
pub fn merge<G: MergeInput>(graphs: &[G], matches: &MatchSet) -> AdGraphResult<MergedGraph> {
    if graphs.is_empty() {
        return Err(AdGraphError::empty_input("merge needs at least one graph"));
    }

    let member_group = index_members(graphs, matches)?;
    let scoped = graphs.len() > 1;
    let rekey = |gi: usize, key: &NodeKey| if scoped { key.scoped(gi) } else { key.clone() };

    // Fresh merged keys must not collide with merged nodes the (single, unscoped)
    // input already carries.
    let base = if scoped {
        0
    } else {
        graphs[0]
            .nodes()
            .iter()
            .filter_map(|n| n.id.top_level_merged())
            .max()
            .map_or(0, |m| m + 1)
    };
    let merged_keys = (0..matches.len())
        .map(|i| merged_index(base, i).map(NodeKey::merged))
        .collect::<AdGraphResult<Vec<_>>>()?;

    let mut nodes = Vec::new();
    let mut emitted = vec![false; matches.len()];
    for (gi, graph) in graphs.iter().enumerate() {
        for node in graph.nodes() {
            let member = MemberRef::new(gi, node.id.clone());
            match member_group.get(&member) {
                Some(&gx) => {
                    if !emitted[gx] {
                        emitted[gx] = true;
                        let group = &matches.groups()[gx];
                        nodes.push(AttributeNode {
                            id: merged_keys[gx].clone(),
                            kind: group.kind.clone(),
                            value: group.value.clone(),
                            position: group_position(graphs, group),
                        });
                    }
                }
                None => nodes.push(AttributeNode {
                    id: rekey(gi, &node.id),
                    ..node.clone()
                }),
            }
        }
    }

    let remap = |gi: usize, key: &NodeKey| match member_group.get(&MemberRef::new(gi, key.clone())) {
        Some(&gx) => merged_keys[gx].clone(),
        None => rekey(gi, key),
    };

    let mut edges = Vec::new();
    let mut seen = HashSet::new();
    let mut self_loops = 0usize;
    for (gi, graph) in graphs.iter().enumerate() {
        for edge in graph.edges() {
            let edge = Edge::new(remap(gi, &edge.from), remap(gi, &edge.to));
            if edge.is_self_loop() {
                self_loops += 1;
                continue;
            }
            if seen.insert(edge.canonical()) {
                edges.push(edge);
            }
        }
    }

    let present: HashSet<&NodeKey> = nodes.iter().map(|n| &n.id).collect();
    let mut provenance = Vec::new();
    for (gi, graph) in graphs.iter().enumerate() {
        for p in graph.provenance() {
            let node = rekey(gi, &p.node);
            if present.contains(&node) {
                provenance.push(Provenance {
                    node,
                    members: p.members.clone(),
                });
            }
        }
    }
    for (group, key) in matches.groups().iter().zip(&merged_keys) {
        provenance.push(Provenance {
            node: key.clone(),
            members: group.members.clone(),
        });
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        self_loops,
        "merged graphs"
    );
    Ok(MergedGraph {
        nodes,
        edges,
        provenance,
    })
}

/// Maps every match member to its group index, rejecting members that do not
/// name a node of `graphs` or that disagree with their group.
fn index_members<G: GraphView>(
    graphs: &[G],
    matches: &MatchSet,
) -> AdGraphResult<HashMap<MemberRef, usize>> {
    let mut out = HashMap::new();
    for (gx, group) in matches.groups().iter().enumerate() {
        if group.members.is_empty() {
            return Err(AdGraphError::validation(format!(
                "match group '{}' has no members",
                group.value
            )));
        }
        for member in &group.members {
            let graph = graphs.get(member.graph).ok_or_else(|| {
                AdGraphError::validation(format!(
                    "match member references graph {} but only {} were given",
                    member.graph,
                    graphs.len()
                ))
            })?;
            let node = graph.node(&member.key).ok_or_else(|| {
                AdGraphError::validation(format!(
                    "match member references unknown node {} in graph {}",
                    member.key, member.graph
                ))
            })?;
            if node.kind != group.kind || node.value != group.value {
                return Err(AdGraphError::validation(format!(
                    "node {} in graph {} does not carry {} '{}'",
                    member.key, member.graph, group.kind, group.value
                )));
            }
            if out.insert(member.clone(), gx).is_some() {
                return Err(AdGraphError::validation(format!(
                    "node {} in graph {} belongs to more than one match group",
                    member.key, member.graph
                )));
            }
        }
    }
    Ok(out)
}

fn group_position<G: GraphView>(graphs: &[G], group: &MatchGroup) -> Option<Point> {
    let points = group
        .members
        .iter()
        .map(|m| graphs.get(m.graph)?.node(&m.key)?.position)
        .collect::<Option<Vec<_>>>()?;
    centroid(points)
}

fn merged_index(base: u32, i: usize) -> AdGraphResult<u32> {
    u32::try_from(i)
        .ok()
        .and_then(|i| base.checked_add(i))
        .ok_or_else(|| AdGraphError::validation("too many match groups"))
}

#[cfg(test)]
#[path = "../../tests/unit/merge/merger.rs"]
mod tests;
