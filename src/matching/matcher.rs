use std::collections::{BTreeSet, HashMap};

use crate::{
    foundation::core::MemberRef,
    graph::record::{AttributeKind, GraphView},
};

/// Nodes from two or more graphs that share one exact attribute value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchGroup {
    pub kind: AttributeKind,
    pub value: String,
    /// Ordered by graph index, then node order within each graph.
    pub members: Vec<MemberRef>,
}

impl MatchGroup {
    /// Number of distinct graphs this group spans.
    pub fn graph_count(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.graph)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Match groups in first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchSet {
    groups: Vec<MatchGroup>,
}

impl MatchSet {
    pub fn new(groups: Vec<MatchGroup>) -> Self {
        Self { groups }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Index of the group `member` belongs to, if any.
    pub fn group_of(&self, member: &MemberRef) -> Option<usize> {
        self.groups
            .iter()
            .position(|g| g.members.iter().any(|m| m == member))
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberRef> {
        self.groups.iter().flat_map(|g| g.members.iter())
    }
}

/// Groups every node of `kind` across `graphs` by exact, case-sensitive value.
///
/// `kind` is normalized first, so `Other("Email")` matches nodes built from
/// `"email"`. Values seen in only one graph are dropped; a non-match is an
/// empty set.
#[tracing::instrument(skip(graphs), fields(graphs = graphs.len()))]
pub fn find_matches<G: GraphView>(graphs: &[G], kind: &AttributeKind) -> MatchSet {
    let kind = &kind.normalized();
    let mut order: Vec<(&str, Vec<MemberRef>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (gi, graph) in graphs.iter().enumerate() {
        for node in graph.nodes().iter().filter(|n| &n.kind == kind) {
            let member = MemberRef::new(gi, node.id.clone());
            match index.get(node.value.as_str()) {
                Some(&slot) => order[slot].1.push(member),
                None => {
                    index.insert(node.value.as_str(), order.len());
                    order.push((node.value.as_str(), vec![member]));
                }
            }
        }
    }

    let groups = order
        .into_iter()
        .map(|(value, members)| MatchGroup {
            kind: kind.clone(),
            value: value.to_string(),
            members,
        })
        .filter(|g| g.graph_count() >= 2)
        .collect::<Vec<_>>();

    tracing::debug!(groups = groups.len(), "matched attributes");
    MatchSet { groups }
}

#[cfg(test)]
#[path = "../../tests/unit/matching/matcher.rs"]
mod tests;
