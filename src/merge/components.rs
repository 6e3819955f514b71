use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use crate::{foundation::core::NodeKey, graph::record::GraphView};

/// One connected component: the set of records linkage says belong together.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Component {
    /// Node keys in graph node order.
    pub nodes: Vec<NodeKey>,
    /// Title nodes inside this component; one per linked record.
    pub titles: Vec<NodeKey>,
}

/// Connected components of `graph`, ordered by their first node.
pub fn connected_components(graph: &impl GraphView) -> Vec<Component> {
    let nodes = graph.nodes();
    let index: HashMap<&NodeKey, usize> = nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

    let mut uf = UnionFind::<usize>::new(nodes.len());
    for edge in graph.edges() {
        if let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) {
            uf.union(a, b);
        }
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut out: Vec<Component> = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let root = uf.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            out.push(Component {
                nodes: Vec::new(),
                titles: Vec::new(),
            });
            out.len() - 1
        });
        out[slot].nodes.push(node.id.clone());
        if node.kind.is_title() {
            out[slot].titles.push(node.id.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/merge/components.rs"]
mod tests;
