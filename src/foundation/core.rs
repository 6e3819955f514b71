use std::fmt;

pub use kurbo::{Point, Vec2};

/// Graph-local node identifier, assigned from a per-graph counter in field order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Terminal part of a [`NodeKey`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeLeaf {
    /// A node created from one record field.
    Field(NodeId),
    /// A node created by collapsing a match group.
    Merged(u32),
}

/// Identity of a node inside any graph (record or merged).
///
/// `scope` lists the input-graph indices a node was carried through, outermost
/// merge first. Record graphs use unscoped keys; every merge of two or more
/// graphs prefixes the carried keys with their input index, so keys from
/// different inputs can never collide.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeKey {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<usize>,
    pub leaf: NodeLeaf,
}

impl NodeKey {
    pub fn field(id: NodeId) -> Self {
        Self {
            scope: Vec::new(),
            leaf: NodeLeaf::Field(id),
        }
    }

    pub fn merged(index: u32) -> Self {
        Self {
            scope: Vec::new(),
            leaf: NodeLeaf::Merged(index),
        }
    }

    /// Same node, as seen from a merge where it came from input `graph`.
    pub fn scoped(&self, graph: usize) -> Self {
        let mut scope = Vec::with_capacity(self.scope.len() + 1);
        scope.push(graph);
        scope.extend_from_slice(&self.scope);
        Self {
            scope,
            leaf: self.leaf,
        }
    }

    /// Index of an unscoped merged node, i.e. one created by the most recent merge.
    pub fn top_level_merged(&self) -> Option<u32> {
        match (self.scope.is_empty(), self.leaf) {
            (true, NodeLeaf::Merged(n)) => Some(n),
            _ => None,
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self.leaf, NodeLeaf::Merged(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for g in &self.scope {
            write!(f, "g{g}/")?;
        }
        match self.leaf {
            NodeLeaf::Field(id) => write!(f, "n{}", id.0),
            NodeLeaf::Merged(n) => write!(f, "m{n}"),
        }
    }
}

/// A node addressed across a sequence of input graphs.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MemberRef {
    pub graph: usize,
    pub key: NodeKey,
}

impl MemberRef {
    pub fn new(graph: usize, key: NodeKey) -> Self {
        Self { graph, key }
    }
}

/// Arithmetic mean of `points`; `None` when the iterator is empty.
pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((sum / count as f64).to_point())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
