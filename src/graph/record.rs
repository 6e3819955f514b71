use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    str::FromStr,
};

use crate::{
    foundation::core::{NodeId, NodeKey, Point},
    foundation::error::{AdGraphError, AdGraphResult},
    layout::star::StarLayout,
};

/// Explicit attribute tag carried by every record field.
///
/// Serialized as its label. Labels are normalized on the way in: trimmed,
/// ASCII-lowercased, and a built-in name always maps to its own variant, so
/// `Other` never holds an upper-case label or a built-in name once it passed
/// through [`AttributeKind::other`], `FromStr` or JSON.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum AttributeKind {
    /// The record's hub; exactly one per record.
    Title,
    /// Free-form body text.
    Text,
    /// Contact phone number.
    Phone,
    /// Image reference (hash, URL, file name).
    Image,
    /// Any other attribute, named by the caller.
    Other(String),
}

impl AttributeKind {
    /// Kind for `label` after normalization. An empty label stays `Other("")`;
    /// use `FromStr` to reject it.
    pub fn other(label: impl AsRef<str>) -> Self {
        let label = label.as_ref().trim().to_ascii_lowercase();
        match label.as_str() {
            "title" => Self::Title,
            "text" => Self::Text,
            "phone" => Self::Phone,
            "image" => Self::Image,
            _ => Self::Other(label),
        }
    }

    /// Same kind with its label normalized (see [`AttributeKind::other`]).
    pub fn normalized(&self) -> Self {
        match self {
            Self::Other(label) => Self::other(label),
            kind => kind.clone(),
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Text => f.write_str("text"),
            Self::Phone => f.write_str("phone"),
            Self::Image => f.write_str("image"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

impl FromStr for AttributeKind {
    type Err = AdGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AdGraphError::validation("attribute kind must be non-empty"));
        }
        Ok(Self::other(s))
    }
}

impl TryFrom<String> for AttributeKind {
    type Error = AdGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttributeKind> for String {
    fn from(value: AttributeKind) -> Self {
        value.to_string()
    }
}

/// One `(kind, value)` pair of a record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub kind: AttributeKind,
    pub value: String,
}

impl Field {
    pub fn new(kind: AttributeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl From<(AttributeKind, &str)> for Field {
    fn from((kind, value): (AttributeKind, &str)) -> Self {
        Self::new(kind, value)
    }
}

impl From<(AttributeKind, String)> for Field {
    fn from((kind, value): (AttributeKind, String)) -> Self {
        Self::new(kind, value)
    }
}

/// A named record (one advertisement) as loaded from JSON.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    #[serde(default)]
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = impl Into<Field>>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_graph(&self) -> AdGraphResult<RecordGraph> {
        RecordGraph::build(self.fields.iter().cloned())
            .map_err(|e| match e {
                AdGraphError::MalformedRecord(msg) if !self.name.is_empty() => {
                    AdGraphError::malformed_record(format!("record '{}': {msg}", self.name))
                }
                other => other,
            })
    }
}

/// A graph vertex for one attribute field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttributeNode {
    pub id: NodeKey,
    pub kind: AttributeKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

/// Undirected edge between two node keys of the same graph.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Edge {
    pub from: NodeKey,
    pub to: NodeKey,
}

impl Edge {
    pub fn new(from: NodeKey, to: NodeKey) -> Self {
        Self { from, to }
    }

    pub fn touches(&self, key: &NodeKey) -> bool {
        &self.from == key || &self.to == key
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Endpoints in sorted order; two edges are the same undirected edge iff
    /// their canonical forms are equal.
    pub fn canonical(&self) -> (NodeKey, NodeKey) {
        if self.from <= self.to {
            (self.from.clone(), self.to.clone())
        } else {
            (self.to.clone(), self.from.clone())
        }
    }
}

/// Read access shared by record graphs and merged graphs.
pub trait GraphView {
    fn nodes(&self) -> &[AttributeNode];

    fn edges(&self) -> &[Edge];

    fn node(&self, key: &NodeKey) -> Option<&AttributeNode> {
        self.nodes().iter().find(|n| &n.id == key)
    }

    fn nodes_of_kind(&self, kind: &AttributeKind) -> Vec<&AttributeNode> {
        let kind = kind.normalized();
        self.nodes().iter().filter(|n| n.kind == kind).collect()
    }
}

/// One record's attributes as a star around its title node.
///
/// Deserialization re-checks the star shape, so a loaded graph upholds the
/// same invariants as one from [`RecordGraph::build`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RecordGraphData")]
pub struct RecordGraph {
    nodes: Vec<AttributeNode>,
    edges: Vec<Edge>,
    title: NodeKey,
    #[serde(skip)]
    title_index: usize,
}

#[derive(serde::Deserialize)]
struct RecordGraphData {
    nodes: Vec<AttributeNode>,
    edges: Vec<Edge>,
    title: NodeKey,
}

impl TryFrom<RecordGraphData> for RecordGraph {
    type Error = AdGraphError;

    fn try_from(data: RecordGraphData) -> Result<Self, Self::Error> {
        let RecordGraphData { nodes, edges, title } = data;
        let nodes: Vec<AttributeNode> = nodes
            .into_iter()
            .map(|n| AttributeNode {
                kind: n.kind.normalized(),
                ..n
            })
            .collect();
        let titles: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind.is_title())
            .map(|(i, _)| i)
            .collect();
        let title_index = match titles.as_slice() {
            [i] if nodes[*i].id == title => *i,
            [_] => {
                return Err(AdGraphError::malformed_record(format!(
                    "title key {title} does not name the title node"
                )));
            }
            _ => {
                return Err(AdGraphError::malformed_record(format!(
                    "record graph has {} title nodes, expected exactly one",
                    titles.len()
                )));
            }
        };

        let mut ids = HashSet::new();
        if !nodes.iter().all(|n| ids.insert(&n.id)) {
            return Err(AdGraphError::malformed_record("record graph repeats a node key"));
        }
        let spokes: BTreeSet<_> = nodes
            .iter()
            .filter(|n| n.id != title)
            .map(|n| Edge::new(title.clone(), n.id.clone()).canonical())
            .collect();
        let given: BTreeSet<_> = edges.iter().map(Edge::canonical).collect();
        if given.len() != edges.len() || given != spokes {
            return Err(AdGraphError::malformed_record(
                "record graph edges do not form a star around the title",
            ));
        }

        Ok(Self {
            nodes,
            edges,
            title,
            title_index,
        })
    }
}

impl RecordGraph {
    /// Builds the star graph for an ordered field list.
    ///
    /// Node ids are assigned from a counter local to this graph, in field order.
    /// The title node is joined to every other node and no other edge exists.
    pub fn build(fields: impl IntoIterator<Item = impl Into<Field>>) -> AdGraphResult<Self> {
        let fields: Vec<Field> = fields
            .into_iter()
            .map(Into::into)
            .map(|f: Field| Field::new(f.kind.normalized(), f.value))
            .collect();
        if fields.is_empty() {
            return Err(AdGraphError::malformed_record("record has no fields"));
        }

        let title_count = fields.iter().filter(|f| f.kind.is_title()).count();
        match title_count {
            0 => return Err(AdGraphError::malformed_record("record has no title field")),
            1 => {}
            n => {
                return Err(AdGraphError::malformed_record(format!(
                    "record has {n} title fields, expected exactly one"
                )));
            }
        }

        let mut nodes = Vec::with_capacity(fields.len());
        let mut title = None;
        for (idx, field) in fields.into_iter().enumerate() {
            let id = NodeKey::field(NodeId(next_local_id(idx)?));
            if field.kind.is_title() {
                title = Some((idx, id.clone()));
            }
            nodes.push(AttributeNode {
                id,
                kind: field.kind,
                value: field.value,
                position: None,
            });
        }
        let (title_index, title) =
            title.ok_or_else(|| AdGraphError::malformed_record("record has no title field"))?;

        let edges = nodes
            .iter()
            .filter(|n| n.id != title)
            .map(|n| Edge::new(title.clone(), n.id.clone()))
            .collect::<Vec<_>>();

        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built record graph");
        Ok(Self {
            nodes,
            edges,
            title,
            title_index,
        })
    }

    pub fn title(&self) -> &NodeKey {
        &self.title
    }

    pub fn title_node(&self) -> &AttributeNode {
        &self.nodes[self.title_index]
    }

    /// Non-title nodes, in field order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeNode> {
        self.nodes.iter().filter(move |n| n.id != self.title)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A copy of this graph with positions taken from `layout`.
    ///
    /// Nodes the layout does not mention keep their current position.
    pub fn with_positions(&self, layout: &StarLayout) -> Self {
        let mut out = self.clone();
        for node in &mut out.nodes {
            if let Some(p) = layout.get(&node.id) {
                node.position = Some(p);
            }
        }
        out
    }
}

impl GraphView for RecordGraph {
    fn nodes(&self) -> &[AttributeNode] {
        &self.nodes
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

fn next_local_id(idx: usize) -> AdGraphResult<u32> {
    u32::try_from(idx).map_err(|_| AdGraphError::malformed_record("record has too many fields"))
}

#[cfg(test)]
#[path = "../../tests/unit/graph/record.rs"]
mod tests;
