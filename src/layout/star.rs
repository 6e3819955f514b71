use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::{
    foundation::core::{MemberRef, NodeKey, Point, Vec2},
    foundation::error::{AdGraphError, AdGraphResult},
    graph::record::{GraphView, RecordGraph},
};

/// Node positions for one record graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarLayout {
    positions: BTreeMap<NodeKey, Point>,
}

impl StarLayout {
    pub fn get(&self, key: &NodeKey) -> Option<Point> {
        self.positions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Node positions for a sequence of record graphs, one star per graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterLayout {
    stars: Vec<StarLayout>,
}

impl ClusterLayout {
    pub fn get(&self, member: &MemberRef) -> Option<Point> {
        self.stars.get(member.graph)?.get(&member.key)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Copies of `graphs` with this layout's positions applied.
    pub fn apply(&self, graphs: &[RecordGraph]) -> AdGraphResult<Vec<RecordGraph>> {
        if graphs.len() != self.stars.len() {
            return Err(AdGraphError::arity_mismatch(graphs.len(), self.stars.len()));
        }
        Ok(graphs
            .iter()
            .zip(&self.stars)
            .map(|(g, star)| g.with_positions(star))
            .collect())
    }
}

/// Places the title at `center` and the `n` other nodes evenly on a circle of
/// `radius`, the `i`-th (in field order) at angle `2π·i/n`.
pub fn layout_star(graph: &RecordGraph, center: Point, radius: f64) -> StarLayout {
    let mut positions = BTreeMap::new();
    positions.insert(graph.title().clone(), center);

    let spokes: Vec<&NodeKey> = graph.attributes().map(|n| &n.id).collect();
    let n = spokes.len();
    for (i, key) in spokes.into_iter().enumerate() {
        positions.insert(key.clone(), on_circle(center, radius, i, n));
    }

    StarLayout { positions }
}

/// Runs [`layout_star`] for every graph, anchored at the matching center.
#[tracing::instrument(skip(graphs, centers), fields(graphs = graphs.len()))]
pub fn layout_clusters(
    graphs: &[RecordGraph],
    centers: &[Point],
    radius: f64,
) -> AdGraphResult<ClusterLayout> {
    if graphs.len() != centers.len() {
        return Err(AdGraphError::arity_mismatch(graphs.len(), centers.len()));
    }
    let stars = graphs
        .iter()
        .zip(centers)
        .map(|(g, &c)| layout_star(g, c, radius))
        .collect::<Vec<_>>();
    tracing::debug!(
        nodes = stars.iter().map(StarLayout::len).sum::<usize>(),
        "laid out clusters"
    );
    Ok(ClusterLayout { stars })
}

/// `count` points evenly spaced on a ring of `ring_radius` around `origin`,
/// starting at angle zero.
pub fn ring_centers(count: usize, ring_radius: f64, origin: Point) -> AdGraphResult<Vec<Point>> {
    if !ring_radius.is_finite() || ring_radius < 0.0 {
        return Err(AdGraphError::validation(
            "ring radius must be finite and >= 0",
        ));
    }
    Ok((0..count)
        .map(|i| on_circle(origin, ring_radius, i, count))
        .collect())
}

/// `count` points on a horizontal row through `origin`, `spacing` apart and
/// centered on `origin`.
pub fn row_centers(count: usize, spacing: f64, origin: Point) -> AdGraphResult<Vec<Point>> {
    if !spacing.is_finite() {
        return Err(AdGraphError::validation("row spacing must be finite"));
    }
    let mid = (count.saturating_sub(1) as f64) * 0.5;
    Ok((0..count)
        .map(|i| origin + Vec2::new((i as f64 - mid) * spacing, 0.0))
        .collect())
}

/// Every node position of a graph view, in node order. Nodes without a position
/// are skipped.
pub fn positions_of(graph: &impl GraphView) -> Vec<(NodeKey, Point)> {
    graph
        .nodes()
        .iter()
        .filter_map(|n| n.position.map(|p| (n.id.clone(), p)))
        .collect()
}

fn on_circle(center: Point, radius: f64, i: usize, n: usize) -> Point {
    let theta = TAU * (i as f64) / (n as f64);
    center + Vec2::from_angle(theta) * radius
}

#[cfg(test)]
#[path = "../../tests/unit/layout/star.rs"]
mod tests;
