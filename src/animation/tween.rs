use crate::{
    animation::ease::Ease,
    foundation::core::{Point, centroid},
    foundation::error::{AdGraphError, AdGraphResult},
    snapshot::model::{Snapshot, SnapshotNode},
};

/// Intermediate state of the transition from `from` to `to`.
///
/// The result has `to`'s nodes, edges and stage. A node present in both
/// snapshots moves along a straight line. A merged node starts at the centroid
/// of its sources in `from`; until `progress` reaches 1 those sources stay in
/// the frame, sliding onto the merged node. Nodes with no start appear at their
/// final position; other nodes only in `from` are gone.
pub fn tween(from: &Snapshot, to: &Snapshot, progress: f64, ease: Ease) -> AdGraphResult<Snapshot> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(AdGraphError::validation("tween progress must be within [0, 1]"));
    }
    let t = ease.apply(progress);

    let mut nodes: Vec<SnapshotNode> = to
        .nodes
        .iter()
        .map(|node| SnapshotNode {
            position: interpolate(start_of(from, node), node.position, t),
            ..node.clone()
        })
        .collect();

    if progress < 1.0 {
        for merged in to.nodes.iter().filter(|n| !n.sources.is_empty()) {
            for source in merged.sources.iter().filter_map(|k| from.node(k)) {
                if to.node(&source.key).is_some() {
                    continue;
                }
                nodes.push(SnapshotNode {
                    position: interpolate(source.position, merged.position, t),
                    ..source.clone()
                });
            }
        }
    }

    Ok(Snapshot {
        stage: to.stage,
        nodes,
        edges: to.edges.clone(),
        matches: to.matches.clone(),
    })
}

/// Frames of the whole transition, both endpoints included.
pub fn tween_frames(
    from: &Snapshot,
    to: &Snapshot,
    frames: usize,
    ease: Ease,
) -> AdGraphResult<Vec<Snapshot>> {
    Ease::schedule(frames)
        .into_iter()
        .map(|p| tween(from, to, p, ease))
        .collect()
}

fn start_of(from: &Snapshot, node: &SnapshotNode) -> Option<Point> {
    if let Some(prev) = from.node(&node.key) {
        return prev.position;
    }
    if node.sources.is_empty() {
        return None;
    }
    let points = node
        .sources
        .iter()
        .map(|k| from.node(k)?.position)
        .collect::<Option<Vec<_>>>()?;
    centroid(points)
}

fn interpolate(start: Option<Point>, end: Option<Point>, t: f64) -> Option<Point> {
    match (start, end) {
        // Exact endpoints; lerp at t=1 can be off by an ulp.
        (Some(_), Some(b)) if t >= 1.0 => Some(b),
        (Some(a), Some(b)) => Some(a.lerp(b, t)),
        (None, end) => end,
        (start, None) => start,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
