use super::*;
use crate::foundation::core::NodeId;
use crate::graph::record::AttributeKind;
use crate::layout::star::layout_clusters;
use crate::matching::matcher::find_matches;

fn ad1() -> RecordGraph {
    RecordGraph::build([
        (AttributeKind::Title, "Escort Ad 1"),
        (AttributeKind::Text, "Example Ad Text"),
        (AttributeKind::Phone, "555-0100"),
        (AttributeKind::Image, "imgA"),
    ])
    .unwrap()
}

fn ad2() -> RecordGraph {
    RecordGraph::build([
        (AttributeKind::Title, "Escort Ad 2"),
        (AttributeKind::Text, "Example Ad Text 2"),
        (AttributeKind::Phone, "555-0100"),
        (AttributeKind::Image, "imgB"),
    ])
    .unwrap()
}

fn key(graph: usize, id: u32) -> NodeKey {
    NodeKey::field(NodeId(id)).scoped(graph)
}

#[test]
fn two_ads_sharing_a_phone_collapse_into_one_node() {
    let graphs = vec![ad1(), ad2()];
    let matches = find_matches(&graphs, &AttributeKind::Phone);
    let merged = merge(&graphs, &matches).unwrap();

    assert_eq!(merged.nodes().len(), 7);
    let phone = NodeKey::merged(0);
    let merged_phone = merged.node(&phone).unwrap();
    assert_eq!(merged_phone.kind, AttributeKind::Phone);
    assert_eq!(merged_phone.value, "555-0100");

    let expected = vec![
        Edge::new(key(0, 0), key(0, 1)),
        Edge::new(key(0, 0), phone.clone()),
        Edge::new(key(0, 0), key(0, 3)),
        Edge::new(key(1, 0), key(1, 1)),
        Edge::new(key(1, 0), phone.clone()),
        Edge::new(key(1, 0), key(1, 3)),
    ];
    assert_eq!(merged.edges(), expected.as_slice());
    assert_eq!(merged.members_of(&phone).unwrap().len(), 2);
    assert_eq!(merged.merged_nodes().count(), 1);
}

#[test]
fn merged_node_sits_at_members_midpoint() {
    let graphs = vec![ad1(), ad2()];
    let centers = [Point::new(-3.0, 0.0), Point::new(3.0, 0.0)];
    let placed = layout_clusters(&graphs, &centers, 1.5)
        .unwrap()
        .apply(&graphs)
        .unwrap();
    let matches = find_matches(&placed, &AttributeKind::Phone);
    let merged = merge(&placed, &matches).unwrap();

    let p = merged.node(&NodeKey::merged(0)).unwrap().position.unwrap();
    let phone = NodeKey::field(NodeId(2));
    let a = placed[0].node(&phone).unwrap().position.unwrap();
    let b = placed[1].node(&phone).unwrap().position.unwrap();
    assert!((p - a.midpoint(b)).hypot() < 1e-9);
    assert!(merged.node(&key(0, 0)).unwrap().position == Some(centers[0]));
}

#[test]
fn unlaid_out_members_leave_merged_position_unset() {
    let graphs = vec![ad1(), ad2()];
    let matches = find_matches(&graphs, &AttributeKind::Phone);
    let merged = merge(&graphs, &matches).unwrap();
    assert!(merged.node(&NodeKey::merged(0)).unwrap().position.is_none());
}

#[test]
fn no_matches_keeps_every_node_and_edge() {
    let a = RecordGraph::build([(AttributeKind::Title, "a")]).unwrap();
    let b = RecordGraph::build([(AttributeKind::Title, "b")]).unwrap();
    let merged = merge(&[a, b], &MatchSet::empty()).unwrap();
    assert_eq!(merged.nodes().len(), 2);
    assert!(merged.edges().is_empty());

    let merged = merge(&[ad1(), ad2()], &MatchSet::empty()).unwrap();
    assert_eq!(merged.nodes().len(), 8);
    assert_eq!(merged.edges().len(), 6);
}

#[test]
fn empty_input_is_an_error() {
    let err = merge::<RecordGraph>(&[], &MatchSet::empty()).unwrap_err();
    assert!(matches!(err, AdGraphError::EmptyInput(_)));
}

#[test]
fn single_graph_is_returned_unchanged() {
    let g = ad1();
    let merged = merge(std::slice::from_ref(&g), &MatchSet::empty()).unwrap();
    assert_eq!(merged.nodes(), g.nodes());
    assert_eq!(merged.edges(), g.edges());
}

#[test]
fn remerging_with_no_matches_is_identity() {
    let graphs = vec![ad1(), ad2()];
    let matches = find_matches(&graphs, &AttributeKind::Phone);
    let once = merge(&graphs, &matches).unwrap();
    let twice = merge(std::slice::from_ref(&once), &MatchSet::empty()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn rematching_a_merged_graph_finds_nothing_new() {
    let graphs = vec![ad1(), ad2()];
    let once = merge(&graphs, &find_matches(&graphs, &AttributeKind::Phone)).unwrap();
    let again = find_matches(std::slice::from_ref(&once), &AttributeKind::Phone);
    assert!(again.is_empty());
    assert_eq!(merge(std::slice::from_ref(&once), &again).unwrap(), once);
}

#[test]
fn matching_titles_join_both_stars() {
    let a = RecordGraph::build([(AttributeKind::Title, "x"), (AttributeKind::Other("tag".into()), "x")]).unwrap();
    let b = RecordGraph::build([(AttributeKind::Title, "x"), (AttributeKind::Text, "t")]).unwrap();
    let graphs = vec![a, b];
    let titles = find_matches(&graphs, &AttributeKind::Title);
    let merged = merge(&graphs, &titles).unwrap();
    assert_eq!(merged.nodes().len(), 3);
    assert_eq!(merged.edges().len(), 2);
    assert!(merged.edges().iter().all(|e| !e.is_self_loop()));
}

#[test]
fn duplicate_edges_after_repointing_are_kept_once() {
    let a = RecordGraph::build([(AttributeKind::Title, "t"), (AttributeKind::Phone, "p")]).unwrap();
    let b = RecordGraph::build([(AttributeKind::Title, "t"), (AttributeKind::Phone, "p")]).unwrap();
    let graphs = vec![a, b];
    let mut groups = find_matches(&graphs, &AttributeKind::Title).groups().to_vec();
    groups.extend(find_matches(&graphs, &AttributeKind::Phone).groups().iter().cloned());
    let merged = merge(&graphs, &MatchSet::new(groups)).unwrap();
    assert_eq!(merged.nodes().len(), 2);
    assert_eq!(merged.edges(), &[Edge::new(NodeKey::merged(0), NodeKey::merged(1))]);
}

#[test]
fn stale_match_members_are_rejected() {
    let graphs = vec![ad1(), ad2()];
    let bogus = MatchSet::new(vec![MatchGroup {
        kind: AttributeKind::Phone,
        value: "555-0100".to_string(),
        members: vec![
            MemberRef::new(0, NodeKey::field(NodeId(2))),
            MemberRef::new(5, NodeKey::field(NodeId(2))),
        ],
    }]);
    assert!(matches!(
        merge(&graphs, &bogus).unwrap_err(),
        AdGraphError::Validation(_)
    ));

    let wrong_value = MatchSet::new(vec![MatchGroup {
        kind: AttributeKind::Phone,
        value: "555-0100".to_string(),
        members: vec![
            MemberRef::new(0, NodeKey::field(NodeId(1))),
            MemberRef::new(1, NodeKey::field(NodeId(2))),
        ],
    }]);
    assert!(merge(&graphs, &wrong_value).is_err());
}

#[test]
fn iterative_merges_scope_earlier_results() {
    let first = merge(&[ad1(), ad2()], &find_matches(&[ad1(), ad2()], &AttributeKind::Phone)).unwrap();
    let third = RecordGraph::build([
        (AttributeKind::Title, "Escort Ad 3"),
        (AttributeKind::Phone, "555-0100"),
    ])
    .unwrap();
    let pair = vec![first.clone(), merge(std::slice::from_ref(&third), &MatchSet::empty()).unwrap()];
    let matches = find_matches(&pair, &AttributeKind::Phone);
    assert_eq!(matches.len(), 1);

    let all = merge(&pair, &matches).unwrap();
    // 7 nodes from the first merge, 2 from the third ad, two phones become one.
    assert_eq!(all.nodes().len(), 8);
    assert_eq!(all.edges().len(), 7);
    assert_eq!(all.components().len(), 1);
    assert_eq!(all.components()[0].titles.len(), 3);
    // The earlier merged phone was collapsed again, so only the new provenance survives.
    assert_eq!(all.merged_nodes().count(), 1);
}

#[test]
fn components_split_unlinked_records() {
    let merged = merge(&[ad1(), ad2()], &MatchSet::empty()).unwrap();
    let comps = merged.components();
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[0].nodes.len(), 4);
    assert_eq!(comps[1].titles, vec![key(1, 0)]);
}
