use super::*;

#[test]
fn defaults_mirror_the_scene() {
    let cfg = GiantComponentConfig::default();
    let scenario = cfg.build().unwrap();
    assert_eq!(scenario.records.len(), 8);
    // Title + five spokes, plus one phone per false link touching the cluster.
    let extra: usize = scenario.records.iter().map(|r| r.fields.len() - 6).sum();
    assert_eq!(extra, 2 * cfg.false_links);
    assert_eq!(scenario.pipeline.centers.as_ref().unwrap().len(), 8);
    assert_eq!(scenario.pipeline.radius, 0.8);
}

#[test]
fn false_links_are_seed_deterministic_and_never_self_links() {
    let cfg = GiantComponentConfig {
        false_links: 64,
        seed: 11,
        ..GiantComponentConfig::default()
    };
    let a = cfg.false_link_pairs();
    assert_eq!(a, cfg.false_link_pairs());
    assert_eq!(a.len(), 64);
    assert!(a.iter().all(|&(x, y)| x != y && x < 8 && y < 8));

    let other = GiantComponentConfig {
        seed: 12,
        ..cfg.clone()
    };
    assert_ne!(a, other.false_link_pairs());
}

#[test]
fn without_false_links_every_cluster_stays_apart() {
    let cfg = GiantComponentConfig {
        false_links: 0,
        ..GiantComponentConfig::default()
    };
    let run = cfg.build().unwrap().run().unwrap();
    assert!(run.matches.is_empty());
    assert_eq!(run.components().len(), 8);
}

#[test]
fn false_links_merge_clusters_together() {
    let cfg = GiantComponentConfig::default();
    let run = cfg.build().unwrap().run().unwrap();
    assert_eq!(run.matches.len(), cfg.false_links);
    let comps = run.components();
    assert!(comps.len() < 8);
    let titles: usize = comps.iter().map(|c| c.titles.len()).sum();
    assert_eq!(titles, 8);
}

#[test]
fn single_cluster_cannot_carry_false_links() {
    let cfg = GiantComponentConfig {
        clusters: 1,
        ..GiantComponentConfig::default()
    };
    assert!(cfg.build().is_err());
    let cfg = GiantComponentConfig {
        clusters: 0,
        false_links: 0,
        ..GiantComponentConfig::default()
    };
    assert!(matches!(cfg.build().unwrap_err(), AdGraphError::Validation(_)));
}
