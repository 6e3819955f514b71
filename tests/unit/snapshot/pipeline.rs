use super::*;
use crate::foundation::core::NodeKey;
use crate::graph::record::GraphView;

fn records() -> Vec<Record> {
    vec![
        Record::new(
            "Ad 1",
            [
                (AttributeKind::Title, "Escort Ad 1"),
                (AttributeKind::Text, "Example Ad Text"),
                (AttributeKind::Phone, "555-0100"),
                (AttributeKind::Image, "imgA"),
            ],
        ),
        Record::new(
            "Ad 2",
            [
                (AttributeKind::Title, "Escort Ad 2"),
                (AttributeKind::Text, "Example Ad Text 2"),
                (AttributeKind::Phone, "555-0100"),
                (AttributeKind::Image, "imgB"),
            ],
        ),
    ]
}

#[test]
fn run_snapshots_every_stage_in_order() {
    let run = Pipeline::run(&records(), &PipelineConfig::default()).unwrap();
    let stages: Vec<Stage> = run.snapshots.iter().map(|s| s.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());

    let build = run.snapshot(Stage::Build).unwrap();
    assert!(build.nodes.iter().all(|n| n.position.is_none()));
    let layout = run.snapshot(Stage::Layout).unwrap();
    assert!(layout.nodes.iter().all(|n| n.position.is_some()));
    assert_eq!(layout.nodes[0].position, Some(Point::new(-3.0, 0.0)));
    assert_eq!(layout.nodes[4].position, Some(Point::new(3.0, 0.0)));

    let merged = run.snapshot(Stage::Merge).unwrap();
    assert_eq!(merged.nodes.len(), 7);
    assert_eq!(merged.edges.len(), 6);
    assert_eq!(run.components().len(), 1);
    assert_eq!(run.merged.node(&NodeKey::merged(0)).unwrap().value, "555-0100");
}

#[test]
fn explicit_centers_must_match_record_count() {
    let config = PipelineConfig {
        centers: Some(vec![Point::ORIGIN]),
        ..PipelineConfig::default()
    };
    let err = Pipeline::run(&records(), &config).unwrap_err();
    assert!(matches!(err, AdGraphError::ArityMismatch { .. }));
}

#[test]
fn matching_on_an_unshared_kind_keeps_records_apart() {
    let config = PipelineConfig {
        match_kind: AttributeKind::Image,
        ..PipelineConfig::default()
    };
    let run = Pipeline::run(&records(), &config).unwrap();
    assert!(run.matches.is_empty());
    assert_eq!(run.components().len(), 2);
}

#[test]
fn bad_config_and_empty_input_are_rejected() {
    let config = PipelineConfig {
        radius: -1.0,
        ..PipelineConfig::default()
    };
    assert!(matches!(
        Pipeline::run(&records(), &config).unwrap_err(),
        AdGraphError::Validation(_)
    ));
    assert!(matches!(
        Pipeline::run(&[], &PipelineConfig::default()).unwrap_err(),
        AdGraphError::EmptyInput(_)
    ));
}

#[test]
fn malformed_records_fail_the_run() {
    let mut recs = records();
    recs[1].fields.retain(|f| !f.kind.is_title());
    let err = Pipeline::run(&recs, &PipelineConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Ad 2"));
}

#[test]
fn config_defaults_fill_missing_json_fields() {
    let config: PipelineConfig = serde_json::from_str(r#"{"radius": 0.8}"#).unwrap();
    assert_eq!(config.radius, 0.8);
    assert_eq!(config.match_kind, AttributeKind::Phone);
    assert_eq!(config.spacing, 6.0);
}
