use crate::{
    foundation::core::Point,
    graph::record::{AttributeKind, Record},
    scenario::model::Scenario,
    snapshot::pipeline::PipelineConfig,
};

/// Shared by both ads; the one attribute that links them.
pub const SHARED_PHONE: &str = "555-0100";

/// Two ads, side by side, that share a phone number.
pub fn ad_linkage() -> Scenario {
    let ad1 = Record::new(
        "Ad 1",
        [
            (AttributeKind::Title, "Escort Ad 1"),
            (AttributeKind::Text, "Example Ad Text"),
            (AttributeKind::Phone, SHARED_PHONE),
            (AttributeKind::Image, "imgA1"),
            (AttributeKind::Image, "imgA2"),
        ],
    );
    let ad2 = Record::new(
        "Ad 2",
        [
            (AttributeKind::Title, "Escort Ad 2"),
            (AttributeKind::Text, "Example Ad Text 2"),
            (AttributeKind::Phone, SHARED_PHONE),
            (AttributeKind::Image, "imgB"),
        ],
    );

    Scenario {
        name: "ad-linkage".to_string(),
        records: vec![ad1, ad2],
        pipeline: PipelineConfig {
            centers: Some(vec![Point::new(-3.0, 0.0), Point::new(3.0, 0.0)]),
            radius: 1.5,
            match_kind: AttributeKind::Phone,
            ..PipelineConfig::default()
        },
    }
}
