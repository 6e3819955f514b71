use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdGraphError::malformed_record("x")
            .to_string()
            .contains("malformed record:")
    );
    assert!(
        AdGraphError::empty_input("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        AdGraphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AdGraphError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn arity_mismatch_reports_both_sides() {
    let msg = AdGraphError::arity_mismatch(3, 2).to_string();
    assert!(msg.contains("expected 3"));
    assert!(msg.contains("got 2"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdGraphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: AdGraphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, AdGraphError::Serde(_)));
}
