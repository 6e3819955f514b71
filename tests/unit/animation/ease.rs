use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn every_curve_pins_its_endpoints() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-2.0), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
    }
}

#[test]
fn in_out_curves_are_symmetric_at_half() {
    assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    assert!(Ease::InQuad.apply(0.5) < 0.5);
    assert!(Ease::OutQuad.apply(0.5) > 0.5);
}

#[test]
fn schedule_includes_both_ends() {
    assert_eq!(Ease::schedule(3), vec![0.0, 0.5, 1.0]);
    assert_eq!(Ease::schedule(1), vec![1.0]);
    assert_eq!(Ease::schedule(0), vec![1.0]);
}

#[test]
fn ease_names_are_snake_case_in_json() {
    assert_eq!(serde_json::to_string(&Ease::InOutCubic).unwrap(), "\"in_out_cubic\"");
    assert_eq!(Ease::default(), Ease::Linear);
}
