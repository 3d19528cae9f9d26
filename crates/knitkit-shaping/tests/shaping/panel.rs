use knitkit_core::Gauge;
use knitkit_shaping::{Panel, Trapezoid, DEFAULT_SIZE_MODIFIER};

const HAT_PANEL: &str = include_str!("../../../../demos/hat-panel.json");

#[test]
fn test_panel_document_generates_hem_note() {
    let panel = Panel::from_json_str(HAT_PANEL).unwrap();
    assert_eq!(panel.gauge(), Gauge::new(19.0, 30.0));
    assert_eq!(panel.size_modifier(), 1.0);

    let lines = panel.generate_knitting_instructions();
    assert_eq!(
        &lines[..5],
        &[
            "Cast on 104 stitches.",
            "Knit 30 rows (RC=30, 104 sts in work).",
            "Hang hem.",
            "Knit 75 rows (RC=105, 104 sts in work).",
            "Divide into 4 sections:",
        ]
    );
}

#[test]
fn test_generation_is_repeatable() {
    let panel = Panel::from_json_str(HAT_PANEL).unwrap();
    assert_eq!(
        panel.generate_knitting_instructions(),
        panel.generate_knitting_instructions()
    );
}

#[test]
fn test_size_modifier_scales_once() {
    let shape = Trapezoid::new(4.0, 20.0, 20.0);
    let panel = Panel::new(shape, Gauge::new(20.0, 20.0), 1.5);
    let lines = panel.generate_knitting_instructions();
    // 20in x 1.5 x 5 sts/in, 4in x 1.5 x 5 rows/in
    assert_eq!(lines[0], "Cast on 150 stitches.");
    assert_eq!(lines[1], "Knit 30 rows (RC=30, 150 sts in work).");
}

#[test]
fn test_bare_shape_document_uses_defaults() {
    let panel = Panel::from_json_str(r#"{"height": "1 1/2", "baseA": 8, "baseB": 8}"#).unwrap();
    assert_eq!(panel.size_modifier(), DEFAULT_SIZE_MODIFIER);
    assert_eq!(panel.shape().unwrap().height, 1.5);
}

#[test]
fn test_invalid_json_is_an_error() {
    let err = Panel::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().contains("JSON"));
}
