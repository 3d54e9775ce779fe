//! Integration tests for slide sequencing, JSON input and warnings.

use slidebox_layout::{
    CachedTextMeasurer, ContentNode, DisplayMode, EdgeSizes, LayoutConfig, LayoutWarning, NodeId,
    RatioTextMeasurer, SiblingSequencer, StyleSpec, Violation, check_slide, layout_slide,
    layout_slides,
};

const QUARTERLY_REPORT: &str = include_str!("fixtures/quarterly_report.json");

fn sections() -> Vec<ContentNode> {
    serde_json::from_str(QUARTERLY_REPORT).unwrap()
}

#[test]
fn test_fixture_section_positions() {
    let config = LayoutConfig::default();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();

    let placements: Vec<(&str, f32, f32)> = slide
        .sections
        .iter()
        .map(|s| (s.node_id.as_str(), s.y, s.height))
        .collect();
    assert_eq!(
        placements,
        vec![("title", 20.0, 50.0), ("kpis", 110.0, 260.0), ("notes", 410.0, 40.0)]
    );
    assert!(slide.sections.iter().all(|s| s.x == 80.0 && s.width == 1760.0));
    assert_eq!(slide.content_bottom(), 450.0);
}

#[test]
fn test_fixture_grid_cells() {
    let config = LayoutConfig::default();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();

    let kpi_2 = slide.box_for(&NodeId::from("kpi-2")).unwrap();
    assert_eq!((kpi_2.x, kpi_2.y, kpi_2.width), (970.0, 130.0, 850.0));
    let kpi_3 = slide.box_for(&NodeId::from("kpi-3")).unwrap();
    assert_eq!((kpi_3.x, kpi_3.y), (100.0, 250.0));
}

#[test]
fn test_fixture_overflow_and_hidden_nodes() {
    let config = LayoutConfig::default();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();

    assert_eq!(slide.boxes.len(), 8);
    assert!(slide.box_for(&NodeId::from("note-2")).is_none());
    assert_eq!(slide.overflow.len(), 1);
    assert!(slide.is_overflowing(&NodeId::from("notes")));
    assert_eq!(
        slide.warnings,
        vec![LayoutWarning::Overflow {
            node_id: NodeId::from("notes"),
            content_height: 50.0,
            max_height: 40.0,
        }]
    );
}

#[test]
fn test_fixture_passes_all_checks() {
    let config = LayoutConfig::default();
    let violations = check_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();
    assert_eq!(violations, Vec::<Violation>::new());
}

#[test]
fn test_layout_serializes_to_json() {
    let config = LayoutConfig::default();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();
    let json = serde_json::to_value(&slide).unwrap();

    assert_eq!(json["boxes"][0]["node_id"], "title");
    assert_eq!(json["boxes"][0]["y"], 20.0);
    assert_eq!(json["overflow"], serde_json::json!(["notes"]));
    assert_eq!(json["warnings"][0]["kind"], "overflow");
    assert_eq!(json["sections"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_unknown_display_mode_is_recorded_and_stacked() {
    let section = ContentNode::container(
        "cards",
        "div",
        StyleSpec::with_display(DisplayMode::from_keyword("masonry")).gap(10.0),
        vec![
            ContentNode::spacer("a", StyleSpec::default().min_height(30.0)),
            ContentNode::spacer("b", StyleSpec::default().min_height(30.0)),
        ],
    );
    let config = LayoutConfig::default();
    let slide = layout_slide(&[section], &config, &RatioTextMeasurer::default()).unwrap();

    assert_eq!(slide.sections[0].height, 70.0);
    assert_eq!(slide.box_for(&NodeId::from("b")).unwrap().y, 60.0);
    assert_eq!(
        slide.warnings,
        vec![LayoutWarning::UnknownDisplayMode {
            node_id: NodeId::from("cards"),
            mode: "masonry".to_string(),
        }]
    );
}

#[test]
fn test_custom_gap_and_offset() {
    let config = LayoutConfig::default();
    let measurer = RatioTextMeasurer::default();
    let sections = [
        ContentNode::spacer("a", StyleSpec::default().min_height(100.0)),
        ContentNode::spacer("b", StyleSpec::default().min_height(100.0)),
    ];
    let slide = SiblingSequencer::new(&config, &measurer)
        .with_gap(0.0)
        .with_initial_offset(50.0)
        .layout(&sections)
        .unwrap();
    assert_eq!(slide.sections[0].y, 50.0);
    assert_eq!(slide.sections[1].y, 150.0);
}

#[test]
fn test_config_from_json_changes_canvas() {
    let config = LayoutConfig::from_json_str(
        r#"{"canvas": {"width": 1280, "height": 720, "margin_left": 40, "margin_right": 40}}"#,
    )
    .unwrap();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::default()).unwrap();
    assert!(slide.sections.iter().all(|s| s.x == 40.0 && s.width == 1200.0));
}

#[test]
fn test_config_width_table_changes_line_counts() {
    let config = LayoutConfig::from_json_str(r#"{"char_widths": {"cjk": 10.0}}"#).unwrap();
    let slide = layout_slide(&sections(), &config, &RatioTextMeasurer::from_config(&config))
        .unwrap();

    // Six 400px ideographs in 1760px: two lines of 50px.
    assert_eq!(slide.sections[0].height, 100.0);
    assert_eq!(slide.sections[1].y, 160.0);

    let default_config = LayoutConfig::default();
    assert_eq!(
        RatioTextMeasurer::from_config(&default_config),
        RatioTextMeasurer::default()
    );
}

#[test]
fn test_section_margins_narrow_the_section() {
    let section = ContentNode::spacer(
        "card",
        StyleSpec::default()
            .min_height(50.0)
            .margin(EdgeSizes::new(10.0, 60.0, 0.0, 40.0)),
    );
    let config = LayoutConfig::default();
    let sections = [section];
    let slide = layout_slide(&sections, &config, &RatioTextMeasurer::default()).unwrap();
    let placement = &slide.sections[0];
    assert_eq!((placement.x, placement.y), (120.0, 30.0));
    assert_eq!(placement.width, config.canvas.section_width(&sections[0]));
    assert_eq!(placement.width, 1660.0);
    assert!(check_slide(&sections, &config, &RatioTextMeasurer::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_batch_layout_with_shared_cache() {
    let config = LayoutConfig::default();
    let measurer = CachedTextMeasurer::new(RatioTextMeasurer::default());
    let slides = vec![sections(), sections(), Vec::new()];
    let results = layout_slides(&slides, &config, &measurer);

    assert_eq!(results.len(), 3);
    let first = results[0].as_ref().unwrap();
    let second = results[1].as_ref().unwrap();
    assert_eq!(first, second);
    assert!(results[2].as_ref().unwrap().boxes.is_empty());
    // Two distinct text leaves in the fixture.
    assert_eq!(measurer.len(), 2);
}
