use taxochord_core::{ChordOptions, Engine, Record};
use taxochord_render::svg::{SvgRenderOptions, SvgRenderer, render_chord_svg};
use taxochord_render::{
    ChordDiagramLayout, InteractionController, LayoutOptions, PointerEvent, Renderer,
    layout_chord_diagram, renderer::draw_chord_diagram,
};

fn layout_for(records: &[Record]) -> ChordDiagramLayout {
    let out = Engine::new().build(records);
    layout_chord_diagram(&out, &ChordOptions::default(), &LayoutOptions::default()).unwrap()
}

fn scenario_layout() -> ChordDiagramLayout {
    layout_for(&[
        Record::new("A")
            .with_sample_id("s1")
            .with_country("NL")
            .with_column("k__X", "5"),
        Record::new("B").with_column("k__X", "1"),
        Record::new("C & D").with_column("k__X", "5"),
    ])
}

#[test]
fn static_render_has_groups_ribbons_and_labels() {
    let svg = render_chord_svg(&scenario_layout(), None, &SvgRenderOptions::default());

    assert!(svg.starts_with(r#"<svg id="taxochord" width="1000" height="1000""#));
    assert!(svg.contains(r#"viewBox="0 0 1000 1000""#));
    assert!(svg.contains(r#"aria-roledescription="chord""#));
    assert!(svg.contains(r#"<g transform="translate(500,500)">"#));
    assert_eq!(svg.matches(r#"<g class="group""#).count(), 3);
    assert_eq!(svg.matches(r#"<path class="chord""#).count(), 6);
    assert_eq!(svg.matches("opacity: 1;").count(), 6);
    assert!(svg.contains(r#"<g class="ribbons" fill-opacity="0.7">"#));
    assert!(!svg.contains(r#"class="tooltip""#));

    assert!(svg.contains(r#"<tspan x="0" dy="0em">A</tspan>"#));
    assert!(svg.contains(r#"<tspan x="0" dy="1.1em">s1</tspan>"#));
    assert!(svg.contains(r#"<tspan x="0" dy="1.1em">NL</tspan>"#));
    assert!(svg.contains("C &amp; D"));
    assert!(svg.contains("font-size: 12px;"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn labels_past_the_half_circle_are_flipped() {
    let layout = scenario_layout();
    let svg = render_chord_svg(&layout, None, &SvgRenderOptions::default());

    assert_eq!(svg.matches("text-anchor: start;").count(), 2);
    assert_eq!(svg.matches("text-anchor: end;").count(), 1);
    assert!(svg.contains("rotate(180)"));
    assert!(svg.contains("translate(370) rotate(0)"));
}

#[test]
fn highlight_state_is_baked_in() {
    let layout = scenario_layout();
    let mut controller =
        InteractionController::new(&layout, &ChordOptions::default().interaction);
    controller.handle(PointerEvent::Enter {
        group: 1,
        x: 20.0,
        y: 30.0,
    });
    let svg = render_chord_svg(&layout, Some(&controller), &SvgRenderOptions::default());

    assert_eq!(svg.matches("opacity: 0.1;").count(), 3);
    assert_eq!(svg.matches("opacity: 1;").count(), 3);
    assert!(svg.contains(r#"<g class="tooltip" transform="translate(30,40)" visibility="visible">"#));
    assert!(svg.contains("Unknown Bodysite"));
    assert!(svg.contains(r#"<tspan font-weight="bold">Gender:</tspan>"#));

    controller.handle(PointerEvent::Leave);
    let svg = render_chord_svg(&layout, Some(&controller), &SvgRenderOptions::default());
    assert_eq!(svg.matches("opacity: 1;").count(), 6);
    assert!(!svg.contains(r#"visibility="visible""#));
}

#[test]
fn renderer_applies_commands_incrementally() {
    let layout = scenario_layout();
    let mut controller =
        InteractionController::new(&layout, &ChordOptions::default().interaction);
    let mut renderer = SvgRenderer::new(&SvgRenderOptions::default());
    draw_chord_diagram(&mut renderer, &layout);

    renderer.apply_all(&controller.handle(PointerEvent::Enter {
        group: 0,
        x: 0.0,
        y: 0.0,
    }));
    renderer.apply_all(&controller.handle(PointerEvent::Move { x: 90.0, y: 10.0 }));
    renderer.finish();
    let svg = renderer.into_svg();
    assert!(svg.contains(r#"transform="translate(100,20)" visibility="visible""#));
    assert!(svg.contains("Bodysite:"));
}

#[test]
fn empty_layout_renders_an_empty_canvas() {
    let svg = render_chord_svg(&layout_for(&[]), None, &SvgRenderOptions::default());
    assert!(svg.contains(r#"width="1000""#));
    assert!(!svg.contains(r#"class="group""#));
    assert!(!svg.contains(r#"class="chord""#));
}

#[test]
fn single_dataset_draws_full_ring() {
    let layout = layout_for(&[Record::new("solo").with_column("k__X", "3")]);
    let svg = render_chord_svg(&layout, None, &SvgRenderOptions::default());
    assert_eq!(svg.matches(r#"<path class="chord""#).count(), 1);
    assert!(svg.contains(r#"class="group-arc" d="M0,-360A360,360,0,1,1,"#));
}

#[test]
fn id_and_title_are_escaped() {
    let svg = render_chord_svg(
        &scenario_layout(),
        None,
        &SvgRenderOptions {
            diagram_id: Some("my<chart>".to_string()),
            title: Some("Taxa & friends".to_string()),
        },
    );
    assert!(svg.starts_with(r#"<svg id="my&lt;chart&gt;""#));
    assert!(svg.contains("<title id=\"chart-title-my&lt;chart&gt;\">Taxa &amp; friends</title>"));
}
