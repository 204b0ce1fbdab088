#![cfg(feature = "render")]

use std::path::{Path, PathBuf};
use taxochord::render::{
    ChordDiagramLayout, GroupLayout, HeadlessError, HighlightState, PointerEvent, RenderCommand,
    Renderer, RibbonLayout, Session, TooltipView,
};
use taxochord::{CsvRecordSource, Engine, Error, Record};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn basic_csv() -> PathBuf {
    workspace_root().join("fixtures/abundance/basic.csv")
}

fn loaded_session() -> Session {
    let mut session = Session::default();
    session
        .reload_sync(&CsvRecordSource::default(), &basic_csv())
        .unwrap();
    session
}

#[test]
fn reload_builds_output_layout_and_controller() {
    let session = loaded_session();
    let output = session.output().unwrap();
    assert_eq!(output.record_count, 4);
    assert_eq!(
        output.labels(),
        vec![
            "gut_study | S1 | NL",
            "skin_study | S3 | Unknown Country",
            "oral_study | Unknown Sample | US",
        ]
    );
    assert_eq!(
        output.matrix.rows(),
        vec![
            vec![17.0, 5.0, 2.0],
            vec![5.0, 5.0, 1.0],
            vec![2.0, 1.0, 3.0],
        ]
    );
    let diagram = session.diagram().unwrap();
    assert_eq!(diagram.group_count(), 3);
    assert_eq!(diagram.ribbons.len(), 6);
    assert_eq!(session.highlight(), HighlightState::Idle);
}

#[test]
fn nothing_happens_before_a_load() {
    let mut session = Session::default();
    assert!(!session.is_loaded());
    assert!(
        session
            .handle(PointerEvent::Enter {
                group: 0,
                x: 0.0,
                y: 0.0,
            })
            .is_empty()
    );
    assert!(session.render_svg().is_none());
    assert!(!session.draw(&mut Recorder::default()));
}

#[test]
fn hover_is_reflected_in_rendered_svg() {
    let mut session = loaded_session();
    let cmds = session.handle(PointerEvent::Enter {
        group: 2,
        x: 10.0,
        y: 10.0,
    });
    assert!(matches!(cmds.last(), Some(RenderCommand::ShowTooltip { .. })));
    assert_eq!(session.highlight(), HighlightState::Highlighted(2));

    let svg = session.render_svg().unwrap();
    // Ribbons (0,0) (0,1) (1,1) do not touch group 2.
    assert_eq!(svg.matches("opacity: 0.1;").count(), 3);
    assert!(svg.contains("oral cavity"));
    assert!(svg.contains("caries"));
}

#[test]
fn reload_discards_previous_state() {
    let mut session = loaded_session();
    session.handle(PointerEvent::Enter {
        group: 1,
        x: 0.0,
        y: 0.0,
    });

    let tsv = workspace_root().join("fixtures/abundance/basic.tsv");
    session.reload_sync(&CsvRecordSource::tsv(), &tsv).unwrap();
    assert_eq!(session.highlight(), HighlightState::Idle);
    assert_eq!(
        session.output().unwrap().labels(),
        vec!["A | s1 | Unknown Country", "B | s2 | Unknown Country"]
    );
    assert_eq!(session.diagram().unwrap().group_count(), 2);
}

#[test]
fn failed_reload_leaves_the_session_empty() {
    let mut session = loaded_session();
    let missing = workspace_root().join("fixtures/abundance/does-not-exist.csv");
    let err = session
        .reload_sync(&CsvRecordSource::default(), &missing)
        .unwrap_err();
    assert!(matches!(err, HeadlessError::Core(Error::Load { .. })));
    assert!(!session.is_loaded());
    assert!(session.output().is_none());
    assert!(session.controller().is_none());
}

#[test]
fn async_reload_matches_sync() {
    let mut a = Session::default();
    futures::executor::block_on(a.reload(&CsvRecordSource::default(), &basic_csv())).unwrap();
    let b = loaded_session();
    assert_eq!(a.output(), b.output());
    assert_eq!(a.diagram(), b.diagram());
}

#[test]
fn in_memory_records_with_dataset_limit() {
    let mut options = taxochord::ChordOptions::default();
    options.max_datasets = 2;
    let mut session = Session::new(Engine::with_options(options));
    let records: Vec<Record> = ["x", "y", "z"]
        .iter()
        .map(|d| Record::new(*d).with_column("k__A", "1"))
        .collect();
    session.load_records(&records).unwrap();
    assert_eq!(session.output().unwrap().selection.names(), ["x", "y"]);

    session.load_records(&[]).unwrap();
    assert!(session.is_loaded());
    assert!(session.diagram().unwrap().is_empty());
}

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    opacities: Vec<f64>,
}

impl Renderer for Recorder {
    fn begin(&mut self, layout: &ChordDiagramLayout) {
        self.calls.push(format!("begin {}", layout.group_count()));
    }

    fn draw_group_arc(&mut self, group: &GroupLayout, _inner: f64, _outer: f64) {
        self.calls.push(format!("arc {}", group.group.index));
    }

    fn draw_label(&mut self, group: &GroupLayout, _font_size: f64) {
        self.calls.push(format!("label {}", group.group.index));
    }

    fn draw_ribbon(&mut self, index: usize, _ribbon: &RibbonLayout, _radius: f64) {
        self.calls.push(format!("ribbon {index}"));
        self.opacities.push(1.0);
    }

    fn set_ribbon_opacity(&mut self, index: usize, opacity: f64) {
        self.opacities[index] = opacity;
    }

    fn show_tooltip(&mut self, tooltip: &TooltipView) {
        self.calls.push(format!("show {},{}", tooltip.x, tooltip.y));
    }

    fn move_tooltip(&mut self, x: f64, y: f64) {
        self.calls.push(format!("move {x},{y}"));
    }

    fn hide_tooltip(&mut self) {
        self.calls.push("hide".to_string());
    }

    fn finish(&mut self) {
        self.calls.push("finish".to_string());
    }
}

#[test]
fn draw_replays_layout_then_hover_state() {
    let mut session = loaded_session();
    session.handle(PointerEvent::Enter {
        group: 0,
        x: 1.0,
        y: 2.0,
    });
    let mut recorder = Recorder::default();
    assert!(session.draw(&mut recorder));

    assert_eq!(recorder.calls[0], "begin 3");
    assert_eq!(&recorder.calls[1..3], ["arc 0", "label 0"]);
    assert_eq!(
        recorder
            .calls
            .iter()
            .filter(|c| c.starts_with("ribbon"))
            .count(),
        6
    );
    assert_eq!(recorder.calls[recorder.calls.len() - 2], "show 11,12");
    assert_eq!(recorder.calls.last().map(String::as_str), Some("finish"));
    // (1,1) (1,2) (2,2) do not touch group 0.
    assert_eq!(recorder.opacities, vec![1.0, 1.0, 1.0, 0.1, 0.1, 0.1]);
}
