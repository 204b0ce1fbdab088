use super::{ChordDiagramLayout, LayoutOptions, Result, SvgRenderOptions};
use std::path::Path;
use taxochord_core::{Engine, PipelineOutput, Record, RecordSource};
use taxochord_render::renderer::{draw_chord_diagram, sync_with_controller};
use taxochord_render::svg::render_chord_svg;
use taxochord_render::{
    HighlightState, InteractionController, PointerEvent, RenderCommand, Renderer,
    layout_chord_diagram,
};

#[derive(Debug, Clone)]
struct Loaded {
    output: PipelineOutput,
    layout: ChordDiagramLayout,
    controller: InteractionController,
}

/// One interactive diagram: the latest pipeline output, its layout and hover state.
///
/// Every (re)load starts from an empty session; when it fails the session stays empty.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub engine: Engine,
    pub layout: LayoutOptions,
    pub svg: SvgRenderOptions,
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
        self.svg = svg;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn output(&self) -> Option<&PipelineOutput> {
        self.loaded.as_ref().map(|l| &l.output)
    }

    pub fn diagram(&self) -> Option<&ChordDiagramLayout> {
        self.loaded.as_ref().map(|l| &l.layout)
    }

    pub fn controller(&self) -> Option<&InteractionController> {
        self.loaded.as_ref().map(|l| &l.controller)
    }

    pub fn highlight(&self) -> HighlightState {
        self.controller()
            .map(InteractionController::state)
            .unwrap_or_default()
    }

    /// Drops the loaded diagram and any hover state.
    pub fn clear(&mut self) {
        self.loaded = None;
    }

    /// Synchronous variant of [`Session::reload`].
    pub fn reload_sync(&mut self, source: &dyn RecordSource, path: &Path) -> Result<()> {
        self.clear();
        let output = self.engine.load_and_build_sync(source, path)?;
        self.install(output)
    }

    /// Loads `path` and rebuilds the diagram, replacing whatever was loaded before.
    pub async fn reload(&mut self, source: &dyn RecordSource, path: &Path) -> Result<()> {
        self.reload_sync(source, path)
    }

    /// Rebuilds from records that are already in memory.
    pub fn load_records(&mut self, records: &[Record]) -> Result<()> {
        self.clear();
        let output = self.engine.build(records);
        self.install(output)
    }

    fn install(&mut self, output: PipelineOutput) -> Result<()> {
        let options = self.engine.options();
        let layout = layout_chord_diagram(&output, options, &self.layout)?;
        let controller = InteractionController::new(&layout, &options.interaction);
        tracing::debug!(
            datasets = output.profiles.len(),
            ribbons = layout.ribbons.len(),
            "session loaded"
        );
        self.loaded = Some(Loaded {
            output,
            layout,
            controller,
        });
        Ok(())
    }

    /// Feeds one pointer event to the hover state machine. Nothing happens before a load.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<RenderCommand> {
        match self.loaded.as_mut() {
            Some(loaded) => loaded.controller.handle(event),
            None => Vec::new(),
        }
    }

    /// Draws the diagram in its current hover state. Returns `false` when nothing is loaded.
    pub fn draw(&self, renderer: &mut dyn Renderer) -> bool {
        let Some(loaded) = self.loaded.as_ref() else {
            return false;
        };
        draw_chord_diagram(renderer, &loaded.layout);
        sync_with_controller(renderer, &loaded.controller);
        renderer.finish();
        true
    }

    /// SVG of the diagram in its current hover state.
    pub fn render_svg(&self) -> Option<String> {
        let loaded = self.loaded.as_ref()?;
        Some(render_chord_svg(
            &loaded.layout,
            Some(&loaded.controller),
            &self.svg,
        ))
    }
}
