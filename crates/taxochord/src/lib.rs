#![forbid(unsafe_code)]

//! `taxochord` turns per-sample taxon abundance tables into chord diagrams of pairwise
//! dataset similarity, headlessly.
//!
//! # Features
//!
//! - `render` (default): chord layout, hover interaction and SVG output (`taxochord::render`)

pub use taxochord_core::*;

#[cfg(feature = "render")]
pub mod render {
    mod session;

    pub use session::Session;
    pub use taxochord_render::interaction::RibbonEndpoints;
    pub use taxochord_render::model::{ChordDiagramLayout, GroupLayout, RibbonLayout};
    pub use taxochord_render::svg::{SvgRenderOptions, SvgRenderer};
    pub use taxochord_render::{
        ChordLayoutProvider, DefaultChordLayout, HighlightState, InteractionController,
        LayoutOptions, PointerEvent, RenderCommand, Renderer, TooltipView, layout_chord_diagram,
    };

    use std::path::Path;
    use taxochord_core::{Engine, PipelineOutput, RecordSource};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] taxochord_core::Error),
        #[error(transparent)]
        Render(#[from] taxochord_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several diagrams can
    /// be inlined in one document without colliding internal ids.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }
        if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            out.insert_str(0, "c-");
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "c" {
            return "c-untitled".to_string();
        }
        out.to_string()
    }

    /// Synchronous layout helper (executor-free).
    pub fn layout_diagram_sync(
        engine: &Engine,
        source: &dyn RecordSource,
        path: &Path,
        layout_options: &LayoutOptions,
    ) -> Result<(PipelineOutput, ChordDiagramLayout)> {
        let output = engine.load_and_build_sync(source, path)?;
        let layout = layout_chord_diagram(&output, engine.options(), layout_options)?;
        Ok((output, layout))
    }

    pub async fn layout_diagram(
        engine: &Engine,
        source: &dyn RecordSource,
        path: &Path,
        layout_options: &LayoutOptions,
    ) -> Result<(PipelineOutput, ChordDiagramLayout)> {
        layout_diagram_sync(engine, source, path, layout_options)
    }

    /// Synchronous SVG render helper (executor-free). The result carries no highlight.
    pub fn render_svg_sync(
        engine: &Engine,
        source: &dyn RecordSource,
        path: &Path,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let (_, layout) = layout_diagram_sync(engine, source, path, layout_options)?;
        Ok(taxochord_render::svg::render_chord_svg(
            &layout,
            None,
            svg_options,
        ))
    }

    pub async fn render_svg(
        engine: &Engine,
        source: &dyn RecordSource,
        path: &Path,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(engine, source, path, layout_options, svg_options)
    }
}
