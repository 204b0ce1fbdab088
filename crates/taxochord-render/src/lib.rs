#![forbid(unsafe_code)]

//! Headless chord layout, hover interaction and SVG rendering for [`taxochord_core`] outputs.

pub mod chord;
pub mod color;
pub mod interaction;
pub mod labels;
pub mod model;
pub mod renderer;
pub mod svg;

pub use chord::{ChordLayout, ChordLayoutOptions, ChordLayoutProvider, DefaultChordLayout};
pub use interaction::{
    HighlightState, InteractionController, PointerEvent, RenderCommand, TooltipContent,
    TooltipView,
};
pub use model::ChordDiagramLayout;
pub use renderer::Renderer;

use crate::model::{GroupLayout, RibbonLayout};
use std::sync::Arc;
use taxochord_core::{ChordOptions, PipelineOutput};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chord matrix: {message}")]
    InvalidMatrix { message: String },
    #[error("chord layout returned group {index} for a {len}-dataset diagram")]
    GroupOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub provider: Arc<dyn ChordLayoutProvider + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            provider: Arc::new(DefaultChordLayout),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions").finish_non_exhaustive()
    }
}

/// Chord geometry, colors, labels and tooltip contents for one pipeline output.
pub fn layout_chord_diagram(
    output: &PipelineOutput,
    options: &ChordOptions,
    layout_options: &LayoutOptions,
) -> Result<ChordDiagramLayout> {
    let n = output.profiles.len();
    let chord_options = ChordLayoutOptions {
        pad_angle: options.chord.pad_angle,
        sort_subgroups_descending: options.chord.sort_subgroups_descending,
    };
    let chord = layout_options
        .provider
        .layout(&output.matrix, &chord_options)?;

    let render = &options.render;
    let outer_radius = render.outer_radius();
    let inner_radius = render.inner_radius();
    let bounds = renderer::canvas_bounds(render.width, render.height, render.padding);

    let mut groups = Vec::with_capacity(chord.groups.len());
    for g in &chord.groups {
        let profile = output.profiles.get(g.index).ok_or(Error::GroupOutOfRange {
            index: g.index,
            len: n,
        })?;
        let fill = color::category_color(g.index);
        groups.push(GroupLayout {
            group: *g,
            dataset_name: profile.dataset_name.clone(),
            label: labels::place_label(
                g,
                &profile.label,
                outer_radius,
                render.label_offset,
                render.label_line_height,
            ),
            fill: fill.to_string(),
            stroke: color::darker(fill),
        });
    }

    let mut ribbons = Vec::with_capacity(chord.ribbons.len());
    for c in &chord.ribbons {
        for index in [c.source.index, c.target.index] {
            if index >= n {
                return Err(Error::GroupOutOfRange { index, len: n });
            }
        }
        let fill = color::category_color(c.target.index);
        ribbons.push(RibbonLayout {
            chord: *c,
            fill: fill.to_string(),
            stroke: color::darker(fill),
        });
    }

    let tooltips = (0..n)
        .map(|i| TooltipContent::from_representative(output.representative(i)))
        .collect();

    tracing::debug!(
        groups = groups.len(),
        ribbons = ribbons.len(),
        "laid out chord diagram"
    );

    Ok(ChordDiagramLayout {
        bounds,
        center_x: bounds.width() / 2.0,
        center_y: bounds.height() / 2.0,
        outer_radius,
        inner_radius,
        font_size: render.font_size,
        ribbon_fill_opacity: render.ribbon_fill_opacity,
        groups,
        ribbons,
        tooltips,
    })
}
