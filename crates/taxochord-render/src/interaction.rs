//! Hover highlighting.
//!
//! [`HighlightState`] is the whole state machine; [`InteractionController`] owns it together with
//! the ribbon endpoints and tooltip contents of one diagram, and turns pointer events into
//! [`RenderCommand`]s for a [`crate::Renderer`].

use crate::model::ChordDiagramLayout;
use serde::Serialize;
use taxochord_core::config::InteractionSettings;
use taxochord_core::{MetadataField, RepresentativeRecord};

pub const FULL_OPACITY: f64 = 1.0;

/// Fields shown on hover, in display order.
pub const TOOLTIP_FIELDS: [MetadataField; 4] = [
    MetadataField::Bodysite,
    MetadataField::Disease,
    MetadataField::Age,
    MetadataField::Gender,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Pointer entered group `group`'s arc at page position (`x`, `y`).
    Enter { group: usize, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "group", rename_all = "camelCase")]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(usize),
}

impl HighlightState {
    /// Pure transition function. Enters on out-of-range groups are ignored.
    pub fn next(self, event: &PointerEvent, group_count: usize) -> Self {
        match (self, event) {
            (_, PointerEvent::Enter { group, .. }) if *group < group_count => {
                Self::Highlighted(*group)
            }
            (Self::Highlighted(_), PointerEvent::Leave) => Self::Idle,
            (state, _) => state,
        }
    }

    pub fn highlighted(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Highlighted(i) => Some(i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipContent {
    pub entries: Vec<TooltipEntry>,
}

impl TooltipContent {
    pub fn from_representative(rep: Option<&RepresentativeRecord>) -> Self {
        let entries = TOOLTIP_FIELDS
            .iter()
            .map(|&field| TooltipEntry {
                name: field.display_name().to_string(),
                value: rep
                    .and_then(|r| r.field(field))
                    .map_or_else(|| field.placeholder(), str::to_string),
            })
            .collect();
        Self { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipView {
    pub x: f64,
    pub y: f64,
    pub content: TooltipContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum RenderCommand {
    SetRibbonOpacity { ribbon: usize, opacity: f64 },
    ShowTooltip { tooltip: TooltipView },
    MoveTooltip { x: f64, y: f64 },
    HideTooltip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RibbonEndpoints {
    pub source: usize,
    pub target: usize,
}

impl RibbonEndpoints {
    pub fn touches(&self, group: usize) -> bool {
        self.source == group || self.target == group
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: HighlightState,
    ribbons: Vec<RibbonEndpoints>,
    tooltips: Vec<TooltipContent>,
    dimmed_opacity: f64,
    tooltip_offset: f64,
    /// Anchored (offset already applied) tooltip position while highlighted.
    anchor: Option<(f64, f64)>,
}

impl InteractionController {
    pub fn new(layout: &ChordDiagramLayout, settings: &InteractionSettings) -> Self {
        let ribbons = layout
            .ribbons
            .iter()
            .map(|r| RibbonEndpoints {
                source: r.chord.source.index,
                target: r.chord.target.index,
            })
            .collect();
        Self::from_parts(ribbons, layout.tooltips.clone(), settings)
    }

    /// `tooltips` is indexed by group; its length is the group count.
    pub fn from_parts(
        ribbons: Vec<RibbonEndpoints>,
        tooltips: Vec<TooltipContent>,
        settings: &InteractionSettings,
    ) -> Self {
        Self {
            state: HighlightState::Idle,
            ribbons,
            tooltips,
            dimmed_opacity: settings.dimmed_opacity,
            tooltip_offset: settings.tooltip_offset,
            anchor: None,
        }
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn group_count(&self) -> usize {
        self.tooltips.len()
    }

    pub fn ribbon_count(&self) -> usize {
        self.ribbons.len()
    }

    pub fn ribbon_opacity(&self, ribbon: usize) -> f64 {
        match (self.state, self.ribbons.get(ribbon)) {
            (HighlightState::Highlighted(g), Some(r)) if !r.touches(g) => self.dimmed_opacity,
            _ => FULL_OPACITY,
        }
    }

    pub fn ribbon_opacities(&self) -> Vec<f64> {
        (0..self.ribbons.len())
            .map(|k| self.ribbon_opacity(k))
            .collect()
    }

    pub fn tooltip(&self) -> Option<TooltipView> {
        let group = self.state.highlighted()?;
        let (x, y) = self.anchor?;
        Some(TooltipView {
            x,
            y,
            content: self.tooltips.get(group)?.clone(),
        })
    }

    fn opacity_commands(&self) -> impl Iterator<Item = RenderCommand> + '_ {
        (0..self.ribbons.len()).map(|k| RenderCommand::SetRibbonOpacity {
            ribbon: k,
            opacity: self.ribbon_opacity(k),
        })
    }

    /// Applies one pointer event and returns the commands that bring a renderer up to date.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<RenderCommand> {
        let prev = self.state;
        let next = prev.next(&event, self.group_count());
        let mut out = Vec::new();

        match (prev, next, event) {
            (
                _,
                HighlightState::Highlighted(group),
                PointerEvent::Enter {
                    group: entered,
                    x,
                    y,
                },
            ) if entered == group => {
                tracing::trace!(group, "highlight");
                self.state = next;
                self.anchor = Some((x + self.tooltip_offset, y + self.tooltip_offset));
                out.extend(self.opacity_commands());
                if let Some(tooltip) = self.tooltip() {
                    out.push(RenderCommand::ShowTooltip { tooltip });
                }
            }
            (
                HighlightState::Highlighted(_),
                HighlightState::Highlighted(_),
                PointerEvent::Move { x, y },
            ) => {
                let anchored = (x + self.tooltip_offset, y + self.tooltip_offset);
                self.anchor = Some(anchored);
                out.push(RenderCommand::MoveTooltip {
                    x: anchored.0,
                    y: anchored.1,
                });
            }
            (HighlightState::Highlighted(_), HighlightState::Idle, _) => {
                tracing::trace!("highlight cleared");
                out.extend(self.clear());
            }
            _ => {}
        }
        out
    }

    /// Returns to `Idle`, restoring every ribbon. Emits nothing when already idle.
    pub fn clear(&mut self) -> Vec<RenderCommand> {
        if self.state == HighlightState::Idle {
            return Vec::new();
        }
        self.state = HighlightState::Idle;
        self.anchor = None;
        let mut out: Vec<RenderCommand> = self.opacity_commands().collect();
        out.push(RenderCommand::HideTooltip);
        out
    }
}
