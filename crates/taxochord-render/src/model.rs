use crate::chord::{Chord, ChordGroup};
use crate::interaction::TooltipContent;
use crate::labels::LabelPlacement;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLayout {
    #[serde(flatten)]
    pub group: ChordGroup,
    pub dataset_name: String,
    pub label: LabelPlacement,
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonLayout {
    #[serde(flatten)]
    pub chord: Chord,
    /// Ribbons take the color of their target group.
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDiagramLayout {
    /// Full canvas, padding included. The diagram is centered in it.
    pub bounds: Bounds,
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub font_size: f64,
    pub ribbon_fill_opacity: f64,
    pub groups: Vec<GroupLayout>,
    pub ribbons: Vec<RibbonLayout>,
    /// Hover metadata, indexed like `groups`.
    pub tooltips: Vec<TooltipContent>,
}

impl ChordDiagramLayout {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
