use crate::chord::ChordGroup;
use serde::Serialize;
use std::f64::consts::PI;
use taxochord_core::LABEL_SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLine {
    pub text: String,
    /// Vertical offset relative to the previous line, in `em`.
    pub dy_em: f64,
}

/// Radial label next to a group arc.
///
/// Applied as `rotate(rotate_deg) translate(radius) rotate(flipped ? 180 : 0)`. Labels past the
/// half-circle are flipped and end-anchored so the text stays upright.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPlacement {
    pub angle: f64,
    pub rotate_deg: f64,
    pub radius: f64,
    pub flipped: bool,
    pub anchor: TextAnchor,
    pub lines: Vec<LabelLine>,
}

impl LabelPlacement {
    pub fn transform(&self, fmt: impl Fn(f64) -> String) -> String {
        format!(
            "rotate({}) translate({}) rotate({})",
            fmt(self.rotate_deg),
            fmt(self.radius),
            if self.flipped { 180 } else { 0 }
        )
    }
}

pub fn place_label(
    group: &ChordGroup,
    label: &str,
    outer_radius: f64,
    label_offset: f64,
    line_height_em: f64,
) -> LabelPlacement {
    let angle = group.mid_angle();
    let flipped = angle > PI;
    let lines = label
        .split(LABEL_SEPARATOR)
        .enumerate()
        .map(|(idx, text)| LabelLine {
            text: text.to_string(),
            dy_em: if idx == 0 { 0.0 } else { line_height_em },
        })
        .collect();
    LabelPlacement {
        angle,
        rotate_deg: angle.to_degrees() - 90.0,
        radius: outer_radius + label_offset,
        flipped,
        anchor: if flipped {
            TextAnchor::End
        } else {
            TextAnchor::Start
        },
        lines,
    }
}
