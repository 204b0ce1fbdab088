//! JSON-backed configuration.
//!
//! [`ChordConfig`] is a loosely-typed JSON object (so that config files and CLI overrides can be
//! merged with a single deep-merge), and [`ChordOptions`] is the validated, typed view the
//! pipeline and renderer actually consume.

use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct ChordConfig(Value);

impl Default for ChordConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl ChordConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// The built-in defaults, as a config value that overrides can be merged onto.
    pub fn defaults() -> Self {
        Self(json!({
            "maxDatasets": 10,
            "taxonPrefix": "k__",
            "chord": {
                "padAngle": 0.05,
                "sortSubgroupsDescending": true
            },
            "interaction": {
                "dimmedOpacity": 0.1,
                "tooltipOffset": 10.0
            },
            "render": {
                "width": 900.0,
                "height": 900.0,
                "padding": 50.0,
                "outerRadiusFactor": 0.4,
                "arcThickness": 30.0,
                "labelOffset": 10.0,
                "labelLineHeight": 1.1,
                "fontSize": 12.0,
                "ribbonFillOpacity": 0.7
            }
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                message: "config root must be a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.lookup(dotted_path)?.as_u64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // `from_value` accepts any JSON; coerce a non-object root so this never panics.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSettings {
    pub pad_angle: f64,
    pub sort_subgroups_descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSettings {
    pub dimmed_opacity: f64,
    /// Added to both pointer coordinates when anchoring the tooltip.
    pub tooltip_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub outer_radius_factor: f64,
    pub arc_thickness: f64,
    pub label_offset: f64,
    /// In `em`.
    pub label_line_height: f64,
    pub font_size: f64,
    pub ribbon_fill_opacity: f64,
}

impl RenderSettings {
    pub fn outer_radius(&self) -> f64 {
        self.width.min(self.height) * self.outer_radius_factor
    }

    pub fn inner_radius(&self) -> f64 {
        (self.outer_radius() - self.arc_thickness).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordOptions {
    pub max_datasets: usize,
    pub taxon_prefix: String,
    pub chord: ChordSettings,
    pub interaction: InteractionSettings,
    pub render: RenderSettings,
}

impl Default for ChordOptions {
    fn default() -> Self {
        Self {
            max_datasets: 10,
            taxon_prefix: "k__".to_string(),
            chord: ChordSettings {
                pad_angle: 0.05,
                sort_subgroups_descending: true,
            },
            interaction: InteractionSettings {
                dimmed_opacity: 0.1,
                tooltip_offset: 10.0,
            },
            render: RenderSettings {
                width: 900.0,
                height: 900.0,
                padding: 50.0,
                outer_radius_factor: 0.4,
                arc_thickness: 30.0,
                label_offset: 10.0,
                label_line_height: 1.1,
                font_size: 12.0,
                ribbon_fill_opacity: 0.7,
            },
        }
    }
}

impl ChordOptions {
    /// Resolves overrides in `config` on top of the built-in defaults.
    pub fn from_config(config: &ChordConfig) -> Result<Self> {
        let mut merged = ChordConfig::defaults();
        merged.deep_merge(config.as_value());

        let d = Self::default();
        let max_datasets = match merged.lookup("maxDatasets") {
            None => d.max_datasets,
            Some(v) => v.as_u64().ok_or_else(|| Error::InvalidConfig {
                message: format!("maxDatasets must be a non-negative integer, got {v}"),
            })? as usize,
        };
        let taxon_prefix = merged
            .get_str("taxonPrefix")
            .unwrap_or(&d.taxon_prefix)
            .to_string();
        if taxon_prefix.is_empty() {
            return Err(Error::InvalidConfig {
                message: "taxonPrefix must not be empty".to_string(),
            });
        }

        let opts = Self {
            max_datasets,
            taxon_prefix,
            chord: ChordSettings {
                pad_angle: non_negative(&merged, "chord.padAngle", d.chord.pad_angle)?,
                sort_subgroups_descending: merged
                    .get_bool("chord.sortSubgroupsDescending")
                    .unwrap_or(d.chord.sort_subgroups_descending),
            },
            interaction: InteractionSettings {
                dimmed_opacity: opacity(
                    &merged,
                    "interaction.dimmedOpacity",
                    d.interaction.dimmed_opacity,
                )?,
                tooltip_offset: finite(
                    &merged,
                    "interaction.tooltipOffset",
                    d.interaction.tooltip_offset,
                )?,
            },
            render: RenderSettings {
                width: non_negative(&merged, "render.width", d.render.width)?,
                height: non_negative(&merged, "render.height", d.render.height)?,
                padding: non_negative(&merged, "render.padding", d.render.padding)?,
                outer_radius_factor: non_negative(
                    &merged,
                    "render.outerRadiusFactor",
                    d.render.outer_radius_factor,
                )?,
                arc_thickness: non_negative(
                    &merged,
                    "render.arcThickness",
                    d.render.arc_thickness,
                )?,
                label_offset: finite(&merged, "render.labelOffset", d.render.label_offset)?,
                label_line_height: non_negative(
                    &merged,
                    "render.labelLineHeight",
                    d.render.label_line_height,
                )?,
                font_size: non_negative(&merged, "render.fontSize", d.render.font_size)?,
                ribbon_fill_opacity: opacity(
                    &merged,
                    "render.ribbonFillOpacity",
                    d.render.ribbon_fill_opacity,
                )?,
            },
        };
        Ok(opts)
    }
}

fn finite(cfg: &ChordConfig, path: &str, default: f64) -> Result<f64> {
    let Some(raw) = cfg.lookup(path) else {
        return Ok(default);
    };
    match raw.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidConfig {
            message: format!("{path} must be a finite number, got {raw}"),
        }),
    }
}

fn non_negative(cfg: &ChordConfig, path: &str, default: f64) -> Result<f64> {
    let v = finite(cfg, path, default)?;
    if v < 0.0 {
        return Err(Error::InvalidConfig {
            message: format!("{path} must be >= 0, got {v}"),
        });
    }
    Ok(v)
}

fn opacity(cfg: &ChordConfig, path: &str, default: f64) -> Result<f64> {
    let v = non_negative(cfg, path, default)?;
    if v > 1.0 {
        return Err(Error::InvalidConfig {
            message: format!("{path} must be within [0, 1], got {v}"),
        });
    }
    Ok(v)
}
