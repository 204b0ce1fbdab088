//! Standalone SVG output.

mod path;

use crate::interaction::{InteractionController, TooltipView};
use crate::model::{Bounds, ChordDiagramLayout, GroupLayout, RibbonLayout};
use crate::renderer::{Renderer, draw_chord_diagram, sync_with_controller};
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes internal ids.
    pub diagram_id: Option<String>,
    /// Adds a `<title>` element.
    pub title: Option<String>,
}

/// Stringifies numbers for SVG attributes: at most 3 fractional digits, no `-0`.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn chord_css(id: &str) -> String {
    format!(
        "#{id}{{font-family:\"trebuchet ms\",verdana,arial,sans-serif;}}\
#{id} .chord{{transition:opacity 0.2s;}}\
#{id} .tooltip rect{{fill:rgba(0, 0, 0, 0.8);}}\
#{id} .tooltip text{{fill:#fff;font-size:14px;}}",
    )
}

#[derive(Debug, Clone)]
struct SvgRibbon {
    source: usize,
    target: usize,
    d: String,
    fill: String,
    stroke: String,
    opacity: f64,
}

#[derive(Debug, Clone)]
struct SvgTooltip {
    view: TooltipView,
    visible: bool,
}

/// [`Renderer`] that accumulates elements and serializes them in [`SvgRenderer::into_svg`].
///
/// Ribbon opacity and tooltip updates mutate already-drawn elements, so the document always
/// reflects the latest state.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    id: String,
    title: Option<String>,
    bounds: Bounds,
    center: (f64, f64),
    ribbon_fill_opacity: f64,
    groups: String,
    ribbons: Vec<SvgRibbon>,
    tooltip: Option<SvgTooltip>,
}

impl SvgRenderer {
    pub fn new(options: &SvgRenderOptions) -> Self {
        Self {
            id: options
                .diagram_id
                .clone()
                .unwrap_or_else(|| "taxochord".to_string()),
            title: options.title.clone(),
            bounds: Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            },
            center: (0.0, 0.0),
            ribbon_fill_opacity: 1.0,
            groups: String::new(),
            ribbons: Vec::new(),
            tooltip: None,
        }
    }

    pub fn into_svg(self) -> String {
        let id = escape_xml(&self.id);
        let width = self.bounds.width().max(1.0);
        let height = self.bounds.height().max(1.0);

        let mut out = String::new();
        let _ = write!(
            &mut out,
            r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" role="graphics-document document" aria-roledescription="chord">"#,
            x = fmt(self.bounds.min_x),
            y = fmt(self.bounds.min_y),
            w = fmt(width),
            h = fmt(height),
        );
        if let Some(t) = self.title.as_deref() {
            let _ = write!(
                &mut out,
                r#"<title id="chart-title-{id}">{text}</title>"#,
                text = escape_xml(t)
            );
        }
        let _ = write!(&mut out, "<style>{}</style>", chord_css(&id));

        let _ = write!(
            &mut out,
            r#"<g transform="translate({},{})">"#,
            fmt(self.center.0),
            fmt(self.center.1)
        );
        out.push_str(r#"<g class="groups">"#);
        out.push_str(&self.groups);
        out.push_str("</g>");

        let _ = write!(
            &mut out,
            r#"<g class="ribbons" fill-opacity="{}">"#,
            fmt(self.ribbon_fill_opacity)
        );
        for (i, r) in self.ribbons.iter().enumerate() {
            let _ = write!(
                &mut out,
                r#"<path class="chord" data-index="{i}" data-source="{s}" data-target="{t}" d="{d}" style="fill: {fill}; stroke: {stroke}; opacity: {op};"/>"#,
                s = r.source,
                t = r.target,
                d = r.d,
                fill = escape_xml(&r.fill),
                stroke = escape_xml(&r.stroke),
                op = fmt(r.opacity),
            );
        }
        out.push_str("</g></g>");

        if let Some(tip) = &self.tooltip {
            render_tooltip(&mut out, tip);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn render_tooltip(out: &mut String, tip: &SvgTooltip) {
    const LINE_HEIGHT: f64 = 18.0;
    const PADDING: f64 = 8.0;
    const CHAR_WIDTH: f64 = 8.0;

    let view = &tip.view;
    let lines: Vec<(String, String)> = view
        .content
        .entries
        .iter()
        .map(|e| (format!("{}:", e.name), e.value.clone()))
        .collect();
    let max_chars = lines
        .iter()
        .map(|(k, v)| k.chars().count() + 1 + v.chars().count())
        .max()
        .unwrap_or(0);
    let width = max_chars as f64 * CHAR_WIDTH + PADDING * 2.0;
    let height = lines.len() as f64 * LINE_HEIGHT + PADDING * 2.0;

    let _ = write!(
        out,
        r#"<g class="tooltip" transform="translate({},{})" visibility="{}">"#,
        fmt(view.x),
        fmt(view.y),
        if tip.visible { "visible" } else { "hidden" }
    );
    let _ = write!(
        out,
        r#"<rect width="{}" height="{}" rx="4" ry="4"/>"#,
        fmt(width),
        fmt(height)
    );
    for (i, (name, value)) in lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}"><tspan font-weight="bold">{name}</tspan> {value}</text>"#,
            x = fmt(PADDING),
            y = fmt(PADDING + (i as f64 + 1.0) * LINE_HEIGHT - 4.0),
            name = escape_xml(name),
            value = escape_xml(value),
        );
    }
    out.push_str("</g>");
}

impl Renderer for SvgRenderer {
    fn begin(&mut self, layout: &ChordDiagramLayout) {
        self.bounds = layout.bounds;
        self.center = (layout.center_x, layout.center_y);
        self.ribbon_fill_opacity = layout.ribbon_fill_opacity;
        self.groups.clear();
        self.ribbons.clear();
        self.tooltip = None;
    }

    fn draw_group_arc(&mut self, group: &GroupLayout, inner_radius: f64, outer_radius: f64) {
        let d = path::annular_arc(
            inner_radius,
            outer_radius,
            group.group.start_angle,
            group.group.end_angle,
        );
        let _ = write!(
            &mut self.groups,
            r#"<g class="group" data-index="{i}"><path class="group-arc" d="{d}" style="fill: {fill}; stroke: {stroke};"/>"#,
            i = group.group.index,
            fill = escape_xml(&group.fill),
            stroke = escape_xml(&group.stroke),
        );
    }

    fn draw_label(&mut self, group: &GroupLayout, font_size: f64) {
        let label = &group.label;
        let _ = write!(
            &mut self.groups,
            r#"<text transform="{t}" style="text-anchor: {a}; alignment-baseline: middle; font-size: {fs}px;">"#,
            t = label.transform(fmt),
            a = label.anchor.as_str(),
            fs = fmt(font_size),
        );
        for line in &label.lines {
            let _ = write!(
                &mut self.groups,
                r#"<tspan x="0" dy="{}em">{}</tspan>"#,
                fmt(line.dy_em),
                escape_xml(&line.text)
            );
        }
        self.groups.push_str("</text></g>");
    }

    fn draw_ribbon(&mut self, _index: usize, ribbon: &RibbonLayout, radius: f64) {
        let c = &ribbon.chord;
        self.ribbons.push(SvgRibbon {
            source: c.source.index,
            target: c.target.index,
            d: path::ribbon(
                radius,
                c.source.start_angle,
                c.source.end_angle,
                c.target.start_angle,
                c.target.end_angle,
            ),
            fill: ribbon.fill.clone(),
            stroke: ribbon.stroke.clone(),
            opacity: 1.0,
        });
    }

    fn set_ribbon_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(r) = self.ribbons.get_mut(index) {
            r.opacity = opacity;
        }
    }

    fn show_tooltip(&mut self, tooltip: &TooltipView) {
        self.tooltip = Some(SvgTooltip {
            view: tooltip.clone(),
            visible: true,
        });
    }

    fn move_tooltip(&mut self, x: f64, y: f64) {
        if let Some(t) = self.tooltip.as_mut() {
            t.view.x = x;
            t.view.y = y;
        }
    }

    fn hide_tooltip(&mut self) {
        if let Some(t) = self.tooltip.as_mut() {
            t.visible = false;
        }
    }
}

/// Renders `layout` as SVG, baking in the controller's highlight state when one is given.
pub fn render_chord_svg(
    layout: &ChordDiagramLayout,
    controller: Option<&InteractionController>,
    options: &SvgRenderOptions,
) -> String {
    let mut renderer = SvgRenderer::new(options);
    draw_chord_diagram(&mut renderer, layout);
    if let Some(controller) = controller {
        sync_with_controller(&mut renderer, controller);
    }
    renderer.finish();
    renderer.into_svg()
}
