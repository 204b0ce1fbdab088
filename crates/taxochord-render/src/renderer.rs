use crate::interaction::{InteractionController, RenderCommand, TooltipView};
use crate::model::{Bounds, ChordDiagramLayout, GroupLayout, RibbonLayout};

/// Drawing surface for a chord diagram.
///
/// Draw calls arrive in a fixed order (`begin`, group arcs and labels, ribbons) and are followed
/// by any number of style/visibility updates coming from an [`InteractionController`], then
/// `finish`.
pub trait Renderer {
    fn begin(&mut self, layout: &ChordDiagramLayout);
    fn draw_group_arc(&mut self, group: &GroupLayout, inner_radius: f64, outer_radius: f64);
    fn draw_label(&mut self, group: &GroupLayout, font_size: f64);
    fn draw_ribbon(&mut self, index: usize, ribbon: &RibbonLayout, radius: f64);
    fn set_ribbon_opacity(&mut self, index: usize, opacity: f64);
    fn show_tooltip(&mut self, tooltip: &TooltipView);
    fn move_tooltip(&mut self, x: f64, y: f64);
    fn hide_tooltip(&mut self);

    /// Called once drawing and any replayed commands are done.
    fn finish(&mut self) {}

    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::SetRibbonOpacity { ribbon, opacity } => {
                self.set_ribbon_opacity(*ribbon, *opacity)
            }
            RenderCommand::ShowTooltip { tooltip } => self.show_tooltip(tooltip),
            RenderCommand::MoveTooltip { x, y } => self.move_tooltip(*x, *y),
            RenderCommand::HideTooltip => self.hide_tooltip(),
        }
    }

    fn apply_all(&mut self, commands: &[RenderCommand]) {
        for c in commands {
            self.apply(c);
        }
    }
}

/// Issues every draw call for `layout`. An empty layout only produces `begin`.
pub fn draw_chord_diagram(renderer: &mut dyn Renderer, layout: &ChordDiagramLayout) {
    renderer.begin(layout);
    for group in &layout.groups {
        renderer.draw_group_arc(group, layout.inner_radius, layout.outer_radius);
        renderer.draw_label(group, layout.font_size);
    }
    for (i, ribbon) in layout.ribbons.iter().enumerate() {
        renderer.draw_ribbon(i, ribbon, layout.inner_radius);
    }
}

/// Brings a freshly drawn renderer in line with the controller's current state.
pub fn sync_with_controller(renderer: &mut dyn Renderer, controller: &InteractionController) {
    for (i, opacity) in controller.ribbon_opacities().into_iter().enumerate() {
        renderer.set_ribbon_opacity(i, opacity);
    }
    match controller.tooltip() {
        Some(tooltip) => renderer.show_tooltip(&tooltip),
        None => renderer.hide_tooltip(),
    }
}

/// Canvas bounds for a container of `width` × `height` with `padding` on every side.
pub fn canvas_bounds(width: f64, height: f64, padding: f64) -> Bounds {
    Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: width + padding * 2.0,
        max_y: height + padding * 2.0,
    }
}
