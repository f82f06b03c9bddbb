use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2, vec2};
use tracing::warn;

use crate::layout::NodeStyle;
use crate::physics::SimulationPhase;
use crate::scene::{NodeSprite, Scene};

use super::super::ViewModel;
use super::super::render_utils::{
    DRAGGED_OUTLINE, EDGE_COLOR, LABEL_COLOR, RESOURCE_FILL, STACK_OUTLINE, circle_visible,
    draw_background,
};

impl ViewModel {
    fn sync_viewport(&mut self, size: Vec2) {
        if self.viewport == Some(size) {
            return;
        }

        let previous = self.viewport.replace(size);
        if size.x <= 0.0 || size.y <= 0.0 {
            warn!(width = size.x, height = size.y, "graph surface has no area");
            return;
        }

        match previous {
            None => self.simulation.recenter(size),
            Some(_) => self.simulation.resize(size),
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.sync_viewport(rect.size());

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, &self.transform);

        let origin = rect.min;
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_node_drag(ui, origin, &response);
        self.handle_graph_pan(&response);
        let hovered = self.hovered_node(origin, &response);
        self.update_cursor(ui, hovered);

        if self.simulation.phase() == SimulationPhase::Running {
            self.simulation.tick();
        }

        let scene = Scene::build(&self.graph, &self.simulation, &self.groups);
        let scale = self.transform.scale;
        let to_screen = |world: Vec2| self.transform.world_to_screen(origin, world);

        let edge_stroke = Stroke::new((1.5 * scale.sqrt()).clamp(0.6, 3.0), EDGE_COLOR);
        let edge_font = FontId::proportional(scene.edge_font_size * scale);
        for edge in &scene.edges {
            if let Some(segment) = edge.segment {
                painter.line_segment([to_screen(segment.start), to_screen(segment.end)], edge_stroke);
                painter.add(Shape::convex_polygon(
                    segment.arrow.iter().map(|point| to_screen(*point)).collect(),
                    EDGE_COLOR,
                    Stroke::NONE,
                ));
            }
            if let Some(label) = edge.label {
                painter.text(
                    to_screen(label.position),
                    Align2::CENTER_CENTER,
                    label.text,
                    edge_font.clone(),
                    LABEL_COLOR,
                );
            }
        }

        let dragged = self.drag.dragged_node();
        for node in &scene.nodes {
            let center = to_screen(node.center);
            let extent = node.style.half_extent() * scale;
            if !circle_visible(rect, center, extent * 2.0 + node.style.label_offset() * scale) {
                continue;
            }

            self.paint_node(ui, &painter, node, center, scale, dragged == Some(node.index));
            painter.text(
                to_screen(node.label_anchor),
                Align2::CENTER_TOP,
                node.name,
                FontId::proportional(node.style.font_size() * scale),
                LABEL_COLOR,
            );
        }

        if let Some(node) = hovered.and_then(|index| self.graph.nodes.get(index))
            && dragged.is_none()
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}  |  {}", node.display_name(), node.kind.label(), node.id),
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }

        if self.simulation.phase() == SimulationPhase::Running || dragged.is_some() {
            ui.ctx().request_repaint();
        }
    }

    fn paint_node(
        &self,
        ui: &Ui,
        painter: &egui::Painter,
        node: &NodeSprite<'_>,
        center: Pos2,
        scale: f32,
        dragged: bool,
    ) {
        let icon = self.icons.get(node.index).and_then(Option::as_deref);
        let outline = if dragged {
            Stroke::new(2.0, DRAGGED_OUTLINE)
        } else {
            Stroke::new(1.0, STACK_OUTLINE)
        };

        match node.style {
            NodeStyle::Stack { icon_side, .. } => {
                let side = icon_side * scale;
                let icon_rect = Rect::from_center_size(center, vec2(side, side));
                painter.rect_stroke(icon_rect, 4.0, outline, egui::StrokeKind::Inside);
                if let Some(uri) = icon {
                    egui::Image::new(uri)
                        .show_loading_spinner(false)
                        .paint_at(ui, icon_rect);
                }
            }
            NodeStyle::Resource {
                radius,
                icon_diameter,
                ..
            } => {
                painter.circle_filled(center, radius * scale, RESOURCE_FILL);
                if let Some(uri) = icon {
                    let diameter = icon_diameter * scale;
                    egui::Image::new(uri)
                        .corner_radius(diameter * 0.5)
                        .show_loading_spinner(false)
                        .paint_at(ui, Rect::from_center_size(center, vec2(diameter, diameter)));
                }
                if dragged {
                    painter.circle_stroke(center, radius * scale, outline);
                }
            }
        }
    }
}
