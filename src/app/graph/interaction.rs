use eframe::egui::{self, Pos2, Rect, Ui};

use crate::interaction::node_at;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.transform.zoom_about(rect.min, pointer, zoom_factor);
    }

    pub(in crate::app) fn handle_node_drag(
        &mut self,
        ui: &Ui,
        origin: Pos2,
        response: &egui::Response,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let press = ui
                .input(|input| input.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(press) = press {
                let world = self.transform.screen_to_world(origin, press);
                match node_at(&self.simulation, world) {
                    Some(node) => self.drag.begin(&mut self.simulation, node, world),
                    None => self.panning = true,
                }
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if self.drag.dragged_node().is_some() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let world = self.transform.screen_to_world(origin, pointer);
                    self.drag.update(&mut self.simulation, world);
                }
            } else if self.panning {
                self.transform.pan_by(response.drag_delta());
            }
        }

        if response.drag_stopped() {
            self.drag.end(&mut self.simulation);
            self.panning = false;
        }
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.transform.pan_by(response.drag_delta());
        }
    }

    pub(in crate::app) fn hovered_node(&self, origin: Pos2, response: &egui::Response) -> Option<usize> {
        let pointer = response.hover_pos()?;
        node_at(&self.simulation, self.transform.screen_to_world(origin, pointer))
    }

    pub(in crate::app) fn update_cursor(&self, ui: &Ui, hovered: Option<usize>) {
        let cursor = if self.drag.dragged_node().is_some() {
            egui::CursorIcon::Grabbing
        } else if hovered.is_some() {
            egui::CursorIcon::Grab
        } else {
            return;
        };

        ui.output_mut(|output| {
            output.cursor_icon = cursor;
        });
    }
}
