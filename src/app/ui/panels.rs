use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use tracing::debug;

use crate::interaction::ViewTransform;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, input: &Path) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("cloud-cartographer");
                    ui.separator();
                    ui.label(format!("source: {}", input.display()));
                    ui.label(format!("stacks: {}", self.graph.stack_count()));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("links: {}", self.graph.link_count()));
                    if ui.button("Reheat").clicked() {
                        debug!("layout reheated from toolbar");
                        self.simulation.reheat();
                    }
                    if ui.button("Reset view").clicked() {
                        self.transform = ViewTransform::default();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "{}  |  alpha {:.3}  |  zoom {:.2}x",
                            self.simulation.phase().label(),
                            self.simulation.alpha(),
                            self.transform.scale
                        ));
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
