use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{debug, error, info};

use crate::cloud::{CloudGraph, LoadError, load_graph};
use crate::interaction::{DragController, ViewTransform};
use crate::layout::{EdgeGroups, LayoutParams};
use crate::physics::{Simulation, SimulationConfig};
use crate::util::{document_dir, icon_uri};

mod graph;
mod render_utils;
mod ui;

pub struct CartographerApp {
    input: PathBuf,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CloudGraph, LoadError>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: CloudGraph,
    groups: EdgeGroups,
    simulation: Simulation,
    transform: ViewTransform,
    drag: DragController,
    icons: Vec<Option<String>>,
    viewport: Option<Vec2>,
    panning: bool,
}

impl CartographerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, input: PathBuf) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let state = Self::start_load(input.clone());
        Self { input, state }
    }

    fn start_load(input: PathBuf) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(load_graph(&input));
        });

        AppState::Loading { rx }
    }
}

impl ViewModel {
    fn new(graph: CloudGraph, initial_size: Vec2, document_dir: &Path) -> Self {
        let params = LayoutParams::for_node_count(graph.node_count());
        let groups = EdgeGroups::build(&graph.links);
        let mut simulation =
            Simulation::new(&graph, params, initial_size, SimulationConfig::default());
        simulation.start();
        info!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            groups = groups.group_count(),
            largest_group = groups.largest_group(),
            radius = params.node_radius,
            link_distance = params.link_distance,
            "layout started"
        );

        for (link_index, link) in graph.links.iter().enumerate() {
            let parallel = groups.group(link.source, link.target);
            if parallel.len() > 1 && parallel.first() == Some(&link_index) {
                debug!(key = %graph.link_key(link), count = parallel.len(), "parallel links");
            }
        }

        let icons = graph
            .nodes
            .iter()
            .map(|node| icon_uri(&node.image, document_dir))
            .collect();

        Self {
            graph,
            groups,
            simulation,
            transform: ViewTransform::default(),
            drag: DragController::default(),
            icons,
            viewport: None,
            panning: false,
        }
    }
}

impl eframe::App for CartographerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(graph)) => {
                        let size = ctx.available_rect().size();
                        let document_dir = document_dir(&self.input);
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            graph,
                            size,
                            &document_dir,
                        ))));
                    }
                    Ok(Err(load_error)) => {
                        error!(error = %load_error, "failed to load graph");
                        transition = Some(AppState::Error(load_error.to_string()));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        error!("graph loader exited without a result");
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading stack graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load stack graph");
                    ui.add_space(6.0);
                    ui.label(format!("source: {}", self.input.display()));
                    ui.label(message.as_str());
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.input);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
