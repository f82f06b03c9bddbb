use eframe::egui::{Pos2, Vec2};
use tracing::debug;

use crate::physics::Simulation;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn world_to_screen(&self, origin: Pos2, world: Vec2) -> Pos2 {
        origin + self.translate + world * self.scale
    }

    pub fn screen_to_world(&self, origin: Pos2, screen: Pos2) -> Vec2 {
        (screen - origin - self.translate) / self.scale
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Scales by `factor` while keeping the world point under `anchor` fixed on screen.
    pub fn zoom_about(&mut self, origin: Pos2, anchor: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let world = self.screen_to_world(origin, anchor);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.translate = anchor - origin - world * self.scale;
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    node: usize,
    pointer_origin: Vec2,
    node_origin: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn dragged_node(&self) -> Option<usize> {
        self.active.map(|drag| drag.node)
    }

    pub fn begin(&mut self, simulation: &mut Simulation, node: usize, pointer: Vec2) {
        let Some(node_origin) = simulation.position(node) else {
            return;
        };

        if simulation.alpha_target() <= 0.0 {
            let target = simulation.config().drag_alpha_target;
            simulation.set_alpha_target(target);
            simulation.restart();
        }
        simulation.pin(node, node_origin);
        debug!(node, "drag started");

        self.active = Some(ActiveDrag {
            node,
            pointer_origin: pointer,
            node_origin,
        });
    }

    pub fn update(&mut self, simulation: &mut Simulation, pointer: Vec2) {
        if let Some(drag) = self.active {
            simulation.pin(drag.node, drag.node_origin + (pointer - drag.pointer_origin));
        }
    }

    pub fn end(&mut self, simulation: &mut Simulation) {
        if let Some(drag) = self.active.take() {
            simulation.set_alpha_target(0.0);
            simulation.unpin(drag.node);
            debug!(node = drag.node, "drag ended");
        }
    }
}

pub fn node_at(simulation: &Simulation, point: Vec2) -> Option<usize> {
    let params = *simulation.params();
    simulation
        .bodies()
        .iter()
        .enumerate()
        .rev()
        .find(|(index, body)| {
            let offset = point - body.position;
            simulation
                .kind(*index)
                .is_some_and(|kind| kind.style(&params).contains(offset.x, offset.y))
        })
        .map(|(index, _)| index)
}
