mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use tracing::debug;

use crate::cloud::{CloudGraph, NodeKind};
use crate::layout::LayoutParams;
use crate::util::phyllotaxis;
use forces::{Spring, apply_axis_pull, apply_centering, apply_charge, apply_springs, build_springs};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
    pub drag_alpha_target: f32,
    pub theta: f32,
    pub axis_strength: f32,
    pub center_strength: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
            theta: 0.9,
            axis_strength: 0.1,
            center_strength: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationPhase {
    Idle,
    Running,
    Settling,
}

impl SimulationPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Settling => "settling",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub pin: Option<Vec2>,
}

pub struct Simulation {
    config: SimulationConfig,
    params: LayoutParams,
    kinds: Vec<NodeKind>,
    springs: Vec<Spring>,
    bodies: Vec<Body>,
    alpha: f32,
    alpha_target: f32,
    phase: SimulationPhase,
    center: Vec2,
    clamp_size: Option<Vec2>,
    scratch: Vec<Vec2>,
}

impl Simulation {
    pub fn new(
        graph: &CloudGraph,
        params: LayoutParams,
        viewport: Vec2,
        config: SimulationConfig,
    ) -> Self {
        let kinds = graph.kinds();
        let center = viewport * 0.5;
        let bodies = (0..kinds.len())
            .map(|index| Body {
                position: center + phyllotaxis(index),
                velocity: Vec2::ZERO,
                pin: None,
            })
            .collect();

        Self {
            springs: build_springs(&graph.links, &kinds, &params),
            config,
            params,
            kinds,
            bodies,
            alpha: 1.0,
            alpha_target: 0.0,
            phase: SimulationPhase::Idle,
            center,
            clamp_size: None,
            scratch: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn kind(&self, index: usize) -> Option<NodeKind> {
        self.kinds.get(index).copied()
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.get(index).map(|body| body.position)
    }

    pub fn start(&mut self) {
        if self.phase == SimulationPhase::Idle {
            debug!(bodies = self.bodies.len(), springs = self.springs.len(), "simulation started");
            self.phase = SimulationPhase::Running;
        }
    }

    pub fn restart(&mut self) {
        self.phase = SimulationPhase::Running;
    }

    pub fn reheat(&mut self) {
        self.alpha = 1.0;
        self.restart();
    }

    pub fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    pub fn is_settled(&self) -> bool {
        self.alpha_target < self.config.alpha_min && self.alpha < self.config.alpha_min
    }

    pub fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = Some(position);
        }
    }

    pub fn unpin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = None;
        }
    }

    pub fn recenter(&mut self, viewport: Vec2) {
        self.center = viewport * 0.5;
    }

    pub fn resize(&mut self, viewport: Vec2) {
        debug!(width = viewport.x, height = viewport.y, "simulation resized");
        self.recenter(viewport);
        self.clamp_size = Some(viewport);
        self.clamp_bodies();
        self.reheat();
    }

    pub fn tick(&mut self) {
        if self.phase == SimulationPhase::Idle {
            return;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;

        apply_springs(&self.springs, &mut self.bodies, alpha);
        apply_charge(
            &mut self.bodies,
            &mut self.scratch,
            self.params.charge_strength,
            self.config.theta,
            alpha,
        );
        apply_centering(&mut self.bodies, self.center, self.config.center_strength);
        apply_axis_pull(&mut self.bodies, self.center, self.config.axis_strength, alpha);

        let retain = 1.0 - self.config.velocity_decay;
        for body in &mut self.bodies {
            if let Some(pin) = body.pin {
                body.position = pin;
                body.velocity = Vec2::ZERO;
            } else {
                body.velocity *= retain;
                body.position += body.velocity;
            }
        }
        self.clamp_bodies();

        self.phase = if self.is_settled() {
            SimulationPhase::Settling
        } else {
            SimulationPhase::Running
        };
    }

    pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
        self.start();
        let mut ticks = 0;
        while ticks < max_ticks && !self.is_settled() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    fn clamp_bodies(&mut self) {
        let Some(size) = self.clamp_size else {
            return;
        };

        let radius = self.params.node_radius;
        let (min_x, max_x) = clamp_range(size.x, radius);
        let (min_y, max_y) = clamp_range(size.y, radius);
        for body in &mut self.bodies {
            body.position = vec2(
                body.position.x.clamp(min_x, max_x),
                body.position.y.clamp(min_y, max_y),
            );
        }
    }
}

/// `[radius, extent - radius]`, collapsing to the midpoint when the surface is too small.
fn clamp_range(extent: f32, radius: f32) -> (f32, f32) {
    if extent - radius >= radius {
        (radius, extent - radius)
    } else {
        let middle = (extent * 0.5).max(0.0);
        (middle, middle)
    }
}
