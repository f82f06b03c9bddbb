use eframe::egui::Vec2;

use crate::cloud::{Link, NodeKind};
use crate::layout::LayoutParams;
use crate::util::separation_direction;

use super::Body;
use super::quadtree::ChargeCell;

const MIN_DISTANCE_SQ: f32 = 1.0;
const JIGGLE: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Spring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) distance: f32,
    pub(super) strength: f32,
    pub(super) bias: f32,
}

pub(super) fn build_springs(links: &[Link], kinds: &[NodeKind], params: &LayoutParams) -> Vec<Spring> {
    let mut degree = vec![0usize; kinds.len()];
    for link in links.iter().filter(|link| !link.is_self_loop()) {
        degree[link.source] += 1;
        degree[link.target] += 1;
    }

    links
        .iter()
        .filter(|link| !link.is_self_loop())
        .map(|link| {
            let source_degree = degree[link.source] as f32;
            let target_degree = degree[link.target] as f32;
            Spring {
                source: link.source,
                target: link.target,
                distance: params.link_distance_between(kinds[link.source], kinds[link.target]),
                strength: 1.0 / source_degree.min(target_degree),
                bias: source_degree / (source_degree + target_degree),
            }
        })
        .collect()
}

pub(super) fn apply_springs(springs: &[Spring], bodies: &mut [Body], alpha: f32) {
    for spring in springs {
        let source = bodies[spring.source];
        let target = bodies[spring.target];

        let mut delta = (target.position + target.velocity) - (source.position + source.velocity);
        if delta.length_sq() < JIGGLE * JIGGLE {
            delta = separation_direction(spring.source, spring.target) * JIGGLE;
        }
        let length = delta.length();
        let correction = delta * ((length - spring.distance) / length * alpha * spring.strength);

        bodies[spring.target].velocity -= correction * spring.bias;
        bodies[spring.source].velocity += correction * (1.0 - spring.bias);
    }
}

pub(super) fn apply_charge(
    bodies: &mut [Body],
    positions: &mut Vec<Vec2>,
    strength: f32,
    theta: f32,
    alpha: f32,
) {
    positions.clear();
    positions.extend(bodies.iter().map(|body| body.position));

    let Some(root) = ChargeCell::build(positions) else {
        return;
    };

    let scaled_strength = strength * alpha;
    let theta_sq = theta * theta;
    for (index, body) in bodies.iter_mut().enumerate() {
        let mut push = Vec2::ZERO;
        accumulate_charge(&root, index, positions, scaled_strength, theta_sq, &mut push);
        body.velocity += push;
    }
}

fn accumulate_charge(
    cell: &ChargeCell,
    index: usize,
    positions: &[Vec2],
    scaled_strength: f32,
    theta_sq: f32,
    push: &mut Vec2,
) {
    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.bodies {
            if other == index {
                continue;
            }
            let mut delta = positions[other] - point;
            if delta.length_sq() < JIGGLE * JIGGLE {
                delta = separation_direction(index, other) * JIGGLE;
            }
            *push += delta * (scaled_strength / softened(delta.length_sq()));
        }
        return;
    }

    let delta = cell.centroid - point;
    let distance_sq = delta.length_sq();
    let side = cell.square.side();
    if !cell.square.contains(point) && side * side < theta_sq * distance_sq {
        *push += delta * (scaled_strength * cell.count as f32 / softened(distance_sq));
        return;
    }

    for child in cell.children() {
        accumulate_charge(child, index, positions, scaled_strength, theta_sq, push);
    }
}

fn softened(distance_sq: f32) -> f32 {
    if distance_sq < MIN_DISTANCE_SQ {
        (MIN_DISTANCE_SQ * distance_sq).sqrt()
    } else {
        distance_sq
    }
}

pub(super) fn apply_centering(bodies: &mut [Body], center: Vec2, strength: f32) {
    if bodies.is_empty() {
        return;
    }

    let centroid = bodies
        .iter()
        .fold(Vec2::ZERO, |sum, body| sum + body.position)
        / bodies.len() as f32;
    let shift = (centroid - center) * strength;
    for body in bodies {
        body.position -= shift;
    }
}

pub(super) fn apply_axis_pull(bodies: &mut [Body], center: Vec2, strength: f32, alpha: f32) {
    for body in bodies {
        body.velocity += (center - body.position) * (strength * alpha);
    }
}
