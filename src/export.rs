use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{Vec2, vec2};
use svg::Document;
use svg::node::element::{Circle, ClipPath, Definitions, Group, Image, Line, Polygon, Rectangle, Text};
use tracing::info;

use crate::cloud::CloudGraph;
use crate::layout::{EdgeGroups, LayoutParams, NodeStyle};
use crate::physics::{Simulation, SimulationConfig};
use crate::scene::{NodeSprite, Scene};
use crate::util::icon_uri;

const BACKGROUND: &str = "#13171d";
const EDGE_COLOR: &str = "#8a96a3";
const LABEL_COLOR: &str = "#eef0f2";
const RESOURCE_FILL: &str = "#2b3a4a";

pub fn export_svg(
    graph: &CloudGraph,
    document_dir: &Path,
    size: Vec2,
    max_ticks: usize,
    output: &Path,
) -> Result<()> {
    let simulation = settled_layout(graph, size, max_ticks);
    let groups = EdgeGroups::build(&graph.links);
    let scene = Scene::build(graph, &simulation, &groups);
    let document = render_document(&scene, size, document_dir);
    svg::save(output, &document)
        .with_context(|| format!("failed to write SVG to {}", output.display()))?;
    info!(output = %output.display(), "wrote SVG");
    Ok(())
}

fn settled_layout(graph: &CloudGraph, size: Vec2, max_ticks: usize) -> Simulation {
    let params = LayoutParams::for_node_count(graph.node_count());
    let mut simulation = Simulation::new(graph, params, size, SimulationConfig::default());
    simulation.resize(size);
    let ticks = simulation.run_until_settled(max_ticks);
    info!(
        ticks,
        settled = simulation.is_settled(),
        alpha = simulation.alpha(),
        "layout finished"
    );
    simulation
}

pub fn render_document(scene: &Scene<'_>, size: Vec2, document_dir: &Path) -> Document {
    let mut definitions = Definitions::new();
    let mut edges = Group::new()
        .set("class", "links")
        .set("stroke", EDGE_COLOR)
        .set("stroke-width", 1.5);
    let mut edge_labels = Group::new()
        .set("class", "link-labels")
        .set("fill", LABEL_COLOR)
        .set("font-family", "sans-serif")
        .set("font-size", scene.edge_font_size)
        .set("text-anchor", "middle");
    let mut nodes = Group::new().set("class", "nodes");
    let mut node_labels = Group::new()
        .set("class", "node-labels")
        .set("fill", LABEL_COLOR)
        .set("font-family", "sans-serif")
        .set("text-anchor", "middle");

    for edge in &scene.edges {
        if let Some(segment) = edge.segment {
            edges = edges
                .add(
                    Line::new()
                        .set("x1", segment.start.x)
                        .set("y1", segment.start.y)
                        .set("x2", segment.end.x)
                        .set("y2", segment.end.y),
                )
                .add(
                    Polygon::new()
                        .set("points", polygon_points(&segment.arrow))
                        .set("fill", EDGE_COLOR),
                );
        }
        if let Some(label) = edge.label {
            edge_labels = edge_labels.add(
                Text::new(label.text)
                    .set("x", label.position.x)
                    .set("y", label.position.y),
            );
        }
    }

    for node in &scene.nodes {
        let href = icon_uri(node.image, document_dir);
        let (shape, clip) = node_shape(node, href.as_deref());
        if let Some(clip) = clip {
            definitions = definitions.add(clip);
        }
        nodes = nodes.add(shape);
        node_labels = node_labels.add(
            Text::new(node.name)
                .set("x", node.label_anchor.x)
                .set("y", node.label_anchor.y)
                .set("font-size", node.style.font_size()),
        );
    }

    Document::new()
        .set("width", size.x)
        .set("height", size.y)
        .set("viewBox", (0.0, 0.0, size.x, size.y))
        .add(definitions)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", BACKGROUND),
        )
        .add(edges)
        .add(edge_labels)
        .add(nodes)
        .add(node_labels)
}

fn node_shape(node: &NodeSprite<'_>, href: Option<&str>) -> (Group, Option<ClipPath>) {
    match node.style {
        NodeStyle::Stack { icon_side, .. } => {
            let corner = node.center - vec2(icon_side, icon_side) * 0.5;
            let group = Group::new().set("class", "stack");
            let Some(href) = href else {
                let outline = Rectangle::new()
                    .set("x", corner.x)
                    .set("y", corner.y)
                    .set("width", icon_side)
                    .set("height", icon_side)
                    .set("fill", "none")
                    .set("stroke", EDGE_COLOR);
                return (group.add(outline), None);
            };
            let icon = Image::new()
                .set("href", href)
                .set("x", corner.x)
                .set("y", corner.y)
                .set("width", icon_side)
                .set("height", icon_side);
            (group.add(icon), None)
        }
        NodeStyle::Resource {
            radius,
            icon_diameter,
            ..
        } => {
            let disc = Circle::new()
                .set("cx", node.center.x)
                .set("cy", node.center.y)
                .set("r", radius)
                .set("fill", RESOURCE_FILL);
            let group = Group::new().set("class", "resource").add(disc);
            let Some(href) = href else {
                return (group, None);
            };

            let clip_id = format!("node-clip-{}", node.index);
            let clip = ClipPath::new().set("id", clip_id.as_str()).add(
                Circle::new()
                    .set("cx", node.center.x)
                    .set("cy", node.center.y)
                    .set("r", icon_diameter * 0.5),
            );
            let corner = node.center - vec2(icon_diameter, icon_diameter) * 0.5;
            let icon = Image::new()
                .set("href", href)
                .set("x", corner.x)
                .set("y", corner.y)
                .set("width", icon_diameter)
                .set("height", icon_diameter)
                .set("clip-path", format!("url(#{clip_id})"));
            (group.add(icon), Some(clip))
        }
    }
}

fn polygon_points(points: &[Vec2]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}
