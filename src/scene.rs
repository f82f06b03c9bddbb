use eframe::egui::{Vec2, vec2};

use crate::cloud::CloudGraph;
use crate::layout::{EdgeGroups, LABEL_SPACING, LayoutParams, NodeStyle, label_position};
use crate::physics::Simulation;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite<'a> {
    pub index: usize,
    pub center: Vec2,
    pub style: NodeStyle,
    pub name: &'a str,
    pub image: &'a str,
    pub label_anchor: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    pub start: Vec2,
    pub end: Vec2,
    /// Tip, then the two barb corners.
    pub arrow: [Vec2; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLabel<'a> {
    pub text: &'a str,
    pub position: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite<'a> {
    pub segment: Option<EdgeSegment>,
    pub label: Option<EdgeLabel<'a>>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene<'a> {
    pub edges: Vec<EdgeSprite<'a>>,
    pub nodes: Vec<NodeSprite<'a>>,
    pub edge_font_size: f32,
}

impl<'a> Scene<'a> {
    pub fn build(graph: &'a CloudGraph, simulation: &Simulation, groups: &EdgeGroups) -> Self {
        let params = simulation.params();
        let bodies = simulation.bodies();

        let nodes = graph
            .nodes
            .iter()
            .zip(bodies)
            .enumerate()
            .map(|(index, (node, body))| {
                let style = node.kind.style(params);
                NodeSprite {
                    index,
                    center: body.position,
                    style,
                    name: node.display_name(),
                    image: &node.image,
                    label_anchor: body.position + vec2(0.0, style.label_offset()),
                }
            })
            .collect::<Vec<_>>();

        let edges = graph
            .links
            .iter()
            .enumerate()
            .filter_map(|(link_index, link)| {
                let source = nodes.get(link.source)?;
                let target = nodes.get(link.target)?;
                let offset = groups.slot(link_index).offset(LABEL_SPACING);
                Some(EdgeSprite {
                    segment: edge_segment(source, target, params),
                    label: link.label.as_deref().map(|text| EdgeLabel {
                        text,
                        position: label_position(source.center, target.center, offset),
                    }),
                })
            })
            .collect();

        Self {
            edges,
            nodes,
            edge_font_size: params.edge_font_size,
        }
    }
}

fn edge_segment(source: &NodeSprite<'_>, target: &NodeSprite<'_>, params: &LayoutParams) -> Option<EdgeSegment> {
    let delta = target.center - source.center;
    let length = delta.length();
    let arrow_length = params.arrow_length();
    let source_trim = source.style.half_extent();
    let target_trim = target.style.half_extent();
    if length <= source_trim + target_trim + arrow_length {
        return None;
    }

    let direction = delta / length;
    let normal = vec2(-direction.y, direction.x);
    let tip = target.center - direction * target_trim;
    let base = tip - direction * arrow_length;
    let half_width = arrow_length * 0.5;

    Some(EdgeSegment {
        start: source.center + direction * source_trim,
        end: base,
        arrow: [tip, base + normal * half_width, base - normal * half_width],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::parse_graph;
    use crate::physics::SimulationConfig;

    fn pinned_scene_inputs() -> (CloudGraph, Simulation, EdgeGroups) {
        let graph = parse_graph(
            r#"{
                "nodes": [
                    {"id": "s0", "type": "stack", "name": "network", "image": "cfn.svg"},
                    {"id": "s1", "type": "stack", "name": "service", "image": "cfn.svg"},
                    {"id": "s1-r0", "type": "resource", "name": "", "image": "lambda.svg"}
                ],
                "links": [
                    {"source": "s1", "target": "s0", "label": "VpcId"},
                    {"source": "s1", "target": "s0", "label": "SubnetA"},
                    {"source": "s1", "target": "s0", "label": "SubnetB"},
                    {"source": "s1-r0", "target": "s1"}
                ]
            }"#,
        )
        .expect("valid graph");
        let params = LayoutParams::for_node_count(1);
        let mut simulation =
            Simulation::new(&graph, params, vec2(1000.0, 1000.0), SimulationConfig::default());
        simulation.start();
        simulation.pin(0, vec2(100.0, 500.0));
        simulation.pin(1, vec2(700.0, 500.0));
        simulation.pin(2, vec2(700.0, 800.0));
        simulation.tick();
        let groups = EdgeGroups::build(&graph.links);
        (graph, simulation, groups)
    }

    #[test]
    fn nodes_carry_kind_specific_geometry() {
        let (graph, simulation, groups) = pinned_scene_inputs();
        let scene = Scene::build(&graph, &simulation, &groups);

        let stack = &scene.nodes[0];
        assert!(matches!(stack.style, NodeStyle::Stack { icon_side, .. } if icon_side == 120.0));
        assert!((stack.label_anchor.y - (500.0 + 99.0)).abs() < 1e-3);

        let resource = &scene.nodes[2];
        assert!(matches!(
            resource.style,
            NodeStyle::Resource { radius, icon_diameter, .. } if radius == 30.0 && icon_diameter == 60.0
        ));
        assert!((resource.label_anchor.y - (800.0 + 69.0)).abs() < 1e-3);
        assert_eq!(resource.name, "s1-r0");
        assert_eq!(resource.image, "lambda.svg");
    }

    #[test]
    fn parallel_labels_fan_out_around_midpoint() {
        let (graph, simulation, groups) = pinned_scene_inputs();
        let scene = Scene::build(&graph, &simulation, &groups);

        let ys = scene.edges[..3]
            .iter()
            .map(|edge| edge.label.expect("labelled").position)
            .collect::<Vec<_>>();
        assert_eq!(ys[0], vec2(400.0, 506.0));
        assert_eq!(ys[1], vec2(400.0, 500.0));
        assert_eq!(ys[2], vec2(400.0, 494.0));
        assert!(scene.edges[3].label.is_none());
    }

    #[test]
    fn segment_is_trimmed_to_outlines_and_arrow_points_at_target() {
        let (graph, simulation, groups) = pinned_scene_inputs();
        let scene = Scene::build(&graph, &simulation, &groups);

        let segment = scene.edges[0].segment.expect("far apart");
        assert_eq!(segment.start, vec2(640.0, 500.0));
        assert_eq!(segment.arrow[0], vec2(160.0, 500.0));
        assert_eq!(segment.end, vec2(172.0, 500.0));
        assert_eq!(segment.arrow[1].x, 172.0);
        assert_eq!((segment.arrow[1].y - segment.arrow[2].y).abs(), 12.0);

        let upward = scene.edges[3].segment.expect("far apart");
        assert_eq!(upward.arrow[0], vec2(700.0, 560.0));
    }

    #[test]
    fn overlapping_nodes_draw_no_segment() {
        let (graph, mut simulation, groups) = pinned_scene_inputs();
        simulation.pin(1, vec2(150.0, 500.0));
        simulation.tick();

        let scene = Scene::build(&graph, &simulation, &groups);
        assert!(scene.edges[0].segment.is_none());
        assert!(scene.edges[0].label.is_some());
    }
}
