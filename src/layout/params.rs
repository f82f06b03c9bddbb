use crate::cloud::NodeKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub node_radius: f32,
    pub link_distance: f32,
    pub charge_strength: f32,
    pub edge_font_size: f32,
}

impl LayoutParams {
    pub fn for_node_count(node_count: usize) -> Self {
        let root = (node_count.max(1) as f32).sqrt();
        let node_radius = (100.0 / root).clamp(6.0, 30.0);

        Self {
            node_radius,
            link_distance: (500.0 / root).clamp(80.0, 200.0),
            charge_strength: -(500.0 / root).max(150.0),
            edge_font_size: (node_radius / 5.0).max(6.0),
        }
    }

    pub fn link_distance_between(&self, source: NodeKind, target: NodeKind) -> f32 {
        match (source, target) {
            (NodeKind::Stack, NodeKind::Stack) => self.link_distance * 2.0,
            _ => self.link_distance,
        }
    }

    pub fn arrow_length(&self) -> f32 {
        (self.node_radius * 0.4).max(4.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeStyle {
    Stack {
        icon_side: f32,
        label_offset: f32,
        font_size: f32,
    },
    Resource {
        radius: f32,
        icon_diameter: f32,
        label_offset: f32,
        font_size: f32,
    },
}

impl NodeStyle {
    pub fn label_offset(self) -> f32 {
        match self {
            Self::Stack { label_offset, .. } | Self::Resource { label_offset, .. } => label_offset,
        }
    }

    pub fn font_size(self) -> f32 {
        match self {
            Self::Stack { font_size, .. } | Self::Resource { font_size, .. } => font_size,
        }
    }

    pub fn half_extent(self) -> f32 {
        match self {
            Self::Stack { icon_side, .. } => icon_side * 0.5,
            Self::Resource { radius, .. } => radius,
        }
    }

    pub fn contains(self, offset_x: f32, offset_y: f32) -> bool {
        match self {
            Self::Stack { icon_side, .. } => {
                let half = icon_side * 0.5;
                offset_x.abs() <= half && offset_y.abs() <= half
            }
            Self::Resource { radius, .. } => {
                (offset_x * offset_x) + (offset_y * offset_y) <= radius * radius
            }
        }
    }
}

impl NodeKind {
    pub fn style(self, params: &LayoutParams) -> NodeStyle {
        let radius = params.node_radius;
        match self {
            Self::Stack => NodeStyle::Stack {
                icon_side: radius * 4.0,
                label_offset: radius * 3.3,
                font_size: (radius / 5.0).max(6.0),
            },
            Self::Resource => NodeStyle::Resource {
                radius,
                icon_diameter: radius * 2.0,
                label_offset: radius * 2.3,
                font_size: (radius / 5.0).max(4.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn single_node_hits_upper_clamps() {
        let params = LayoutParams::for_node_count(1);
        assert_eq!(params.node_radius, 30.0);
        assert_eq!(params.link_distance, 200.0);
        assert_eq!(params.charge_strength, -500.0);
    }

    #[test]
    fn params_depend_only_on_derived_sizes() {
        assert_eq!(LayoutParams::for_node_count(0), LayoutParams::for_node_count(1));
        assert_ne!(LayoutParams::for_node_count(1), LayoutParams::for_node_count(25));
    }

    #[test]
    fn twenty_five_nodes_use_unclamped_formula() {
        let params = LayoutParams::for_node_count(25);
        assert_eq!(params.node_radius, 20.0);
        assert_eq!(params.link_distance, 100.0);
        assert_eq!(params.charge_strength, -150.0);
        assert_eq!(params.edge_font_size, 6.0);
    }

    #[test]
    fn large_graphs_hit_lower_clamps() {
        let params = LayoutParams::for_node_count(10_000);
        assert_eq!(params.node_radius, 6.0);
        assert_eq!(params.link_distance, 80.0);
        assert_eq!(params.charge_strength, -150.0);
    }

    #[test]
    fn stack_pairs_double_the_link_distance() {
        let params = LayoutParams::for_node_count(25);
        assert_eq!(
            params.link_distance_between(NodeKind::Stack, NodeKind::Stack),
            200.0
        );
        assert_eq!(
            params.link_distance_between(NodeKind::Stack, NodeKind::Resource),
            100.0
        );
        assert_eq!(
            params.link_distance_between(NodeKind::Resource, NodeKind::Stack),
            100.0
        );
        assert_eq!(
            params.link_distance_between(NodeKind::Resource, NodeKind::Resource),
            100.0
        );
    }

    #[test]
    fn styles_follow_node_kind() {
        let params = LayoutParams::for_node_count(1);

        let stack = NodeKind::Stack.style(&params);
        assert!(matches!(stack, NodeStyle::Stack { icon_side, .. } if icon_side == 120.0));
        assert!((stack.label_offset() - 99.0).abs() < 1e-4);
        assert_eq!(stack.font_size(), 6.0);
        assert_eq!(stack.half_extent(), 60.0);

        let resource = NodeKind::Resource.style(&params);
        assert_eq!(resource.half_extent(), 30.0);
        assert!((resource.label_offset() - 69.0).abs() < 1e-4);
        assert!(resource.contains(20.0, 20.0));
        assert!(!resource.contains(25.0, 25.0));
        assert!(stack.contains(55.0, -55.0));
    }

    #[test]
    fn small_radius_keeps_minimum_font_sizes() {
        let params = LayoutParams::for_node_count(400);
        assert_eq!(NodeKind::Stack.style(&params).font_size(), 6.0);
        assert_eq!(NodeKind::Resource.style(&params).font_size(), 4.0);
    }

    proptest! {
        #[test]
        fn prop_params_stay_within_clamps(count in 1usize..50_000) {
            let params = LayoutParams::for_node_count(count);
            prop_assert!((6.0..=30.0).contains(&params.node_radius));
            prop_assert!((80.0..=200.0).contains(&params.link_distance));
            prop_assert!(params.charge_strength <= -150.0);
        }

        #[test]
        fn prop_params_never_grow_with_count(count in 1usize..50_000, extra in 1usize..1_000) {
            let smaller = LayoutParams::for_node_count(count);
            let larger = LayoutParams::for_node_count(count + extra);
            prop_assert!(larger.node_radius <= smaller.node_radius);
            prop_assert!(larger.link_distance <= smaller.link_distance);
        }
    }
}
