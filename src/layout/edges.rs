use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::cloud::Link;

pub const LABEL_SPACING: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSlot {
    pub index: usize,
    pub group_size: usize,
}

impl EdgeSlot {
    /// Centres the group's labels around the midpoint: offsets across a group sum to zero.
    pub fn offset(self, spacing: f32) -> f32 {
        (self.index as f32 * spacing) - ((self.group_size as f32 - 1.0) * spacing / 2.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct EdgeGroups {
    groups: HashMap<(usize, usize), Vec<usize>>,
    slots: Vec<EdgeSlot>,
}

impl EdgeGroups {
    pub fn build(links: &[Link]) -> Self {
        let mut groups: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut positions = Vec::with_capacity(links.len());
        for (link_index, link) in links.iter().enumerate() {
            let members = groups.entry((link.source, link.target)).or_default();
            positions.push(members.len());
            members.push(link_index);
        }

        let slots = links
            .iter()
            .zip(positions)
            .map(|(link, index)| EdgeSlot {
                index,
                group_size: groups
                    .get(&(link.source, link.target))
                    .map_or(1, |members| members.len()),
            })
            .collect();

        Self { groups, slots }
    }

    pub fn slot(&self, link_index: usize) -> EdgeSlot {
        self.slots.get(link_index).copied().unwrap_or(EdgeSlot {
            index: 0,
            group_size: 1,
        })
    }

    pub fn group(&self, source: usize, target: usize) -> &[usize] {
        self.groups
            .get(&(source, target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn largest_group(&self) -> usize {
        self.groups.values().map(Vec::len).max().unwrap_or(0)
    }
}

pub fn label_position(start: Vec2, end: Vec2, offset: f32) -> Vec2 {
    let midpoint = (start + end) * 0.5;
    let delta = end - start;
    let length = delta.length();
    if length <= 0.0001 {
        return midpoint + vec2(0.0, offset);
    }

    midpoint + vec2(-delta.y, delta.x) / length * offset
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn link(source: usize, target: usize) -> Link {
        Link {
            source,
            target,
            label: None,
        }
    }

    #[test]
    fn three_parallel_links_are_centred() {
        let links = vec![link(0, 1), link(2, 1), link(0, 1), link(0, 1)];
        let groups = EdgeGroups::build(&links);

        let offsets = [0, 2, 3]
            .iter()
            .map(|&index| groups.slot(index).offset(LABEL_SPACING))
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![-6.0, 0.0, 6.0]);
        assert_eq!(groups.group(0, 1), &[0, 2, 3]);
        assert_eq!(
            groups.slot(1),
            EdgeSlot {
                index: 0,
                group_size: 1,
            }
        );
        assert_eq!(groups.slot(1).offset(LABEL_SPACING), 0.0);
    }

    #[test]
    fn direction_matters_for_grouping() {
        let links = vec![link(0, 1), link(1, 0)];
        let groups = EdgeGroups::build(&links);

        assert_eq!(groups.group_count(), 2);
        assert_eq!(groups.largest_group(), 1);
        assert!(groups.group(1, 2).is_empty());
    }

    #[test]
    fn label_sits_on_the_edge_normal() {
        let start = vec2(0.0, 0.0);
        let end = vec2(10.0, 0.0);

        assert_eq!(label_position(start, end, 0.0), vec2(5.0, 0.0));
        assert_eq!(label_position(start, end, 6.0), vec2(5.0, 6.0));
        assert_eq!(label_position(start, end, -6.0), vec2(5.0, -6.0));
    }

    #[test]
    fn coincident_endpoints_offset_vertically() {
        let point = vec2(3.0, 4.0);
        assert_eq!(label_position(point, point, 6.0), vec2(3.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_group_offsets_are_symmetric(size in 1usize..40) {
            let links = (0..size).map(|_| link(4, 7)).collect::<Vec<_>>();
            let groups = EdgeGroups::build(&links);
            let offsets = (0..size)
                .map(|index| groups.slot(index).offset(LABEL_SPACING))
                .collect::<Vec<_>>();

            let sum: f32 = offsets.iter().sum();
            prop_assert!(sum.abs() < 1e-3);
            for index in 0..size {
                prop_assert!((offsets[index] + offsets[size - 1 - index]).abs() < 1e-4);
            }
        }
    }
}
