use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 24;
const COINCIDENT_SPAN: f32 = 1e-3;

#[derive(Clone, Copy, Debug)]
pub(super) struct Square {
    pub(super) center: Vec2,
    pub(super) half_side: f32,
}

impl Square {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_side: (span * 0.5) + 1.0,
        })
    }

    pub(super) fn side(self) -> f32 {
        self.half_side * 2.0
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let offset = (point - self.center).abs();
        offset.x <= self.half_side && offset.y <= self.half_side
    }

    fn quadrant(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_side * 0.5;
        let sign_x = if quadrant & 1 == 0 { -1.0 } else { 1.0 };
        let sign_y = if quadrant & 2 == 0 { -1.0 } else { 1.0 };
        Self {
            center: self.center + vec2(sign_x * quarter, sign_y * quarter),
            half_side: quarter,
        }
    }
}

pub(super) struct ChargeCell {
    pub(super) square: Square,
    pub(super) centroid: Vec2,
    pub(super) count: usize,
    pub(super) bodies: Vec<usize>,
    pub(super) children: [Option<Box<ChargeCell>>; 4],
}

impl ChargeCell {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let square = Square::enclosing(positions)?;
        let bodies = (0..positions.len()).collect();
        Some(Self::subdivide(square, bodies, positions, 0))
    }

    fn subdivide(square: Square, bodies: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let count = bodies.len();
        let centroid = if count == 0 {
            square.center
        } else {
            bodies
                .iter()
                .fold(Vec2::ZERO, |sum, &index| sum + positions[index])
                / count as f32
        };

        let mut cell = Self {
            square,
            centroid,
            count,
            bodies,
            children: std::array::from_fn(|_| None),
        };
        if depth >= MAX_DEPTH || count <= LEAF_CAPACITY || coincident(&cell.bodies, positions) {
            return cell;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &cell.bodies {
            buckets[square.quadrant(positions[index])].push(index);
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                cell.children[quadrant] = Some(Box::new(Self::subdivide(
                    square.child(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        cell.bodies.clear();
        cell
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(super) fn children(&self) -> impl Iterator<Item = &ChargeCell> {
        self.children.iter().filter_map(|child| child.as_deref())
    }
}

fn coincident(bodies: &[usize], positions: &[Vec2]) -> bool {
    let Some((&first, rest)) = bodies.split_first() else {
        return true;
    };
    let anchor = positions[first];
    rest.iter().all(|&index| {
        let offset = (positions[index] - anchor).abs();
        offset.x < COINCIDENT_SPAN && offset.y < COINCIDENT_SPAN
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(side: usize) -> Vec<Vec2> {
        (0..side * side)
            .map(|index| vec2((index % side) as f32 * 10.0, (index / side) as f32 * 10.0))
            .collect()
    }

    fn leaf_total(cell: &ChargeCell) -> usize {
        if cell.is_leaf() {
            cell.bodies.len()
        } else {
            cell.children().map(leaf_total).sum()
        }
    }

    #[test]
    fn every_body_lands_in_exactly_one_leaf() {
        let positions = grid(9);
        let root = ChargeCell::build(&positions).expect("non-empty tree");

        assert_eq!(root.count, 81);
        assert!(!root.is_leaf());
        assert_eq!(leaf_total(&root), 81);
        assert!((root.centroid - vec2(40.0, 40.0)).length() < 1e-3);
    }

    #[test]
    fn coincident_bodies_stay_in_one_leaf() {
        let positions = vec![vec2(5.0, 5.0); 30];
        let root = ChargeCell::build(&positions).expect("non-empty tree");

        assert!(root.is_leaf());
        assert_eq!(root.bodies.len(), 30);
    }

    fn largest_leaf(cell: &ChargeCell) -> usize {
        if cell.is_leaf() {
            cell.bodies.len()
        } else {
            cell.children().map(largest_leaf).max().unwrap_or(0)
        }
    }

    #[test]
    fn far_outlier_does_not_flatten_the_cluster() {
        let mut positions = (0..500)
            .map(|index| vec2(400.0, 300.0) + crate::util::phyllotaxis(index))
            .collect::<Vec<_>>();
        positions.push(vec2(5000.0, 5000.0));
        let root = ChargeCell::build(&positions).expect("non-empty tree");

        assert_eq!(leaf_total(&root), 501);
        assert!(largest_leaf(&root) <= LEAF_CAPACITY);
    }

    #[test]
    fn cluster_between_corner_bodies_is_split() {
        let mut positions = (0..200)
            .map(|index| vec2(500.0 + (index % 20) as f32 * 3.0, 500.0 + (index / 20) as f32 * 3.0))
            .collect::<Vec<_>>();
        positions.push(vec2(0.0, 0.0));
        positions.push(vec2(1000.0, 1000.0));
        let root = ChargeCell::build(&positions).expect("non-empty tree");

        assert_eq!(leaf_total(&root), 202);
        assert!(largest_leaf(&root) <= LEAF_CAPACITY);
    }

    #[test]
    fn empty_or_invalid_input_builds_nothing() {
        assert!(ChargeCell::build(&[]).is_none());
        assert!(ChargeCell::build(&[vec2(f32::NAN, 0.0)]).is_none());
    }

    #[test]
    fn square_quadrants_match_children() {
        let square = Square {
            center: Vec2::ZERO,
            half_side: 8.0,
        };
        for point in [vec2(-1.0, -1.0), vec2(1.0, -1.0), vec2(-1.0, 1.0), vec2(1.0, 1.0)] {
            let child = square.child(square.quadrant(point));
            assert!(child.contains(point));
            assert_eq!(child.side(), 8.0);
        }
    }
}
