use rbv_config::LayoutSettings;
use rbv_tree::{NodeId, TreeSnapshot};

/// A position in world units; y grows upwards, so deeper nodes are lower.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Point, t: f32) -> Point {
        if t >= 1.0 {
            return to;
        }
        let t = t.max(0.0);
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// World position of every node in a snapshot, indexed by node id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeLayout {
    positions: Vec<Option<Point>>,
}

impl TreeLayout {
    /// Places the root at the origin and every child one level lower,
    /// shifted sideways by `horizontal_spread / 2^depth`.
    pub fn compute<K>(snapshot: &TreeSnapshot<K>, settings: &LayoutSettings) -> Self {
        let mut positions: Vec<Option<Point>> = vec![None; snapshot.len()];

        for (id, depth) in snapshot.preorder() {
            let node = &snapshot.nodes[id];
            let position = match node.parent.and_then(|p| positions[p].map(|pos| (p, pos))) {
                None => Point::ORIGIN,
                Some((parent_id, parent_pos)) => {
                    let offset = settings.horizontal_spread / 2f32.powi(depth as i32);
                    let is_left = snapshot.nodes[parent_id].left == Some(id);
                    Point {
                        x: if is_left {
                            parent_pos.x - offset
                        } else {
                            parent_pos.x + offset
                        },
                        y: parent_pos.y - settings.level_height,
                    }
                }
            };
            positions[id] = Some(position);
        }

        Self { positions }
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(id).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(id, pos)| pos.map(|p| (id, p)))
    }

    /// Smallest box holding every node as `(min, max)` corners.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.iter().fold(None, |acc, (_, p)| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )),
        })
    }
}
