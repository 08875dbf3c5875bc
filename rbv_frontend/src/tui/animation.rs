use crate::tui::layout::{Point, TreeLayout};
use rbv_config::{AnimationSettings, Color, LayoutSettings, ThemeSettings};
use rbv_tree::{Color as NodeColor, NodeId, TreeSnapshot};
use std::fmt;
use std::time::Duration;

/// One node as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub label: String,
    pub position: Point,
    pub fill: Color,
    pub parent: Option<NodeId>,
}

/// Everything needed to draw one frame, in world coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn from_snapshot<K: fmt::Display>(
        snapshot: &TreeSnapshot<K>,
        layout: &LayoutSettings,
        theme: &ThemeSettings,
    ) -> Self {
        let positions = TreeLayout::compute(snapshot, layout);
        let nodes = snapshot
            .nodes
            .iter()
            .filter_map(|node| {
                let position = positions.position(node.id)?;
                Some(SceneNode {
                    id: node.id,
                    label: node.key.to_string(),
                    position,
                    fill: match node.color {
                        NodeColor::Red => theme.red,
                        NodeColor::Black => theme.black,
                    },
                    parent: node.parent,
                })
            })
            .collect();

        Self { nodes }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// `(child, parent)` endpoints of every edge.
    pub fn edges(&self) -> Vec<(Point, Point)> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let parent = self.node(node.parent?)?;
                Some((node.position, parent.position))
            })
            .collect()
    }
}

pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    if t >= 1.0 {
        return to;
    }
    let t = t.max(0.0);
    let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Color::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
    }
}

/// Interpolation from the scene on screen to the scene of the next
/// checkpoint. Positions and colors run on separate clocks.
#[derive(Debug, Clone)]
pub struct Transition {
    from: Scene,
    to: Scene,
    move_duration: Duration,
    color_duration: Duration,
}

impl Transition {
    pub fn new(from: Scene, to: Scene, settings: &AnimationSettings) -> Self {
        let (move_duration, color_duration) = if settings.enabled {
            (settings.move_duration(), settings.color_duration())
        } else {
            (Duration::ZERO, Duration::ZERO)
        };

        Self {
            from,
            to,
            move_duration,
            color_duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.move_duration.max(self.color_duration)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration()
    }

    pub fn target(&self) -> &Scene {
        &self.to
    }

    pub fn into_target(self) -> Scene {
        self.to
    }

    /// Frame `elapsed` into the transition. Nodes that were not on screen
    /// before slide in from the root position.
    pub fn frame_at(&self, elapsed: Duration) -> Scene {
        let move_t = progress(elapsed, self.move_duration);
        let color_t = progress(elapsed, self.color_duration);

        let nodes = self
            .to
            .nodes
            .iter()
            .map(|target| {
                let (start_pos, start_fill) = match self.from.node(target.id) {
                    Some(prev) => (prev.position, prev.fill),
                    None => (Point::ORIGIN, target.fill),
                };
                SceneNode {
                    position: start_pos.lerp(target.position, move_t),
                    fill: lerp_color(start_fill, target.fill, color_t),
                    ..target.clone()
                }
            })
            .collect();

        Scene { nodes }
    }
}
