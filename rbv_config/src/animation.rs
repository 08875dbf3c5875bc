use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted duration for a single transition
pub const MAX_TRANSITION_MILLIS: u64 = 10_000;

/// Animation timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    /// Animate between checkpoints; when false every checkpoint is drawn once
    pub enabled: bool,
    /// Position interpolation per checkpoint
    pub move_millis: u64,
    /// Color interpolation per checkpoint
    pub color_millis: u64,
    /// Delay between frames
    pub frame_millis: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            move_millis: 300,
            color_millis: 200,
            frame_millis: 16,
        }
    }
}

impl AnimationSettings {
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_millis)
    }

    pub fn color_duration(&self) -> Duration {
        Duration::from_millis(self.color_millis)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }

    /// Time one checkpoint takes to play out
    pub fn transition_duration(&self) -> Duration {
        if self.enabled {
            self.move_duration().max(self.color_duration())
        } else {
            Duration::ZERO
        }
    }
}
