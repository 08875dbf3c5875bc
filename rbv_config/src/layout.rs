use serde::{Deserialize, Serialize};

/// Upper bound for every layout distance and scale
pub const MAX_LAYOUT_VALUE: f32 = 1_000.0;

/// Node placement, in world units and terminal cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSettings {
    /// Horizontal offset between the root and each of its children. Halves
    /// at every further depth.
    pub horizontal_spread: f32,
    /// Vertical distance between consecutive depths
    pub level_height: f32,
    /// Terminal columns per world unit
    pub columns_per_unit: f32,
    /// Terminal rows per world unit
    pub rows_per_unit: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            horizontal_spread: 10.0,
            level_height: 1.0,
            columns_per_unit: 4.0,
            rows_per_unit: 2.0,
        }
    }
}

impl LayoutSettings {
    pub(crate) fn positive_fields(&self) -> [(&'static str, f32); 4] {
        [
            ("layout.horizontal_spread", self.horizontal_spread),
            ("layout.level_height", self.level_height),
            ("layout.columns_per_unit", self.columns_per_unit),
            ("layout.rows_per_unit", self.rows_per_unit),
        ]
    }
}
