use crate::tui::animation::Scene;
use crate::tui::layout::Point;
use rbv_config::{Color, LayoutSettings};

const EDGE_CHAR: char = '.';

// Cohen-Sutherland region codes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// Maps world coordinates onto terminal cells. The root sits centered on
/// `origin_row`; one world unit spans `columns_per_unit` x `rows_per_unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub origin_col: f32,
    pub origin_row: f32,
    pub columns_per_unit: f32,
    pub rows_per_unit: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, settings: &LayoutSettings) -> Self {
        Self {
            width,
            height,
            origin_col: f32::from(width) / 2.0,
            origin_row: 1.0,
            columns_per_unit: settings.columns_per_unit,
            rows_per_unit: settings.rows_per_unit,
        }
    }

    /// Cell under `point`, possibly far off-canvas. Out-of-range values
    /// saturate at the `i64` limits.
    pub fn to_cell(&self, point: Point) -> (i64, i64) {
        let col = f64::from(self.origin_col) + f64::from(point.x) * f64::from(self.columns_per_unit);
        let row = f64::from(self.origin_row) - f64::from(point.y) * f64::from(self.rows_per_unit);
        (col.round() as i64, row.round() as i64)
    }
}

/// Character grid a frame is rasterized into before it reaches the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    /// Writes one cell; anything off-canvas is dropped.
    pub fn put(&mut self, col: i64, row: i64, cell: Cell) {
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = usize::from(row) * usize::from(self.width) + usize::from(col);
        self.cells[idx] = cell;
    }

    pub fn put_str(&mut self, col: i64, row: i64, text: &str, fg: Option<Color>, bold: bool) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = i64::try_from(offset) else {
                break;
            };
            self.put(col.saturating_add(offset), row, Cell { ch, fg, bold });
        }
    }

    /// Bresenham line between two cells, endpoints included. The segment is
    /// clipped to the canvas first, so far-away endpoints cost nothing.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), cell: Cell) {
        let Some((from, to)) = self.clip_line(from, to) else {
            return;
        };

        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, cell);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn outcode(&self, x: f64, y: f64) -> u8 {
        let max_x = f64::from(self.width) - 1.0;
        let max_y = f64::from(self.height) - 1.0;
        let mut code = INSIDE;
        if x < 0.0 {
            code |= LEFT;
        } else if x > max_x {
            code |= RIGHT;
        }
        if y < 0.0 {
            code |= ABOVE;
        } else if y > max_y {
            code |= BELOW;
        }
        code
    }

    /// Cohen-Sutherland clip against the canvas. Returns the visible part of
    /// the segment in cell coordinates, or `None` when nothing is visible.
    fn clip_line(&self, from: (i64, i64), to: (i64, i64)) -> Option<((i64, i64), (i64, i64))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = f64::from(self.width) - 1.0;
        let max_y = f64::from(self.height) - 1.0;

        let (mut x0, mut y0) = (from.0 as f64, from.1 as f64);
        let (mut x1, mut y1) = (to.0 as f64, to.1 as f64);
        let mut code0 = self.outcode(x0, y0);
        let mut code1 = self.outcode(x1, y1);

        // each pass moves one endpoint onto a canvas edge
        for _ in 0..8 {
            if code0 | code1 == INSIDE {
                let cell = |x: f64, y: f64| {
                    (x.round().clamp(0.0, max_x) as i64, y.round().clamp(0.0, max_y) as i64)
                };
                return Some((cell(x0, y0), cell(x1, y1)));
            }
            if code0 & code1 != INSIDE {
                return None;
            }

            let out = if code0 != INSIDE { code0 } else { code1 };
            let (x, y) = if out & BELOW != 0 {
                (x0 + (x1 - x0) * (max_y - y0) / (y1 - y0), max_y)
            } else if out & ABOVE != 0 {
                (x0 + (x1 - x0) * (0.0 - y0) / (y1 - y0), 0.0)
            } else if out & RIGHT != 0 {
                (max_x, y0 + (y1 - y0) * (max_x - x0) / (x1 - x0))
            } else {
                (0.0, y0 + (y1 - y0) * (0.0 - x0) / (x1 - x0))
            };

            if out == code0 {
                (x0, y0) = (x, y);
                code0 = self.outcode(x0, y0);
            } else {
                (x1, y1) = (x, y);
                code1 = self.outcode(x1, y1);
            }
        }

        None
    }

    /// Edges first, then labels on top so lines never hide a key.
    pub fn draw_scene(&mut self, scene: &Scene, viewport: &Viewport, edge: Color) {
        let edge_cell = Cell {
            ch: EDGE_CHAR,
            fg: Some(edge),
            bold: false,
        };
        for (child, parent) in scene.edges() {
            self.draw_line(viewport.to_cell(child), viewport.to_cell(parent), edge_cell);
        }

        for node in &scene.nodes {
            let (col, row) = viewport.to_cell(node.position);
            let label = format!("({})", node.label);
            let half = i64::try_from(label.chars().count() / 2).unwrap_or(0);
            self.put_str(col.saturating_sub(half), row, &label, Some(node.fill), true);
        }
    }

    /// Row contents as plain text, trailing blanks trimmed.
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width.max(1)))
            .take(usize::from(self.height))
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbv_config::ThemeSettings;
    use rbv_tree::RBTree;

    #[test]
    fn test_put_clips() {
        let mut canvas = Canvas::new(3, 2);
        let cell = Cell {
            ch: 'x',
            ..Cell::default()
        };
        canvas.put(-1, 0, cell);
        canvas.put(3, 0, cell);
        canvas.put(0, 2, cell);
        canvas.put(2, 1, cell);
        assert_eq!(canvas.to_lines(), vec!["".to_string(), "  x".to_string()]);
        assert_eq!(canvas.get(2, 1).map(|c| c.ch), Some('x'));
        assert_eq!(canvas.get(3, 1), None);
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut canvas = Canvas::new(4, 4);
        let cell = Cell {
            ch: '*',
            ..Cell::default()
        };
        canvas.draw_line((0, 0), (3, 3), cell);
        assert_eq!(canvas.to_lines(), vec!["*", " *", "  *", "   *"]);
    }

    #[test]
    fn test_draw_line_clips_far_endpoints() {
        let mut canvas = Canvas::new(10, 3);
        let cell = Cell {
            ch: '-',
            ..Cell::default()
        };
        canvas.draw_line((i64::MIN, 1), (i64::MAX, 1), cell);
        assert_eq!(canvas.to_lines(), vec!["", "----------", ""]);

        canvas.clear();
        canvas.draw_line((-1_000_000_000_000, -5), (-3, 1), cell);
        assert_eq!(canvas.to_lines(), vec!["", "", ""]);
    }

    #[test]
    fn test_draw_line_clipped_diagonal_stays_on_course() {
        let mut canvas = Canvas::new(4, 4);
        let cell = Cell {
            ch: '*',
            ..Cell::default()
        };
        canvas.draw_line((-2, -2), (100, 100), cell);
        assert_eq!(canvas.to_lines(), vec!["*", " *", "  *", "   *"]);
    }

    #[test]
    fn test_draw_scene_with_huge_spread() {
        let mut tree = RBTree::new();
        for key in [20, 10, 30, 5] {
            tree.insert(key);
        }
        let theme = ThemeSettings::default();
        for spread in [1e12, f32::MAX] {
            let layout = LayoutSettings {
                horizontal_spread: spread,
                ..LayoutSettings::default()
            };
            let scene = Scene::from_snapshot(&tree.snapshot(), &layout, &theme);
            let viewport = Viewport::new(80, 8, &layout);

            let mut canvas = Canvas::new(80, 8);
            canvas.draw_scene(&scene, &viewport, theme.edge);
            let lines = canvas.to_lines();
            assert!(lines[1].contains("(20)"));
            assert!(!lines[3].contains("(10)"));
        }
    }

    #[test]
    fn test_viewport_mapping() {
        let viewport = Viewport::new(80, 24, &LayoutSettings::default());
        assert_eq!(viewport.to_cell(Point::new(0.0, 0.0)), (40, 1));
        assert_eq!(viewport.to_cell(Point::new(-5.0, -1.0)), (20, 3));
        assert_eq!(viewport.to_cell(Point::new(5.0, -2.0)), (60, 5));
    }

    #[test]
    fn test_draw_scene_places_labels() {
        let mut tree = RBTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }
        let theme = ThemeSettings::default();
        let scene = Scene::from_snapshot(&tree.snapshot(), &LayoutSettings::default(), &theme);
        let viewport = Viewport::new(80, 8, &LayoutSettings::default());

        let mut canvas = Canvas::new(80, 8);
        canvas.draw_scene(&scene, &viewport, theme.edge);
        let lines = canvas.to_lines();

        assert!(lines[1].contains("(20)"));
        assert!(lines[3].contains("(10)"));
        assert!(lines[3].contains("(30)"));
        assert!(lines[2].contains('.'));
        assert_eq!(canvas.get(40, 1).and_then(|c| c.fg), Some(theme.black));
        assert_eq!(canvas.get(20, 3).and_then(|c| c.fg), Some(theme.red));
    }
}
