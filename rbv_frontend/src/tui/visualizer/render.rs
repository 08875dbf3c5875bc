use super::{MessageType, Visualizer};
use crate::tui::{canvas::Viewport, theme::TerminalTheme};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};
use std::time::Instant;

const PROMPT: &str = "insert> ";

/// Pads or cuts `text` to exactly `width` columns.
fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let cut: String = text.chars().take(width).collect();
    format!("{cut:<width$}")
}

impl Visualizer {
    /// Full redraw of the frame at `now` plus the status and prompt lines.
    pub(crate) fn draw<W: Write>(&mut self, out: &mut W, now: Instant) -> io::Result<()> {
        let frame = self.frame(now);
        let viewport = Viewport::new(self.canvas.width(), self.canvas.height(), &self.config.layout);
        self.canvas.clear();
        self.canvas.draw_scene(&frame, &viewport, self.theme.colors.edge);

        self.draw_canvas(out)?;
        self.draw_status_line(out)?;
        self.draw_prompt_line(out)?;
        out.flush()
    }

    fn draw_canvas<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.canvas.height() {
            queue!(out, MoveTo(0, row))?;

            // one Print per run of equally styled cells
            let mut col = 0;
            while let Some(&first) = self.canvas.get(col, row) {
                let mut run = String::new();
                while let Some(cell) = self
                    .canvas
                    .get(col, row)
                    .filter(|c| c.fg == first.fg && c.bold == first.bold)
                {
                    run.push(cell.ch);
                    col += 1;
                }

                let color = first
                    .fg
                    .map_or_else(|| self.theme.text(), TerminalTheme::hex_to_color);
                let weight = if first.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(out, SetForegroundColor(color), SetAttribute(weight), Print(run))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)
    }

    fn draw_status_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (width, height) = self.size;
        let (text, color) = match self.message() {
            Some((message, MessageType::Error)) => (message.to_string(), self.theme.error()),
            Some((message, MessageType::Info)) => {
                (format!("{message} | {}", self.status), self.theme.text())
            }
            None => (self.status.clone(), self.theme.text()),
        };
        let summary = format!(
            "{text}  [{} keys, height {}]",
            self.tree.len(),
            self.tree.height()
        );

        queue!(
            out,
            MoveTo(0, height.saturating_sub(2)),
            SetForegroundColor(color),
            Print(fit(&summary, width)),
            ResetColor
        )
    }

    fn draw_prompt_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (width, height) = self.size;
        let line = format!("{PROMPT}{}_", self.prompt);
        queue!(
            out,
            MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(self.theme.text()),
            Print(fit(&line, width)),
            ResetColor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbv_config::Config;

    fn render(vis: &mut Visualizer, now: Instant) -> String {
        let mut out = Vec::new();
        vis.draw(&mut out, now).expect("draw into memory");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_draw_shows_keys_status_and_prompt() {
        let mut vis = Visualizer::new(Config::default());
        vis.resize(60, 12);
        vis.insert(42);

        let mut now = Instant::now();
        vis.advance(now);
        while !vis.is_idle() {
            now += vis.config().animation.transition_duration();
            vis.advance(now);
        }

        let screen = render(&mut vis, now);
        assert!(screen.contains("(42)"));
        assert!(screen.contains("inserted 42 | settled, root 42 is black"));
        assert!(screen.contains("[1 keys, height 1]"));
        assert!(screen.contains("insert> _"));
    }

    #[test]
    fn test_draw_error_message() {
        let mut vis = Visualizer::new(Config::default());
        vis.resize(60, 12);
        vis.prompt = "nope".to_string();
        vis.submit_prompt();

        let screen = render(&mut vis, Instant::now());
        assert!(screen.contains("\"nope\" is not an integer"));
    }

    #[test]
    fn test_draw_survives_unvalidated_huge_spread() {
        let mut config = Config::default();
        config.layout.horizontal_spread = 1e12;
        let mut vis = Visualizer::new(config);
        vis.resize(60, 12);
        vis.insert(20);
        vis.insert(10);

        let mut now = Instant::now();
        vis.advance(now);
        while !vis.is_idle() {
            now += vis.config().animation.transition_duration();
            vis.advance(now);
        }

        let screen = render(&mut vis, now);
        assert!(screen.contains("(20)"));
        assert!(!screen.contains("(10)"));
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let mut vis = Visualizer::new(Config::default());
        vis.resize(4, 1);
        vis.insert(123_456);
        vis.advance(Instant::now());
        // nothing fits; drawing must still succeed
        let _ = render(&mut vis, Instant::now());
    }
}
