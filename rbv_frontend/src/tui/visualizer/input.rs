use super::Visualizer;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

impl Visualizer {
    pub(crate) fn handle_events(&mut self) -> std::io::Result<()> {
        // Wake at least once per frame so running transitions keep moving
        if event::poll(self.config.animation.frame_interval())? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event),
                Event::Resize(width, height) => self.resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Some platforms report releases too
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        match key_event.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit()
            }
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                self.prompt.pop();
            }
            KeyCode::Char(c) => {
                self.prompt.push(c);
                self.clear_message();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::visualizer::MessageType;
    use rbv_config::Config;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(vis: &mut Visualizer, text: &str) {
        for c in text.chars() {
            vis.handle_key_event(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_enter_inserts() {
        let mut vis = Visualizer::new(Config::default());
        type_str(&mut vis, "17");
        assert_eq!(vis.prompt(), "17");
        vis.handle_key_event(press(KeyCode::Enter));
        assert!(vis.tree().contains(&17));
        assert!(vis.prompt().is_empty());
    }

    #[test]
    fn test_backspace_edits_prompt() {
        let mut vis = Visualizer::new(Config::default());
        type_str(&mut vis, "12x");
        vis.handle_key_event(press(KeyCode::Backspace));
        vis.handle_key_event(press(KeyCode::Enter));
        assert!(vis.tree().contains(&12));
    }

    #[test]
    fn test_bad_key_shows_error_and_typing_clears_it() {
        let mut vis = Visualizer::new(Config::default());
        type_str(&mut vis, "x");
        vis.handle_key_event(press(KeyCode::Enter));
        assert!(matches!(vis.message(), Some((_, MessageType::Error))));
        assert!(vis.is_running());

        type_str(&mut vis, "1");
        assert_eq!(vis.message(), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut vis = Visualizer::new(Config::default());
        vis.handle_key_event(press(KeyCode::Esc));
        assert!(!vis.is_running());

        let mut vis = Visualizer::new(Config::default());
        vis.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!vis.is_running());
        assert!(vis.prompt().is_empty());
    }

    #[test]
    fn test_release_events_ignored() {
        let mut vis = Visualizer::new(Config::default());
        let mut release = press(KeyCode::Char('5'));
        release.kind = KeyEventKind::Release;
        vis.handle_key_event(release);
        assert!(vis.prompt().is_empty());
    }
}
