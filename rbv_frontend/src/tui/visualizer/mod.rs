use crate::error::FrontendResult;
use crate::input::parse_key;
use crate::recorder::{Checkpoint, Recorder};
use crate::tui::{animation::*, canvas::*, theme::*};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rbv_config::Config;
use rbv_tree::RBTree;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    transition: Transition,
    started: Instant,
}

/// Interactive red-black tree visualizer.
///
/// Every insertion runs to completion on the tree immediately; the
/// checkpoints it produced are queued and played back one transition at a
/// time, so the screen always trails the tree in insertion order.
pub struct Visualizer {
    config: Config,
    theme: TerminalTheme,
    tree: RBTree<i64>,
    /// Scene of the last checkpoint that finished playing
    scene: Scene,
    pending: VecDeque<Checkpoint<i64>>,
    transition: Option<ActiveTransition>,
    /// Description of the checkpoint on screen
    status: String,
    prompt: String,
    message: Option<String>,
    message_type: MessageType,
    running: bool,
    size: (u16, u16),
    canvas: Canvas,
}

impl Visualizer {
    pub fn new(config: Config) -> Self {
        let theme = TerminalTheme::from_config(&config.theme);
        Self {
            config,
            theme,
            tree: RBTree::new(),
            scene: Scene::default(),
            pending: VecDeque::new(),
            transition: None,
            status: String::from("empty tree"),
            prompt: String::new(),
            message: None,
            message_type: MessageType::Info,
            running: true,
            size: (80, 24),
            canvas: Canvas::new(80, 22),
        }
    }

    pub fn tree(&self) -> &RBTree<i64> {
        &self.tree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scene of the last completed checkpoint.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> Option<(&str, MessageType)> {
        self.message.as_deref().map(|m| (m, self.message_type))
    }

    pub fn pending_checkpoints(&self) -> usize {
        self.pending.len()
    }

    /// Nothing left to animate.
    pub fn is_idle(&self) -> bool {
        self.transition.is_none() && self.pending.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Inserts `key` and queues every checkpoint of the insertion for playback.
    pub fn insert(&mut self, key: i64) {
        let mut recorder = Recorder::new();
        self.tree.insert_observed(key, &mut recorder);
        debug!(key, checkpoints = recorder.len(), "queued insertion");
        self.pending.extend(recorder.into_checkpoints());
        self.set_message(format!("inserted {key}"), MessageType::Info);
    }

    /// Parses the prompt and inserts the key; bad input leaves the tree alone.
    pub fn submit_prompt(&mut self) {
        let input = std::mem::take(&mut self.prompt);
        match parse_key(&input) {
            Ok(key) => self.insert(key),
            Err(e) => {
                warn!(input = %input, error = %e, "rejected input");
                self.set_message(e.to_string(), MessageType::Error);
            }
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_message(&mut self, message: String, msg_type: MessageType) {
        self.message = Some(message);
        self.message_type = msg_type;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Finishes the running transition once its time is up and starts the
    /// next queued checkpoint.
    pub fn advance(&mut self, now: Instant) {
        if let Some(active) = &self.transition {
            if !active
                .transition
                .is_finished(now.saturating_duration_since(active.started))
            {
                return;
            }
            if let Some(done) = self.transition.take() {
                self.scene = done.transition.into_target();
            }
        }

        if let Some(checkpoint) = self.pending.pop_front() {
            let target =
                Scene::from_snapshot(&checkpoint.snapshot, &self.config.layout, &self.theme.colors);
            self.status = checkpoint.describe();
            debug!(status = %self.status, "playing checkpoint");
            self.transition = Some(ActiveTransition {
                transition: Transition::new(self.scene.clone(), target, &self.config.animation),
                started: now,
            });
        }
    }

    /// What should be on screen at `now`.
    pub fn frame(&self, now: Instant) -> Scene {
        match &self.transition {
            Some(active) => active
                .transition
                .frame_at(now.saturating_duration_since(active.started)),
            None => self.scene.clone(),
        }
    }

    /// Loads `path`, or the first config on the search path when `None`.
    /// An explicit path must exist.
    pub fn load_config(path: Option<&Path>) -> FrontendResult<Config> {
        let config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    /// Main event/render loop
    pub fn run(&mut self) -> FrontendResult<()> {
        let session = TerminalSession::enter()?;
        info!("visualizer started");

        let result = self.event_loop(&mut io::stdout());
        let restored = session.restore();
        info!(len = self.tree.len(), height = self.tree.height(), "visualizer stopped");
        settle(result, restored)
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> FrontendResult<()> {
        let (width, height) = terminal::size()?;
        self.resize(width, height);

        while self.running {
            self.handle_events()?;
            let now = Instant::now();
            self.advance(now);
            self.draw(out, now)?;
        }

        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        // two rows for the status and prompt lines
        self.canvas = Canvas::new(width, height.saturating_sub(2));
    }
}

/// Raw mode plus the alternate screen. Dropping a session that was not
/// restored explicitly (early error, panic) still hands the terminal back.
struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let session = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(session)
    }

    fn restore(mut self) -> io::Result<()> {
        self.active = false;
        let screen = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let raw = disable_raw_mode();
        screen.and(raw)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// The loop's own error wins over a failure to restore the terminal.
fn settle(result: FrontendResult<()>, restored: io::Result<()>) -> FrontendResult<()> {
    if let Err(e) = &restored {
        warn!(error = %e, "failed to restore terminal");
    }
    result?;
    Ok(restored?)
}
