//! Application state: the controller, its latest snapshot, and screen-local UI state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use parley_games::{
    Command, Feedback, GameError, Outcome, PlayView, Reply, SessionController, SessionId,
    SessionSnapshot, Status, TickResult, VariantId, VariantSummary, Verdict,
};

use crate::shared::{OutputLine, OutputStyle};

/// Most log lines kept.
const MAX_LOG: usize = 200;

/// How keys are routed on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys: j/k, digits, Enter, q.
    Nav,
    /// Every letter is a guess.
    Letters,
    /// Keys edit a text field.
    Text,
}

/// State of the terminal game widget.
pub struct GameApp {
    controller: SessionController,
    snapshot: SessionSnapshot,
    variants: Vec<VariantSummary>,
    /// Highlighted row in the variant or level list, or the trivia option.
    pub cursor: usize,
    /// Current text input.
    pub input_text: String,
    /// Message log.
    pub log: Vec<OutputLine>,
    /// Whether to show the help popup.
    pub show_help: bool,
    closed: Arc<AtomicBool>,
}

impl GameApp {
    /// Wrap a controller. Closing the widget makes [`should_quit`](Self::should_quit) true.
    pub fn new(mut controller: SessionController) -> Self {
        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);
        controller.on_close(move || flag.store(true, Ordering::SeqCst));

        let variants = controller.catalog().list_variants();
        let snapshot = controller.snapshot();
        let mut app = Self {
            controller,
            snapshot,
            variants,
            cursor: 0,
            input_text: String::new(),
            log: Vec::new(),
            show_help: false,
            closed,
        };
        app.push(OutputStyle::System, "Pick a game to play.");
        app
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Variants in catalog order.
    pub fn variants(&self) -> &[VariantSummary] {
        &self.variants
    }

    /// Level names of the selected variant, in declared order.
    pub fn level_names(&self) -> Vec<String> {
        self.snapshot
            .variant
            .and_then(|id| self.controller.catalog().get_levels(id).ok())
            .map(|levels| levels.into_iter().map(|l| l.name).collect())
            .unwrap_or_default()
    }

    /// Whether the widget has been closed.
    pub fn should_quit(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// How keys are routed right now.
    pub fn input_mode(&self) -> InputMode {
        match (&self.snapshot.status, &self.snapshot.view) {
            (Status::Running, Some(PlayView::WordChain { .. })) => InputMode::Letters,
            (Status::Running, Some(PlayView::EmojiPictionary { .. })) => InputMode::Text,
            _ => InputMode::Nav,
        }
    }

    /// Context-sensitive hint for the footer.
    pub fn status_hint(&self) -> &'static str {
        match (self.snapshot.status, self.input_mode()) {
            (Status::NoneSelected, _) => "j/k:move  Enter:select  1-3:pick  ?:help  q:close",
            (Status::AwaitingLevel, _) => "j/k:move  Enter:choose level  Esc:back  q:close",
            (Status::ReadyToStart, _) => "Enter:start  Esc:back  q:close",
            (Status::Running, InputMode::Letters) => "A-Z:guess  Ctrl+R:restart  Esc:leave",
            (Status::Running, InputMode::Text) => "Enter:guess  Ctrl+R:restart  Esc:clear/leave",
            (Status::Running, InputMode::Nav) => "1-9:answer  j/k+Enter:answer  Ctrl+R:restart  Esc:leave",
            (Status::Over, _) => "r:play again  Esc:back  q:close",
        }
    }

    /// Run a command and log what happened.
    pub fn apply(&mut self, command: Command) {
        debug!(command = command.verb(), "applying command");
        let echo = match &command {
            Command::Answer(text) | Command::Phrase(text) => Some(text.clone()),
            Command::Guess(letter) => Some(letter.to_ascii_uppercase().to_string()),
            _ => None,
        };
        if let Some(text) = echo {
            self.push(OutputStyle::Command, &text);
        }

        let before = self.snapshot.status;
        match self.controller.apply(command) {
            Ok(reply) => self.report(reply, before),
            Err(e) => self.report_error(&e),
        }
        self.refresh();
    }

    /// Deliver a countdown tick.
    pub fn handle_tick(&mut self, session: SessionId) {
        match self.controller.tick(session) {
            TickResult::Expired => {
                self.push(OutputStyle::Error, "Time's up!");
                self.report_outcome();
            }
            TickResult::Remaining(_) => {}
            TickResult::Stale => debug!(%session, "stale tick"),
        }
        self.refresh();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.apply(Command::Close);
            return;
        }
        if ctrl && key.code == KeyCode::Char('r') {
            if self.snapshot.is_running() {
                self.apply(Command::Restart);
            }
            return;
        }

        if self.input_mode() == InputMode::Nav {
            match key.code {
                KeyCode::Char('?') => {
                    self.show_help = !self.show_help;
                    return;
                }
                KeyCode::Char('q') => {
                    self.apply(Command::Close);
                    return;
                }
                _ => {}
            }
        }
        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return;
        }

        match self.snapshot.status {
            Status::NoneSelected => self.key_select(key.code),
            Status::AwaitingLevel | Status::ReadyToStart => self.key_configure(key.code),
            Status::Running => self.key_play(key.code),
            Status::Over => self.key_over(key.code),
        }
    }

    fn key_select(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1, self.variants.len()),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1, self.variants.len()),
            KeyCode::Enter => self.select_at(self.cursor),
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10).and_then(|d| usize::try_from(d).ok())
                    && (1..=self.variants.len()).contains(&n)
                {
                    self.select_at(n - 1);
                }
            }
            _ => {}
        }
    }

    fn key_configure(&mut self, code: KeyCode) {
        let levels = self.level_names();
        match code {
            KeyCode::Esc => self.apply(Command::Exit),
            KeyCode::Char('j') | KeyCode::Down if !levels.is_empty() => {
                self.move_cursor(1, levels.len());
                self.relevel(&levels);
            }
            KeyCode::Char('k') | KeyCode::Up if !levels.is_empty() => {
                self.move_cursor(-1, levels.len());
                self.relevel(&levels);
            }
            KeyCode::Enter => {
                if self.snapshot.status != Status::AwaitingLevel {
                    self.apply(Command::Start);
                } else if let Some(name) = levels.get(self.cursor) {
                    self.apply(Command::Level(name.clone()));
                }
            }
            KeyCode::Char('s') => self.apply(Command::Start),
            _ => {}
        }
    }

    fn key_play(&mut self, code: KeyCode) {
        match self.input_mode() {
            InputMode::Nav => self.key_trivia(code),
            InputMode::Letters => match code {
                KeyCode::Esc => self.apply(Command::Exit),
                KeyCode::Char(c) => self.apply(Command::Guess(c)),
                _ => {}
            },
            InputMode::Text => match code {
                KeyCode::Esc if self.input_text.is_empty() => self.apply(Command::Exit),
                KeyCode::Esc => self.input_text.clear(),
                KeyCode::Backspace => {
                    self.input_text.pop();
                }
                KeyCode::Enter => {
                    let text = std::mem::take(&mut self.input_text);
                    if !text.trim().is_empty() {
                        self.apply(Command::Phrase(text));
                    }
                }
                KeyCode::Char(c) => self.input_text.push(c),
                _ => {}
            },
        }
    }

    fn key_trivia(&mut self, code: KeyCode) {
        let options = match &self.snapshot.view {
            Some(PlayView::Trivia { options, .. }) => options.clone(),
            _ => return,
        };
        match code {
            KeyCode::Esc => self.apply(Command::Exit),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1, options.len()),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1, options.len()),
            KeyCode::Enter => {
                if let Some(choice) = options.get(self.cursor) {
                    self.apply(Command::Answer(choice.clone()));
                }
            }
            KeyCode::Char(c) => {
                let picked = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i));
                if let Some(choice) = picked {
                    self.apply(Command::Answer(choice.clone()));
                }
            }
            _ => {}
        }
    }

    fn key_over(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') => self.apply(Command::Restart),
            KeyCode::Esc | KeyCode::Enter => self.apply(Command::Exit),
            _ => {}
        }
    }

    fn select_at(&mut self, index: usize) {
        if let Some(id) = self.variants.get(index).map(|v| v.id) {
            self.apply(Command::Select(id.to_string()));
        }
    }

    fn relevel(&mut self, levels: &[String]) {
        if self.snapshot.status == Status::ReadyToStart
            && let Some(name) = levels.get(self.cursor)
        {
            self.apply(Command::Level(name.clone()));
        }
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if delta < 0 {
            self.cursor.checked_sub(1).unwrap_or(len - 1)
        } else {
            (self.cursor + 1) % len
        };
    }

    fn refresh(&mut self) {
        let previous = (self.snapshot.status, self.snapshot.session, self.view_position());
        self.snapshot = self.controller.snapshot();
        let current = (self.snapshot.status, self.snapshot.session, self.view_position());
        if previous != current {
            self.cursor = self.default_cursor();
        }
    }

    fn view_position(&self) -> Option<usize> {
        match &self.snapshot.view {
            Some(PlayView::Trivia { number, .. } | PlayView::EmojiPictionary { number, .. }) => {
                Some(*number)
            }
            _ => None,
        }
    }

    fn default_cursor(&self) -> usize {
        match (&self.snapshot.status, &self.snapshot.level) {
            (Status::ReadyToStart, Some(level)) => self
                .level_names()
                .iter()
                .position(|l| l == level)
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn report(&mut self, reply: Reply, before: Status) {
        match reply {
            Reply::Status { status } => match status {
                Status::AwaitingLevel => self.push(OutputStyle::System, "Choose a level."),
                Status::ReadyToStart if before != Status::ReadyToStart => {
                    self.push(OutputStyle::System, "Press Enter to start.");
                }
                Status::NoneSelected if before != Status::NoneSelected => {
                    self.push(OutputStyle::System, "Pick a game to play.");
                }
                _ => {}
            },
            Reply::Started { .. } => {
                let name = self.controller.snapshot().variant_name.unwrap_or_default();
                self.push(OutputStyle::System, &format!("{name} started. Good luck!"));
            }
            Reply::Feedback(feedback) => self.report_feedback(feedback),
            Reply::Tick(_) | Reply::Closed => {}
        }
    }

    fn report_feedback(&mut self, feedback: Feedback) {
        let variant = self.snapshot.variant;
        match feedback.verdict {
            Verdict::Correct if feedback.points_awarded > 0 => self.push(
                OutputStyle::Success,
                &format!("Correct! +{}", feedback.points_awarded),
            ),
            Verdict::Correct => self.push(OutputStyle::Success, "Good guess!"),
            Verdict::Incorrect if variant == Some(VariantId::WordChain) => {
                self.push(OutputStyle::Error, "Not in the word.");
            }
            Verdict::Incorrect => self.push(OutputStyle::Error, "Wrong answer!"),
            Verdict::AlreadyGuessed => self.push(OutputStyle::System, "Already guessed."),
        }
        if feedback.finished.is_some() {
            self.report_outcome();
        }
    }

    fn report_outcome(&mut self) {
        let snap = self.controller.snapshot();
        match snap.outcome {
            Outcome::Won => self.push(
                OutputStyle::Success,
                &format!("You won! Final score: {}", snap.score),
            ),
            Outcome::Lost => {
                let text = match snap.revealed_word {
                    Some(word) => format!("Game over. The word was {word}."),
                    None => format!("Game over. Final score: {}", snap.score),
                };
                self.push(OutputStyle::Error, &text);
            }
            Outcome::Undetermined => {}
        }
    }

    fn report_error(&mut self, error: &GameError) {
        self.push(OutputStyle::Error, &error.to_string());
    }

    fn push(&mut self, style: OutputStyle, text: &str) {
        self.log.push(OutputLine {
            style,
            text: text.to_string(),
        });
        if self.log.len() > MAX_LOG {
            let excess = self.log.len() - MAX_LOG;
            self.log.drain(..excess);
        }
    }
}
