//! The session controller: one game at a time, from selection to outcome.
//!
//! `SessionController` owns the current game session and its countdown.
//! Every command either succeeds and moves the session forward, or fails
//! with a [`GameError`] and leaves the session untouched.

pub mod emoji;
pub mod round;
pub mod snapshot;
pub mod state;
pub mod trivia;
pub mod word_chain;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::catalog::{GameCatalog, GameDefinition, VariantId};
use crate::command::{Command, Reply};
use crate::config::ControllerConfig;
use crate::countdown::{CountdownHandle, TickScheduler};
use crate::error::{GameError, GameResult};

pub use round::Round;
pub use snapshot::{PlayView, SessionSnapshot};
pub use state::{Feedback, Outcome, Score, SessionId, Status, TickResult, Verdict};

/// The state of the selected game.
#[derive(Debug)]
struct GameSession {
    definition: Arc<GameDefinition>,
    status: Status,
    level: Option<String>,
    score: Score,
    time_remaining: Option<u32>,
    outcome: Outcome,
    round: Option<Round>,
    id: Option<SessionId>,
    countdown: Option<CountdownHandle>,
}

impl GameSession {
    fn new(definition: Arc<GameDefinition>) -> Self {
        let status = if definition.id().requires_level() {
            Status::AwaitingLevel
        } else {
            Status::ReadyToStart
        };
        Self {
            definition,
            status,
            level: None,
            score: Score::default(),
            time_remaining: None,
            outcome: Outcome::Undetermined,
            round: None,
            id: None,
            countdown: None,
        }
    }

    fn status(&self) -> Status {
        self.status
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.cancel();
            debug!(session = %handle.session(), "countdown stopped");
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.stop_countdown();
        self.status = Status::Over;
        self.outcome = outcome;
        info!(
            variant = %self.definition.id(),
            %outcome,
            score = self.score.value(),
            "session over"
        );
    }

    fn snapshot(&self) -> SessionSnapshot {
        let running = self.status == Status::Running;
        let time_remaining = match self.status {
            Status::ReadyToStart => Some(self.definition.time_limit_seconds),
            Status::Running => self.time_remaining,
            _ => None,
        };
        let revealed_word = match (&self.round, self.status) {
            (Some(round), Status::Over) => round.target_word().map(str::to_string),
            _ => None,
        };
        SessionSnapshot {
            status: self.status,
            variant: Some(self.definition.id()),
            variant_name: Some(self.definition.name.clone()),
            level: self.level.clone(),
            score: self.score.value(),
            time_remaining,
            view: self.round.as_ref().filter(|_| running).and_then(Round::view),
            guessed_letters: self
                .round
                .as_ref()
                .map(Round::guessed_letters)
                .unwrap_or_default(),
            outcome: self.outcome,
            revealed_word,
            session: self.id,
        }
    }
}

type CloseHook = Box<dyn FnMut() + Send>;

/// Drives one game session at a time.
pub struct SessionController {
    catalog: Arc<GameCatalog>,
    scheduler: Box<dyn TickScheduler>,
    config: ControllerConfig,
    rng: StdRng,
    session: Option<GameSession>,
    next_id: u64,
    on_close: Option<CloseHook>,
}

impl SessionController {
    /// Create a controller with nothing selected.
    pub fn new(
        catalog: Arc<GameCatalog>,
        scheduler: Box<dyn TickScheduler>,
        config: ControllerConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog,
            scheduler,
            config,
            rng,
            session: None,
            next_id: 0,
            on_close: None,
        }
    }

    /// Replace the random source used for word draws.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Register the callback run by [`close`](Self::close).
    pub fn on_close(&mut self, hook: impl FnMut() + Send + 'static) {
        self.on_close = Some(Box::new(hook));
    }

    /// The catalog sessions are drawn from.
    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// Lifecycle status of the current session.
    pub fn status(&self) -> Status {
        self.session
            .as_ref()
            .map_or(Status::NoneSelected, GameSession::status)
    }

    /// Identifier of the current play-through, if one was started.
    pub fn current_session_id(&self) -> Option<SessionId> {
        self.session.as_ref().and_then(|s| s.id)
    }

    /// Whether a countdown is currently owned by the session.
    pub fn countdown_active(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.countdown.as_ref())
            .is_some_and(|h| !h.is_cancelled())
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session
            .as_ref()
            .map_or_else(SessionSnapshot::idle, GameSession::snapshot)
    }

    /// Choose a variant. Replaces any configured but unstarted selection.
    pub fn select_variant(&mut self, id: VariantId) -> GameResult<Status> {
        let status = self.status();
        if matches!(status, Status::Running | Status::Over) {
            return Err(GameError::InvalidState {
                command: "select a game",
                status,
            });
        }
        let definition = self.catalog.get_variant(id)?;
        let session = GameSession::new(definition);
        let status = session.status;
        self.session = Some(session);
        info!(variant = %id, %status, "variant selected");
        Ok(status)
    }

    /// Choose a word-chain level by name, ignoring case.
    pub fn select_level(&mut self, name: &str) -> GameResult<Status> {
        let status = self.status();
        let session = match self.session.as_mut() {
            Some(s) if matches!(s.status, Status::AwaitingLevel | Status::ReadyToStart) => s,
            _ => {
                return Err(GameError::InvalidState {
                    command: "select a level",
                    status,
                });
            }
        };
        let id = session.definition.id();
        if !id.requires_level() {
            return Err(GameError::InvalidVariant(id));
        }
        let level = session
            .definition
            .level(name)
            .ok_or_else(|| GameError::InvalidLevel {
                variant: id,
                level: name.trim().to_string(),
            })?;
        session.level = Some(level.name.clone());
        session.status = Status::ReadyToStart;
        info!(variant = %id, level = %level.name, "level selected");
        Ok(Status::ReadyToStart)
    }

    /// Begin play. Starts the countdown.
    pub fn start(&mut self) -> GameResult<SessionId> {
        match self.session.as_ref().map(|s| (s.status, s.definition.id())) {
            Some((Status::ReadyToStart, _)) => self.begin_run(),
            Some((Status::AwaitingLevel, id)) => Err(GameError::MissingLevel(id)),
            _ => Err(GameError::InvalidState {
                command: "start",
                status: self.status(),
            }),
        }
    }

    /// Start again with the same variant and level.
    pub fn restart(&mut self) -> GameResult<SessionId> {
        let status = self.status();
        if !matches!(status, Status::Running | Status::Over) {
            return Err(GameError::InvalidState {
                command: "restart",
                status,
            });
        }
        if let Some(session) = self.session.as_mut() {
            session.stop_countdown();
        }
        self.begin_run()
    }

    /// Drop the current session and return to variant selection.
    pub fn exit(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop_countdown();
            info!(variant = %session.definition.id(), "session exited");
        }
    }

    /// Stop the countdown and ask the host to close the widget.
    pub fn close(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop_countdown();
        }
        info!("widget closed");
        if let Some(hook) = self.on_close.as_mut() {
            hook();
        }
    }

    /// Answer the current trivia question.
    pub fn submit_answer(&mut self, choice: &str) -> GameResult<Feedback> {
        let session = self.running_session("answer")?;
        let Some(Round::Trivia(round)) = session.round.as_mut() else {
            return Err(wrong_variant("answer"));
        };
        let feedback = round.answer(choice, &mut session.score);
        debug!(choice, verdict = ?feedback.verdict, "trivia answer");
        Ok(settle(session, feedback))
    }

    /// Guess a word-chain letter.
    pub fn guess_letter(&mut self, letter: char) -> GameResult<Feedback> {
        let session = self.running_session("guess a letter")?;
        let Some(Round::WordChain(round)) = session.round.as_mut() else {
            return Err(wrong_variant("guess a letter"));
        };
        let letter = word_chain::normalize_letter(letter).ok_or(GameError::InvalidLetter(letter))?;
        let feedback = round.guess(letter, &mut session.score);
        debug!(%letter, verdict = ?feedback.verdict, "letter guess");
        Ok(settle(session, feedback))
    }

    /// Guess the current emoji phrase.
    pub fn submit_phrase(&mut self, text: &str) -> GameResult<Feedback> {
        let session = self.running_session("guess a phrase")?;
        let Some(Round::EmojiPictionary(round)) = session.round.as_mut() else {
            return Err(wrong_variant("guess a phrase"));
        };
        let feedback = round.submit(text, &mut session.score);
        debug!(text, verdict = ?feedback.verdict, "phrase guess");
        Ok(settle(session, feedback))
    }

    /// Count down one second for `id`.
    ///
    /// Only the live countdown of a running session can tick. Ticks for an
    /// earlier play-through, or queued before the countdown was stopped by
    /// `close`, are stale.
    pub fn tick(&mut self, id: SessionId) -> TickResult {
        let Some(session) = self.session.as_mut().filter(|s| {
            s.status == Status::Running
                && s.countdown
                    .as_ref()
                    .is_some_and(|h| h.session() == id && !h.is_cancelled())
        }) else {
            warn!(session = %id, "stale tick ignored");
            return TickResult::Stale;
        };

        let remaining = session.time_remaining.unwrap_or(0).saturating_sub(1);
        session.time_remaining = Some(remaining);
        if remaining == 0 {
            info!(session = %id, "time is up");
            session.finish(Outcome::Lost);
            TickResult::Expired
        } else {
            TickResult::Remaining(remaining)
        }
    }

    /// Run a parsed command.
    pub fn apply(&mut self, command: Command) -> GameResult<Reply> {
        match command {
            Command::Select(name) => {
                let id: VariantId = name.parse()?;
                self.select_variant(id).map(|status| Reply::Status { status })
            }
            Command::Level(name) => self.select_level(&name).map(|status| Reply::Status { status }),
            Command::Start => self.start().map(|session| Reply::Started { session }),
            Command::Restart => self.restart().map(|session| Reply::Started { session }),
            Command::Answer(choice) => self.submit_answer(&choice).map(Reply::Feedback),
            Command::Guess(letter) => self.guess_letter(letter).map(Reply::Feedback),
            Command::Phrase(text) => self.submit_phrase(&text).map(Reply::Feedback),
            Command::Tick => {
                let id = self.current_session_id().unwrap_or(SessionId::new(0));
                Ok(Reply::Tick(self.tick(id)))
            }
            Command::Exit => {
                self.exit();
                Ok(Reply::Status {
                    status: self.status(),
                })
            }
            Command::Close => {
                self.close();
                Ok(Reply::Closed)
            }
        }
    }

    fn running_session(&mut self, command: &'static str) -> GameResult<&mut GameSession> {
        let status = self.status();
        self.session
            .as_mut()
            .filter(|s| s.status == Status::Running)
            .ok_or(GameError::InvalidState { command, status })
    }

    fn begin_run(&mut self) -> GameResult<SessionId> {
        let Self {
            scheduler,
            config,
            rng,
            session,
            next_id,
            ..
        } = self;
        let Some(session) = session.as_mut() else {
            return Err(GameError::InvalidState {
                command: "start",
                status: Status::NoneSelected,
            });
        };

        let round = Round::draw(&session.definition, session.level.as_deref(), rng)?;
        *next_id += 1;
        let id = SessionId::new(*next_id);

        session.round = Some(round);
        session.score = Score::default();
        session.outcome = Outcome::Undetermined;
        session.time_remaining = Some(session.definition.time_limit_seconds);
        session.status = Status::Running;
        session.id = Some(id);
        session.countdown = Some(scheduler.schedule(id, config.tick_period));

        info!(
            session = %id,
            variant = %session.definition.id(),
            level = session.level.as_deref().unwrap_or("-"),
            "session started"
        );
        Ok(id)
    }
}

fn wrong_variant(command: &'static str) -> GameError {
    GameError::InvalidState {
        command,
        status: Status::Running,
    }
}

fn settle(session: &mut GameSession, feedback: Feedback) -> Feedback {
    if let Some(outcome) = feedback.finished {
        session.finish(outcome);
    }
    feedback
}
