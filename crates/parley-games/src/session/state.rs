//! Session status, outcome, score, and identity.

use std::fmt;

use serde::Serialize;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// No variant chosen yet.
    NoneSelected,
    /// Variant chosen; it needs a level first.
    AwaitingLevel,
    /// Configured and waiting for `start`.
    ReadyToStart,
    /// Countdown running, accepting input.
    Running,
    /// Finished; score and outcome are final.
    Over,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::NoneSelected => "no game is selected",
            Status::AwaitingLevel => "awaiting a level",
            Status::ReadyToStart => "ready to start",
            Status::Running => "running",
            Status::Over => "over",
        };
        f.write_str(text)
    }
}

/// The verdict of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Not finished yet.
    #[default]
    Undetermined,
    /// The win condition was met.
    Won,
    /// Lost by rules or by timeout.
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Undetermined => "undetermined",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        };
        f.write_str(text)
    }
}

/// Points earned in a session. It can only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    /// The current point total.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Add points.
    pub fn award(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one play-through, from `start` to its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a player input was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// The input matched.
    Correct,
    /// The input did not match.
    Incorrect,
    /// The letter had been guessed before; nothing changed.
    AlreadyGuessed,
}

/// The result of one accepted player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// How the input was judged.
    pub verdict: Verdict,
    /// Points added by this input.
    pub points_awarded: u32,
    /// Set when this input ended the session.
    pub finished: Option<Outcome>,
}

impl Feedback {
    /// Feedback for an input that left the session running.
    pub fn pending(verdict: Verdict, points_awarded: u32) -> Self {
        Self {
            verdict,
            points_awarded,
            finished: None,
        }
    }

    /// Feedback for an input that ended the session.
    pub fn finished(verdict: Verdict, points_awarded: u32, outcome: Outcome) -> Self {
        Self {
            verdict,
            points_awarded,
            finished: Some(outcome),
        }
    }
}

/// What a countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "tick", content = "remaining")]
pub enum TickResult {
    /// The tick belonged to a session that is no longer running.
    Stale,
    /// Seconds left after this tick.
    Remaining(u32),
    /// Time ran out; the session was lost.
    Expired,
}
