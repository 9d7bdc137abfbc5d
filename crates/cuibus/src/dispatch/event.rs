//! Events delivered to command listeners.

use std::fmt;

use cuibus_protocol::{ApplyError, Command, CommandKind, DecodeError};

/// What happened to a line before its listeners were notified.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The command was decoded and written to the store.
    Applied(Command),
    /// The command was decoded but the store refused it.
    Failed {
        /// Decoded command.
        command: Command,
        /// Reason the store refused it.
        error: ApplyError,
    },
    /// The line named a known kind but did not decode.
    Rejected(DecodeError),
}

impl EventOutcome {
    /// Short lowercase label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Applied(_) => "applied",
            Self::Failed { .. } => "failed",
            Self::Rejected(_) => "rejected",
        }
    }
}

impl fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied(_) => f.write_str(self.label()),
            Self::Failed { error, .. } => write!(f, "{}: {error}", self.label()),
            Self::Rejected(error) => write!(f, "{}: {error}", self.label()),
        }
    }
}

/// Read-only view of one handled line, passed to every listener of its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEvent {
    raw: String,
    kind: CommandKind,
    outcome: EventOutcome,
}

impl CommandEvent {
    /// Creates an event for `raw`, addressed to `kind`.
    pub fn new(raw: impl Into<String>, kind: CommandKind, outcome: EventOutcome) -> Self {
        Self {
            raw: raw.into(),
            kind,
            outcome,
        }
    }

    /// Line as received, without its terminator.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Kind selected by the discriminator.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Decode and apply outcome.
    #[must_use]
    pub const fn outcome(&self) -> &EventOutcome {
        &self.outcome
    }

    /// Decoded command, unless the line was rejected.
    #[must_use]
    pub const fn command(&self) -> Option<&Command> {
        match &self.outcome {
            EventOutcome::Applied(command) | EventOutcome::Failed { command, .. } => Some(command),
            EventOutcome::Rejected(_) => None,
        }
    }

    /// Returns `true` when the store accepted the command.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self.outcome, EventOutcome::Applied(_))
    }
}
