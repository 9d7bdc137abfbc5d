//! Error types for dispatch failures.
//!
//! Each variant keeps the offending line so callers can report it without
//! holding on to the input themselves.

use cuibus_protocol::{ApplyError, CommandKind, DecodeError};
use thiserror::Error;

/// Errors surfaced while handling one CUI line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The line could not be decoded into a command.
    #[error("failed to decode '{raw}': {source}")]
    Decode {
        /// Line as received, without its terminator.
        raw: String,
        /// Decoder failure.
        #[source]
        source: DecodeError,
    },

    /// The command was decoded but the store refused it.
    #[error("failed to apply '{raw}': {source}")]
    Apply {
        /// Line as received, without its terminator.
        raw: String,
        /// Store validation failure.
        #[source]
        source: ApplyError,
    },
}

impl DispatchError {
    /// Creates a decode error.
    pub fn decode(raw: impl Into<String>, source: DecodeError) -> Self {
        Self::Decode {
            raw: raw.into(),
            source,
        }
    }

    /// Creates an apply error.
    pub fn apply(raw: impl Into<String>, source: ApplyError) -> Self {
        Self::Apply {
            raw: raw.into(),
            source,
        }
    }

    /// Line that caused the failure.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Decode { raw, .. } | Self::Apply { raw, .. } => raw,
        }
    }

    /// Kind the line was addressed to, when the discriminator was recognised.
    #[must_use]
    pub const fn kind(&self) -> Option<CommandKind> {
        match self {
            Self::Decode { source, .. } => source.kind(),
            Self::Apply { source, .. } => Some(source.kind()),
        }
    }
}
