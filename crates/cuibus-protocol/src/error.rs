//! Errors raised while decoding and applying CUI commands.
//!
//! Decoding errors mean no command exists; apply errors mean a command was
//! decoded but the store refused it and was left untouched.

use thiserror::Error;

use crate::kind::{CommandKind, FieldType};

/// Failures turning a raw line into a [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The discriminator is not part of the protocol.
    #[error("unknown command '{discriminator}'")]
    UnknownCommand {
        /// Discriminator as received.
        discriminator: String,
    },

    /// The argument count differs from the kind's declared arity.
    #[error("'{kind}' expects {expected} argument(s), got {actual}")]
    Arity {
        /// Kind selected by the discriminator.
        kind: CommandKind,
        /// Declared arity.
        expected: usize,
        /// Arguments received.
        actual: usize,
    },

    /// An argument could not be converted to its declared type.
    #[error("'{kind}' argument {index} is not a valid {expected}: '{token}'")]
    FieldParse {
        /// Kind selected by the discriminator.
        kind: CommandKind,
        /// Zero-based argument index, discriminator excluded.
        index: usize,
        /// Declared type of the argument.
        expected: FieldType,
        /// Raw token as received.
        token: String,
    },
}

impl DecodeError {
    /// Creates an unknown command error.
    pub fn unknown_command(discriminator: impl Into<String>) -> Self {
        Self::UnknownCommand {
            discriminator: discriminator.into(),
        }
    }

    /// Creates an arity error.
    #[must_use]
    pub const fn arity(kind: CommandKind, expected: usize, actual: usize) -> Self {
        Self::Arity {
            kind,
            expected,
            actual,
        }
    }

    /// Creates a field conversion error.
    pub fn field_parse(
        kind: CommandKind,
        index: usize,
        expected: FieldType,
        token: impl Into<String>,
    ) -> Self {
        Self::FieldParse {
            kind,
            index,
            expected,
            token: token.into(),
        }
    }

    /// Returns the kind the message was addressed to, if it was recognised.
    #[must_use]
    pub const fn kind(&self) -> Option<CommandKind> {
        match self {
            Self::UnknownCommand { .. } => None,
            Self::Arity { kind, .. } | Self::FieldParse { kind, .. } => Some(*kind),
        }
    }
}

/// Failures applying a decoded command to a selection store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// A field lies outside the range the store accepts.
    #[error("'{kind}' {field} {value} is out of range ({allowed})")]
    OutOfRange {
        /// Kind of the rejected command.
        kind: CommandKind,
        /// Name of the offending field.
        field: &'static str,
        /// Offending value rendered as text.
        value: String,
        /// Description of the accepted range.
        allowed: String,
    },

    /// Polygon bounds with the minimum above the maximum.
    #[error("polygon bounds are inverted: min {min} > max {max}")]
    InvertedBounds {
        /// Requested minimum height.
        min: i32,
        /// Requested maximum height.
        max: i32,
    },
}

impl ApplyError {
    /// Creates an out-of-range error.
    pub fn out_of_range(
        kind: CommandKind,
        field: &'static str,
        value: impl ToString,
        allowed: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            kind,
            field,
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }

    /// Kind of the rejected command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::OutOfRange { kind, .. } => *kind,
            Self::InvertedBounds { .. } => CommandKind::RegionPolygon,
        }
    }
}
