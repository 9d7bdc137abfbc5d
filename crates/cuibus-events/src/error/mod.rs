//! Domain errors raised by handler registration and listener invocation.
//!
//! All errors use `thiserror`-derived enums with structured context so callers
//! can inspect the failure programmatically.

use thiserror::Error;

use crate::order::Order;

/// Errors arising from registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The listener is already present in the requested slot.
    #[error("listener is already registered for '{kind}' at order {order}")]
    DuplicateListener {
        /// Event kind the registration targeted.
        kind: String,
        /// Slot that already holds the listener.
        order: Order,
    },
}

impl RegistryError {
    /// Creates a duplicate listener error.
    pub fn duplicate_listener(kind: impl Into<String>, order: Order) -> Self {
        Self::DuplicateListener {
            kind: kind.into(),
            order,
        }
    }
}

/// Error returned by a listener that could not handle an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Creates a listener error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A listener invocation that did not complete normally.
///
/// Failures are collected during notification and handed back to the caller
/// as warnings; they never interrupt the remaining listeners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerFailure {
    /// The listener returned an error.
    #[error("listener at order {order} failed: {source}")]
    Failed {
        /// Slot the listener ran in.
        order: Order,
        /// Error the listener returned.
        #[source]
        source: ListenerError,
    },

    /// The listener panicked.
    #[error("listener at order {order} panicked: {message}")]
    Panicked {
        /// Slot the listener ran in.
        order: Order,
        /// Panic payload rendered as text.
        message: String,
    },
}

impl ListenerFailure {
    /// Returns the slot in which the failure happened.
    #[must_use]
    pub const fn order(&self) -> Order {
        match self {
            Self::Failed { order, .. } | Self::Panicked { order, .. } => *order,
        }
    }
}
