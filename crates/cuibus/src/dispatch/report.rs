//! Per-line dispatch results.

use cuibus_events::ListenerFailure;
use cuibus_protocol::{Command, CommandKind};

use super::errors::DispatchError;

/// Result of handling one line.
///
/// The line's own outcome and the failures of its listeners are kept apart:
/// listener failures are warnings and never turn a successful line into an
/// error.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct DispatchReport {
    command: Option<Command>,
    error: Option<DispatchError>,
    listener_failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    pub(crate) const fn applied(command: Command, listener_failures: Vec<ListenerFailure>) -> Self {
        Self {
            command: Some(command),
            error: None,
            listener_failures,
        }
    }

    pub(crate) const fn failed(
        command: Option<Command>,
        error: DispatchError,
        listener_failures: Vec<ListenerFailure>,
    ) -> Self {
        Self {
            command,
            error: Some(error),
            listener_failures,
        }
    }

    /// Kind the line was addressed to, when it was recognised.
    #[must_use]
    pub fn kind(&self) -> Option<CommandKind> {
        self.command
            .as_ref()
            .map(Command::kind)
            .or_else(|| self.error.as_ref().and_then(DispatchError::kind))
    }

    /// Decoded command, if decoding succeeded.
    #[must_use]
    pub const fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    /// Decode or apply failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&DispatchError> {
        self.error.as_ref()
    }

    /// Listeners that returned an error or panicked.
    #[must_use]
    pub fn listener_failures(&self) -> &[ListenerFailure] {
        &self.listener_failures
    }

    /// Returns `true` when the line decoded and applied.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the report into the line's outcome, keeping listener
    /// failures as warnings on success.
    ///
    /// # Errors
    ///
    /// Returns the [`DispatchError`] when the line failed to decode or apply.
    pub fn into_result(self) -> Result<Vec<ListenerFailure>, DispatchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.listener_failures),
        }
    }
}
