//! The dispatcher façade.

use std::sync::Arc;

use cuibus_events::{HandlerRegistry, ListenerFailure, ListenerHandle, Order, RegistryError};
use cuibus_protocol::{CommandKind, DecodeError, Decoder, SelectionStore, strip_terminator};
use tracing::{debug, warn};

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use super::event::{CommandEvent, EventOutcome};
use super::report::DispatchReport;

/// Registry of command listeners keyed by kind.
pub type CommandRegistry = HandlerRegistry<CommandKind, CommandEvent>;

/// Decodes CUI lines, applies them to a store and notifies listeners.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cuibus::{CommandEvent, Dispatcher};
/// use cuibus_events::{ListenerError, ListenerHandle, Order};
/// use cuibus_protocol::{ColumnPos, CommandKind, Selection};
///
/// let mut dispatcher = Dispatcher::new(Selection::new());
/// let redraw: ListenerHandle<CommandEvent> =
///     Arc::new(|_: &CommandEvent| -> Result<(), ListenerError> { Ok(()) });
/// dispatcher
///     .register(CommandKind::Point2D, Order::Default, redraw)
///     .expect("fresh registration");
///
/// let report = dispatcher.handle("p2|0|120|-64|4");
/// assert!(report.is_ok());
/// let vertex = dispatcher.store().polygon().and_then(|polygon| polygon.vertex(0));
/// assert_eq!(vertex, Some(ColumnPos::new(120, -64)));
/// ```
pub struct Dispatcher<S> {
    decoder: Decoder,
    store: S,
    registry: Arc<CommandRegistry>,
}

impl<S> Dispatcher<S>
where
    S: SelectionStore,
{
    /// Creates a dispatcher with its own registry holding a list per kind.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_registry(store, Arc::new(CommandRegistry::with_kinds(CommandKind::ALL)))
    }

    /// Creates a dispatcher that notifies listeners held by `registry`.
    #[must_use]
    pub const fn with_registry(store: S, registry: Arc<CommandRegistry>) -> Self {
        Self {
            decoder: Decoder::new(),
            store,
            registry,
        }
    }

    /// Shared listener registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Registers `listener` for `kind` at `order`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateListener`] if the listener already
    /// occupies that slot.
    pub fn register(
        &self,
        kind: CommandKind,
        order: Order,
        listener: ListenerHandle<CommandEvent>,
    ) -> Result<(), RegistryError> {
        self.registry.register(kind, order, listener)
    }

    /// Registers `listener` for every kind at `order`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] encountered; kinds registered
    /// before the failure keep the listener.
    pub fn register_all_kinds(
        &self,
        order: Order,
        listener: &ListenerHandle<CommandEvent>,
    ) -> Result<(), RegistryError> {
        CommandKind::ALL
            .into_iter()
            .try_for_each(|kind| self.register(kind, order, Arc::clone(listener)))
    }

    /// Bakes the plan of every kind so first dispatches skip the rebuild.
    pub fn bake_all(&self) {
        self.registry.bake_all();
    }

    /// The selection store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the selection store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the dispatcher and returns its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Decodes, applies and announces one line.
    ///
    /// The returned report carries the line's own outcome and, separately,
    /// any listener failures.
    pub fn handle(&mut self, raw: &str) -> DispatchReport {
        let line = strip_terminator(raw);
        let command = match self.decoder.decode(line) {
            Ok(command) => command,
            Err(error) => return self.reject(line, error),
        };

        let kind = command.kind();
        match command.apply(&mut self.store) {
            Ok(()) => {
                debug!(target: DISPATCH_TARGET, %kind, raw = line, "applied command");
                let applied =
                    CommandEvent::new(line, kind, EventOutcome::Applied(command.clone()));
                let failures = self.notify(&applied);
                DispatchReport::applied(command, failures)
            }
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    %kind,
                    raw = line,
                    %error,
                    "store refused command"
                );
                let refused = CommandEvent::new(
                    line,
                    kind,
                    EventOutcome::Failed {
                        command: command.clone(),
                        error: error.clone(),
                    },
                );
                let failures = self.notify(&refused);
                DispatchReport::failed(Some(command), DispatchError::apply(line, error), failures)
            }
        }
    }

    fn reject(&self, raw: &str, error: DecodeError) -> DispatchReport {
        warn!(target: DISPATCH_TARGET, raw, %error, "rejected line");
        let failures = match error.kind() {
            Some(kind) => {
                let event = CommandEvent::new(raw, kind, EventOutcome::Rejected(error.clone()));
                self.notify(&event)
            }
            None => Vec::new(),
        };
        DispatchReport::failed(None, DispatchError::decode(raw, error), failures)
    }

    fn notify(&self, event: &CommandEvent) -> Vec<ListenerFailure> {
        let failures = self.registry.notify(event.kind(), event);
        for failure in &failures {
            warn!(
                target: DISPATCH_TARGET,
                kind = %event.kind(),
                order = %failure.order(),
                error = %failure,
                "listener failed"
            );
        }
        failures
    }
}

impl<S> Default for Dispatcher<S>
where
    S: SelectionStore + Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> std::fmt::Debug for Dispatcher<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<S> Dispatcher<S>
where
    S: SelectionStore,
{
    pub(crate) fn handle_all<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Vec<DispatchReport> {
        lines.into_iter().map(|line| self.handle(line)).collect()
    }
}
