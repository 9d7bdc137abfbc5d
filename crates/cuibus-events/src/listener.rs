//! Listener abstraction.
//!
//! Listeners are shared as [`ListenerHandle`]s. Identity is the address of the
//! shared allocation, so registering the same handle twice in one slot is
//! detectable while two separately allocated listeners with identical
//! behaviour are treated as distinct.

use std::sync::Arc;

use crate::error::ListenerError;

/// Receives events of type `E`.
///
/// Listeners run synchronously on the dispatching thread. Slow work must be
/// handed off by the listener itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cuibus_events::{Listener, ListenerError, ListenerHandle};
///
/// struct Redraw;
///
/// impl Listener<u32> for Redraw {
///     fn on_event(&self, _event: &u32) -> Result<(), ListenerError> {
///         Ok(())
///     }
/// }
///
/// let handle: ListenerHandle<u32> = Arc::new(Redraw);
/// assert!(handle.on_event(&7).is_ok());
/// ```
pub trait Listener<E>: Send + Sync {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] when the listener could not process the
    /// event. The dispatcher records the failure and carries on.
    fn on_event(&self, event: &E) -> Result<(), ListenerError>;
}

impl<E, F> Listener<E> for F
where
    F: Fn(&E) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, event: &E) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Shared, identity-comparable reference to a listener.
pub type ListenerHandle<E> = Arc<dyn Listener<E>>;

/// Returns `true` when both handles point at the same listener.
#[must_use]
pub fn same_listener<E>(left: &ListenerHandle<E>, right: &ListenerHandle<E>) -> bool {
    Arc::ptr_eq(left, right)
}
