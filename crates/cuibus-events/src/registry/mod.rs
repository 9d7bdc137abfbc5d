//! Registry context owning the handler lists of every event kind.
//!
//! The [`HandlerRegistry`] is the explicitly owned replacement for a
//! process-wide list of handler lists. Whoever assembles a dispatcher creates
//! one, shares it with the components that register listeners, and calls
//! [`HandlerRegistry::bake_all`] once registration has settled so the first
//! dispatch of each kind does not pay for a rebuild.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{ListenerFailure, RegistryError};
use crate::handler_list::{BakedPlan, EVENTS_TARGET, HandlerList};
use crate::listener::ListenerHandle;
use crate::order::Order;

/// Handler lists keyed by event kind.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cuibus_events::{HandlerRegistry, ListenerError, ListenerHandle, Order};
///
/// let registry: HandlerRegistry<&'static str, u32> = HandlerRegistry::new();
/// let listener: ListenerHandle<u32> =
///     Arc::new(|_: &u32| -> Result<(), ListenerError> { Ok(()) });
///
/// registry
///     .register("p2", Order::Default, Arc::clone(&listener))
///     .expect("first registration succeeds");
/// assert!(registry.register("p2", Order::Default, listener).is_err());
///
/// registry.bake_all();
/// assert_eq!(registry.bake("p2").len(), 1);
/// ```
pub struct HandlerRegistry<K, E> {
    lists: RwLock<HashMap<K, Arc<HandlerList<E>>>>,
}

impl<K, E> HandlerRegistry<K, E>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with an empty list for each of `kinds`.
    #[must_use]
    pub fn with_kinds(kinds: impl IntoIterator<Item = K>) -> Self {
        let lists = kinds
            .into_iter()
            .map(|kind| (kind, Arc::new(HandlerList::new(kind.to_string()))))
            .collect();
        Self {
            lists: RwLock::new(lists),
        }
    }

    /// Returns the handler list for `kind`, creating it on first use.
    pub fn handlers(&self, kind: K) -> Arc<HandlerList<E>> {
        if let Some(list) = self.existing(kind) {
            return list;
        }
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            lists
                .entry(kind)
                .or_insert_with(|| Arc::new(HandlerList::new(kind.to_string()))),
        )
    }

    fn existing(&self, kind: K) -> Option<Arc<HandlerList<E>>> {
        self.lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map(Arc::clone)
    }

    /// Registers `listener` for `kind` at `order`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateListener`] if the listener already
    /// occupies that slot.
    pub fn register(
        &self,
        kind: K,
        order: Order,
        listener: ListenerHandle<E>,
    ) -> Result<(), RegistryError> {
        self.handlers(kind).register(order, listener)
    }

    /// Removes `listener` from one slot of `kind`. Absent listeners are ignored.
    pub fn unregister(&self, kind: K, order: Order, listener: &ListenerHandle<E>) -> bool {
        self.existing(kind)
            .is_some_and(|list| list.unregister(order, listener))
    }

    /// Removes `listener` from every slot of `kind`.
    pub fn unregister_all_orders(&self, kind: K, listener: &ListenerHandle<E>) -> bool {
        self.existing(kind)
            .is_some_and(|list| list.unregister_all_orders(listener))
    }

    /// Returns the baked plan for `kind`, rebuilding it if stale.
    pub fn bake(&self, kind: K) -> Arc<BakedPlan<E>> {
        self.handlers(kind).bake()
    }

    /// Bakes every list held by the registry.
    pub fn bake_all(&self) {
        let lists: Vec<Arc<HandlerList<E>>> = self
            .lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Arc::clone)
            .collect();
        for list in &lists {
            let _ = list.bake();
        }
        debug!(target: EVENTS_TARGET, lists = lists.len(), "baked all handler lists");
    }

    /// Bakes `kind` and invokes its listeners with `event`.
    pub fn notify(&self, kind: K, event: &E) -> Vec<ListenerFailure> {
        self.bake(kind).notify(event)
    }

    /// Number of listeners registered for `kind` at `order`.
    #[must_use]
    pub fn listener_count(&self, kind: K, order: Order) -> usize {
        self.existing(kind)
            .map_or(0, |list| list.listener_count(order))
    }

    /// Returns `true` when the plan for `kind` is fresh.
    ///
    /// Kinds that have never been touched count as stale.
    #[must_use]
    pub fn is_baked(&self, kind: K) -> bool {
        self.existing(kind).is_some_and(|list| list.is_baked())
    }
}

impl<K, E> Default for HandlerRegistry<K, E>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for HandlerRegistry<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self
            .lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("HandlerRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}
