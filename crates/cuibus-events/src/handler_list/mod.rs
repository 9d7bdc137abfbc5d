//! Per-kind listener storage with lazily baked execution plans.
//!
//! A [`HandlerList`] keeps an ordered map from [`Order`] to listener sequences
//! as the mutable source of truth. Dispatch never reads that map directly.
//! Instead it asks for a [`BakedPlan`], an immutable flattened snapshot that
//! is rebuilt only after the map has changed and is published by swapping an
//! `Arc`. A dispatch holding a plan keeps iterating that plan even if a
//! listener is registered or removed concurrently.
//!
//! Slot mutation and plan publication both happen while the slot mutex is
//! held, so a rebuild can never publish a plan that predates a registration
//! and still have it marked fresh.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::error::{ListenerFailure, RegistryError};
use crate::listener::{ListenerHandle, same_listener};
use crate::order::Order;

/// Tracing target for registry operations.
pub(crate) const EVENTS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::handlers");

type Slots<E> = BTreeMap<Order, Vec<ListenerHandle<E>>>;

/// Immutable, ordered snapshot of the listeners for one event kind.
///
/// Slots appear in ascending [`Order`] rank; empty slots are omitted.
pub struct BakedPlan<E> {
    slots: Box<[(Order, Box<[ListenerHandle<E>]>)]>,
}

impl<E> BakedPlan<E> {
    fn from_slots(source: &Slots<E>) -> Self {
        let baked_slots = source
            .iter()
            .filter(|(_, listeners)| !listeners.is_empty())
            .map(|(order, listeners)| (*order, listeners.clone().into_boxed_slice()))
            .collect();
        Self { slots: baked_slots }
    }

    /// Iterates every listener together with its slot, in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Order, &ListenerHandle<E>)> + '_ {
        self.slots.iter().flat_map(|(order, listeners)| {
            listeners.iter().map(move |listener| (*order, listener))
        })
    }

    /// Total number of listeners across all slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().map(|(_, listeners)| listeners.len()).sum()
    }

    /// Returns `true` when the plan holds no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Invokes every listener with `event`.
    ///
    /// Errors and panics are caught per listener and returned; they never
    /// prevent later listeners from running.
    pub fn notify(&self, event: &E) -> Vec<ListenerFailure> {
        let mut failures = Vec::new();
        for (order, listener) in self.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(source)) => failures.push(ListenerFailure::Failed { order, source }),
                Err(payload) => failures.push(ListenerFailure::Panicked {
                    order,
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
        failures
    }
}

impl<E> fmt::Debug for BakedPlan<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|(order, listeners)| (order, listeners.len())),
            )
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("non-string panic payload"))
}

/// Listener storage for a single event kind.
pub struct HandlerList<E> {
    kind: String,
    slots: Mutex<Slots<E>>,
    baked: RwLock<Option<Arc<BakedPlan<E>>>>,
    rebuilds: AtomicUsize,
}

impl<E> HandlerList<E> {
    /// Creates an empty list labelled with the event kind it serves.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            slots: Mutex::new(BTreeMap::new()),
            baked: RwLock::new(None),
            rebuilds: AtomicUsize::new(0),
        }
    }

    /// Appends `listener` to the `order` slot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateListener`] if the same handle is
    /// already present in that slot. The list is left unchanged.
    pub fn register(&self, order: Order, listener: ListenerHandle<E>) -> Result<(), RegistryError> {
        let mut slots = self.lock_slots();
        let slot = slots.entry(order).or_default();
        if slot.iter().any(|existing| same_listener(existing, &listener)) {
            return Err(RegistryError::duplicate_listener(&self.kind, order));
        }
        slot.push(listener);
        self.invalidate();
        debug!(target: EVENTS_TARGET, kind = %self.kind, %order, "listener registered");
        Ok(())
    }

    /// Removes `listener` from the `order` slot.
    ///
    /// Returns `true` if the listener was present.
    pub fn unregister(&self, order: Order, listener: &ListenerHandle<E>) -> bool {
        let mut slots = self.lock_slots();
        let removed = Self::remove_from(&mut slots, order, listener);
        if removed {
            self.invalidate();
            debug!(target: EVENTS_TARGET, kind = %self.kind, %order, "listener unregistered");
        }
        removed
    }

    /// Removes `listener` from every slot.
    ///
    /// Returns `true` if the listener was present in at least one slot.
    pub fn unregister_all_orders(&self, listener: &ListenerHandle<E>) -> bool {
        let mut slots = self.lock_slots();
        let mut removed = false;
        for order in Order::ALL {
            removed |= Self::remove_from(&mut slots, order, listener);
        }
        if removed {
            self.invalidate();
            debug!(target: EVENTS_TARGET, kind = %self.kind, "listener unregistered from all orders");
        }
        removed
    }

    fn remove_from(slots: &mut Slots<E>, order: Order, listener: &ListenerHandle<E>) -> bool {
        let Some(slot) = slots.get_mut(&order) else {
            return false;
        };
        let before = slot.len();
        slot.retain(|existing| !same_listener(existing, listener));
        before != slot.len()
    }

    /// Returns the current plan, rebuilding it first if it is stale.
    ///
    /// A fresh plan is returned as-is without touching the slot map.
    pub fn bake(&self) -> Arc<BakedPlan<E>> {
        if let Some(plan) = self.read_baked().as_ref() {
            return Arc::clone(plan);
        }

        let slots = self.lock_slots();
        let mut baked = self.write_baked();
        // Another caller may have rebuilt while this one waited for the lock.
        if let Some(plan) = baked.as_ref() {
            return Arc::clone(plan);
        }

        let plan = Arc::new(BakedPlan::from_slots(&slots));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        trace!(
            target: EVENTS_TARGET,
            kind = %self.kind,
            listeners = plan.len(),
            "baked handler plan"
        );
        *baked = Some(Arc::clone(&plan));
        plan
    }

    /// Returns `true` when the cached plan matches the slot map.
    #[must_use]
    pub fn is_baked(&self) -> bool {
        self.read_baked().is_some()
    }

    /// Number of listeners currently registered in `order`.
    #[must_use]
    pub fn listener_count(&self, order: Order) -> usize {
        self.lock_slots().get(&order).map_or(0, Vec::len)
    }

    /// Number of times the plan has been rebuilt since creation.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.load(Ordering::Relaxed)
    }

    /// Must be called with the slot mutex held.
    fn invalidate(&self) {
        *self.write_baked() = None;
    }

    // Listeners never run while these locks are held, so a poisoned lock
    // still guards consistent data.
    fn lock_slots(&self) -> MutexGuard<'_, Slots<E>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_baked(&self) -> RwLockReadGuard<'_, Option<Arc<BakedPlan<E>>>> {
        self.baked.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_baked(&self) -> RwLockWriteGuard<'_, Option<Arc<BakedPlan<E>>>> {
        self.baked.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> fmt::Debug for HandlerList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerList")
            .field("kind", &self.kind)
            .field("baked", &self.is_baked())
            .field("rebuilds", &self.rebuild_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
