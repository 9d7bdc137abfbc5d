//! Priority-ordered event dispatch with baked listener plans.
//!
//! The `cuibus-events` crate stores listeners per event kind in [`Order`]
//! slots and converts that dynamic storage into an immutable
//! [`BakedPlan`] on demand. Dispatch iterates the plan, never the mutable
//! slots, so listeners can be registered or removed from other threads while
//! an event is being delivered.
//!
//! # Architecture
//!
//! - [`Order`] ranks the slots.
//! - [`HandlerList`] owns the slots of one kind and caches its plan until a
//!   registration change marks it stale.
//! - [`HandlerRegistry`] is the owned context that maps kinds to lists and
//!   offers [`HandlerRegistry::bake_all`] for warming every plan at once.
//! - [`Listener`] is implemented by observers; closures qualify.
//!
//! Listener failures, including panics, are isolated and returned as
//! [`ListenerFailure`] values rather than aborting delivery.

pub mod error;
pub mod handler_list;
pub mod listener;
pub mod order;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::error::{ListenerError, ListenerFailure, RegistryError};
pub use self::handler_list::{BakedPlan, HandlerList};
pub use self::listener::{Listener, ListenerHandle, same_listener};
pub use self::order::Order;
pub use self::registry::HandlerRegistry;
