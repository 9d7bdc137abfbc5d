//! Decode, apply and notify pipeline for CUI lines.
//!
//! A [`Dispatcher`] owns the selection store and shares a
//! [`HandlerRegistry`](cuibus_events::HandlerRegistry) with whoever registers
//! listeners. Every call to [`Dispatcher::handle`] runs three steps:
//!
//! 1. decode the raw line into a [`Command`](cuibus_protocol::Command);
//! 2. apply the command to the store, all-or-nothing;
//! 3. bake the command kind's plan and notify its listeners with a
//!    [`CommandEvent`].
//!
//! Apply failures are still announced to listeners, as are decode failures
//! that identify a kind (wrong arity or an unparsable field). Lines whose
//! discriminator is unknown have no kind to notify and are only reported.
//!
//! Lines are handled strictly in call order; the dispatcher never buffers or
//! reorders input.

mod dispatcher;
mod errors;
mod event;
mod report;

pub use self::dispatcher::{CommandRegistry, Dispatcher};
pub use self::errors::DispatchError;
pub use self::event::{CommandEvent, EventOutcome};
pub use self::report::DispatchReport;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
