//! Command bus for CUI selection messages.
//!
//! `cuibus` ties the protocol decoder from [`cuibus_protocol`] to the
//! priority-ordered listener registry from [`cuibus_events`]. The
//! [`Dispatcher`] accepts raw lines as they arrive, updates a
//! [`SelectionStore`](cuibus_protocol::SelectionStore), and announces every
//! line to the listeners registered for its kind.
//!
//! The crate also ships the `cuibus-replay` tool, which feeds a captured CUI
//! stream through a dispatcher and reports every line that failed. See
//! [`replay`].

mod dispatch;
pub mod replay;
pub mod telemetry;

pub use dispatch::{
    CommandEvent, CommandRegistry, DispatchError, DispatchReport, Dispatcher, EventOutcome,
};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
