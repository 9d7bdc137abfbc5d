//! Shared world and listener doubles for the behaviour suites.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cuibus_events::{ListenerError, ListenerHandle, Order, RegistryError};
use cuibus_protocol::{CommandKind, Selection};

use crate::{CommandEvent, DispatchReport, Dispatcher};

/// Ordered record of listener invocations.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    /// Builds a listener that appends `label:outcome` on every event.
    pub fn recorder(&self, label: &str) -> ListenerHandle<CommandEvent> {
        let entries = Arc::clone(&self.0);
        let name = label.to_owned();
        Arc::new(move |event: &CommandEvent| -> Result<(), ListenerError> {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(format!("{name}:{}", event.outcome().label()));
            Ok(())
        })
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    pub dispatcher: Dispatcher<Selection>,
    pub journal: Journal,
    listeners: HashMap<String, ListenerHandle<CommandEvent>>,
    pub report: Option<DispatchReport>,
    pub registration: Option<Result<(), RegistryError>>,
}

impl TestWorld {
    /// Builds a world around an empty selection.
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(Selection::new()),
            journal: Journal::default(),
            listeners: HashMap::new(),
            report: None,
            registration: None,
        }
    }

    /// Returns the listener named `name`, creating a recorder on first use.
    pub fn listener(&mut self, name: &str) -> ListenerHandle<CommandEvent> {
        let journal = self.journal.clone();
        Arc::clone(
            self.listeners
                .entry(name.to_owned())
                .or_insert_with(|| journal.recorder(name)),
        )
    }

    /// Registers the named listener and remembers the outcome.
    pub fn register(&mut self, name: &str, kind: CommandKind, order: Order) {
        let listener = self.listener(name);
        self.registration = Some(self.dispatcher.register(kind, order, listener));
    }

    /// Dispatches one line and keeps its report.
    pub fn dispatch(&mut self, line: &str) {
        self.report = Some(self.dispatcher.handle(line));
    }

    /// Report of the last dispatched line.
    pub fn last_report(&self) -> &DispatchReport {
        match self.report.as_ref() {
            Some(report) => report,
            None => panic!("no line has been dispatched"),
        }
    }
}

/// Fresh world wrapped for step access.
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
