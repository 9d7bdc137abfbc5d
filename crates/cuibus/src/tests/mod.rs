//! Test suites for the cuibus dispatcher.

mod support;
