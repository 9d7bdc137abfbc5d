//! Unit tests for handler lists and baked plans.

use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};

use super::*;
use crate::error::ListenerError;

type Journal = Arc<Mutex<Vec<&'static str>>>;

fn recording(journal: &Journal, label: &'static str) -> ListenerHandle<u32> {
    let sink = Arc::clone(journal);
    Arc::new(move |_: &u32| -> Result<(), ListenerError> {
        sink.lock().expect("journal lock").push(label);
        Ok(())
    })
}

fn entries(journal: &Journal) -> Vec<&'static str> {
    journal.lock().expect("journal lock").clone()
}

#[fixture]
fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

#[fixture]
fn list() -> HandlerList<u32> {
    HandlerList::new("p2")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[rstest]
fn register_marks_plan_stale(list: HandlerList<u32>, journal: Journal) {
    let _ = list.bake();
    assert!(list.is_baked());
    list.register(Order::Default, recording(&journal, "a"))
        .expect("register");
    assert!(!list.is_baked());
}

#[rstest]
fn duplicate_registration_is_rejected(list: HandlerList<u32>, journal: Journal) {
    let listener = recording(&journal, "a");
    list.register(Order::Default, Arc::clone(&listener))
        .expect("first register");
    let _ = list.bake();

    let err = list
        .register(Order::Default, Arc::clone(&listener))
        .expect_err("duplicate should fail");
    assert!(matches!(
        err,
        RegistryError::DuplicateListener {
            order: Order::Default,
            ..
        }
    ));
    assert_eq!(list.listener_count(Order::Default), 1);
    assert!(list.is_baked(), "failed registration must not invalidate");
}

#[rstest]
fn same_listener_may_occupy_several_slots(list: HandlerList<u32>, journal: Journal) {
    let listener = recording(&journal, "a");
    list.register(Order::Default, Arc::clone(&listener))
        .expect("default");
    list.register(Order::Monitor, Arc::clone(&listener))
        .expect("monitor");
    assert_eq!(list.listener_count(Order::Default), 1);
    assert_eq!(list.listener_count(Order::Monitor), 1);
}

// ---------------------------------------------------------------------------
// Unregistration
// ---------------------------------------------------------------------------

#[rstest]
fn unregister_absent_listener_is_noop(list: HandlerList<u32>, journal: Journal) {
    let _ = list.bake();
    let stranger = recording(&journal, "stranger");
    assert!(!list.unregister(Order::Default, &stranger));
    assert!(!list.unregister_all_orders(&stranger));
    assert!(list.is_baked(), "no-op removal must keep the plan fresh");
}

#[rstest]
fn unregister_single_slot_leaves_others(list: HandlerList<u32>, journal: Journal) {
    let listener = recording(&journal, "a");
    list.register(Order::Early, Arc::clone(&listener))
        .expect("early");
    list.register(Order::Late, Arc::clone(&listener))
        .expect("late");

    assert!(list.unregister(Order::Early, &listener));
    assert_eq!(list.listener_count(Order::Early), 0);
    assert_eq!(list.listener_count(Order::Late), 1);
    assert!(!list.is_baked());
}

#[rstest]
fn unregister_all_orders_purges_every_slot(list: HandlerList<u32>, journal: Journal) {
    let listener = recording(&journal, "a");
    for order in [Order::Earliest, Order::Default, Order::Monitor] {
        list.register(order, Arc::clone(&listener))
            .expect("register");
    }
    assert!(list.unregister_all_orders(&listener));
    assert!(list.bake().is_empty());
}

// ---------------------------------------------------------------------------
// Baking
// ---------------------------------------------------------------------------

#[rstest]
fn bake_is_idempotent_without_rebuild(list: HandlerList<u32>, journal: Journal) {
    list.register(Order::Default, recording(&journal, "a"))
        .expect("register");

    let first = list.bake();
    let second = list.bake();
    assert!(Arc::ptr_eq(&first, &second), "fresh plan must be reused");
    assert_eq!(list.rebuild_count(), 1);
}

#[rstest]
fn bake_after_mutation_rebuilds_once(list: HandlerList<u32>, journal: Journal) {
    let _ = list.bake();
    list.register(Order::Default, recording(&journal, "a"))
        .expect("register");
    let _ = list.bake();
    let _ = list.bake();
    assert_eq!(list.rebuild_count(), 2);
}

#[rstest]
fn plan_orders_by_rank_then_insertion(list: HandlerList<u32>, journal: Journal) {
    list.register(Order::Monitor, recording(&journal, "monitor"))
        .expect("monitor");
    list.register(Order::Default, recording(&journal, "default-1"))
        .expect("default-1");
    list.register(Order::Earliest, recording(&journal, "earliest"))
        .expect("earliest");
    list.register(Order::Default, recording(&journal, "default-2"))
        .expect("default-2");

    let plan = list.bake();
    let mut orders: Vec<Order> = plan.iter().map(|(order, _)| order).collect();
    orders.dedup();
    assert_eq!(orders, vec![Order::Earliest, Order::Default, Order::Monitor]);

    let failures = plan.notify(&0);
    assert!(failures.is_empty());
    assert_eq!(
        entries(&journal),
        vec!["earliest", "default-1", "default-2", "monitor"]
    );
}

#[rstest]
fn held_plan_is_unaffected_by_later_registration(list: HandlerList<u32>, journal: Journal) {
    list.register(Order::Default, recording(&journal, "a"))
        .expect("register a");
    let snapshot = list.bake();
    list.register(Order::Default, recording(&journal, "b"))
        .expect("register b");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(list.bake().len(), 2);
}

#[rstest]
fn order_survives_unregister_and_rebake(list: HandlerList<u32>, journal: Journal) {
    let a = recording(&journal, "a");
    let b = recording(&journal, "b");
    let c = recording(&journal, "c");
    list.register(Order::Late, Arc::clone(&a)).expect("a");
    list.register(Order::Late, Arc::clone(&b)).expect("b");
    list.register(Order::Early, Arc::clone(&c)).expect("c");
    let _ = list.bake();

    assert!(list.unregister(Order::Late, &a));
    list.register(Order::Late, Arc::clone(&a)).expect("a again");

    let failures = list.bake().notify(&0);
    assert!(failures.is_empty());
    assert_eq!(entries(&journal), vec!["c", "b", "a"]);
}

// ---------------------------------------------------------------------------
// Notification isolation
// ---------------------------------------------------------------------------

#[rstest]
fn failing_and_panicking_listeners_are_isolated(list: HandlerList<u32>, journal: Journal) {
    let failing: ListenerHandle<u32> =
        Arc::new(|_: &u32| -> Result<(), ListenerError> { Err(ListenerError::new("refused")) });
    let panicking: ListenerHandle<u32> =
        Arc::new(|_: &u32| -> Result<(), ListenerError> { panic!("listener blew up") });

    list.register(Order::Early, failing).expect("failing");
    list.register(Order::Default, panicking).expect("panicking");
    list.register(Order::Default, recording(&journal, "same-slot"))
        .expect("same slot");
    list.register(Order::Monitor, recording(&journal, "monitor"))
        .expect("monitor");

    let failures = list.bake().notify(&1);

    assert_eq!(entries(&journal), vec!["same-slot", "monitor"]);
    assert_eq!(failures.len(), 2);
    assert!(matches!(
        failures.first(),
        Some(ListenerFailure::Failed {
            order: Order::Early,
            ..
        })
    ));
    match failures.get(1) {
        Some(ListenerFailure::Panicked { order, message }) => {
            assert_eq!(*order, Order::Default);
            assert!(message.contains("blew up"), "unexpected message: {message}");
        }
        other => panic!("expected panic failure, got {other:?}"),
    }
}

#[test]
fn concurrent_bakes_agree() {
    let list = Arc::new(HandlerList::<u32>::new("p"));
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    list.register(Order::Default, recording(&journal, "a"))
        .expect("register");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&list);
            std::thread::spawn(move || shared.bake().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("bake thread"), 1);
    }
    assert!(list.is_baked());
    assert_eq!(list.rebuild_count(), 1);
}
