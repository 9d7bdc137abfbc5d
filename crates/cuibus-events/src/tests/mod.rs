//! Crate-level tests exercising registration alongside delivery.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use crate::error::ListenerError;
use crate::listener::ListenerHandle;
use crate::order::Order;
use crate::registry::HandlerRegistry;

fn counting(counter: &Arc<AtomicUsize>) -> ListenerHandle<u16> {
    let tally = Arc::clone(counter);
    Arc::new(move |_: &u16| -> Result<(), ListenerError> {
        tally.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

#[test]
fn registration_during_delivery_never_exposes_partial_plans() {
    let registry: Arc<HandlerRegistry<&'static str, u16>> = Arc::new(HandlerRegistry::new());
    let counter = Arc::new(AtomicUsize::new(0));
    registry
        .register("p", Order::Default, counting(&counter))
        .expect("seed listener");

    let barrier = Arc::new(Barrier::new(2));
    let writer = {
        let shared = Arc::clone(&registry);
        let tally = Arc::clone(&counter);
        let start = Arc::clone(&barrier);
        thread::spawn(move || {
            start.wait();
            for _ in 0..50 {
                let listener = counting(&tally);
                shared
                    .register("p", Order::Late, Arc::clone(&listener))
                    .expect("register");
                assert!(shared.unregister("p", Order::Late, &listener));
            }
        })
    };

    barrier.wait();
    for _ in 0..200 {
        let plan = registry.bake("p");
        let seen = plan.len();
        assert!(seen == 1 || seen == 2, "unexpected plan size {seen}");
        assert!(plan.notify(&0).is_empty());
    }
    writer.join().expect("writer thread");

    let settled = registry.bake("p");
    assert_eq!(settled.len(), 1);
    assert!(counter.load(Ordering::SeqCst) >= 200);
}
