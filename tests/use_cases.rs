//! Tests the conventional use cases of the [reactive_patterns] observer notifier -- the scenarios a [Product]'s
//! front-ends rely on: who gets notified, about what and in which order.

use std::sync::Arc;
use parking_lot::Mutex;
use reactive_patterns::prelude::*;


#[ctor::ctor]
fn suite_setup() {
    simple_logger::SimpleLogger::new().with_utc_timestamps().init().unwrap_or_else(|_| eprintln!("--> LOGGER WAS ALREADY STARTED"));
}

const INSTRUMENTS: usize = Instruments::Tracing.into();

/// Observer keeping every `(old, new)` pair it was notified about
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(i32, i32)>>,
}
impl Observer<i32> for Recorder {
    fn update(&self, event: &PriceChangeEvent) -> PatternResult<()> {
        self.events.lock().push((*event.old_value(), *event.new_value()));
        Ok(())
    }
}
impl Recorder {
    fn events(&self) -> Vec<(i32, i32)> {
        self.events.lock().clone()
    }
}


/// attach A, `set_state(100)` from the initial 0 => A sees (0,100)
#[cfg_attr(not(doc),test)]
fn single_observer_sees_the_transition() {
    let product = Product::<INSTRUMENTS>::new("single_observer_sees_the_transition", 0);
    let a = Arc::new(Recorder::default());
    product.attach(a.clone());
    product.set_state(100).expect("dispatch failed");
    assert_eq!(a.events(), vec![(0, 100)], "wrong events for A");
}

/// attach A & B, `set_state(100)` then `set_state(150)` => both see (0,100), (100,150) -- in this order
#[cfg_attr(not(doc),test)]
fn every_observer_sees_every_transition_in_order() {
    let product = Product::<INSTRUMENTS>::new("every_observer_sees_every_transition_in_order", 0);
    let a = Arc::new(Recorder::default());
    let b = Arc::new(Recorder::default());
    product.attach(a.clone());
    product.attach(b.clone());
    product.set_state(100).expect("dispatch failed");
    product.set_state(150).expect("dispatch failed");
    assert_eq!(a.events(), vec![(0, 100), (100, 150)], "wrong events for A");
    assert_eq!(b.events(), vec![(0, 100), (100, 150)], "wrong events for B");
}

/// attach A, detach A, `set_state(50)` => A sees nothing
#[cfg_attr(not(doc),test)]
fn detached_observers_are_not_notified() {
    let product = Product::<INSTRUMENTS>::new("detached_observers_are_not_notified", 0);
    let a = Arc::new(Recorder::default());
    product.attach(a.clone());
    assert!(product.detach(&a), "A was registered");
    product.set_state(50).expect("dispatch failed");
    assert!(a.events().is_empty(), "A was detached, yet it was notified: {:?}", a.events());
}

/// attach A twice, `set_state(10)` => A is notified twice about the same event
#[cfg_attr(not(doc),test)]
fn duplicate_registrations_mean_duplicate_notifications() {
    let product = Product::<INSTRUMENTS>::new("duplicate_registrations_mean_duplicate_notifications", 0);
    let a = Arc::new(Recorder::default());
    product.attach(a.clone());
    product.attach(a.clone());
    product.set_state(10).expect("dispatch failed");
    assert_eq!(a.events(), vec![(0, 10), (0, 10)], "A should have been notified once per registration");
    assert_eq!(product.metrics().delivered_notifications(), 2, "two deliveries should have been counted");
}

/// writing the current value, any number of times, never notifies
#[cfg_attr(not(doc),test)]
fn no_op_writes_are_idempotent() {
    let product = Product::<INSTRUMENTS>::new("no_op_writes_are_idempotent", 0);
    let a = Arc::new(Recorder::default());
    product.attach(a.clone());
    for _ in 0..3 {
        assert!(!product.set_state(0).expect("no-op failed"), "writing the current value must be a no-op");
    }
    product.set_state(1).expect("dispatch failed");
    for _ in 0..3 {
        product.set_state(1).expect("no-op failed");
    }
    assert_eq!(a.events(), vec![(0, 1)], "only the real change should have been dispatched");
    assert_eq!(product.metrics().ignored_changes(), 6, "no-op writes weren't counted");
}

/// exactly one notification per accepted change (per registration), whatever the mix of attaches, detaches & writes
#[cfg_attr(not(doc),test)]
fn notifications_follow_the_registration_timeline() {
    let product = Product::<INSTRUMENTS>::new("notifications_follow_the_registration_timeline", 0);
    let a = Arc::new(Recorder::default());
    let b = Arc::new(Recorder::default());
    product.attach(a.clone());
    product.set_state(1).expect("dispatch failed");
    product.attach(b.clone());
    product.set_state(2).expect("dispatch failed");
    product.set_state(2).expect("no-op failed");
    assert!(product.detach(&a), "A was registered");
    product.set_state(3).expect("dispatch failed");
    assert!(!product.detach(&a), "A was already detached");
    product.attach(a.clone());
    product.set_state(4).expect("dispatch failed");
    assert_eq!(a.events(), vec![(0, 1), (1, 2), (3, 4)],         "wrong timeline for A");
    assert_eq!(b.events(), vec![(1, 2), (2, 3), (3, 4)],         "wrong timeline for B");
    assert_eq!(product.metrics().accepted_changes(), 4,          "wrong accepted changes count");
    assert_eq!(product.state(), 4,                               "wrong final state");
}

/// an observer error reaches the caller of `set_state()` and the observers registered after it miss the event
#[cfg_attr(not(doc),test)]
fn observer_errors_abort_the_dispatch() {
    let product = Product::<INSTRUMENTS>::new("observer_errors_abort_the_dispatch", 0);
    let before = Arc::new(Recorder::default());
    let after = Arc::new(Recorder::default());
    product.attach(before.clone());
    product.attach(on_change(|event: &PriceChangeEvent| if *event.new_value() > 1000 {
        Err(Box::from(format!("price {} is above the allowed ceiling", event.new_value())))
    } else {
        Ok(())
    }));
    product.attach(after.clone());

    product.set_state(500).expect("500 is below the ceiling");
    let err = product.set_state(2000).expect_err("2000 is above the ceiling");
    assert_eq!(err.to_string(), "price 2000 is above the allowed ceiling", "the observer's error should be given back verbatim");
    assert_eq!(before.events(), vec![(0, 500), (500, 2000)], "observers before the failing one are notified");
    assert_eq!(after.events(),  vec![(0, 500)],              "observers after the failing one miss the event");
    assert_eq!(product.state(), 2000,                         "the state change is kept, even if the dispatch was aborted");
    assert_eq!(product.metrics().failed_notifications(), 1,   "the failure wasn't counted");
}

/// the same observer may watch several subjects
#[cfg_attr(not(doc),test)]
fn observers_may_watch_several_subjects() {
    let keyboard = Product::<INSTRUMENTS>::new("keyboard", 10);
    let mouse = Product::<INSTRUMENTS>::new("mouse", 20);
    let a = Arc::new(Recorder::default());
    keyboard.attach(a.clone());
    mouse.attach(a.clone());
    keyboard.set_state(11).expect("dispatch failed");
    mouse.set_state(21).expect("dispatch failed");
    assert!(keyboard.detach(&a), "A was watching the keyboard");
    keyboard.set_state(12).expect("dispatch failed");
    mouse.set_state(22).expect("dispatch failed");
    assert_eq!(a.events(), vec![(10, 11), (20, 21), (21, 22)], "wrong events across subjects");
}

/// the catalog front-ends render their lines in registration order
#[cfg_attr(not(doc),test)]
fn front_ends_render_price_changes() {
    let product = QuietProduct::new("front_ends_render_price_changes", 0);
    let mobile = Arc::new(MobileApp::new());
    let web = Arc::new(WebApp::new());
    product.attach(mobile.clone());
    product.attach(web.clone());
    product.set_state(100).expect("dispatch failed");
    product.set_state(150).expect("dispatch failed");
    product.set_state(200).expect("dispatch failed");
    assert_eq!(mobile.messages(), vec![
        "[Mobile] Price changed from 0 to 100",
        "[Mobile] Price changed from 100 to 150",
        "[Mobile] Price changed from 150 to 200",
    ], "wrong mobile lines");
    assert_eq!(web.messages().last().map(String::as_str), Some("[Web] Price changed from 150 to 200"), "wrong web lines");
}
