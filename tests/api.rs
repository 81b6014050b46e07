//! Tests the not-so-conventional usages of the [reactive_patterns] observer notifier: observers that re-enter their
//! subject while being notified & registries mutated by other threads while dispatches are in progress.

use std::sync::{
    Arc,
    Weak,
    atomic::{
        AtomicBool,
        AtomicU32,
        Ordering::Relaxed,
    },
};
use parking_lot::Mutex;
use reactive_patterns::prelude::*;


#[ctor::ctor]
fn suite_setup() {
    simple_logger::SimpleLogger::new().with_utc_timestamps().init().unwrap_or_else(|_| eprintln!("--> LOGGER WAS ALREADY STARTED"));
}

const INSTRUMENTS: usize = Instruments::CountersWithoutLogs.into();


/// Observer attaching a brand new observer to its own subject every time it is notified
struct Spawner {
    product:  Weak<Product<INSTRUMENTS>>,
    spawned:  Mutex<Vec<Arc<Counter>>>,
}
impl Observer<i32> for Spawner {
    fn update(&self, _event: &PriceChangeEvent) -> PatternResult<()> {
        let product = self.product.upgrade().ok_or("the product is gone")?;
        let counter = Arc::new(Counter::default());
        product.attach(counter.clone());
        self.spawned.lock().push(counter);
        Ok(())
    }
}

#[derive(Default)]
struct Counter {
    count: AtomicU32,
}
impl Observer<i32> for Counter {
    fn update(&self, _event: &PriceChangeEvent) -> PatternResult<()> {
        self.count.fetch_add(1, Relaxed);
        Ok(())
    }
}


/// observers attached during a dispatch don't see the in-flight event -- only the following ones
#[cfg_attr(not(doc),test)]
fn attaching_from_a_callback_takes_effect_on_the_next_event() {
    let product = Arc::new(Product::<INSTRUMENTS>::new("attaching_from_a_callback_takes_effect_on_the_next_event", 0));
    let spawner = Arc::new(Spawner { product: Arc::downgrade(&product), spawned: Mutex::new(Vec::new()) });
    product.attach(spawner.clone());

    product.set_state(1).expect("dispatch failed");
    product.set_state(2).expect("dispatch failed");

    let spawned = spawner.spawned.lock();
    assert_eq!(spawned.len(), 2, "one observer should have been spawned per event");
    assert_eq!(spawned[0].count.load(Relaxed), 1, "the first spawned observer should only see the second event");
    assert_eq!(spawned[1].count.load(Relaxed), 0, "the second spawned observer was attached during the last event");
    assert_eq!(product.observers_count(), 3, "the spawner + the 2 spawned observers should be registered");
}

/// observers detached during a dispatch still see the in-flight event (they were in the snapshot), but not the next ones
#[cfg_attr(not(doc),test)]
fn detaching_from_a_callback_takes_effect_on_the_next_event() {
    let product = Arc::new(Product::<INSTRUMENTS>::new("detaching_from_a_callback_takes_effect_on_the_next_event", 0));
    let victim = Arc::new(Counter::default());
    let product_ref = Arc::downgrade(&product);
    let victim_ref = Arc::clone(&victim);
    product.attach(on_change(move |_event: &PriceChangeEvent| {
        let product = product_ref.upgrade().ok_or("the product is gone")?;
        product.detach(&victim_ref);
        Ok(())
    }));
    product.attach(victim.clone());

    product.set_state(1).expect("dispatch failed");
    product.set_state(2).expect("dispatch failed");
    assert_eq!(victim.count.load(Relaxed), 1, "the victim should only have seen the event during which it was detached");
}

/// observers may read -- and even change -- the state of the subject notifying them
#[cfg_attr(not(doc),test)]
fn observers_may_reenter_their_subject() {
    let product = Arc::new(Product::<INSTRUMENTS>::new("observers_may_reenter_their_subject", 0));
    let seen_states = Arc::new(Mutex::new(Vec::new()));
    let product_ref = Arc::downgrade(&product);
    let seen_states_ref = Arc::clone(&seen_states);
    // rounds every odd price up to the next even one
    product.attach(on_change(move |event: &PriceChangeEvent| {
        let product = product_ref.upgrade().ok_or("the product is gone")?;
        seen_states_ref.lock().push(product.state());
        if event.new_value() % 2 != 0 {
            product.set_state(event.new_value() + 1)?;
        }
        Ok(())
    }));

    product.set_state(3).expect("dispatch failed");
    assert_eq!(product.state(), 4, "the observer should have rounded the price up");
    assert_eq!(*seen_states.lock(), vec![3, 4], "the observer should see the state already updated");
}

/// registries mutated by other threads never disturb the dispatches in progress
#[cfg_attr(not(doc),test)]
fn concurrent_attaches_and_detaches_during_dispatches() {
    const CHANGES: i32 = 2000;
    const MUTATOR_THREADS: usize = 4;
    let product = Product::<INSTRUMENTS>::new("concurrent_attaches_and_detaches_during_dispatches", 0);
    let steady = Arc::new(Mutex::new(Vec::<(i32, i32)>::new()));
    let steady_ref = Arc::clone(&steady);
    product.attach(on_change(move |event: &PriceChangeEvent| {
        steady_ref.lock().push((*event.old_value(), *event.new_value()));
        Ok(())
    }));
    let done = AtomicBool::new(false);

    crossbeam::scope(|scope| {
        for _ in 0..MUTATOR_THREADS {
            scope.spawn(|_| {
                while !done.load(Relaxed) {
                    let transient = Arc::new(Counter::default());
                    product.attach(transient.clone());
                    product.attach(transient.clone());
                    assert!(product.detach(&transient), "the first registration should be found");
                    assert!(product.detach(&transient), "the duplicate registration should be found");
                }
            });
        }
        for price in 1..=CHANGES {
            product.set_state(price).expect("dispatch failed");
        }
        done.store(true, Relaxed);
    }).expect("a thread panicked");

    let steady = steady.lock();
    assert_eq!(steady.len(), CHANGES as usize, "the steady observer missed events");
    assert!(steady.iter().enumerate().all(|(i, &(old, new))| old == i as i32 && new == i as i32 + 1),
            "the steady observer saw events out of order");
    assert_eq!(product.observers_count(), 1, "every transient observer should have been detached");
    assert_eq!(product.metrics().accepted_changes(), CHANGES as u64, "wrong accepted changes");
}

/// the singleton is shared by every thread
#[cfg_attr(not(doc),test)]
fn singleton_is_process_wide() {
    let main_thread_instance = Singleton::instance() as *const Singleton as usize;
    let other_thread_instance = std::thread::spawn(|| Singleton::instance() as *const Singleton as usize)
        .join()
        .expect("thread panicked");
    assert_eq!(main_thread_instance, other_thread_instance, "threads got different instances");
    assert_eq!(Singleton::creations_count(), 1, "the constructor ran more than once");
}
