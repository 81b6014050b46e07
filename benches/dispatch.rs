//! Measures the cost of dispatching a state change to the registered observers, with & without instrumentation.
//!
//! The observers used here do nothing but bump a counter, so what is measured is the notifier itself:
//! the compare & swap of the state, taking a snapshot of the registry and the dynamic calls.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering::Relaxed},
    },
    hint::black_box,
};
use reactive_patterns::prelude::*;
use criterion::{
    criterion_group,
    criterion_main,
    Criterion,
};


/// How many observers are registered in each of the measured subjects
const OBSERVER_COUNTS: [usize; 3] = [1, 8, 64];


fn counting_observer(counter: &Arc<AtomicU64>) -> Arc<dyn Observer<i32>> {
    let counter = Arc::clone(counter);
    on_change(move |_event: &PriceChangeEvent| {
        counter.fetch_add(1, Relaxed);
        Ok(())
    })
}

/// Measures `set_state()` for a real change -- dispatched to every observer
fn bench_dispatch(criterion: &mut Criterion) {

    let mut group = criterion.benchmark_group("Dispatching");

    for observers_count in OBSERVER_COUNTS {
        let counter = Arc::new(AtomicU64::new(0));

        let bench_id = format!("QuietProduct with {} observer(s)", observers_count);
        let product = QuietProduct::new("quiet", 0);
        (0..observers_count).for_each(|_| product.attach(counting_observer(&counter)));
        let mut price = 0;
        group.bench_function(bench_id, |bencher| bencher.iter(|| {
            price += 1;
            black_box(product.set_state(price))
        }));

        // no logger is installed: only the level checks & the counters are measured
        let bench_id = format!("Product<LogsWithCounters> with {} observer(s)", observers_count);
        let product = Product::<{Instruments::LogsWithCounters.into()}>::new("counted", 0);
        (0..observers_count).for_each(|_| product.attach(counting_observer(&counter)));
        let mut price = 0;
        group.bench_function(bench_id, |bencher| bencher.iter(|| {
            price += 1;
            black_box(product.set_state(price))
        }));
    }

    group.finish();
}

/// Measures `set_state()` for a value equal to the current one -- nothing is dispatched
fn bench_no_op(criterion: &mut Criterion) {

    let mut group = criterion.benchmark_group("No-op writes");

    let counter = Arc::new(AtomicU64::new(0));
    let product = QuietProduct::new("quiet", 0);
    product.attach(counting_observer(&counter));
    group.bench_function("QuietProduct", |bencher| bencher.iter(|| black_box(product.set_state(0))));

    group.finish();
}

/// Measures the copy-on-write registry: an attach followed by a detach of the same observer
fn bench_registry(criterion: &mut Criterion) {

    let mut group = criterion.benchmark_group("Registry");

    for observers_count in OBSERVER_COUNTS {
        let counter = Arc::new(AtomicU64::new(0));
        let product = QuietProduct::new("quiet", 0);
        (0..observers_count).for_each(|_| product.attach(counting_observer(&counter)));
        let transient = counting_observer(&counter);
        let bench_id = format!("attach + detach over {} observer(s)", observers_count);
        group.bench_function(bench_id, |bencher| bencher.iter(|| {
            product.attach(Arc::clone(&transient));
            black_box(product.detach(&transient))
        }));
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_no_op, bench_registry);
criterion_main!(benches);
