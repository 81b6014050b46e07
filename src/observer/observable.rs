//! See [super]

use super::subject::{ChangeEvent, Observer, Subject};
use crate::{
    instruments::Instruments,
    types::PatternResult,
};
use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{
            AtomicU64,
            Ordering::Relaxed,
        },
    },
};
use parking_lot::{Mutex, RwLock};
use log::{trace, debug, warn};


/// The registry as seen by a dispatch: an immutable, cheaply cloneable snapshot
type ObserversSnapshot<StateType> = Arc<Vec<Arc<dyn Observer<StateType>>>>;

/// The price-tracking subject of the catalog
pub type Product<const INSTRUMENTS: usize = {Instruments::LogsWithCounters.into()}> = Observable<i32, INSTRUMENTS>;


/// The reference [Subject]: holds a value of `StateType` & broadcasts a [ChangeEvent] whenever it really changes.\
/// All operations take `&self`, so an `Observable` may be freely shared with -- and re-entered by -- its own observers.
pub struct Observable<StateType,
                      const INSTRUMENTS: usize = {Instruments::LogsWithCounters.into()}> {
    name:      String,
    /// locked only to compare & swap -- never while dispatching
    state:     Mutex<StateType>,
    /// copy-on-write list of registrations: writers replace the inner `Arc` only if a dispatch is holding a snapshot
    observers: RwLock<ObserversSnapshot<StateType>>,
    metrics:   DispatchMetrics,
}

impl<StateType:         PartialEq + Clone + Debug + 'static,
     const INSTRUMENTS: usize>
Observable<StateType, INSTRUMENTS> {

    pub fn new<IntoString: Into<String>>(name: IntoString, initial_state: StateType) -> Self {
        Self {
            name:      name.into(),
            state:     Mutex::new(initial_state),
            observers: RwLock::new(Arc::new(Vec::new())),
            metrics:   DispatchMetrics::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// a copy of the current state
    pub fn state(&self) -> StateType {
        self.state.lock().clone()
    }

    pub fn observers_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Counters for this subject -- only kept up to date if `INSTRUMENTS` has [Instruments::counters()]
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Replaces the current state with `new_state` and, if they differ, notifies every registered observer
    /// of the transition -- see [Subject::notify_observers()].\
    /// Returns `Ok(false)` if `new_state` is equal to the current state (no notifications happen), `Ok(true)`
    /// if the change was dispatched to all observers or the first error returned by an observer -- in which case
    /// the new state is kept, but the observers after the failing one won't hear about it.
    pub fn set_state(&self, new_state: StateType) -> PatternResult<bool> {
        let event = {
            let mut state = self.state.lock();
            if *state == new_state {
                if Instruments::from(INSTRUMENTS).counters() {
                    self.metrics.ignored_changes.fetch_add(1, Relaxed);
                }
                if Instruments::from(INSTRUMENTS).tracing() {
                    trace!("Observable '{}': state is already {:?} -- nothing to notify", self.name, new_state);
                }
                return Ok(false)
            }
            let old_state = std::mem::replace(&mut *state, new_state.clone());
            ChangeEvent::new(old_state, new_state)
        };
        if Instruments::from(INSTRUMENTS).counters() {
            self.metrics.accepted_changes.fetch_add(1, Relaxed);
        }
        if Instruments::from(INSTRUMENTS).logging() {
            debug!("Observable '{}': state changed from {:?} to {:?}", self.name, event.old_value(), event.new_value());
        }
        self.notify_observers(&event)?;
        Ok(true)
    }

    /// The registry, as it is now: later attaches & detaches won't affect the returned list
    fn snapshot(&self) -> ObserversSnapshot<StateType> {
        Arc::clone(&self.observers.read())
    }

}

impl<StateType:         PartialEq + Clone + Debug + 'static,
     const INSTRUMENTS: usize>
Subject<StateType> for Observable<StateType, INSTRUMENTS> {

    fn attach(&self, observer: Arc<dyn Observer<StateType>>) {
        let mut observers = self.observers.write();
        Arc::make_mut(&mut observers).push(observer);
        if Instruments::from(INSTRUMENTS).logging() {
            debug!("Observable '{}': observer attached -- {} registration(s) now", self.name, observers.len());
        }
    }

    fn detach<ObserverType: Observer<StateType> + ?Sized>(&self, observer: &Arc<ObserverType>) -> bool {
        let target = Arc::as_ptr(observer).cast::<()>();
        let mut observers = self.observers.write();
        let Some(position) = observers.iter().position(|registered| Arc::as_ptr(registered).cast::<()>() == target) else {
            if Instruments::from(INSTRUMENTS).logging() {
                debug!("Observable '{}': asked to detach an observer that is not registered -- ignoring", self.name);
            }
            return false
        };
        Arc::make_mut(&mut observers).remove(position);
        if Instruments::from(INSTRUMENTS).logging() {
            debug!("Observable '{}': observer #{} detached -- {} registration(s) left", self.name, position, observers.len());
        }
        true
    }

    fn notify_observers(&self, event: &ChangeEvent<StateType>) -> PatternResult<()> {
        let observers = self.snapshot();
        for (position, observer) in observers.iter().enumerate() {
            if let Err(err) = observer.update(event) {
                if Instruments::from(INSTRUMENTS).counters() {
                    self.metrics.failed_notifications.fetch_add(1, Relaxed);
                }
                if Instruments::from(INSTRUMENTS).logging() {
                    warn!("Observable '{}': observer #{} failed to process {:?} -- aborting the dispatch with {} observer(s) not notified: {}",
                          self.name, position, event, observers.len() - position - 1, err);
                }
                return Err(err)
            }
            if Instruments::from(INSTRUMENTS).counters() {
                self.metrics.delivered_notifications.fetch_add(1, Relaxed);
            }
            if Instruments::from(INSTRUMENTS).tracing() {
                trace!("Observable '{}': delivered {:?} to observer #{}", self.name, event, position);
            }
        }
        Ok(())
    }
}


/// Lock-free counters kept by every [Observable] built with [Instruments::counters()] enabled
#[derive(Debug,Default)]
pub struct DispatchMetrics {
    accepted_changes:        AtomicU64,
    ignored_changes:         AtomicU64,
    delivered_notifications: AtomicU64,
    failed_notifications:    AtomicU64,
}

impl DispatchMetrics {

    /// state changes that caused a dispatch
    pub fn accepted_changes(&self) -> u64 {
        self.accepted_changes.load(Relaxed)
    }

    /// writes of a value equal to the current state -- which are never dispatched
    pub fn ignored_changes(&self) -> u64 {
        self.ignored_changes.load(Relaxed)
    }

    /// successful [Observer::update()] calls -- one per registration per dispatched event
    pub fn delivered_notifications(&self) -> u64 {
        self.delivered_notifications.load(Relaxed)
    }

    /// [Observer::update()] calls that returned an error, each one aborting its dispatch
    pub fn failed_notifications(&self) -> u64 {
        self.failed_notifications.load(Relaxed)
    }
}


/// Unit tests the [observable](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;
    use super::super::subject::on_change;

    const INSTRUMENTS: usize = Instruments::CountersWithoutLogs.into();

    /// Observer keeping every `(old, new)` pair it was notified about
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(i32, i32)>>,
    }
    impl Observer<i32> for Recorder {
        fn update(&self, event: &ChangeEvent<i32>) -> PatternResult<()> {
            self.events.lock().push((*event.old_value(), *event.new_value()));
            Ok(())
        }
    }
    impl Recorder {
        fn events(&self) -> Vec<(i32, i32)> {
            self.events.lock().clone()
        }
    }

    #[cfg_attr(not(doc),test)]
    fn accepted_changes_are_dispatched() {
        let product = Product::<INSTRUMENTS>::new("accepted_changes_are_dispatched", 0);
        let recorder = Arc::new(Recorder::default());
        product.attach(recorder.clone());
        assert_eq!(product.set_state(100).expect("dispatch failed"), true, "a real change should be reported");
        assert_eq!(product.state(), 100, "state wasn't updated");
        assert_eq!(recorder.events(), vec![(0, 100)], "wrong events delivered");
    }

    #[cfg_attr(not(doc),test)]
    fn no_op_writes_are_not_dispatched() {
        let product = Product::<INSTRUMENTS>::new("no_op_writes_are_not_dispatched", 42);
        let recorder = Arc::new(Recorder::default());
        product.attach(recorder.clone());
        assert_eq!(product.set_state(42).expect("no-op failed"), false, "writing the current value must be a no-op");
        assert!(recorder.events().is_empty(), "no-op writes must not notify");
        assert_eq!(product.metrics().ignored_changes(), 1, "ignored change wasn't counted");
        assert_eq!(product.metrics().accepted_changes(), 0, "no change should have been accepted");
    }

    #[cfg_attr(not(doc),test)]
    fn detach_removes_a_single_registration() {
        let product = Product::<INSTRUMENTS>::new("detach_removes_a_single_registration", 0);
        let recorder = Arc::new(Recorder::default());
        product.attach(recorder.clone());
        product.attach(recorder.clone());
        assert_eq!(product.observers_count(), 2, "duplicates should be kept");
        assert!(product.detach(&recorder), "the first registration should have been removed");
        assert_eq!(product.observers_count(), 1, "only one registration should have been removed");
        product.set_state(5).expect("dispatch failed");
        assert_eq!(recorder.events(), vec![(0, 5)], "the remaining registration should still be notified");
        assert!(product.detach(&recorder), "the second registration should have been removed");
        assert!(!product.detach(&recorder), "detaching an absent observer should report `false`");
    }

    #[cfg_attr(not(doc),test)]
    fn detach_compares_identities_not_types() {
        let product = Product::<INSTRUMENTS>::new("detach_compares_identities_not_types", 0);
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        product.attach(first.clone());
        product.attach(second.clone());
        assert!(product.detach(&second), "`second` was registered");
        product.set_state(1).expect("dispatch failed");
        assert_eq!(first.events(), vec![(0, 1)], "`first` should remain registered");
        assert!(second.events().is_empty(), "`second` was detached");
    }

    #[cfg_attr(not(doc),test)]
    fn metrics_count_deliveries_and_failures() {
        let product = Product::<INSTRUMENTS>::new("metrics_count_deliveries_and_failures", 0);
        let recorder = Arc::new(Recorder::default());
        product.attach(recorder.clone());
        product.attach(on_change(|event: &ChangeEvent<i32>| if *event.new_value() < 0 {
            Err(Box::from(format!("negative prices are not allowed: {}", event.new_value())))
        } else {
            Ok(())
        }));
        product.set_state(10).expect("positive prices should be accepted");
        let err = product.set_state(-1).expect_err("the second observer should have refused the negative price");
        assert!(err.to_string().contains("negative prices"), "unexpected error: {err}");
        assert_eq!(product.state(), -1, "the change is kept even when an observer fails");
        let metrics = product.metrics();
        assert_eq!(metrics.accepted_changes(),        2, "wrong accepted changes");
        assert_eq!(metrics.delivered_notifications(), 3, "wrong delivered notifications");
        assert_eq!(metrics.failed_notifications(),    1, "wrong failed notifications");
    }

    #[cfg_attr(not(doc),test)]
    fn uninstrumented_subjects_do_not_count() {
        let product = Product::<{Instruments::NoInstruments.into()}>::new("uninstrumented_subjects_do_not_count", 0);
        product.attach(Arc::new(Recorder::default()));
        product.set_state(1).expect("dispatch failed");
        assert_eq!(product.metrics().accepted_changes(),        0, "NoInstruments shouldn't count");
        assert_eq!(product.metrics().delivered_notifications(), 0, "NoInstruments shouldn't count");
    }

    #[cfg_attr(not(doc),test)]
    fn any_state_type_may_be_observed() {
        let status = Observable::<String, INSTRUMENTS>::new("any_state_type_may_be_observed", String::from("closed"));
        let transitions = Arc::new(Mutex::new(Vec::new()));
        let transitions_ref = Arc::clone(&transitions);
        status.attach(on_change(move |event: &ChangeEvent<String>| {
            transitions_ref.lock().push(format!("{} => {}", event.old_value(), event.new_value()));
            Ok(())
        }));
        status.set_state(String::from("open")).expect("dispatch failed");
        status.set_state(String::from("open")).expect("no-op failed");
        assert_eq!(*transitions.lock(), vec![String::from("closed => open")], "wrong transitions observed");
    }

}
