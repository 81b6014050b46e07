//! See [super]

use crate::types::PatternResult;
use std::{
    fmt::{Debug, Display, Formatter},
    sync::Arc,
};


/// Immutable record of a state transition, created fresh for every accepted change
/// and handed out (by reference) to every registered [Observer]
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct ChangeEvent<StateType> {
    old_value: StateType,
    new_value: StateType,
}

impl<StateType> ChangeEvent<StateType> {

    pub fn new(old_value: StateType, new_value: StateType) -> Self {
        Self { old_value, new_value }
    }

    pub fn old_value(&self) -> &StateType {
        &self.old_value
    }

    pub fn new_value(&self) -> &StateType {
        &self.new_value
    }

    /// consumes the event, returning the `(old, new)` pair
    pub fn into_pair(self) -> (StateType, StateType) {
        (self.old_value, self.new_value)
    }
}

impl<StateType: Display> Display for ChangeEvent<StateType> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.old_value, self.new_value)
    }
}

/// The event issued by a [Product](super::Product) whenever its price changes
pub type PriceChangeEvent = ChangeEvent<i32>;


/// Passive listener capability: invoked synchronously by the [Subject] it is attached to, once per accepted change.\
/// Returning `Err` aborts the dispatch in progress -- the remaining observers won't see the event -- and the error
/// is given back to whoever caused the state change.
pub trait Observer<StateType>: Send + Sync {
    fn update(&self, event: &ChangeEvent<StateType>) -> PatternResult<()>;
}

/// Any thread-safe closure with the right signature is an [Observer]
impl<StateType, F> Observer<StateType> for F
                    where F: Fn(&ChangeEvent<StateType>) -> PatternResult<()> + Send + Sync {
    #[inline(always)]
    fn update(&self, event: &ChangeEvent<StateType>) -> PatternResult<()> {
        self(event)
    }
}

/// Builds a ready-to-attach [Observer] out of `callback`.\
/// Keep the returned `Arc` around if you ever want to [Subject::detach()] it.
pub fn on_change<StateType: 'static>(callback: impl Fn(&ChangeEvent<StateType>) -> PatternResult<()> + Send + Sync + 'static)
                                    -> Arc<dyn Observer<StateType>> {
    Arc::new(callback)
}


/// Defines how [Observer]s are registered into & notified by the entity holding an observable state
pub trait Subject<StateType: 'static> {

    /// Adds `observer` to the end of the notification list.\
    /// Attaching the same observer more than once is allowed: it will be notified once per registration.
    fn attach(&self, observer: Arc<dyn Observer<StateType>>);

    /// Removes the first registration of `observer` (compared by the address of the shared allocation),
    /// returning `false` -- and doing nothing else -- if it wasn't registered
    fn detach<ObserverType: Observer<StateType> + ?Sized>(&self, observer: &Arc<ObserverType>) -> bool;

    /// Delivers `event` to every currently registered observer, in registration order, stopping at the first error
    fn notify_observers(&self, event: &ChangeEvent<StateType>) -> PatternResult<()>;
}


/// Unit tests the [subject](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[cfg_attr(not(doc),test)]
    fn events_expose_the_transition() {
        let event = PriceChangeEvent::new(100, 150);
        assert_eq!(event.old_value(), &100, "wrong old value");
        assert_eq!(event.new_value(), &150, "wrong new value");
        assert_eq!(event.to_string(), "100 -> 150", "wrong rendering");
        assert_eq!(event.into_pair(), (100, 150), "wrong pair");
    }

    #[cfg_attr(not(doc),test)]
    fn closures_are_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = Arc::clone(&seen);
        let observer = on_change(move |event: &PriceChangeEvent| {
            seen_ref.lock().push(event.into_pair());
            Ok(())
        });
        observer.update(&ChangeEvent::new(0, 7)).expect("the closure observer shouldn't fail");
        assert_eq!(*seen.lock(), vec![(0, 7)], "the closure wasn't called");
    }

}
