//! Process-wide single instance, created on first use.
//!
//! The instance lives in a module-scoped slot guarded by a one-time-initialization primitive, so concurrent first
//! calls to [Singleton::instance()] never build it twice: exactly one caller runs the constructor while the others
//! wait for it, and everybody gets the same `&'static` reference.

use std::{
    sync::atomic::{
        AtomicU32,
        Ordering::Relaxed,
    },
    time::SystemTime,
};
use once_cell::sync::OnceCell;
use log::info;


static INSTANCE: OnceCell<Singleton> = OnceCell::new();

/// how many times [Singleton::new()] was executed -- anything other than 0 or 1 would be a bug
static CREATIONS: AtomicU32 = AtomicU32::new(0);


/// The one & only. May only be obtained through [Singleton::instance()]
#[derive(Debug)]
pub struct Singleton {
    created_at: SystemTime,
}

impl Singleton {

    /// private: no external creation allowed
    fn new() -> Self {
        CREATIONS.fetch_add(1, Relaxed);
        info!("Singleton created");
        Self {
            created_at: SystemTime::now(),
        }
    }

    /// Global access point: builds the instance on the first call, returning it ever after
    pub fn instance() -> &'static Singleton {
        INSTANCE.get_or_init(Singleton::new)
    }

    /// Tells if the instance was already built -- without building it
    pub fn is_initialized() -> bool {
        INSTANCE.get().is_some()
    }

    pub fn creations_count() -> u32 {
        CREATIONS.load(Relaxed)
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}


/// Unit tests the [singleton](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn every_call_gets_the_same_instance() {
        let first = Singleton::instance();
        let second = Singleton::instance();
        assert!(std::ptr::eq(first, second), "two different instances were handed out");
        assert!(Singleton::is_initialized(), "the instance should be reported as built");
        assert_eq!(first.created_at(), second.created_at(), "same instance, same creation time");
        assert_eq!(Singleton::creations_count(), 1, "the constructor ran more than once");
    }

    #[cfg_attr(not(doc),test)]
    fn concurrent_first_uses_build_it_once() {
        const THREADS: usize = 16;
        let addresses = crossbeam::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| scope.spawn(|_| Singleton::instance() as *const Singleton as usize))
                .collect();
            handles.into_iter()
                .map(|handle| handle.join().expect("thread panicked"))
                .collect::<Vec<_>>()
        }).expect("scope failed");
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]), "threads observed different instances: {:?}", addresses);
        assert_eq!(Singleton::creations_count(), 1, "the constructor ran more than once");
    }

}
