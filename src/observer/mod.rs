//! The Subject/Observer notifier.
//!
//! A [Subject] holds a piece of observable state and an ordered registry of [Observer]s. Whenever the state
//! *really* changes (the new value differs from the current one), a fresh [ChangeEvent] carrying the old & new
//! values is delivered, synchronously and in registration order, to every registered observer.
//!
//! The registry is copy-on-write: a dispatch iterates over a snapshot, so observers may be attached or detached
//! at any time -- from other threads or from within a callback -- without ever disturbing the dispatch in progress.
//!
//! Example:
//! ```nocompile
//! let product = Product::<{Instruments::LogsWithCounters.into()}>::new("keyboard", 0);
//! let mobile = Arc::new(MobileApp::new());
//! product.attach(mobile.clone());
//! product.set_state(100)?;    // mobile sees (0 -> 100)
//! product.set_state(100)?;    // no-op: nothing is dispatched
//! ```

mod subject;
pub use subject::*;

mod observable;
pub use observable::*;

mod observers;
pub use observers::*;
