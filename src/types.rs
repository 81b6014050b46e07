//! Common types across this crate

pub use crate::{
    instruments::Instruments,
};


/// Result of every fallible operation in this crate -- observers' callbacks included.\
/// Errors are boxed & thread-safe, so they may travel from an observer all the way up to whoever changed a subject's state
pub type PatternResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
