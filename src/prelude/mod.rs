//! Set of re-exported types & aliases to allow clients to use this lib.

mod prelude;
pub use prelude::*;
