//! Typed operation inputs, one struct per operation.

mod bucket;
mod lock;
mod object;

pub use bucket::*;
pub use lock::*;
pub use object::*;
