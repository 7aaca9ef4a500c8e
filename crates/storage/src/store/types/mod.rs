#![forbid(unsafe_code)]

mod agencies;
mod complaints;
mod stats;
mod users;

pub use agencies::*;
pub use complaints::*;
pub use stats::*;
pub use users::*;
