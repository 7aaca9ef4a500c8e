#![forbid(unsafe_code)]

mod age;
mod growth;
mod rank;
mod region;

pub use age::*;
pub use growth::*;
pub use rank::*;
pub use region::*;
