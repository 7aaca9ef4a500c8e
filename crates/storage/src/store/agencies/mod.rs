#![forbid(unsafe_code)]

mod assignments;
mod directory;
