#![forbid(unsafe_code)]

mod create;
mod delete;
mod detail;
mod files;
mod like;
mod list;
mod map;
mod replies;
mod status;
mod update;

pub use list::TOP_LIKED_LIMIT;
pub use map::MAP_LOCATION_LIMIT;
