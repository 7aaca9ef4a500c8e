#![forbid(unsafe_code)]

mod clock;
mod convert;
mod filter;
mod head;
mod schema;

pub(super) use clock::*;
pub(super) use convert::*;
pub(super) use filter::*;
pub(super) use head::*;
pub(super) use schema::migrate_sqlite_schema;
