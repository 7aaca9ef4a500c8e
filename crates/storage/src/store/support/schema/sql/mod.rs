#![forbid(unsafe_code)]

mod agencies;
mod complaints;
mod core;
mod indexes;
mod pragmas;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(pragmas::SQL);
    sql.push_str(core::SQL);
    sql.push_str(complaints::SQL);
    sql.push_str(agencies::SQL);
    sql.push_str(indexes::SQL);
    sql
}
