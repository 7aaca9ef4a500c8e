#![forbid(unsafe_code)]

//! Read-only aggregation over complaints and the assignment ledger. Every
//! query helper takes a plain `&Connection` so the dashboard can run them all
//! inside one transaction.

mod ages;
mod breakdown;
mod counts;
mod dashboard;
mod trend;

const REGION_TOP_N: usize = 5;
const INSTITUTION_TOP_N: usize = 5;
const BOTTLENECK_TOP_N: usize = 10;
