#![forbid(unsafe_code)]

use cp_core::stats::{GrowthRate, NamedCount, RankedCount};
use cp_core::{AgencyNo, AgencyType, StatsDimension, TimeBasis};

/// Narrows every aggregation to one category and/or one assigned agency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub category: Option<String>,
    pub agency_no: Option<AgencyNo>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionRequest {
    pub dimension: StatsDimension,
    pub filter: StatsFilter,
    /// Agencies of this type form the institution dimension.
    pub institution_type: AgencyType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendRequest {
    pub basis: TimeBasis,
    pub filter: StatsFilter,
    /// Lower bound (inclusive) on `created_at_ms`; `None` means all history.
    pub since_ms: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardRequest {
    pub filter: StatsFilter,
    pub trend: TrendRequest,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    /// `YYYY-MM-DD`, `YYYY-MM` or `YYYY` depending on the basis.
    pub bucket: String,
    pub count: u64,
    /// `None` for the first bucket.
    pub growth: Option<GrowthRate>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodComparison {
    pub current: u64,
    pub previous: u64,
    pub growth: GrowthRate,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryCounters {
    pub day: PeriodComparison,
    pub month: PeriodComparison,
    pub year: PeriodComparison,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: u64,
    pub received: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
    pub cancelled: u64,
    pub today: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeGroupCount {
    /// Lower bound of the decade: 20 means ages 20..=29.
    pub decade: u32,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionStats {
    pub dimension: StatsDimension,
    pub items: Vec<NamedCount>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub status_counts: StatusCounts,
    pub summary: SummaryCounters,
    pub categories: Vec<RankedCount>,
    pub trend: Vec<TrendPoint>,
    pub bottleneck: Vec<NamedCount>,
    pub age_groups: Vec<AgeGroupCount>,
}
