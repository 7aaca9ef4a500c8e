#![forbid(unsafe_code)]

/// Period-over-period change in a count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowthRate {
    /// Percentage change rounded to one decimal.
    Percent(f64),
    /// The baseline was zero and the current count is not: there is no ratio.
    New,
}

/// The single place where the zero-baseline policy lives:
/// `0 → 0` is `0.0`, `0 → n` is [`GrowthRate::New`], otherwise the usual ratio.
pub fn growth_rate(previous: u64, current: u64) -> GrowthRate {
    if previous == 0 {
        if current == 0 {
            return GrowthRate::Percent(0.0);
        }
        return GrowthRate::New;
    }
    let previous = previous as f64;
    let ratio = (current as f64 - previous) / previous * 100.0;
    GrowthRate::Percent(round_one_decimal(ratio))
}

/// Growth of each element against its predecessor; the first element has none.
pub fn growth_series(counts: &[u64]) -> Vec<Option<GrowthRate>> {
    let mut out = Vec::with_capacity(counts.len());
    let mut previous: Option<u64> = None;
    for &current in counts {
        out.push(previous.map(|previous| growth_rate(previous, current)));
        previous = Some(current);
    }
    out
}

fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // -0.0 reads badly in a dashboard
    if rounded == 0.0 { 0.0 } else { rounded }
}
