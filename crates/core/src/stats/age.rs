#![forbid(unsafe_code)]

/// Decade bucket for an age in whole years (`34 → 30`). Negative ages are
/// dropped rather than clamped.
pub fn age_decade(age_years: i32) -> Option<u32> {
    let age = u32::try_from(age_years).ok()?;
    Some(age / 10 * 10)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// Completed years between `birth` and `at`; the birthday itself counts.
pub fn age_in_years(birth: CalendarDate, at: CalendarDate) -> i32 {
    let mut age = at.year - birth.year;
    if (at.month, at.day) < (birth.month, birth.day) {
        age -= 1;
    }
    age
}
