#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

impl NamedCount {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedCount {
    pub rank: u32,
    pub name: String,
    pub value: u64,
}

/// Sorts by value descending and assigns ranks `1..=N`. The sort is stable, so
/// equal values keep their input order; names are never used as a tiebreaker.
pub fn rank_by_value(items: Vec<NamedCount>) -> Vec<RankedCount> {
    let mut items = items;
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items
        .into_iter()
        .zip(1u32..)
        .map(|(item, rank)| RankedCount {
            rank,
            name: item.name,
            value: item.value,
        })
        .collect()
}

/// Entry with the largest count; the first one wins on ties.
pub fn most_common(items: &[NamedCount]) -> Option<&NamedCount> {
    items.iter().fold(None, |best: Option<&NamedCount>, item| match best {
        Some(current) if current.value >= item.value => Some(current),
        _ => Some(item),
    })
}
