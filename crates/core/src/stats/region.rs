#![forbid(unsafe_code)]

const REGION_PREFIX_CHARS: usize = 2;

/// Region bucket of a free-text address: its first two characters, taken
/// as stored. A string heuristic, not an administrative boundary.
pub fn region_key(address: &str) -> Option<String> {
    if address.is_empty() {
        return None;
    }
    Some(address.chars().take(REGION_PREFIX_CHARS).collect())
}
