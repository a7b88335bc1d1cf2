use crate::model::{Catalog, Entry, EntryKind};
use crate::ops::score::score;

/// Subtracted from any entry whose kind lacks the TAG bit. Larger than any
/// raw score the scorer can produce for a capped label, so untagged
/// entries sort below every tagged entry while both buckets stay ordered
/// by fuzzy score internally.
pub const KIND_PENALTY: i32 = 0xF000;

/// One row of a ranking: a catalog index and its penalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked {
    pub index: usize,
    pub score: i32,
}

/// Fuzzy score with the kind-bucket penalty applied.
pub fn penalized_score<T>(query: &str, entry: &Entry<T>) -> i32 {
    let mut value = score(query, &entry.label) as i32;
    if !entry.kind.contains(EntryKind::TAG) {
        value -= KIND_PENALTY;
    }
    value
}

/// Total order over `catalog` for `query`, best first.
///
/// Recomputed from scratch on every query change; ties keep catalog
/// insertion order (stable sort, no secondary key).
pub fn rank<T>(query: &str, catalog: &Catalog<T>) -> Vec<Ranked> {
    let mut rows: Vec<Ranked> = catalog
        .iter()
        .enumerate()
        .map(|(index, entry)| Ranked {
            index,
            score: penalized_score(query, entry),
        })
        .collect();
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}
