//! Finds, for each candidate hash, the earliest timestamp any of a group of
//! providers recorded for it.
use chrono::{DateTime, Utc};

use crate::index::ProviderIndex;

/// The earliest recorded timestamp for `hash` among the indexes it was
/// resolved against. `fastest` is `None` exactly when none of them saw `hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastestEntry<'data> {
    /// The transaction hash
    pub hash: &'data [u8],
    /// Minimum of the recorded timestamps
    pub fastest: Option<DateTime<Utc>>,
}

impl FastestEntry<'_> {
    /// Did `index` win this race? Ties are shared: every index whose timestamp
    /// equals the minimum is a winner. An entry nobody saw has no winner.
    #[must_use]
    pub fn won_by(&self, index: &ProviderIndex<'_>) -> bool {
        self.fastest.is_some() && index.timestamp(self.hash) == self.fastest
    }
}

/// One `FastestEntry` per candidate, in candidate order. Indexes that never
/// saw a hash don't take part in that hash's race.
#[must_use]
pub fn fastest_timestamps<'data>(
    hashes: impl IntoIterator<Item = &'data [u8]>,
    indexes: &[&ProviderIndex<'_>],
) -> Vec<FastestEntry<'data>> {
    hashes
        .into_iter()
        .map(|hash| FastestEntry {
            hash,
            fastest: indexes.iter().filter_map(|index| index.timestamp(hash)).min(),
        })
        .collect()
}

/// How many of `entries` were won by `index`
#[must_use]
pub fn wins(entries: &[FastestEntry<'_>], index: &ProviderIndex<'_>) -> usize {
    entries.iter().filter(|entry| entry.won_by(index)).count()
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::parse_log;

    fn index_of(log: &'static str) -> ProviderIndex<'static> {
        ProviderIndex::build(&parse_log("p", log.as_bytes()).unwrap())
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn the_earliest_provider_wins() {
        let a = index_of("h1\tmeta Timestamp:2024-01-01T00:00:00.000Z extra\n");
        let b = index_of("h1\tmeta Timestamp:2024-01-01T00:00:01.000Z extra\n");
        let entries = fastest_timestamps([&b"h1"[..]], &[&a, &b]);
        assert_eq!(entries, vec![FastestEntry { hash: b"h1", fastest: Some(at("2024-01-01T00:00:00Z")) }]);
        assert_eq!(wins(&entries, &a), 1);
        assert_eq!(wins(&entries, &b), 0);
    }

    #[test]
    fn fastest_is_the_minimum_over_the_indexes_that_have_the_hash() {
        let a = index_of("x\tTimestamp:2024-01-01T00:00:05Z\ny\tTimestamp:2024-01-01T00:00:05Z\n");
        let b = index_of("x\tTimestamp:2024-01-01T00:00:03Z\n");
        let c = index_of("x\tTimestamp:2024-01-01T00:00:04Z\ny\tTimestamp:2024-01-01T00:00:09Z\n");
        let indexes = [&a, &b, &c];
        let entries = fastest_timestamps([&b"x"[..], &b"y"[..], &b"z"[..]], &indexes);
        for entry in &entries {
            let expected = indexes.iter().filter_map(|i| i.timestamp(entry.hash)).min();
            assert_eq!(entry.fastest, expected);
        }
        assert_eq!(entries[0].fastest, Some(at("2024-01-01T00:00:03Z")));
        assert_eq!(entries[1].fastest, Some(at("2024-01-01T00:00:05Z")));
        assert_eq!(entries[2].fastest, None);
    }

    #[test]
    fn results_follow_candidate_order() {
        let a = index_of("p\tTimestamp:2024-01-01\nq\tTimestamp:2024-01-02\n");
        let entries = fastest_timestamps([&b"q"[..], &b"p"[..]], &[&a]);
        let hashes: Vec<&[u8]> = entries.iter().map(|e| e.hash).collect();
        assert_eq!(hashes, vec![&b"q"[..], &b"p"[..]]);
    }

    #[test]
    fn ties_credit_every_fastest_provider() {
        let a = index_of("t\tTimestamp:2024-01-01T00:00:01Z\n");
        let b = index_of("t\tTimestamp:2024-01-01T00:00:01Z\n");
        let c = index_of("t\tTimestamp:2024-01-01T00:00:02Z\n");
        let entries = fastest_timestamps([&b"t"[..]], &[&a, &b, &c]);
        assert!(entries[0].won_by(&a));
        assert!(entries[0].won_by(&b));
        assert!(!entries[0].won_by(&c));
    }

    #[test]
    fn nobody_wins_an_entry_nobody_saw() {
        let a = index_of("t\tTimestamp:2024-01-01T00:00:01Z\n");
        let empty = ProviderIndex::default();
        let entries = fastest_timestamps([&b"u"[..]], &[&a]);
        assert_eq!(entries[0].fastest, None);
        assert!(!entries[0].won_by(&a));
        assert!(!entries[0].won_by(&empty));
    }
}
