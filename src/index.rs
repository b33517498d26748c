//! Provides the `ProviderIndex` structure: what one provider saw, keyed by
//! transaction hash.
use chrono::{DateTime, Utc};
use fxhash::FxBuildHasher;
use indexmap::IndexMap;

use crate::parse::TxRecord;

type HashMap<'data, V> = IndexMap<&'data [u8], V, FxBuildHasher>;

/// The bookkeeping kept for each hash: how many times the provider logged it,
/// and the timestamp of the *last* of those lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    /// Number of records with this hash
    pub count: usize,
    /// Timestamp from the last record with this hash, in log order
    pub timestamp: DateTime<Utc>,
}

/// A `ProviderIndex` is built once from a provider's records and never
/// changes afterwards.
/// * Keys are hashes borrowed from the provider's log, in first-seen order
/// * A repeated hash keeps the timestamp of its last occurrence, not its
///   earliest. Later lines simply overwrite earlier ones.
#[derive(Clone, Debug, Default)]
pub struct ProviderIndex<'data> {
    sightings: HashMap<'data, Sighting>,
    total_records: usize,
}

impl<'data> ProviderIndex<'data> {
    /// Folds `records` into an index, in order.
    #[must_use]
    pub fn build(records: &[TxRecord<'data>]) -> Self {
        let mut sightings = HashMap::default();
        for record in records {
            sightings
                .entry(record.hash)
                .and_modify(|s: &mut Sighting| {
                    s.count += 1;
                    s.timestamp = record.timestamp;
                })
                .or_insert(Sighting { count: 1, timestamp: record.timestamp });
        }
        ProviderIndex { sightings, total_records: records.len() }
    }

    /// Number of records the index was built from, duplicates included
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Number of distinct hashes
    #[must_use]
    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    /// True if the provider logged nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }

    /// True if the provider saw `hash` at least once
    #[must_use]
    pub fn contains(&self, hash: &[u8]) -> bool {
        self.sightings.contains_key(hash)
    }

    /// How many times `hash` was logged (zero if never)
    #[must_use]
    pub fn count(&self, hash: &[u8]) -> usize {
        self.sightings.get(hash).map_or(0, |s| s.count)
    }

    /// The recorded timestamp for `hash`, if the provider saw it
    #[must_use]
    pub fn timestamp(&self, hash: &[u8]) -> Option<DateTime<Utc>> {
        self.sightings.get(hash).map(|s| s.timestamp)
    }

    /// Every distinct hash, in first-seen order
    pub fn hashes(&self) -> impl Iterator<Item = &'data [u8]> + '_ {
        self.sightings.keys().copied()
    }

    /// Hashes logged more than once
    pub fn repeated(&self) -> impl Iterator<Item = &'data [u8]> + '_ {
        self.sightings.iter().filter(|(_, s)| s.count > 1).map(|(hash, _)| *hash)
    }

    /// Hashes logged exactly once
    pub fn unique(&self) -> impl Iterator<Item = &'data [u8]> + '_ {
        self.sightings.iter().filter(|(_, s)| s.count == 1).map(|(hash, _)| *hash)
    }
}
