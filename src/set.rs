//! Provides the `HashSets` structure: which hashes were seen by which
//! providers.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use tracing::debug;

use crate::index::ProviderIndex;

/// The union of every provider's hashes, each tagged with the number of
/// providers that saw it. Since a `ProviderIndex` holds each hash once, that
/// number is the number of indexes containing the hash, and
/// * it is common to all when that number is the number of indexes, and
/// * it is unique to one provider when that number is 1.
pub struct HashSets<'a, 'data> {
    indexes: &'a [ProviderIndex<'data>],
    seen_by: IndexMap<&'data [u8], usize, FxBuildHasher>,
}

impl<'a, 'data> HashSets<'a, 'data> {
    /// Tallies the hashes of `indexes`. The union keeps first-seen order:
    /// provider order, then each provider's own order.
    #[must_use]
    pub fn build(indexes: &'a [ProviderIndex<'data>]) -> Self {
        let mut seen_by = IndexMap::<&'data [u8], usize, FxBuildHasher>::default();
        for index in indexes {
            for hash in index.hashes() {
                *seen_by.entry(hash).or_insert(0) += 1;
            }
        }
        debug!(providers = indexes.len(), hashes = seen_by.len(), "built cross-provider hash sets");
        HashSets { indexes, seen_by }
    }

    /// The indexes the sets were built from
    #[must_use]
    pub fn indexes(&self) -> &'a [ProviderIndex<'data>] {
        self.indexes
    }

    /// Every hash seen by any provider
    pub fn all(&self) -> impl Iterator<Item = &'data [u8]> + '_ {
        self.seen_by.keys().copied()
    }

    /// Hashes seen by every provider
    #[must_use]
    pub fn common_to_all(&self) -> Vec<&'data [u8]> {
        let everyone = self.indexes.len();
        self.select(|providers| providers == everyone)
    }

    /// Hashes seen by exactly one provider
    #[must_use]
    pub fn unique_to_one(&self) -> Vec<&'data [u8]> {
        self.select(|providers| providers == 1)
    }

    /// Hashes seen by both provider `i` and provider `j`. When `i == j` that's
    /// just provider `i`'s own hashes.
    ///
    /// # Panics
    /// If `i` or `j` is not the position of an index
    #[must_use]
    pub fn pairwise_common(&self, i: usize, j: usize) -> Vec<&'data [u8]> {
        let (left, right) = (&self.indexes[i], &self.indexes[j]);
        self.all().filter(|hash| left.contains(hash) && right.contains(hash)).collect()
    }

    fn select(&self, keep: impl Fn(usize) -> bool) -> Vec<&'data [u8]> {
        self.seen_by.iter().filter(|(_, n)| keep(**n)).map(|(hash, _)| *hash).collect()
    }
}
