//! The `race` function is the kernel of the application: it takes each
//! provider's raw log and returns a `Report` saying which provider saw each
//! transaction first. The `args` module parses the command line, the `io`
//! module reads the logs from disk, and `Report::write_to` prints the result.
//!
//! The pipeline runs left to right, each stage a pure function of the last:
//! * `parse` turns a log into `TxRecord`s,
//! * `index` folds those into one `ProviderIndex` per provider,
//! * `set` intersects the indexes,
//! * `fastest` finds the earliest timestamp for each hash in a set, and
//! * `report` counts the wins.
//!
//! Current Limitations:
//! * A hash logged several times by the same provider is indexed by its *last*
//!   timestamp, not its earliest. Every count built on the index inherits
//!   that.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use tracing::{debug, warn};

pub mod args;
pub mod error;
pub mod fastest;
pub mod index;
pub mod io;
pub mod logging;
pub mod parse;
pub mod report;
pub mod set;
pub mod style;

use crate::error::Result;
use crate::index::ProviderIndex;
use crate::report::Report;
use crate::set::HashSets;

/// One provider's name and raw log
#[derive(Debug, Clone, Copy)]
pub struct Provider<'data> {
    /// Name used in the report
    pub name: &'data str,
    /// The provider's log, one transaction per line
    pub log: &'data [u8],
}

/// Which providers compete on the hashes common to a pair of providers
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Comparison {
    /// Only the two providers of the pair
    #[default]
    HeadToHead,
    /// Every provider that saw the hash, so a provider wins against a rival
    /// only if nobody at all saw the transaction earlier. Use this to get the
    /// per-pair totals of the four-provider latency reports that predate
    /// `txrace`, which ranked the whole field on each pair's common hashes.
    Field,
}

/// Parses and indexes every provider's log, then ranks them. Fails on the
/// first malformed line of any log; no partial report is produced.
pub fn race(providers: &[Provider<'_>], comparison: Comparison) -> Result<Report> {
    let mut indexes = Vec::with_capacity(providers.len());
    for provider in providers {
        let records = parse::parse_log(provider.name, provider.log)?;
        let index = ProviderIndex::build(&records);
        if index.is_empty() {
            warn!(provider = provider.name, "provider log has no transactions");
        }
        debug!(
            provider = provider.name,
            records = index.total_records(),
            hashes = index.len(),
            "indexed provider log"
        );
        indexes.push(index);
    }

    let sets = HashSets::build(&indexes);
    let names: Vec<&str> = providers.iter().map(|p| p.name).collect();
    Ok(Report::generate(&names, &sets, comparison))
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{MalformedReason, RaceError};
    use crate::report::Tally;

    fn providers<'a>(logs: &[(&'a str, &'a str)]) -> Vec<Provider<'a>> {
        logs.iter().map(|&(name, log)| Provider { name, log: log.as_bytes() }).collect()
    }

    const ALCHEMY: &str = "h1\tTimestamp:2024-01-01T00:00:01Z\n\
                           h2\tTimestamp:2024-01-01T00:00:00Z\n\
                           solo\tTimestamp:2024-01-01T00:00:00Z\n";
    const MULTINODE: &str = "h1\tTimestamp:2024-01-01T00:00:00Z\n\
                             h2\tTimestamp:2024-01-01T00:00:02Z\n";
    const INFURA: &str = "h1\tTimestamp:2024-01-01T00:00:00Z\n\
                          h2\tTimestamp:2024-01-01T00:00:03Z\n";
    const GOERLI: &str = "h1\tTimestamp:2024-01-01T00:00:04Z\n\
                          h2\tTimestamp:2024-01-01T00:00:01Z\n\
                          h2\tTimestamp:2024-01-01T00:00:05Z\n";

    fn four() -> Vec<Provider<'static>> {
        providers(&[
            ("Alchemy", ALCHEMY),
            ("Multinode", MULTINODE),
            ("Infura", INFURA),
            ("Goerli", GOERLI),
        ])
    }

    #[test]
    fn two_providers_one_hash() {
        let providers = providers(&[
            ("A", "h1\tmeta Timestamp:2024-01-01T00:00:00.000Z extra"),
            ("B", "h1\tmeta Timestamp:2024-01-01T00:00:01.000Z extra"),
        ]);
        let report = race(&providers, Comparison::HeadToHead).unwrap();
        assert_eq!(report.common_to_all, 1);
        assert_eq!(report.providers[0].overall, Tally { won: 1, of: 1 });
        assert_eq!(report.providers[1].overall, Tally { won: 0, of: 1 });
        assert_eq!(report.providers[0].versus[0].tally, Tally { won: 1, of: 1 });
    }

    #[test]
    fn four_providers_with_a_tie_and_a_repeat() {
        let report = race(&four(), Comparison::HeadToHead).unwrap();
        let won = |p: usize| report.providers[p].overall.won;
        // h1: Multinode and Infura tie at 0s; h2: Alchemy at 0s (Goerli's 1s was overwritten by 5s)
        assert_eq!((won(0), won(1), won(2), won(3)), (1, 1, 1, 0));
        assert_eq!(report.providers[3].repeated, 1);
        assert_eq!(report.providers[3].total, 3);
        assert_eq!(report.common_to_all, 2);
        assert_eq!(report.unique_to_one, 1);
        let names: Vec<&str> = report.providers[0].versus.iter().map(|v| v.rival.as_str()).collect();
        assert_eq!(names, vec!["Multinode", "Infura", "Goerli"]);
    }

    #[test]
    fn a_third_provider_can_take_a_pair_win_only_in_a_field_comparison() {
        let providers = providers(&[
            ("A", "h\tTimestamp:2024-01-01T00:00:01Z\n"),
            ("B", "h\tTimestamp:2024-01-01T00:00:02Z\n"),
            ("C", "h\tTimestamp:2024-01-01T00:00:00Z\n"),
        ]);
        let head_to_head = race(&providers, Comparison::HeadToHead).unwrap();
        assert_eq!(head_to_head.providers[0].versus[0].rival, "B");
        assert_eq!(head_to_head.providers[0].versus[0].tally, Tally { won: 1, of: 1 });

        let field = race(&providers, Comparison::Field).unwrap();
        assert_eq!(field.providers[0].versus[0].tally, Tally { won: 0, of: 1 });
        assert_eq!(field.providers[2].versus[0].tally, Tally { won: 1, of: 1 });
    }

    #[test]
    fn running_twice_gives_the_same_report() {
        let first = race(&four(), Comparison::Field).unwrap();
        let second = race(&four(), Comparison::Field).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn a_malformed_line_fails_the_whole_run() {
        let providers = providers(&[
            ("A", "h1\tTimestamp:2024-01-01T00:00:00Z\n"),
            ("B", "h1\tTimestamp:2024-01-01T00:00:00Z\nh2\tno marker\n"),
        ]);
        match race(&providers, Comparison::HeadToHead) {
            Err(RaceError::MalformedLine { provider, line_number, reason, .. }) => {
                assert_eq!(provider, "B");
                assert_eq!(line_number, 2);
                assert_eq!(reason, MalformedReason::MissingMarker);
            }
            other => panic!("expected a malformed line, got {other:?}"),
        }
    }
}
