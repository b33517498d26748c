//! Houses the `Report` value and the code that renders it as text.
use anyhow::Result;
use std::io;

use crate::fastest::{fastest_timestamps, wins, FastestEntry};
use crate::index::ProviderIndex;
use crate::set::HashSets;
use crate::style::StyleSheet;
use crate::Comparison;

/// `won` races out of `of`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Hashes the provider saw first (ties included)
    pub won: usize,
    /// Hashes in the compared set
    pub of: usize,
}

/// A provider's record against one rival, over the hashes both saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versus {
    /// Name of the other provider
    pub rival: String,
    /// Races won over the hashes common to both
    pub tally: Tally,
}

/// Everything reported about one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    /// Provider name
    pub name: String,
    /// Hashes logged more than once
    pub repeated: usize,
    /// Hashes logged exactly once
    pub unique: usize,
    /// Raw records, duplicates included
    pub total: usize,
    /// Races won over the hashes every provider saw
    pub overall: Tally,
    /// One entry per other provider, in input order
    pub versus: Vec<Versus>,
}

/// The result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// One section per provider, in input order
    pub providers: Vec<ProviderReport>,
    /// Number of hashes seen by every provider
    pub common_to_all: usize,
    /// Number of hashes seen by exactly one provider
    pub unique_to_one: usize,
}

impl Report {
    /// Aggregates the sets into a `Report`. `names[i]` names `sets.indexes()[i]`.
    #[must_use]
    pub fn generate(names: &[&str], sets: &HashSets<'_, '_>, comparison: Comparison) -> Report {
        let indexes = sets.indexes();
        let everyone: Vec<&ProviderIndex> = indexes.iter().collect();
        let common = sets.common_to_all();
        let overall = fastest_timestamps(common.iter().copied(), &everyone);

        let providers = indexes
            .iter()
            .enumerate()
            .map(|(i, index)| {
                let versus = indexes
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(j, rival)| {
                        let entries = match comparison {
                            Comparison::HeadToHead => {
                                fastest_timestamps(sets.pairwise_common(i, j), &[index, rival])
                            }
                            Comparison::Field => {
                                fastest_timestamps(sets.pairwise_common(i, j), &everyone)
                            }
                        };
                        Versus { rival: names[j].to_owned(), tally: tally(&entries, index) }
                    })
                    .collect();
                ProviderReport {
                    name: names[i].to_owned(),
                    repeated: index.repeated().count(),
                    unique: index.unique().count(),
                    total: index.total_records(),
                    overall: tally(&overall, index),
                    versus,
                }
            })
            .collect();

        Report { providers, common_to_all: common.len(), unique_to_one: sets.unique_to_one().len() }
    }

    /// Writes the report as labeled lines, one section per provider.
    pub fn write_to(&self, mut out: impl io::Write, style: &StyleSheet) -> Result<()> {
        for p in &self.providers {
            writeln!(out, "\n{}:", style.title(&p.name))?;
            writeln!(out, "Repeated Transactions: {}", style.count(p.repeated))?;
            writeln!(out, "Unique Transactions: {}", style.count(p.unique))?;
            writeln!(out, "Total Transactions: {}", style.count(p.total))?;
            writeln!(out, "Faster Transaction by {}: {}", p.name, style.count(p.overall.won))?;
            writeln!(out, "Total Transaction {} vs others: {}", p.name, style.count(p.overall.of))?;
            for v in &p.versus {
                writeln!(
                    out,
                    "Faster Transaction by {} vs {}: {}",
                    p.name,
                    v.rival,
                    style.count(v.tally.won)
                )?;
                writeln!(out, "Total Transaction {} vs {}: {}", p.name, v.rival, style.count(v.tally.of))?;
            }
        }
        writeln!(out, "\nTotal common Transaction Hashes: {}", style.count(self.common_to_all))?;
        writeln!(out, "Total Unique Transaction Hashes: {}", style.count(self.unique_to_one))?;
        out.flush()?;
        Ok(())
    }
}

fn tally(entries: &[FastestEntry<'_>], index: &ProviderIndex<'_>) -> Tally {
    Tally { won: wins(entries, index), of: entries.len() }
}
