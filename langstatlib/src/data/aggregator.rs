//! Accumulates observations into per-language totals.

use std::collections::HashMap;

use super::stats::{percentage, LanguageStats, Observation, StatsEntry, Summary};

/// Running per-language totals for a single scan.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    entries: HashMap<&'static str, StatsEntry>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file to its language's entry.
    pub fn accumulate(&mut self, observation: &Observation) {
        self.entries
            .entry(observation.language)
            .or_default()
            .record(observation.lines);
    }

    pub fn total_files(&self) -> u64 {
        self.entries.values().map(|e| e.files).sum()
    }

    pub fn total_lines(&self) -> u64 {
        self.entries.values().map(|e| e.lines).sum()
    }

    /// Snapshot the totals, sorted by descending line count.
    ///
    /// Ties are broken by language label so output is deterministic.
    pub fn finalize(&self) -> Summary {
        let total_files = self.total_files();
        let total_lines = self.total_lines();

        let mut languages: Vec<LanguageStats> = self
            .entries
            .iter()
            .map(|(language, entry)| LanguageStats {
                language: language.to_string(),
                files: entry.files,
                lines: entry.lines,
                percentage: percentage(entry.lines, total_lines),
            })
            .collect();

        languages.sort_by(|a, b| {
            b.lines
                .cmp(&a.lines)
                .then_with(|| a.language.cmp(&b.language))
        });

        Summary {
            languages,
            total_files,
            total_lines,
        }
    }
}

impl Extend<Observation> for Aggregator {
    fn extend<T: IntoIterator<Item = Observation>>(&mut self, iter: T) {
        for observation in iter {
            self.accumulate(&observation);
        }
    }
}
