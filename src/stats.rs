//! Aggregate frequency statistics over an enriched lexicon.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::apply::Applied;
use crate::lexicon::Entry;

/// Counts of applied processes across a lexicon, most common first.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EnrichmentStats {
    pub total_entries: usize,
    /// Affix label → count (prefixes, suffixes, infixes, nasal prefixes,
    /// circumfixes).
    pub affixes: Vec<(String, usize)>,
    /// (Nasal prefix label, applied allomorph) → count. The null allomorph
    /// is rendered as `∅`.
    pub nasal_allomorphs: Vec<(String, String, usize)>,
    /// Reduplication pattern label → count.
    pub reduplications: Vec<(String, usize)>,
}

/// Tally process records across all enriched entries.
pub fn collect(entries: &[Entry]) -> EnrichmentStats {
    let mut affixes: HashMap<String, usize> = HashMap::new();
    let mut nasals: HashMap<(String, String), usize> = HashMap::new();
    let mut redups: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let Some(morphology) = &entry.morphology else {
            continue;
        };
        for process in &morphology.processes {
            match &process.applied {
                Applied::Reduplication { .. } => {
                    *redups.entry(process.label.clone()).or_default() += 1;
                }
                Applied::NasalPrefix { applied_allomorph } => {
                    *affixes.entry(process.label.clone()).or_default() += 1;
                    let allo = if applied_allomorph.is_empty() {
                        "∅".to_string()
                    } else {
                        applied_allomorph.clone()
                    };
                    *nasals.entry((process.label.clone(), allo)).or_default() += 1;
                }
                _ => {
                    *affixes.entry(process.label.clone()).or_default() += 1;
                }
            }
        }
    }

    let mut nasal_allomorphs: Vec<(String, String, usize)> = nasals
        .into_iter()
        .map(|((label, allo), n)| (label, allo, n))
        .collect();
    nasal_allomorphs
        .sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (&a.0, &a.1).cmp(&(&b.0, &b.1))));

    EnrichmentStats {
        total_entries: entries.len(),
        affixes: most_common(affixes),
        nasal_allomorphs,
        reduplications: most_common(redups),
    }
}

fn most_common(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

impl fmt::Display for EnrichmentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total entries enriched: {}", self.total_entries)?;
        if !self.affixes.is_empty() {
            writeln!(f, "\nAffix statistics:")?;
            for (label, n) in &self.affixes {
                writeln!(f, "  {label}: {n}")?;
            }
        }
        if !self.nasal_allomorphs.is_empty() {
            writeln!(f, "\nNasal assimilation allomorphs:")?;
            for (label, allo, n) in &self.nasal_allomorphs {
                writeln!(f, "  {label} +{allo}: {n}")?;
            }
        }
        if !self.reduplications.is_empty() {
            writeln!(f, "\nReduplication statistics:")?;
            for (label, n) in &self.reduplications {
                writeln!(f, "  {label}: {n}")?;
            }
        }
        Ok(())
    }
}
