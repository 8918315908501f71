//! Per-process-type stripping functions.
//!
//! Each function takes the current stem and one rule and either fails (`None`)
//! or returns the shortened stem plus a [`Process`] record. Matching is
//! case-insensitive; the surviving substring keeps its original casing.

use serde::{Deserialize, Serialize};

use crate::allomorph::{match_prefix_ci, match_suffix_ci, resolve_nasal};
use crate::rules::{ProcessType, Rule, RuleForm};

/// Variant-specific payload of an applied process. Serialized with a `type`
/// tag so nasal prefixes carry `applied_allomorph`, infixes `position`, and
/// partial reduplication `partial_chunk`, with nothing extra elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Applied {
    Circumfix,
    NasalPrefix {
        /// The consumed allomorph; empty when the nasal fully assimilated.
        applied_allomorph: String,
    },
    Prefix,
    Suffix,
    Infix {
        /// Character position at which the infix was found (never 0).
        position: usize,
    },
    Reduplication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partial_chunk: Option<String>,
    },
}

impl Applied {
    pub fn process_type(&self) -> ProcessType {
        match self {
            Applied::Circumfix => ProcessType::Circumfix,
            Applied::NasalPrefix { .. } => ProcessType::NasalPrefix,
            Applied::Prefix => ProcessType::Prefix,
            Applied::Suffix => ProcessType::Suffix,
            Applied::Infix { .. } => ProcessType::Infix,
            Applied::Reduplication { .. } => ProcessType::Reduplication,
        }
    }
}

/// Record of one successful rule application. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    #[serde(flatten)]
    pub applied: Applied,
    pub label: String,
    pub gloss: String,
    pub normalized_form: RuleForm,
}

fn record(rule: &Rule, applied: Applied) -> Process {
    Process {
        applied,
        label: rule.display_label(),
        gloss: rule.gloss.clone(),
        normalized_form: rule.form.clone(),
    }
}

/// Apply one rule to a stem, dispatching on its process type.
pub fn apply_rule(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    match rule.kind {
        ProcessType::Circumfix => apply_circumfix(stem, rule),
        ProcessType::NasalPrefix => apply_nasal_prefix(stem, rule),
        ProcessType::Prefix => apply_prefix(stem, rule),
        ProcessType::Suffix => apply_suffix(stem, rule),
        ProcessType::Infix => apply_infix(stem, rule),
        ProcessType::Reduplication => apply_reduplication(stem, rule),
    }
}

fn apply_circumfix(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Circumfix { prefix, suffix } = &rule.form else {
        return None;
    };
    let pre_len = match_prefix_ci(stem, prefix)?;
    let affix_chars = prefix.chars().count() + suffix.chars().count();
    // The middle must be non-empty once both ends come off.
    if stem.chars().count() <= affix_chars {
        return None;
    }
    let new_stem = if suffix.is_empty() {
        stem[pre_len..].to_string()
    } else {
        let suf_len = match_suffix_ci(stem, suffix)?;
        stem[pre_len..stem.len() - suf_len].to_string()
    };
    Some((new_stem, record(rule, Applied::Circumfix)))
}

fn apply_nasal_prefix(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Simple(base) = &rule.form else {
        return None;
    };
    let (new_stem, allomorph) = resolve_nasal(stem, base)?;
    Some((
        new_stem,
        record(
            rule,
            Applied::NasalPrefix {
                applied_allomorph: allomorph,
            },
        ),
    ))
}

fn apply_prefix(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Simple(prefix) = &rule.form else {
        return None;
    };
    let pre_len = match_prefix_ci(stem, prefix)?;
    if stem.chars().count() <= prefix.chars().count() {
        return None;
    }
    Some((stem[pre_len..].to_string(), record(rule, Applied::Prefix)))
}

fn apply_suffix(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Simple(suffix) = &rule.form else {
        return None;
    };
    let suf_len = match_suffix_ci(stem, suffix)?;
    if stem.chars().count() <= suffix.chars().count() {
        return None;
    }
    Some((
        stem[..stem.len() - suf_len].to_string(),
        record(rule, Applied::Suffix),
    ))
}

fn apply_infix(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Simple(infix) = &rule.form else {
        return None;
    };
    // Infixes never match word-initially; that would be a prefix.
    for (pos, (byte_idx, _)) in stem.char_indices().enumerate().skip(1) {
        if let Some(in_len) = match_prefix_ci(&stem[byte_idx..], infix) {
            let mut new_stem = String::with_capacity(stem.len() - in_len);
            new_stem.push_str(&stem[..byte_idx]);
            new_stem.push_str(&stem[byte_idx + in_len..]);
            return Some((new_stem, record(rule, Applied::Infix { position: pos })));
        }
    }
    None
}

fn apply_reduplication(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let RuleForm::Reduplication(pattern) = &rule.form else {
        return None;
    };
    match pattern.chunk_len() {
        None => apply_full_reduplication(stem, rule),
        Some(chunk_len) => apply_partial_reduplication(stem, rule, chunk_len),
    }
}

fn apply_full_reduplication(stem: &str, rule: &Rule) -> Option<(String, Process)> {
    let n = stem.chars().count();
    if n == 0 || n % 2 != 0 {
        return None;
    }
    let half_bytes = char_offset(stem, n / 2);
    let (first, second) = stem.split_at(half_bytes);
    if !eq_ci(first, second) {
        return None;
    }
    Some((
        first.to_string(),
        record(rule, Applied::Reduplication { partial_chunk: None }),
    ))
}

fn apply_partial_reduplication(
    stem: &str,
    rule: &Rule,
    chunk_len: usize,
) -> Option<(String, Process)> {
    if stem.chars().count() < chunk_len * 2 {
        return None;
    }
    let chunk_bytes = char_offset(stem, chunk_len);
    let next_bytes = char_offset(stem, chunk_len * 2);
    let chunk = &stem[..chunk_bytes];
    if !eq_ci(chunk, &stem[chunk_bytes..next_bytes]) {
        return None;
    }
    Some((
        stem[chunk_bytes..].to_string(),
        record(
            rule,
            Applied::Reduplication {
                partial_chunk: Some(chunk.to_string()),
            },
        ),
    ))
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Byte offset of the `n`-th character of `s` (which must have at least `n`
/// characters).
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}
