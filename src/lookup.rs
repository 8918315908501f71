//! Rule-based dictionary lookup: the engine's external consumer boundary.
//!
//! Resolves a surface token to a dictionary root when the token itself is not
//! an entry, by trying affix-stripping hypotheses gated by the POS attachment
//! validator. No translation happens here; a hypothesis is just a root plus
//! the gloss and POS the dictionary holds for it.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::analyzer::analyze;
use crate::apply::apply_rule;
use crate::lexicon::Entry;
use crate::rules::{ProcessType, RuleTable};
use crate::validator::{PosTag, is_valid_attachment};

/// Common grammatical particles.
const PARTICLES: &[(&str, &str)] = &[
    ("ed", "at/to/in"),
    ("na", "already"),
    ("so", "the"),
    ("ray", "the (pl)"),
    ("et", "and"),
    ("ya", "that"),
    ("ta", "because"),
    ("no", "if"),
    ("diad", "from"),
    ("para", "for"),
    ("ni", "of"),
];

/// Personal pronouns.
const PRONOUNS: &[(&str, &str)] = &[
    ("siak", "I"),
    ("sika", "you (sg)"),
    ("sikato", "he/she"),
    ("sikatayo", "we (incl)"),
    ("sikami", "we (excl)"),
    ("sikayo", "you (pl)"),
    ("sikara", "they"),
    ("ak", "I"),
    ("ka", "you"),
];

/// Demonstratives.
const DEMONSTRATIVES: &[(&str, &str)] = &[
    ("itan", "this"),
    ("iyan", "that"),
    ("yaran", "that (far)"),
    ("yan", "that"),
    ("tan", "this"),
];

/// How a hypothesis was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The token itself is a dictionary entry.
    Direct,
    /// Closed-class word (particle, pronoun, demonstrative).
    ClosedClass,
    /// A single validated affix strip reached a dictionary root.
    AffixStrip,
    /// The full analysis driver reduced the token to a dictionary root.
    Decomposition,
}

/// A root hypothesis for one surface token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootHypothesis {
    pub word: String,
    pub root: String,
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<PosTag>,
    pub via: MatchKind,
    /// Labels of the affixes stripped to reach the root, in strip order.
    pub stripped: Vec<String>,
}

struct DictEntry {
    gloss: String,
    pos: Option<PosTag>,
}

/// Dictionary-backed root lookup over a rule table.
pub struct RootLookup {
    table: RuleTable,
    dictionary: HashMap<String, DictEntry>,
    closed_class: HashMap<&'static str, &'static str>,
    token_regex: Regex,
}

impl RootLookup {
    /// Index a lexicon for lookup. Entries are stored under both their raw
    /// and diacritic-normalized forms; first occurrence wins on collision.
    pub fn from_entries(entries: &[Entry], table: RuleTable) -> Self {
        let mut dictionary: HashMap<String, DictEntry> = HashMap::new();
        for entry in entries {
            let Some(word) = entry.word_str() else {
                continue;
            };
            let gloss = entry.meaning_str().unwrap_or_default().to_string();
            let lowered = word.to_lowercase();
            let normalized = normalize(word);
            let pos = entry.pos_tag();
            for key in [lowered, normalized] {
                dictionary.entry(key).or_insert_with(|| DictEntry {
                    gloss: gloss.clone(),
                    pos,
                });
            }
        }

        let mut closed_class = HashMap::new();
        for (w, g) in PARTICLES.iter().chain(PRONOUNS).chain(DEMONSTRATIVES) {
            closed_class.entry(*w).or_insert(*g);
        }

        Self {
            table,
            dictionary,
            closed_class,
            // A word, or a single non-space symbol.
            token_regex: Regex::new(r"\w+|[^\w\s]").expect("token regex is valid"),
        }
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    /// Split running text into word and punctuation tokens, lowercased.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Resolve one token to a dictionary root, if any hypothesis holds.
    pub fn find_root(&self, word: &str) -> Option<RootHypothesis> {
        let normalized = normalize(word);

        // Stage 1: the token is itself an entry.
        if let Some(entry) = self.dictionary.get(&normalized) {
            return Some(RootHypothesis {
                word: word.to_string(),
                root: normalized,
                gloss: entry.gloss.clone(),
                pos: entry.pos,
                via: MatchKind::Direct,
                stripped: Vec::new(),
            });
        }

        // Stage 2: closed-class words.
        if let Some(gloss) = self.closed_class.get(normalized.as_str()) {
            return Some(RootHypothesis {
                word: word.to_string(),
                root: normalized,
                gloss: (*gloss).to_string(),
                pos: None,
                via: MatchKind::ClosedClass,
                stripped: Vec::new(),
            });
        }

        // Stage 3: single affix-strip hypotheses, POS-gated. Prefix-side
        // rules first, then suffix-side, following rule table order within
        // each group.
        let groups = [
            ProcessType::NasalPrefix,
            ProcessType::Prefix,
            ProcessType::Suffix,
        ];
        for kind in groups {
            for rule in self.table.of_type(kind) {
                let Some((candidate, process)) = apply_rule(&normalized, rule) else {
                    continue;
                };
                let Some(entry) = self.dictionary.get(&candidate) else {
                    continue;
                };
                if !is_valid_attachment(rule.focus, entry.pos) {
                    debug!(
                        word,
                        affix = %process.label,
                        pos = ?entry.pos,
                        "rejecting affix hypothesis on POS grounds"
                    );
                    continue;
                }
                return Some(RootHypothesis {
                    word: word.to_string(),
                    root: candidate,
                    gloss: entry.gloss.clone(),
                    pos: entry.pos,
                    via: MatchKind::AffixStrip,
                    stripped: vec![process.label],
                });
            }
        }

        // Stage 4: full decomposition probe for stacked affixation and
        // reduplication.
        let morphology = analyze(&normalized, &self.table);
        if morphology.root != normalized {
            if let Some(entry) = self.dictionary.get(&morphology.root) {
                return Some(RootHypothesis {
                    word: word.to_string(),
                    root: morphology.root,
                    gloss: entry.gloss.clone(),
                    pos: entry.pos,
                    via: MatchKind::Decomposition,
                    stripped: morphology
                        .processes
                        .into_iter()
                        .map(|p| p.label)
                        .collect(),
                });
            }
        }

        None
    }

    /// Tokenize text and resolve each word token; punctuation tokens come
    /// back with no hypothesis.
    pub fn lookup_text(&self, text: &str) -> Vec<(String, Option<RootHypothesis>)> {
        self.tokenize(text)
            .into_iter()
            .map(|token| {
                let hit = if token.chars().any(|c| c.is_alphanumeric()) {
                    self.find_root(&token)
                } else {
                    None
                };
                (token, hit)
            })
            .collect()
    }
}

/// Fold diacritics and lowercase, for lookup keys only: the analyzer itself
/// sees the original form.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match c {
            'á' => out.push('a'),
            'é' => out.push('e'),
            'í' => out.push('i'),
            'ó' => out.push('o'),
            'ú' => out.push('u'),
            'ñ' => out.push_str("ny"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;

    fn lookup() -> RootLookup {
        let mut inom = Entry::new("inom", "drink");
        inom.pos = serde_json::json!("VERB");
        let mut abong = Entry::new("abong", "house");
        abong.pos = serde_json::json!("NOUN");
        let baley = Entry::new("baley", "town");
        RootLookup::from_entries(&[inom, abong, baley], RuleTable::pangasinan())
    }

    #[test]
    fn direct_hit() {
        let l = lookup();
        // Three entries, each indexed under raw and normalized forms that
        // happen to coincide here.
        assert_eq!(l.dictionary_len(), 3);
        let h = l.find_root("abong").unwrap();
        assert_eq!(h.via, MatchKind::Direct);
        assert_eq!(h.root, "abong");
        assert_eq!(h.gloss, "house");
        assert_eq!(h.pos, Some(PosTag::Noun));
    }

    #[test]
    fn normalization_reaches_the_entry() {
        let l = lookup();
        let h = l.find_root("Ábong").unwrap();
        assert_eq!(h.via, MatchKind::Direct);
        assert_eq!(h.root, "abong");
    }

    #[test]
    fn closed_class_hit() {
        let l = lookup();
        let h = l.find_root("siak").unwrap();
        assert_eq!(h.via, MatchKind::ClosedClass);
        assert_eq!(h.gloss, "I");
    }

    #[test]
    fn validated_nasal_strip() {
        let l = lookup();
        // oN- actor focus on a VERB root passes validation.
        let h = l.find_root("oninom").unwrap();
        assert_eq!(h.via, MatchKind::AffixStrip);
        assert_eq!(h.root, "inom");
        assert_eq!(h.stripped, vec!["oN-".to_string()]);
    }

    #[test]
    fn pos_gate_rejects_actor_focus_on_noun() {
        let l = lookup();
        // oN- would reach "abong", but actor focus needs a verbal root, so
        // the single-strip stage skips it; the ungated decomposition probe
        // still reports the root.
        let h = l.find_root("onabong").unwrap();
        assert_eq!(h.via, MatchKind::Decomposition);
        assert_eq!(h.root, "abong");
    }

    #[test]
    fn suffix_strip_hypothesis() {
        let l = lookup();
        let h = l.find_root("baleyko").unwrap();
        assert_eq!(h.via, MatchKind::AffixStrip);
        assert_eq!(h.root, "baley");
        assert_eq!(h.stripped, vec!["-ko".to_string()]);
    }

    #[test]
    fn decomposition_probe_handles_stacks() {
        let l = lookup();
        // Stacked enclitics: -yo strips to "baleyko", which is not an entry,
        // so the single-strip stage fails; the full driver reaches "baley".
        let h = l.find_root("baleykoyo").unwrap();
        assert_eq!(h.root, "baley");
        assert_eq!(h.via, MatchKind::Decomposition);
        assert_eq!(h.stripped, vec!["-yo".to_string(), "-ko".to_string()]);
    }

    #[test]
    fn unknown_word_yields_nothing() {
        let l = lookup();
        assert!(l.find_root("zzz").is_none());
    }

    #[test]
    fn tokenize_splits_words_and_punctuation() {
        let l = lookup();
        assert_eq!(
            l.tokenize("Say abong ko!"),
            vec!["say", "abong", "ko", "!"]
        );
    }

    #[test]
    fn lookup_text_skips_punctuation() {
        let l = lookup();
        let results = l.lookup_text("abong!");
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_some());
        assert!(results[1].1.is_none());
    }

    #[test]
    fn normalize_folds_diacritics() {
        assert_eq!(normalize("Ñáñó"), "nyanyo");
        assert_eq!(normalize("baléy"), "baley");
    }
}
