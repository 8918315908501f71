//! The morphological rule catalogue.
//!
//! Rules are loaded once into an immutable [`RuleTable`] and shared by
//! reference; table order within a process type is the tie-break priority
//! (first match wins).

use serde::{Deserialize, Serialize};

use crate::error::{PanlexError, Result};
use crate::validator::Focus;

/// Closed set of morphological process types, in no particular order.
/// The analysis driver owns the traversal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    Circumfix,
    NasalPrefix,
    Prefix,
    Suffix,
    Infix,
    Reduplication,
}

/// Reduplication pattern tags. Partial patterns copy a fixed-length leading
/// chunk; `Full` copies the whole stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReduplicationPattern {
    CV,
    CVC,
    C1V,
    CVCV,
    #[serde(rename = "full")]
    Full,
}

impl ReduplicationPattern {
    /// Chunk length in characters for partial patterns, `None` for full.
    pub fn chunk_len(self) -> Option<usize> {
        match self {
            ReduplicationPattern::CV | ReduplicationPattern::C1V => Some(2),
            ReduplicationPattern::CVC => Some(3),
            ReduplicationPattern::CVCV => Some(4),
            ReduplicationPattern::Full => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReduplicationPattern::CV => "CV",
            ReduplicationPattern::CVC => "CVC",
            ReduplicationPattern::C1V => "C1V",
            ReduplicationPattern::CVCV => "CVCV",
            ReduplicationPattern::Full => "full",
        }
    }
}

/// Surface form of a rule. Serialized untagged so a circumfix is a
/// `{prefix, suffix}` object and everything else a bare string, matching the
/// lexicon JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleForm {
    Circumfix { prefix: String, suffix: String },
    Reduplication(ReduplicationPattern),
    Simple(String),
}

impl std::fmt::Display for RuleForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleForm::Simple(s) => f.write_str(s),
            RuleForm::Circumfix { prefix, suffix } => write!(f, "{prefix}…{suffix}"),
            RuleForm::Reduplication(p) => f.write_str(p.as_str()),
        }
    }
}

/// One morphological rule: a process type, a surface form, an optional
/// display label, a gloss, and an optional focus category for POS gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: ProcessType,
    pub form: RuleForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub gloss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Focus>,
}

impl Rule {
    /// Display label, falling back to a textual rendering of the form.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(l) if !l.is_empty() => l.clone(),
            _ => self.form.to_string(),
        }
    }
}

/// An ordered, immutable sequence of rules, validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table, failing fast on malformed rules. A bad table is a
    /// programmer error caught at startup, not a per-word condition.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            match (&rule.kind, &rule.form) {
                (ProcessType::Circumfix, RuleForm::Circumfix { prefix, .. }) => {
                    if prefix.is_empty() {
                        return Err(PanlexError::RuleTable(format!(
                            "rule {i}: circumfix prefix must be non-empty"
                        )));
                    }
                }
                (ProcessType::Circumfix, _) => {
                    return Err(PanlexError::RuleTable(format!(
                        "rule {i}: circumfix rules need a prefix/suffix pair"
                    )));
                }
                (ProcessType::Reduplication, RuleForm::Reduplication(_)) => {}
                (ProcessType::Reduplication, _) => {
                    return Err(PanlexError::RuleTable(format!(
                        "rule {i}: reduplication rules need a pattern tag"
                    )));
                }
                (_, RuleForm::Simple(s)) => {
                    if s.is_empty() {
                        return Err(PanlexError::RuleTable(format!(
                            "rule {i}: empty surface form"
                        )));
                    }
                }
                (kind, form) => {
                    return Err(PanlexError::RuleTable(format!(
                        "rule {i}: form {form} does not fit process type {kind:?}"
                    )));
                }
            }
        }
        Ok(Self { rules })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules of one process type, in table order.
    pub fn of_type(&self, kind: ProcessType) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The default Pangasinan rule catalogue.
    pub fn pangasinan() -> Self {
        let rules = vec![
            nasal("ma", "maN-", "actor focus (nasal-assimilating, non-completed)", Focus::Actor),
            nasal("a", "aN-", "actor focus (nasal-assimilating, completed)", Focus::Actor),
            nasal("pa", "paN-", "causative/instrumental nasal-assimilating", Focus::Causative),
            nasal("o", "oN-", "actor focus (nasal-assimilating variant)", Focus::Actor),
            prefix("man", "man-", "actor focus (non-completed)", Some(Focus::Actor)),
            prefix("nan", "nan-", "actor focus (completed)", Some(Focus::Actor)),
            prefix("ma", "ma-", "causative / stative", Some(Focus::Stative)),
            prefix("pa", "pa-", "causative/allowative", Some(Focus::Causative)),
            prefix("paka", "paka-", "causative/allowative (intensive)", Some(Focus::Intensive)),
            prefix("maka", "maka-", "ability/potential", Some(Focus::Ability)),
            prefix("mi", "mi-", "reciprocal/distributive", Some(Focus::Reciprocal)),
            prefix("aki", "aki-", "reciprocal/distributive", Some(Focus::Reciprocal)),
            prefix("ipan", "(i)pan-", "instrumental focus (non-completed)", Some(Focus::Instrumental)),
            prefix("inpan", "inpan-", "instrumental focus (completed)", Some(Focus::Instrumental)),
            prefix("ipañgi", "(i)pañgi-", "instrumental/apparatus focus (non-completed)", Some(Focus::Instrumental)),
            prefix("inpañgi", "inpañgi-", "instrumental/apparatus focus (completed)", Some(Focus::Instrumental)),
            prefix("i", "i-", "theme/goal or benefactive focus (non-completed)", Some(Focus::Benefactive)),
            prefix("in", "in-", "theme/goal or benefactive focus (completed)", Some(Focus::Completed)),
            suffix("an", "-an", "locative/referent focus (non-completed)", Some(Focus::Locative)),
            suffix("en", "-en", "patient focus (non-completed)", Some(Focus::Patient)),
            suffix("in", "-in", "patient/theme focus (completed)", Some(Focus::Completed)),
            suffix("tayo", "-tayo", "1pl inclusive genitive enclitic", Some(Focus::Enclitic)),
            suffix("mi", "-mi", "1pl exclusive genitive enclitic", Some(Focus::Enclitic)),
            suffix("mo", "-mo", "2sg genitive enclitic", Some(Focus::Enclitic)),
            suffix("yo", "-yo", "2pl genitive enclitic", Some(Focus::Enclitic)),
            suffix("ko", "-ko", "1sg genitive enclitic", Some(Focus::Enclitic)),
            suffix("ta", "-ta", "1du inclusive genitive enclitic", Some(Focus::Enclitic)),
            suffix("to", "-to", "3sg genitive enclitic", Some(Focus::Enclitic)),
            suffix("da", "-da", "3pl genitive enclitic", Some(Focus::Enclitic)),
            circumfix("i", "an", "i-…-an", "benefactive focus (non-completed)", Some(Focus::Benefactive)),
            circumfix("in", "an", "in-…-an", "benefactive/referent focus (completed)", Some(Focus::Benefactive)),
            infix("in", "-in-", "completed aspect marker", Some(Focus::Completed)),
            redup(ReduplicationPattern::CV, "CV-", "partial reduplication (plural nouns)"),
            redup(ReduplicationPattern::CVC, "CVC-", "partial reduplication (plural nouns)"),
            redup(ReduplicationPattern::C1V, "C1V-", "partial reduplication (plural nouns)"),
            redup(ReduplicationPattern::CVCV, "CVCV-", "partial reduplication (plural nouns)"),
            redup(ReduplicationPattern::Full, "full", "full reduplication (intensifier/frequentative)"),
        ];
        Self::new(rules).expect("built-in rule catalogue is valid")
    }
}

fn affix(kind: ProcessType, form: &str, label: &str, gloss: &str, focus: Option<Focus>) -> Rule {
    Rule {
        kind,
        form: RuleForm::Simple(form.to_string()),
        label: Some(label.to_string()),
        gloss: gloss.to_string(),
        focus,
    }
}

fn nasal(form: &str, label: &str, gloss: &str, focus: Focus) -> Rule {
    affix(ProcessType::NasalPrefix, form, label, gloss, Some(focus))
}

fn prefix(form: &str, label: &str, gloss: &str, focus: Option<Focus>) -> Rule {
    affix(ProcessType::Prefix, form, label, gloss, focus)
}

fn suffix(form: &str, label: &str, gloss: &str, focus: Option<Focus>) -> Rule {
    affix(ProcessType::Suffix, form, label, gloss, focus)
}

fn infix(form: &str, label: &str, gloss: &str, focus: Option<Focus>) -> Rule {
    affix(ProcessType::Infix, form, label, gloss, focus)
}

fn circumfix(pre: &str, suf: &str, label: &str, gloss: &str, focus: Option<Focus>) -> Rule {
    Rule {
        kind: ProcessType::Circumfix,
        form: RuleForm::Circumfix {
            prefix: pre.to_string(),
            suffix: suf.to_string(),
        },
        label: Some(label.to_string()),
        gloss: gloss.to_string(),
        focus,
    }
}

fn redup(pattern: ReduplicationPattern, label: &str, gloss: &str) -> Rule {
    Rule {
        kind: ProcessType::Reduplication,
        form: RuleForm::Reduplication(pattern),
        label: Some(label.to_string()),
        gloss: gloss.to_string(),
        focus: None,
    }
}
