use serde::{Deserialize, Serialize};

/// Part-of-speech tags attached to lexicon entries by the (external)
/// heuristic classifier. Stored uppercase in the JSON lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Particle,
    Demonstrative,
    Number,
    #[serde(other)]
    Unknown,
}

/// Grammatical function of an affix, used to gate affix-stripping hypotheses
/// against a candidate root's POS tag during dictionary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Actor,
    Patient,
    Locative,
    Benefactive,
    Completed,
    Ability,
    Causative,
    Stative,
    Abstract,
    Ordinal,
    Reciprocal,
    Intensive,
    Instrumental,
    Theme,
    /// Genitive enclitics (-ko, -mo, -to, ...).
    Enclitic,
}

/// Whether an affix with the given focus may attach to a root tagged `pos`.
///
/// Permissive by default: a missing or unknown POS tag, or an affix with no
/// focus category, always validates. Ambiguity is resolved in favor of
/// accepting the analysis.
pub fn is_valid_attachment(focus: Option<Focus>, pos: Option<PosTag>) -> bool {
    use PosTag::*;

    let Some(pos) = pos else {
        return true;
    };
    if pos == Unknown {
        return true;
    }
    let Some(focus) = focus else {
        return true;
    };

    match focus {
        // Verbal focus affixes; adjectives can sometimes be verbalized.
        Focus::Actor
        | Focus::Patient
        | Focus::Locative
        | Focus::Benefactive
        | Focus::Completed
        | Focus::Ability => matches!(pos, Verb | Adjective),
        Focus::Causative => matches!(pos, Verb | Adjective | Noun),
        Focus::Stative | Focus::Abstract => matches!(pos, Adjective | Verb),
        Focus::Ordinal => matches!(pos, Noun | Number),
        Focus::Reciprocal => matches!(pos, Verb),
        Focus::Enclitic => matches!(pos, Noun | Verb | Adjective),
        // No attachment restriction known for these.
        Focus::Intensive | Focus::Instrumental | Focus::Theme => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pos_is_permissive() {
        assert!(is_valid_attachment(Some(Focus::Actor), None));
        assert!(is_valid_attachment(None, Some(PosTag::Noun)));
        assert!(is_valid_attachment(Some(Focus::Reciprocal), Some(PosTag::Unknown)));
    }

    #[test]
    fn actor_focus_requires_verbal_root() {
        assert!(is_valid_attachment(Some(Focus::Actor), Some(PosTag::Verb)));
        assert!(is_valid_attachment(Some(Focus::Actor), Some(PosTag::Adjective)));
        assert!(!is_valid_attachment(Some(Focus::Actor), Some(PosTag::Noun)));
    }

    #[test]
    fn causative_also_accepts_nouns() {
        assert!(is_valid_attachment(Some(Focus::Causative), Some(PosTag::Noun)));
        assert!(!is_valid_attachment(Some(Focus::Causative), Some(PosTag::Adverb)));
    }

    #[test]
    fn ordinal_attaches_to_nominals() {
        assert!(is_valid_attachment(Some(Focus::Ordinal), Some(PosTag::Number)));
        assert!(!is_valid_attachment(Some(Focus::Ordinal), Some(PosTag::Verb)));
    }

    #[test]
    fn enclitics_are_flexible() {
        for pos in [PosTag::Noun, PosTag::Verb, PosTag::Adjective] {
            assert!(is_valid_attachment(Some(Focus::Enclitic), Some(pos)));
        }
        assert!(!is_valid_attachment(Some(Focus::Enclitic), Some(PosTag::Pronoun)));
    }

    #[test]
    fn pos_tags_deserialize_uppercase() {
        let pos: PosTag = serde_json::from_str("\"VERB\"").unwrap();
        assert_eq!(pos, PosTag::Verb);
        let pos: PosTag = serde_json::from_str("\"PARTICLE\"").unwrap();
        assert_eq!(pos, PosTag::Particle);
        let pos: PosTag = serde_json::from_str("\"DEMONSTRATIVE\"").unwrap();
        assert_eq!(pos, PosTag::Demonstrative);
        let pos: PosTag = serde_json::from_str("\"NO-SUCH-TAG\"").unwrap();
        assert_eq!(pos, PosTag::Unknown);
    }

    #[test]
    fn closed_class_tags_are_concrete() {
        // Unlike Unknown, a particle root genuinely fails verbal attachment.
        assert!(!is_valid_attachment(Some(Focus::Actor), Some(PosTag::Particle)));
        assert!(!is_valid_attachment(
            Some(Focus::Enclitic),
            Some(PosTag::Demonstrative)
        ));
    }
}
