//! The analysis driver: repeated rule application in a fixed priority order.

use serde::{Deserialize, Serialize};

use crate::apply::{Process, apply_rule};
use crate::rules::{ProcessType, RuleTable};

/// Group traversal priority. Circumfixes go first so their constituent parts
/// are not half-stripped by plain prefix/suffix rules; nasal prefixes precede
/// plain prefixes so a bare `ma-` rule cannot shadow the assimilating `maN-`
/// pattern. Reduplication is handled separately, after all affixation.
pub const PROCESS_ORDER: [ProcessType; 5] = [
    ProcessType::Circumfix,
    ProcessType::NasalPrefix,
    ProcessType::Prefix,
    ProcessType::Suffix,
    ProcessType::Infix,
];

/// Decomposition of one word: the residual root plus the processes stripped
/// from it, in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morphology {
    pub root: String,
    pub processes: Vec<Process>,
}

/// Analyze a word against a rule table.
///
/// Pure and total: every successful application strictly shortens the stem,
/// so the scan terminates; a word with no applicable rule comes back with an
/// empty process list, which is a normal outcome rather than an error. The
/// root falls back to the original word if stripping ever empties the stem.
pub fn analyze(word: &str, table: &RuleTable) -> Morphology {
    let mut stem = word.to_string();
    let mut processes = Vec::new();
    // Each strip removes at least one character, so a well-formed table can
    // never need more passes than the word has characters. The cap only
    // matters if a misconfigured table defeats the shrinking guarantee.
    let max_passes = word.chars().count() + 1;

    for kind in PROCESS_ORDER {
        let mut passes = 0;
        'group: while passes < max_passes {
            passes += 1;
            for rule in table.of_type(kind) {
                if let Some((next, process)) = apply_rule(&stem, rule) {
                    processes.push(process);
                    stem = next;
                    // Rescan the group from the top: stacked affixes of the
                    // same type (e.g. doubled enclitics) are legitimate.
                    continue 'group;
                }
            }
            break;
        }
    }

    // Reduplication applies at most once, on the affix-reduced stem.
    for rule in table.of_type(ProcessType::Reduplication) {
        if let Some((next, process)) = apply_rule(&stem, rule) {
            processes.push(process);
            stem = next;
            break;
        }
    }

    let root = if stem.is_empty() {
        word.to_string()
    } else {
        stem
    };
    Morphology { root, processes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::Applied;
    use crate::rules::{ProcessType, Rule, RuleForm, RuleTable, ReduplicationPattern};
    use crate::validator::Focus;

    fn full() -> RuleTable {
        RuleTable::pangasinan()
    }

    /// Small table: man- prefix, -en suffix, nasal base ma, CV
    /// reduplication.
    fn minimal() -> RuleTable {
        let simple = |kind, form: &str| Rule {
            kind,
            form: RuleForm::Simple(form.to_string()),
            label: None,
            gloss: String::new(),
            focus: Some(Focus::Actor),
        };
        RuleTable::new(vec![
            simple(ProcessType::NasalPrefix, "ma"),
            simple(ProcessType::Prefix, "man"),
            simple(ProcessType::Suffix, "en"),
            Rule {
                kind: ProcessType::Reduplication,
                form: RuleForm::Reduplication(ReduplicationPattern::CV),
                label: None,
                gloss: String::new(),
                focus: None,
            },
        ])
        .unwrap()
    }

    #[test]
    fn nasal_prefix_beats_plain_prefix() {
        let m = analyze("mangan", &minimal());
        assert_eq!(m.root, "gan");
        assert_eq!(m.processes.len(), 1);
        assert_eq!(
            m.processes[0].applied,
            Applied::NasalPrefix {
                applied_allomorph: "n".to_string()
            }
        );
    }

    #[test]
    fn suffix_strip() {
        let m = analyze("tuboan", &full());
        assert_eq!(m.root, "tubo");
        assert_eq!(m.processes.len(), 1);
        assert_eq!(m.processes[0].applied, Applied::Suffix);
        assert_eq!(m.processes[0].label, "-an");
    }

    #[test]
    fn cv_reduplication() {
        let m = analyze("bibii", &full());
        assert_eq!(m.root, "bii");
        assert_eq!(m.processes.len(), 1);
        assert_eq!(
            m.processes[0].applied,
            Applied::Reduplication {
                partial_chunk: Some("bi".to_string())
            }
        );
    }

    #[test]
    fn bare_word_has_no_processes() {
        let m = analyze("aba", &full());
        assert_eq!(m.root, "aba");
        assert!(m.processes.is_empty());
    }

    #[test]
    fn empty_word_is_fine() {
        let m = analyze("", &full());
        assert_eq!(m.root, "");
        assert!(m.processes.is_empty());
    }

    #[test]
    fn circumfix_then_nasal_prefix() {
        // i-…-an comes off first, then paN- resolves pa + m on the middle.
        let m = analyze("ipamatayan", &full());
        assert_eq!(m.root, "atay");
        assert_eq!(m.processes.len(), 2);
        assert_eq!(m.processes[0].applied, Applied::Circumfix);
        assert_eq!(
            m.processes[1].applied,
            Applied::NasalPrefix {
                applied_allomorph: "m".to_string()
            }
        );
    }

    #[test]
    fn enclitics_stack() {
        let m = analyze("librokoyo", &full());
        assert_eq!(m.root, "libro");
        let labels: Vec<&str> = m.processes.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["-yo", "-ko"]);
    }

    #[test]
    fn full_catalogue_keeps_stripping_mangan() {
        // With the full table the -an suffix also fires on the nasal residue.
        let m = analyze("mangan", &full());
        assert_eq!(m.root, "g");
        let kinds: Vec<ProcessType> = m
            .processes
            .iter()
            .map(|p| p.applied.process_type())
            .collect();
        assert_eq!(kinds, [ProcessType::NasalPrefix, ProcessType::Suffix]);
    }

    #[test]
    fn infix_strip_after_affixes() {
        let m = analyze("sinulat", &full());
        assert_eq!(m.root, "sulat");
        assert_eq!(m.processes.len(), 1);
        assert_eq!(m.processes[0].applied, Applied::Infix { position: 1 });
    }

    #[test]
    fn suffix_group_runs_before_infix_group() {
        // The -to enclitic comes off first, and only then the -in- infix.
        let m = analyze("linuto", &full());
        assert_eq!(m.root, "lu");
        let kinds: Vec<ProcessType> = m
            .processes
            .iter()
            .map(|p| p.applied.process_type())
            .collect();
        assert_eq!(kinds, [ProcessType::Suffix, ProcessType::Infix]);
    }

    #[test]
    fn ordering_invariant_holds() {
        for word in ["ipamatayan", "mangan", "librokoyo", "tuboan", "linuto"] {
            let m = analyze(word, &full());
            let kinds: Vec<ProcessType> = m
                .processes
                .iter()
                .map(|p| p.applied.process_type())
                .collect();
            let rank = |k: &ProcessType| match k {
                ProcessType::Circumfix | ProcessType::NasalPrefix => 0,
                ProcessType::Prefix => 1,
                ProcessType::Suffix => 2,
                ProcessType::Infix => 3,
                ProcessType::Reduplication => 4,
            };
            let early = kinds
                .iter()
                .filter(|k| rank(k) == 0)
                .count();
            // Circumfix/nasal records must precede all suffix/infix records.
            assert!(
                kinds.iter().take(early).all(|k| rank(k) == 0),
                "word {word}: {kinds:?}"
            );
            assert!(
                kinds.iter().skip(early).all(|k| rank(k) > 0),
                "word {word}: {kinds:?}"
            );
        }
    }

    #[test]
    fn reduplication_applies_at_most_once() {
        let table = full();
        for word in ["bibii", "agaaga", "manbibii", "kakanen"] {
            let m = analyze(word, &table);
            let redups = m
                .processes
                .iter()
                .filter(|p| p.applied.process_type() == ProcessType::Reduplication)
                .count();
            assert!(redups <= 1, "word {word}: {redups} reduplications");
        }
    }

    #[test]
    fn totality_and_length_non_increase() {
        let table = full();
        for word in ["", "a", "aba", "mangan", "ipamatayan", "xyz", "ñáñá", "MANGAN"]
        {
            let m = analyze(word, &table);
            assert!(m.root.chars().count() <= word.chars().count().max(1));
            if !word.is_empty() {
                assert!(!m.root.is_empty(), "word {word} produced an empty root");
            }
        }
    }

    #[test]
    fn root_is_a_fixed_point() {
        let table = full();
        for word in ["tuboan", "bibii", "ipamatayan", "librokoyo", "sinulat"] {
            let m = analyze(word, &table);
            let again = analyze(&m.root, &table);
            assert_eq!(again.root, m.root);
            assert!(
                again.processes.is_empty(),
                "root {} re-analyzed as {:?}",
                m.root,
                again.processes
            );
        }
    }

    #[test]
    fn nasal_null_allomorph_in_context() {
        let m = analyze("maalis", &minimal());
        assert_eq!(m.root, "alis");
        assert_eq!(
            m.processes[0].applied,
            Applied::NasalPrefix {
                applied_allomorph: String::new()
            }
        );
    }
}
