//! Nasal-assimilation allomorphy.
//!
//! Pangasinan nasal prefixes (maN-, aN-, paN-, oN-) surface with the nasal
//! assimilated to the following consonant, or fully absorbed before a vowel.
//! Given a stem that starts with the prefix base, this module decides which
//! allomorph was actually present and what remains after stripping it.

/// Surface allomorphs of the assimilating nasal, in priority order.
/// First match wins, so `n` is found before `ng`/`ny`.
pub const NASAL_ALLOMORPHS: [&str; 4] = ["m", "n", "ng", "ny"];

/// Vowels of the working orthography, including accented variants.
pub const VOWELS: &str = "aeiouáéíóúâêîôû";

pub fn is_vowel(c: char) -> bool {
    c.to_lowercase().any(|l| VOWELS.contains(l))
}

pub(crate) fn chars_eq_ci(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

/// Case-insensitively match `pat` against the start of `stem`, returning the
/// byte length of the matched span in `stem`.
pub(crate) fn match_prefix_ci(stem: &str, pat: &str) -> Option<usize> {
    let mut matched = 0;
    let mut stem_chars = stem.chars();
    for p in pat.chars() {
        match stem_chars.next() {
            Some(c) if chars_eq_ci(c, p) => matched += c.len_utf8(),
            _ => return None,
        }
    }
    Some(matched)
}

/// Case-insensitively match `pat` against the end of `stem`, returning the
/// byte length of the matched span in `stem`.
pub(crate) fn match_suffix_ci(stem: &str, pat: &str) -> Option<usize> {
    let mut matched = 0;
    let mut stem_chars = stem.chars().rev();
    for p in pat.chars().rev() {
        match stem_chars.next() {
            Some(c) if chars_eq_ci(c, p) => matched += c.len_utf8(),
            _ => return None,
        }
    }
    Some(matched)
}

/// Resolve a nasal prefix with base form `base` against `stem`.
///
/// On success returns `(new_stem, applied_allomorph)`, where the allomorph is
/// one of [`NASAL_ALLOMORPHS`] or the empty string when the nasal left no
/// residue (vowel-initial root). Fails when `stem` does not start with the
/// base, when the base would consume the entire word, or when the residue
/// starts with a plain consonant.
///
/// No backtracking across bases happens here; the analysis driver supplies
/// candidate bases one rule at a time.
pub fn resolve_nasal(stem: &str, base: &str) -> Option<(String, String)> {
    let base_len = match_prefix_ci(stem, base)?;
    let residue = &stem[base_len..];
    if residue.is_empty() {
        // A nasal prefix can never consume the entire word.
        return None;
    }
    for allo in NASAL_ALLOMORPHS {
        if let Some(allo_len) = match_prefix_ci(residue, allo) {
            return Some((residue[allo_len..].to_string(), allo.to_string()));
        }
    }
    // Null allomorph: the nasal fully assimilated before a vowel.
    if residue.chars().next().is_some_and(is_vowel) {
        return Some((residue.to_string(), String::new()));
    }
    None
}
