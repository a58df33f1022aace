//! Identity normalization.
//!
//! Registrants type their name, email, and phone however they like, and the
//! roster spreadsheet is maintained by hand. Everything compared by the
//! matcher goes through these functions first so that `Ionuț`, `IONUT` and
//! `ionut` are the same token, and `+40 724 123 456` is just digits.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// One way of reading a free-text full name as `(first, last)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSplit {
    pub first: String,
    pub last: String,
}

impl NameSplit {
    #[must_use]
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Comparable keys for this split. See [`name_keys`].
    #[must_use]
    pub fn keys(&self) -> [String; 2] {
        name_keys(&self.first, &self.last)
    }
}

/// Lowercase and strip diacritics.
///
/// Decomposes to NFD and drops combining marks, so `ț` (t + comma below)
/// folds to `t` and `é` to `e`.
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Fold a name fragment and remove every whitespace character.
#[must_use]
pub fn name_key(part: &str) -> String {
    fold(part).chars().filter(|c| !c.is_whitespace()).collect()
}

/// Both concatenation orders of a name: `[first+last, last+first]`.
#[must_use]
pub fn name_keys(first: &str, last: &str) -> [String; 2] {
    let first = name_key(first);
    let last = name_key(last);
    [format!("{first}{last}"), format!("{last}{first}")]
}

/// Trim and fold an email address. No provider-specific rewriting.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    fold(email.trim())
}

/// Keep only the ASCII digits of a phone number.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Substring match on digit-only phone numbers.
///
/// Either side may carry a country code or trunk prefix the other omits
/// (`40724123456` vs `724123456`). An empty side never matches. Short numbers
/// can produce false positives; this is accepted.
#[must_use]
pub fn phones_match(a: &str, b: &str) -> bool {
    let a = normalize_phone(a);
    let b = normalize_phone(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Candidate `(first, last)` readings of a single full-name field.
///
/// - first word as first name, remainder as last name
/// - last word as last name, remainder as first name
/// - for exactly two words, the swapped pair as well
///
/// A single word yields `(word, "")` and `("", word)`; a blank name yields no
/// candidates. Duplicates are dropped, order is preserved.
#[must_use]
pub fn name_candidates(full_name: &str) -> Vec<NameSplit> {
    let words: Vec<&str> = full_name.split_whitespace().collect();

    let raw = match words.as_slice() {
        [] => return Vec::new(),
        [word] => vec![NameSplit::new(*word, ""), NameSplit::new("", *word)],
        [head, rest @ ..] => {
            let (init, tail) = words.split_at(words.len() - 1);
            let mut splits = vec![
                NameSplit::new(*head, rest.join(" ")),
                NameSplit::new(init.join(" "), tail.join(" ")),
            ];
            if let [first, last] = words.as_slice() {
                splits.push(NameSplit::new(*last, *first));
            }
            splits
        }
    };

    let mut candidates: Vec<NameSplit> = Vec::with_capacity(raw.len());
    for split in raw {
        if !candidates.contains(&split) {
            candidates.push(split);
        }
    }
    candidates
}
