//! Member matching.
//!
//! Decides whether a registrant is on the roster. The roster is scanned in
//! sheet order and, for each entry, the rules are tried from strongest to
//! weakest:
//!
//! ```text
//! name+phone → name+email → email+phone → email
//! ```
//!
//! The first entry that satisfies any rule wins. A later entry satisfying a
//! stronger rule does not override an earlier entry that matched by email
//! alone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::member::{RosterEntry, Submission};
use crate::normalize::{name_keys, normalize_email, normalize_phone, phones_match};

/// The rule that established membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchRule {
    #[serde(rename = "name+phone")]
    NamePhone,
    #[serde(rename = "name+email")]
    NameEmail,
    #[serde(rename = "email+phone")]
    EmailPhone,
    #[serde(rename = "email")]
    Email,
}

impl MatchRule {
    /// Rules in evaluation order.
    pub const PRIORITY: [Self; 4] = [
        Self::NamePhone,
        Self::NameEmail,
        Self::EmailPhone,
        Self::Email,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NamePhone => "name+phone",
            Self::NameEmail => "name+email",
            Self::EmailPhone => "email+phone",
            Self::Email => "email",
        }
    }

    const fn holds(self, signals: Signals) -> bool {
        match self {
            Self::NamePhone => signals.name && signals.phone,
            Self::NameEmail => signals.name && signals.email,
            Self::EmailPhone => signals.email && signals.phone,
            Self::Email => signals.email,
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one matching call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub is_member: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<MatchRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_entry: Option<RosterEntry>,
}

impl MatchResult {
    #[must_use]
    pub fn not_member() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matched(rule: MatchRule, entry: &RosterEntry) -> Self {
        Self {
            is_member: true,
            matched_by: Some(rule),
            matched_entry: Some(entry.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Signals {
    name: bool,
    email: bool,
    phone: bool,
}

/// Match a full submission against the roster.
///
/// Never fails: blank or malformed input simply matches nothing.
#[must_use]
pub fn match_member(submission: &Submission, roster: &[RosterEntry]) -> MatchResult {
    let email = normalize_email(&submission.email);
    let phone = normalize_phone(&submission.phone);
    let name_variants: Vec<String> = submission
        .name_splits()
        .iter()
        .flat_map(|split| split.keys())
        .filter(|key| !key.is_empty())
        .collect();

    for entry in roster {
        let signals = Signals {
            name: name_matches(&name_variants, entry),
            email: emails_equal(&email, &entry.email),
            phone: phones_match(&phone, &entry.phone),
        };

        if let Some(rule) = MatchRule::PRIORITY.into_iter().find(|rule| rule.holds(signals)) {
            return MatchResult::matched(rule, entry);
        }
    }

    MatchResult::not_member()
}

/// Quick check used by the first form step, before name and phone are known.
#[must_use]
pub fn match_by_email_only(email: &str, roster: &[RosterEntry]) -> MatchResult {
    let email = normalize_email(email);

    roster
        .iter()
        .find(|entry| emails_equal(&email, &entry.email))
        .map_or_else(MatchResult::not_member, |entry| {
            MatchResult::matched(MatchRule::Email, entry)
        })
}

fn name_matches(variants: &[String], entry: &RosterEntry) -> bool {
    if variants.is_empty() {
        return false;
    }
    name_keys(&entry.first_name, &entry.last_name)
        .iter()
        .any(|key| variants.contains(key))
}

fn emails_equal(normalized: &str, raw: &str) -> bool {
    !normalized.is_empty() && normalized == normalize_email(raw)
}
