use serde::{Deserialize, Serialize};

use crate::normalize::{NameSplit, name_candidates};

/// A known member, one row of the roster sheet.
///
/// All fields are free text copied from the spreadsheet; nothing here is
/// validated or normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    pub email: String,
    pub phone: String,
}

impl RosterEntry {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: String::new(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }
}

/// How the registrant's name arrived.
///
/// Newer forms collect a single "Nume Prenume" field; older ones asked for
/// first and last name separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionName {
    Full {
        name: String,
    },
    Split {
        #[serde(rename = "firstName")]
        first_name: String,
        #[serde(rename = "lastName")]
        last_name: String,
    },
}

impl Default for SubmissionName {
    fn default() -> Self {
        Self::Full {
            name: String::new(),
        }
    }
}

/// The identity a registrant submitted, as typed.
///
/// Every field is optional on the wire. A `name` field selects
/// [`SubmissionName::Full`]; otherwise `firstName`/`lastName` select
/// [`SubmissionName::Split`], each defaulting to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubmissionFields")]
pub struct Submission {
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub name: SubmissionName,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionFields {
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl From<SubmissionFields> for Submission {
    fn from(fields: SubmissionFields) -> Self {
        let name = match (fields.name, fields.first_name, fields.last_name) {
            (Some(name), _, _) => SubmissionName::Full { name },
            (None, None, None) => SubmissionName::default(),
            (None, first_name, last_name) => SubmissionName::Split {
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
            },
        };
        Self {
            email: fields.email,
            phone: fields.phone,
            name,
        }
    }
}

impl Submission {
    /// Submission with a single free-text full name.
    #[must_use]
    pub fn with_full_name(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            name: SubmissionName::Full { name: name.into() },
        }
    }

    /// Submission with first and last name already separated.
    #[must_use]
    pub fn with_split_name(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            name: SubmissionName::Split {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
        }
    }

    /// Every `(first, last)` reading the matcher should try.
    ///
    /// A split name is taken as-is; a full name goes through
    /// [`name_candidates`].
    #[must_use]
    pub fn name_splits(&self) -> Vec<NameSplit> {
        match &self.name {
            SubmissionName::Full { name } => name_candidates(name),
            SubmissionName::Split {
                first_name,
                last_name,
            } => vec![NameSplit::new(first_name.as_str(), last_name.as_str())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_full_name_shape() {
        let json = r#"{"email":"a@x.com","phone":"07","name":"Ion Popescu"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(
            submission,
            Submission::with_full_name("Ion Popescu", "a@x.com", "07")
        );
    }

    #[test]
    fn deserializes_split_name_shape() {
        let json = r#"{"email":"a@x.com","phone":"07","firstName":"Ion","lastName":"Popescu"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(
            submission,
            Submission::with_split_name("Ion", "Popescu", "a@x.com", "07")
        );
    }

    #[test]
    fn missing_name_fields_mean_an_empty_name() {
        let submission: Submission =
            serde_json::from_str(r#"{"email":"a@x.com","phone":"07"}"#).unwrap();
        assert_eq!(submission, Submission::with_full_name("", "a@x.com", "07"));
        assert!(submission.name_splits().is_empty());
    }

    #[test]
    fn lone_first_name_is_a_split_name() {
        let submission: Submission = serde_json::from_str(r#"{"firstName":"Ion"}"#).unwrap();
        assert_eq!(submission, Submission::with_split_name("Ion", "", "", ""));
    }

    #[test]
    fn empty_object_is_an_empty_submission() {
        let submission: Submission = serde_json::from_str("{}").unwrap();
        assert_eq!(submission, Submission::default());
    }

    #[test]
    fn split_name_is_a_single_candidate() {
        let submission = Submission::with_split_name("Ion", "Popescu", "", "");
        assert_eq!(submission.name_splits(), vec![NameSplit::new("Ion", "Popescu")]);
    }

    #[test]
    fn roster_entry_uses_camel_case() {
        let entry = RosterEntry::new("Ion", "Popescu", "ion@x.com", "0724").with_company("Acme");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["firstName"], "Ion");
        assert_eq!(value["lastName"], "Popescu");
        assert_eq!(value["company"], "Acme");
    }
}
