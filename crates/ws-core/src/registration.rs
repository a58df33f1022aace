//! Registration form, member status, and the row appended to the sheet.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::member::Submission;

/// CUI recorded for individuals (13 zeros).
pub const INDIVIDUAL_CUI: &str = "0000000000000";

/// Column headers of the registrations sheet, in order.
pub const REGISTRATION_HEADERS: [&str; 15] = [
    "Timestamp",
    "Workshop",
    "Nume",
    "Email",
    "Telefon",
    "Provocare",
    "Rezultat",
    "Nivel",
    "Factura",
    "Nume Firma",
    "CUI",
    "GDPR",
    "Marketing",
    "Status Membru",
    "Suma",
];

/// Who the invoice is issued to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// Company (persoană juridică).
    #[serde(rename = "PJ")]
    Company,
    /// Individual (persoană fizică).
    #[default]
    #[serde(rename = "PF")]
    Individual,
}

impl InvoiceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "PJ",
            Self::Individual => "PF",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership as written to the sheet and sent to the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    #[serde(rename = "Membru")]
    Member,
    #[serde(rename = "Non-Membru")]
    NonMember,
}

impl MemberStatus {
    #[must_use]
    pub const fn from_is_member(is_member: bool) -> Self {
        if is_member { Self::Member } else { Self::NonMember }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "Membru",
            Self::NonMember => "Non-Membru",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which payment link and price label a registrant gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Member,
    Standard,
}

impl PriceTier {
    #[must_use]
    pub const fn from_is_member(is_member: bool) -> Self {
        if is_member { Self::Member } else { Self::Standard }
    }

    /// Label stored in the `Suma` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Member => "Pret Membru",
            Self::Standard => "Pret Standard",
        }
    }
}

/// Everything the multi-step form collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    // Step 1
    #[serde(default)]
    pub email: String,

    // Step 2
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub level: String,

    // Step 3
    #[serde(default)]
    pub invoice_type: InvoiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cui: Option<String>,
    #[serde(default)]
    pub gdpr_consent: bool,
    #[serde(default)]
    pub marketing_consent: bool,
}

impl RegistrationForm {
    /// Server-side mirror of the checks the form steps perform.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] for the first missing or invalid field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CoreError::MissingField { field: "email" });
        }
        if !email.contains('@') {
            return Err(CoreError::InvalidField {
                field: "email",
                reason: "not an email address".into(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField { field: "name" });
        }
        if self.phone.trim().is_empty() {
            return Err(CoreError::MissingField { field: "phone" });
        }
        if self.invoice_type == InvoiceType::Company {
            if is_blank(self.company_name.as_deref()) {
                return Err(CoreError::MissingField { field: "companyName" });
            }
            if is_blank(self.cui.as_deref()) {
                return Err(CoreError::MissingField { field: "cui" });
            }
        }
        if !self.gdpr_consent {
            return Err(CoreError::ConsentRequired);
        }
        Ok(())
    }

    /// The identity part of the form, as the matcher sees it.
    #[must_use]
    pub fn submission(&self) -> Submission {
        Submission::with_full_name(self.name.as_str(), self.email.as_str(), self.phone.as_str())
    }

    /// Copy of the form with invoice defaults applied.
    ///
    /// Individuals are invoiced on their own name with [`INDIVIDUAL_CUI`];
    /// companies keep what they entered.
    #[must_use]
    pub fn with_invoice_defaults(&self) -> Self {
        let mut form = self.clone();
        match form.invoice_type {
            InvoiceType::Individual => {
                form.company_name = Some(form.name.clone());
                form.cui = Some(INDIVIDUAL_CUI.to_string());
            }
            InvoiceType::Company => {
                form.company_name = Some(form.company_name.take().unwrap_or_default());
                form.cui = Some(form.cui.take().unwrap_or_default());
            }
        }
        form
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Da" } else { "Nu" }
}

/// One row of the registrations sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub timestamp: DateTime<Utc>,
    pub workshop: String,
    /// Form with invoice defaults already applied.
    pub form: RegistrationForm,
    pub status: MemberStatus,
    pub tier: PriceTier,
}

impl RegistrationRow {
    /// Build the row for `form`, applying invoice defaults.
    #[must_use]
    pub fn new(
        workshop: impl Into<String>,
        form: &RegistrationForm,
        is_member: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            workshop: workshop.into(),
            form: form.with_invoice_defaults(),
            status: MemberStatus::from_is_member(is_member),
            tier: PriceTier::from_is_member(is_member),
        }
    }

    /// ISO-8601 timestamp with millisecond precision.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Cell values in [`REGISTRATION_HEADERS`] order.
    ///
    /// The CUI gets a leading apostrophe so the sheet stores it as text and
    /// keeps leading zeros.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        let form = &self.form;
        vec![
            self.timestamp_string(),
            self.workshop.clone(),
            form.name.clone(),
            form.email.clone(),
            form.phone.clone(),
            form.challenge.clone(),
            form.result.clone(),
            form.level.clone(),
            form.invoice_type.as_str().to_string(),
            form.company_name.clone().unwrap_or_default(),
            format!("'{}", form.cui.as_deref().unwrap_or_default()),
            yes_no(form.gdpr_consent).to_string(),
            yes_no(form.marketing_consent).to_string(),
            self.status.as_str().to_string(),
            self.tier.label().to_string(),
        ]
    }
}
