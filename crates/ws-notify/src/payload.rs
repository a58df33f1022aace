//! JSON body posted to a workshop's webhook.

use serde::{Deserialize, Serialize};
use ws_core::{InvoiceType, MemberStatus, RegistrationForm, RegistrationRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetails {
    #[serde(rename = "type")]
    pub kind: InvoiceType,
    pub company: String,
    pub cui: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub timestamp: String,
    pub workshop: String,
    /// The submitted form, invoice defaults applied.
    pub data: RegistrationForm,
    pub member_status: MemberStatus,
    /// Price label (`Pret Membru` / `Pret Standard`).
    pub payment_sum: String,
    pub invoice: InvoiceDetails,
}

impl From<&RegistrationRow> for WebhookPayload {
    fn from(row: &RegistrationRow) -> Self {
        let form = &row.form;
        Self {
            timestamp: row.timestamp_string(),
            workshop: row.workshop.clone(),
            data: form.clone(),
            member_status: row.status,
            payment_sum: row.tier.label().to_string(),
            invoice: InvoiceDetails {
                kind: form.invoice_type,
                company: form.company_name.clone().unwrap_or_default(),
                cui: form.cui.clone().unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_like_the_registration_row() {
        let form = RegistrationForm {
            email: "ion@x.com".into(),
            name: "Ion Popescu".into(),
            phone: "0724111222".into(),
            invoice_type: InvoiceType::Company,
            company_name: Some("Acme SRL".into()),
            cui: Some("RO123".into()),
            gdpr_consent: true,
            ..Default::default()
        };
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let row = RegistrationRow::new("Workshop SM", &form, true, timestamp);

        let value = serde_json::to_value(WebhookPayload::from(&row)).unwrap();
        assert_eq!(value["timestamp"], "2026-03-01T09:30:00.000Z");
        assert_eq!(value["workshop"], "Workshop SM");
        assert_eq!(value["memberStatus"], "Membru");
        assert_eq!(value["paymentSum"], "Pret Membru");
        assert_eq!(
            value["invoice"],
            json!({ "type": "PJ", "company": "Acme SRL", "cui": "RO123" })
        );
        assert_eq!(value["data"]["companyName"], "Acme SRL");
        assert_eq!(value["data"]["gdprConsent"], true);
    }

    #[test]
    fn individual_gets_default_invoice() {
        let form = RegistrationForm {
            name: "Ana Ionescu".into(),
            ..Default::default()
        };
        let row = RegistrationRow::new("W", &form, false, Utc::now());
        let payload = WebhookPayload::from(&row);
        assert_eq!(payload.member_status, MemberStatus::NonMember);
        assert_eq!(payload.invoice.kind, InvoiceType::Individual);
        assert_eq!(payload.invoice.company, "Ana Ionescu");
        assert_eq!(payload.invoice.cui, "0000000000000");
    }
}
