//! Workshop registry: slug → sheet, payment links, webhook.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ws_core::PriceTier;

use crate::error::ConfigError;

const fn default_active() -> bool {
    true
}

/// Payment links handed to the registrant after submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentLinks {
    #[serde(default)]
    pub member: String,
    #[serde(default)]
    pub standard: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkshopConfig {
    /// Stable identifier (e.g. `bizz-club-sm-2026`).
    #[serde(default)]
    pub id: String,

    /// URL slug. Filled from the registry key when omitted.
    #[serde(default)]
    pub slug: String,

    /// Display name, also written to the `Workshop` column.
    #[serde(default)]
    pub name: String,

    /// Spreadsheet holding the settings, roster, and registrations tabs.
    #[serde(default)]
    pub sheet_id: String,

    #[serde(default)]
    pub payment_links: PaymentLinks,

    /// Notification endpoint. Empty disables notifications.
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

impl WorkshopConfig {
    /// Payment link for the given price tier.
    #[must_use]
    pub fn payment_link(&self, tier: PriceTier) -> &str {
        match tier {
            PriceTier::Member => &self.payment_links.member,
            PriceTier::Standard => &self.payment_links.standard,
        }
    }
}

/// All configured workshops, keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct WorkshopRegistry(BTreeMap<String, WorkshopConfig>);

impl WorkshopRegistry {
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&WorkshopConfig> {
        self.0.get(slug)
    }

    /// Look up a workshop, failing for unknown slugs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownWorkshop`] if no entry has this slug.
    pub fn require(&self, slug: &str) -> Result<&WorkshopConfig, ConfigError> {
        self.get(slug)
            .ok_or_else(|| ConfigError::UnknownWorkshop(slug.to_string()))
    }

    /// Active workshops in slug order.
    pub fn active(&self) -> impl Iterator<Item = &WorkshopConfig> {
        self.0.values().filter(|w| w.active)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fill each entry's `slug` (and `id`, if blank) from its key.
    pub(crate) fn fill_slugs(&mut self) {
        for (key, workshop) in &mut self.0 {
            if workshop.slug.is_empty() {
                workshop.slug.clone_from(key);
            }
            if workshop.id.is_empty() {
                workshop.id.clone_from(key);
            }
        }
    }

    /// Active workshops must point at a sheet and carry both payment links.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, workshop) in &self.0 {
            if !workshop.active {
                continue;
            }
            let required = [
                ("sheet_id", &workshop.sheet_id),
                ("payment_links.member", &workshop.payment_links.member),
                ("payment_links.standard", &workshop.payment_links.standard),
            ];
            for (field, value) in required {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("workshops.{key}.{field}"),
                        reason: "required for active workshops".into(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<WorkshopConfig> for WorkshopRegistry {
    fn from_iter<I: IntoIterator<Item = WorkshopConfig>>(iter: I) -> Self {
        let mut registry = Self(
            iter.into_iter()
                .map(|workshop| (workshop.slug.clone(), workshop))
                .collect(),
        );
        registry.fill_slugs();
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workshop(slug: &str, active: bool) -> WorkshopConfig {
        WorkshopConfig {
            id: String::new(),
            slug: slug.into(),
            name: format!("Workshop {slug}"),
            sheet_id: "sheet-1".into(),
            payment_links: PaymentLinks {
                member: "https://pay/member".into(),
                standard: "https://pay/standard".into(),
            },
            webhook_url: String::new(),
            active,
        }
    }

    #[test]
    fn lookup_by_slug() {
        let registry: WorkshopRegistry = [workshop("sm", true)].into_iter().collect();
        assert_eq!(registry.get("sm").map(|w| w.name.as_str()), Some("Workshop sm"));
        assert_eq!(registry.get("sm").map(|w| w.id.as_str()), Some("sm"));
        assert!(registry.get("cj").is_none());
        assert!(matches!(
            registry.require("cj"),
            Err(ConfigError::UnknownWorkshop(slug)) if slug == "cj"
        ));
    }

    #[test]
    fn active_filters_inactive() {
        let registry: WorkshopRegistry =
            [workshop("a", true), workshop("b", false)].into_iter().collect();
        let slugs: Vec<&str> = registry.active().map(|w| w.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a"]);
    }

    #[test]
    fn payment_link_by_tier() {
        let w = workshop("sm", true);
        assert_eq!(w.payment_link(PriceTier::Member), "https://pay/member");
        assert_eq!(w.payment_link(PriceTier::Standard), "https://pay/standard");
    }

    #[test]
    fn active_workshop_without_sheet_is_invalid() {
        let mut w = workshop("sm", true);
        w.sheet_id.clear();
        let registry: WorkshopRegistry = [w].into_iter().collect();
        let err = registry.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "workshops.sm.sheet_id"
        ));
    }

    #[test]
    fn inactive_workshop_may_be_incomplete() {
        let mut w = workshop("draft", false);
        w.payment_links = PaymentLinks::default();
        let registry: WorkshopRegistry = [w].into_iter().collect();
        assert!(registry.validate().is_ok());
    }
}
