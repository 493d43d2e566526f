//! Record types stored inside a vault.
//!
//! The JSON field names are camelCase because that is the on-disk
//! plaintext shape of the vault payload (the bytes that get sealed),
//! and existing vaults must keep round-tripping through it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SubVaultError};

/// A stored login credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Unique identity of this credential within the vault.
    pub id: Uuid,

    /// Display name (e.g. "GitHub", "Personal email").
    pub label: String,

    /// Login username or email address.
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation time as a unix-millisecond timestamp.
    pub created_at: i64,
}

/// Billing frequency unit of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrequencyUnit {
    Days,
    Weeks,
    Months,
    Years,
    /// One-time purchase — never renews.
    Permanent,
}

impl std::str::FromStr for FrequencyUnit {
    type Err = SubVaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "days" | "day" => Ok(Self::Days),
            "weeks" | "week" => Ok(Self::Weeks),
            "months" | "month" => Ok(Self::Months),
            "years" | "year" => Ok(Self::Years),
            "permanent" => Ok(Self::Permanent),
            other => Err(SubVaultError::ValidationFailed(format!(
                "unknown frequency unit '{other}' — use days, weeks, months, years or permanent"
            ))),
        }
    }
}

/// A recurring subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,

    /// Service name (e.g. "Netflix").
    pub name: String,

    /// Cost per billing cycle, non-negative.
    pub cost: f64,

    /// ISO-like currency code (e.g. "USD").
    pub currency: String,

    /// Billing cycle length, combined with `frequency_unit` (e.g. every
    /// 3 MONTHS).  Always at least 1.
    pub frequency_amount: u32,

    pub frequency_unit: FrequencyUnit,

    /// Anchor date of the current billing cycle.
    pub start_date: NaiveDate,

    /// Next billing date.  Derived — recomputed from `start_date` and
    /// the frequency on every create/update, never taken from a caller.
    pub renewal_date: NaiveDate,

    /// Free-text category or tag name.
    pub category: String,

    /// Weak reference to a credential by id — relation, not ownership.
    /// Cleared automatically when the credential is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    pub active: bool,
}

/// The aggregate vault payload — the plaintext that gets sealed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultData {
    #[serde(default)]
    pub credentials: Vec<Credential>,

    #[serde(default)]
    pub subscriptions: Vec<Subscription>,

    /// Unix-millisecond timestamp of the last successful mutation.
    #[serde(default)]
    pub last_updated: i64,
}

impl VaultData {
    /// Look up a credential by id.
    pub fn credential(&self, id: Uuid) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Look up a subscription by id.
    pub fn subscription(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id)
    }
}

/// Caller-supplied fields for creating a credential.  The id and
/// timestamp are assigned by the lifecycle controller.
#[derive(Debug, Clone, Default)]
pub struct CredentialDraft {
    pub label: String,
    pub username: String,
    pub password: Option<String>,
    pub notes: Option<String>,
}

impl CredentialDraft {
    /// Check required fields before the draft is turned into a record.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(SubVaultError::ValidationFailed(
                "credential label must not be empty".into(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(SubVaultError::ValidationFailed(
                "credential username must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Caller-supplied fields for creating or updating a subscription.
///
/// `renewal_date` is deliberately absent: it is always recomputed from
/// `start_date` and the frequency.
#[derive(Debug, Clone)]
pub struct SubscriptionDraft {
    pub name: String,
    pub cost: f64,
    pub currency: String,
    pub frequency_amount: u32,
    pub frequency_unit: FrequencyUnit,
    pub start_date: NaiveDate,
    pub category: String,
    pub credential_id: Option<Uuid>,
    pub website: Option<String>,
    pub active: bool,
}

impl SubscriptionDraft {
    /// Check required fields before the draft is turned into a record.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SubVaultError::ValidationFailed(
                "subscription name must not be empty".into(),
            ));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(SubVaultError::ValidationFailed(format!(
                "subscription cost must be a non-negative amount (got {})",
                self.cost
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(SubVaultError::ValidationFailed(
                "subscription currency must not be empty".into(),
            ));
        }
        if self.frequency_amount < 1 {
            return Err(SubVaultError::ValidationFailed(
                "frequency amount must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_unit_json_names_are_uppercase() {
        assert_eq!(
            serde_json::to_string(&FrequencyUnit::Months).unwrap(),
            "\"MONTHS\""
        );
        let unit: FrequencyUnit = serde_json::from_str("\"PERMANENT\"").unwrap();
        assert_eq!(unit, FrequencyUnit::Permanent);
    }

    #[test]
    fn frequency_unit_parses_case_insensitively() {
        assert_eq!(
            "Months".parse::<FrequencyUnit>().unwrap(),
            FrequencyUnit::Months
        );
        assert_eq!(
            "week".parse::<FrequencyUnit>().unwrap(),
            FrequencyUnit::Weeks
        );
        assert!("fortnight".parse::<FrequencyUnit>().is_err());
    }

    #[test]
    fn vault_payload_uses_camel_case_field_names() {
        let data = VaultData {
            credentials: vec![Credential {
                id: Uuid::new_v4(),
                label: "GitHub".into(),
                username: "me@example.com".into(),
                password: Some("hunter2".into()),
                notes: None,
                created_at: 1_700_000_000_000,
            }],
            subscriptions: Vec::new(),
            last_updated: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"credentials\""));
        // Absent optional fields are omitted entirely.
        assert!(!json.contains("notes"));
    }

    #[test]
    fn empty_payload_deserializes_with_defaults() {
        let data: VaultData = serde_json::from_str("{}").unwrap();
        assert!(data.credentials.is_empty());
        assert!(data.subscriptions.is_empty());
        assert_eq!(data.last_updated, 0);
    }

    #[test]
    fn credential_draft_requires_label_and_username() {
        let draft = CredentialDraft {
            label: "  ".into(),
            username: "me".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());

        let draft = CredentialDraft {
            label: "GitHub".into(),
            username: String::new(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn subscription_draft_rejects_bad_cost_and_frequency() {
        let mut draft = SubscriptionDraft {
            name: "Netflix".into(),
            cost: 15.99,
            currency: "USD".into(),
            frequency_amount: 1,
            frequency_unit: FrequencyUnit::Months,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: "Entertainment".into(),
            credential_id: None,
            website: None,
            active: true,
        };
        assert!(draft.validate().is_ok());

        draft.cost = -1.0;
        assert!(draft.validate().is_err());

        draft.cost = f64::NAN;
        assert!(draft.validate().is_err());

        draft.cost = 15.99;
        draft.frequency_amount = 0;
        assert!(draft.validate().is_err());
    }
}
