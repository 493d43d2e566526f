//! `subvault subscription edit` — change a subscription's fields.
//!
//! Only the flags given on the command line change; everything else is
//! carried over from the stored record.  The renewal date is always
//! recomputed by the session from the (possibly updated) start date
//! and frequency.

use crate::cli::output;
use crate::cli::{
    parse_date, resolve_credential_id, resolve_subscription_id, unlock_session, Cli,
};
use crate::errors::{Result, SubVaultError};
use crate::vault::{FrequencyUnit, SubscriptionDraft};

/// Arguments of the `subscription edit` command, as parsed by clap.
pub struct EditArgs<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub cost: Option<f64>,
    pub currency: Option<&'a str>,
    pub every: Option<u32>,
    pub unit: Option<&'a str>,
    pub start: Option<&'a str>,
    pub category: Option<&'a str>,
    pub credential: Option<&'a str>,
    pub no_credential: bool,
    pub website: Option<&'a str>,
    pub active: Option<bool>,
}

/// Execute the `subscription edit` command.
pub fn execute(cli: &Cli, args: &EditArgs) -> Result<()> {
    let unit = match args.unit {
        Some(u) => Some(u.parse::<FrequencyUnit>()?),
        None => None,
    };
    let start_date = match args.start {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };

    let mut session = unlock_session(cli)?;
    let data = session.data()?;

    let id = resolve_subscription_id(data, args.id)?;
    let credential_id = match args.credential {
        Some(needle) => Some(resolve_credential_id(data, needle)?),
        None => None,
    };

    // Carry over stored fields, then apply the given overrides.
    let current = data
        .subscription(id)
        .cloned()
        .ok_or_else(|| SubVaultError::SubscriptionNotFound(args.id.to_string()))?;

    let draft = SubscriptionDraft {
        name: args.name.map(str::to_string).unwrap_or(current.name),
        cost: args.cost.unwrap_or(current.cost),
        currency: args.currency.map(str::to_string).unwrap_or(current.currency),
        frequency_amount: args.every.unwrap_or(current.frequency_amount),
        frequency_unit: unit.unwrap_or(current.frequency_unit),
        start_date: start_date.unwrap_or(current.start_date),
        category: args.category.map(str::to_string).unwrap_or(current.category),
        credential_id: if args.no_credential {
            None
        } else {
            credential_id.or(current.credential_id)
        },
        website: args.website.map(str::to_string).or(current.website),
        active: args.active.unwrap_or(current.active),
    };

    let updated = session.update_subscription(id, draft)?;

    output::success(&format!(
        "Updated subscription '{}' — next renewal {}",
        updated.name,
        if updated.frequency_unit == FrequencyUnit::Permanent {
            "never".to_string()
        } else {
            updated.renewal_date.format("%Y-%m-%d").to_string()
        }
    ));
    Ok(())
}
