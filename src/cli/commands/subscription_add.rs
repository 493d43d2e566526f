//! `subvault subscription add` — track a recurring subscription.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{parse_date, resolve_credential_id, unlock_session, vault_location, Cli};
use crate::errors::Result;
use crate::vault::schedule::{format_currency, format_frequency};
use crate::vault::{FrequencyUnit, SubscriptionDraft};

/// Arguments of the `subscription add` command, as parsed by clap.
pub struct AddArgs<'a> {
    pub name: &'a str,
    pub cost: f64,
    pub currency: Option<&'a str>,
    pub every: u32,
    pub unit: &'a str,
    pub start: Option<&'a str>,
    pub category: Option<&'a str>,
    pub credential: Option<&'a str>,
    pub website: Option<&'a str>,
}

/// Execute the `subscription add` command.
pub fn execute(cli: &Cli, args: &AddArgs) -> Result<()> {
    let (settings, _) = vault_location(cli)?;

    let unit: FrequencyUnit = args.unit.parse()?;
    let start_date = match args.start {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let mut session = unlock_session(cli)?;

    // The credential link may be given as an id prefix.
    let credential_id = match args.credential {
        Some(needle) => Some(resolve_credential_id(session.data()?, needle)?),
        None => None,
    };

    let subscription = session.add_subscription(SubscriptionDraft {
        name: args.name.to_string(),
        cost: args.cost,
        currency: args
            .currency
            .map(str::to_string)
            .unwrap_or(settings.default_currency),
        frequency_amount: args.every,
        frequency_unit: unit,
        start_date,
        category: args
            .category
            .map(str::to_string)
            .unwrap_or(settings.default_category),
        credential_id,
        website: args.website.map(str::to_string),
        active: true,
    })?;

    output::success(&format!(
        "Added subscription '{}' — {} {}, renews {}",
        subscription.name,
        format_currency(&subscription.currency, subscription.cost),
        format_frequency(subscription.frequency_amount, subscription.frequency_unit),
        if subscription.frequency_unit == FrequencyUnit::Permanent {
            "never".to_string()
        } else {
            subscription.renewal_date.format("%Y-%m-%d").to_string()
        }
    ));
    Ok(())
}
