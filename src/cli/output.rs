//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::schedule::{
    cycle_progress, days_remaining, format_currency, format_frequency, DaysRemaining,
    PERMANENT_SENTINEL,
};
use crate::vault::{Credential, Subscription, VaultData};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Shortened id shown in tables — enough of a prefix to paste back
/// into `delete`/`edit`.
fn short_id(id: uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Print a table of credentials (Id, Label, Username, Created).
pub fn print_credentials_table(credentials: &[Credential]) {
    if credentials.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `subvault credential add <LABEL> <USERNAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Label", "Username", "Notes", "Created"]);

    for c in credentials {
        table.add_row(vec![
            short_id(c.id),
            c.label.clone(),
            c.username.clone(),
            c.notes.clone().unwrap_or_default(),
            format_millis(c.created_at),
        ]);
    }

    println!("{table}");
}

/// Print a table of subscriptions with the derived cycle columns.
///
/// Takes the whole vault snapshot so the linked credential label can be
/// joined in; the reference is weak, so a missing credential renders
/// as empty rather than failing.
pub fn print_subscriptions_table(data: &VaultData, subscriptions: &[&Subscription]) {
    if subscriptions.is_empty() {
        info("No subscriptions to show.");
        tip("Run `subvault subscription add <NAME> --cost <COST>` to add one.");
        return;
    }

    let now = Utc::now();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Name", "Cost", "Billing", "Renews", "Days left", "Cycle", "Category",
        "Credential", "Active",
    ]);

    for s in subscriptions {
        let credential_label = s
            .credential_id
            .and_then(|id| data.credential(id))
            .map(|c| c.label.clone())
            .unwrap_or_default();

        table.add_row(vec![
            short_id(s.id),
            s.name.clone(),
            format_currency(&s.currency, s.cost),
            format_frequency(s.frequency_amount, s.frequency_unit),
            format_renewal(s.renewal_date),
            format_days_remaining(days_remaining(s.renewal_date, now)),
            format!(
                "{:.0}%",
                cycle_progress(s.start_date, s.renewal_date, now)
            ),
            s.category.clone(),
            credential_label,
            if s.active { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("{table}");
}

fn format_renewal(date: chrono::NaiveDate) -> String {
    if date == PERMANENT_SENTINEL {
        "never".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

fn format_days_remaining(days: DaysRemaining) -> String {
    match days {
        DaysRemaining::Never => "\u{221e}".to_string(),
        DaysRemaining::Finite(n) if n < 0 => format!("{} overdue", -n),
        DaysRemaining::Finite(n) => n.to_string(),
    }
}

/// Render a unix-millisecond timestamp as a local-agnostic date string.
fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
