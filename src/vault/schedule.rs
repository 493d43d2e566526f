//! Pure billing-cycle computations.
//!
//! These functions are the single source of truth for a subscription's
//! `renewal_date`: the lifecycle controller calls `next_renewal` on
//! every create/update and overwrites whatever the caller supplied.
//! They take `now` as a parameter so they stay deterministic in tests.

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, Utc};

use super::model::FrequencyUnit;

/// Sentinel renewal date for PERMANENT subscriptions — "never renews".
pub const PERMANENT_SENTINEL: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(d) => d,
    None => panic!("9999-12-31 is a valid date"),
};

/// Seconds per day, for ceiling division in `days_remaining`.
const DAY_SECS: i64 = 86_400;

/// Days left until a renewal date — either a finite count or "never".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysRemaining {
    Finite(i64),
    Never,
}

/// Compute the next renewal date from the cycle anchor and frequency.
///
/// PERMANENT maps to the sentinel date.  Month and year additions use
/// calendar-aware arithmetic where an out-of-range day clamps to the
/// last day of the target month (2024-01-31 + 1 month = 2024-02-29).
/// A date addition that overflows the calendar saturates to the
/// sentinel as well.
pub fn next_renewal(start: NaiveDate, amount: u32, unit: FrequencyUnit) -> NaiveDate {
    let next = match unit {
        FrequencyUnit::Permanent => return PERMANENT_SENTINEL,
        FrequencyUnit::Days => start.checked_add_days(Days::new(u64::from(amount))),
        FrequencyUnit::Weeks => start.checked_add_days(Days::new(u64::from(amount) * 7)),
        FrequencyUnit::Months => start.checked_add_months(Months::new(amount)),
        FrequencyUnit::Years => amount
            .checked_mul(12)
            .and_then(|m| start.checked_add_months(Months::new(m))),
    };
    next.unwrap_or(PERMANENT_SENTINEL)
}

/// Whole days from `now` until midnight UTC of `renewal` (ceiling).
///
/// Already-elapsed renewal dates come back negative.  The sentinel date
/// maps to `Never`.
pub fn days_remaining(renewal: NaiveDate, now: DateTime<Utc>) -> DaysRemaining {
    if renewal == PERMANENT_SENTINEL {
        return DaysRemaining::Never;
    }

    let renewal_midnight = renewal.and_time(NaiveTime::MIN).and_utc();
    let secs = (renewal_midnight - now).num_seconds();

    // Ceiling division: any partial day still counts as a remaining day.
    let mut days = secs.div_euclid(DAY_SECS);
    if secs.rem_euclid(DAY_SECS) != 0 {
        days += 1;
    }
    DaysRemaining::Finite(days)
}

/// How far `now` sits within the current billing cycle, as a
/// percentage clamped to [0, 100].  The sentinel renewal date (and a
/// degenerate cycle of zero or negative length) map to 100.
pub fn cycle_progress(start: NaiveDate, renewal: NaiveDate, now: DateTime<Utc>) -> f64 {
    if renewal == PERMANENT_SENTINEL {
        return 100.0;
    }

    let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
    let end_ts = renewal.and_time(NaiveTime::MIN).and_utc().timestamp();
    let total = end_ts - start_ts;
    if total <= 0 {
        return 100.0;
    }

    let elapsed = now.timestamp() - start_ts;
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Render a cost with its currency symbol, e.g. `$15.99`.
pub fn format_currency(currency: &str, cost: f64) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{a3}",
        "CNY" | "JPY" => "\u{a5}",
        "HKD" => "HK$",
        other => return format!("{other} {cost:.2}"),
    };
    format!("{symbol}{cost:.2}")
}

/// Render a billing frequency, e.g. `every 3 months` or `one-time`.
pub fn format_frequency(amount: u32, unit: FrequencyUnit) -> String {
    let noun = match unit {
        FrequencyUnit::Permanent => return "one-time".to_string(),
        FrequencyUnit::Days => "day",
        FrequencyUnit::Weeks => "week",
        FrequencyUnit::Months => "month",
        FrequencyUnit::Years => "year",
    };
    if amount == 1 {
        format!("every {noun}")
    } else {
        format!("every {amount} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn renewal_adds_days_and_weeks() {
        assert_eq!(
            next_renewal(date(2024, 1, 15), 10, FrequencyUnit::Days),
            date(2024, 1, 25)
        );
        assert_eq!(
            next_renewal(date(2024, 1, 15), 2, FrequencyUnit::Weeks),
            date(2024, 1, 29)
        );
    }

    #[test]
    fn renewal_one_month_from_mid_month() {
        assert_eq!(
            next_renewal(date(2024, 1, 15), 1, FrequencyUnit::Months),
            date(2024, 2, 15)
        );
    }

    #[test]
    fn renewal_month_overflow_clamps_to_month_end() {
        // Jan 31 + 1 month lands on the last day of February.
        assert_eq!(
            next_renewal(date(2024, 1, 31), 1, FrequencyUnit::Months),
            date(2024, 2, 29)
        );
        assert_eq!(
            next_renewal(date(2023, 1, 31), 1, FrequencyUnit::Months),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn renewal_years_handle_leap_day() {
        assert_eq!(
            next_renewal(date(2024, 2, 29), 1, FrequencyUnit::Years),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn renewal_permanent_is_sentinel_for_any_input() {
        assert_eq!(
            next_renewal(date(2024, 1, 1), 1, FrequencyUnit::Permanent),
            PERMANENT_SENTINEL
        );
        assert_eq!(
            next_renewal(date(1999, 12, 31), 999, FrequencyUnit::Permanent),
            PERMANENT_SENTINEL
        );
    }

    #[test]
    fn renewal_saturates_to_sentinel_on_calendar_overflow() {
        assert_eq!(
            next_renewal(date(9999, 1, 1), u32::MAX, FrequencyUnit::Years),
            PERMANENT_SENTINEL
        );
    }

    #[test]
    fn days_remaining_rounds_partial_days_up() {
        // 2024-06-10 18:00 UTC → renewal at 2024-06-12 00:00 is 1.25 days away.
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();
        assert_eq!(
            days_remaining(date(2024, 6, 12), now),
            DaysRemaining::Finite(2)
        );

        // Exactly at midnight there is no partial day to round.
        let midnight = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        assert_eq!(
            days_remaining(date(2024, 6, 12), midnight),
            DaysRemaining::Finite(2)
        );
    }

    #[test]
    fn days_remaining_is_negative_after_renewal() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            days_remaining(date(2024, 6, 10), now),
            DaysRemaining::Finite(-5)
        );
    }

    #[test]
    fn days_remaining_sentinel_is_never() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(days_remaining(PERMANENT_SENTINEL, now), DaysRemaining::Never);
    }

    #[test]
    fn cycle_progress_is_halfway_mid_cycle() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        let progress = cycle_progress(date(2024, 1, 1), date(2024, 1, 31), now);
        assert!((progress - 50.0).abs() < 0.01, "got {progress}");
    }

    #[test]
    fn cycle_progress_clamps_outside_the_cycle() {
        let before = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(cycle_progress(date(2024, 1, 1), date(2024, 2, 1), before), 0.0);

        let after = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(cycle_progress(date(2024, 1, 1), date(2024, 2, 1), after), 100.0);
    }

    #[test]
    fn cycle_progress_sentinel_is_complete() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(cycle_progress(date(2024, 1, 1), PERMANENT_SENTINEL, now), 100.0);
    }

    #[test]
    fn currency_formatting_uses_known_symbols() {
        assert_eq!(format_currency("USD", 15.99), "$15.99");
        assert_eq!(format_currency("EUR", 9.5), "\u{20ac}9.50");
        assert_eq!(format_currency("HKD", 78.0), "HK$78.00");
        assert_eq!(format_currency("SEK", 99.0), "SEK 99.00");
    }

    #[test]
    fn frequency_formatting_handles_singular_and_permanent() {
        assert_eq!(format_frequency(1, FrequencyUnit::Months), "every month");
        assert_eq!(format_frequency(3, FrequencyUnit::Months), "every 3 months");
        assert_eq!(format_frequency(2, FrequencyUnit::Weeks), "every 2 weeks");
        assert_eq!(format_frequency(1, FrequencyUnit::Permanent), "one-time");
    }
}
