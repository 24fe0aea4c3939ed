//! Billing-period arithmetic.
//!
//! Usage counters reset once per period. A period is one calendar month
//! from the moment the reset (or the lazy account creation) happened,
//! not a calendar-aligned month.

use chrono::{DateTime, Duration, Months, Utc};

/// Advance a period boundary by one calendar month.
///
/// Falls back to 30 days when the calendar addition is unrepresentable
/// (far-future dates near the chrono range limit).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vociform_core::advance_period;
///
/// let from = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
/// let next = advance_period(from);
/// assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
/// ```
pub fn advance_period(from: DateTime<Utc>) -> DateTime<Utc> {
    from.checked_add_months(Months::new(1))
        .unwrap_or(from + Duration::days(30))
}

/// Period end for a freshly created account: one month from now.
pub fn initial_period_end(now: DateTime<Utc>) -> DateTime<Utc> {
    advance_period(now)
}
