//! Conversion of `period` query values (`30d`, `2m`, `1y`) into date ranges.

use chrono::{DateTime, Duration, Utc};

use crate::constants::DEFAULT_HISTORY_DAYS;
use crate::errors::{FinanceError, Result};

/// Half-open range of instants requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Number of days covered by `period`.
///
/// `<N>d` is N days, `<N>m` is N×30 and `<N>y` is N×365. A value without one
/// of those suffixes falls back to the default lookback.
pub fn period_to_days(period: &str) -> Result<i64> {
    let period = period.trim();
    let (count, multiplier) = if let Some(n) = period.strip_suffix('d') {
        (n, 1)
    } else if let Some(n) = period.strip_suffix('m') {
        (n, 30)
    } else if let Some(n) = period.strip_suffix('y') {
        (n, 365)
    } else {
        return Ok(DEFAULT_HISTORY_DAYS);
    };

    let count: u32 = count
        .parse()
        .map_err(|_| FinanceError::InvalidPeriod(period.to_string()))?;
    i64::from(count)
        .checked_mul(multiplier)
        .ok_or_else(|| FinanceError::InvalidPeriod(period.to_string()))
}

/// Range of `period` ending at `end`.
///
/// Periods reaching past the representable calendar are rejected.
pub fn period_to_range(period: &str, end: DateTime<Utc>) -> Result<DateRange> {
    let days = period_to_days(period)?;
    let start = Duration::try_days(days)
        .and_then(|span| end.checked_sub_signed(span))
        .ok_or_else(|| FinanceError::InvalidPeriod(period.trim().to_string()))?;
    Ok(DateRange { start, end })
}
