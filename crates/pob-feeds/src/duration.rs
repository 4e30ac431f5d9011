//! ISO-8601 durations (`PnYnMnWnDTnHnMnS`).

use chrono::TimeDelta;

use crate::error::FeedError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Date designators in the order they must appear. Years and months are
/// nominal: 365 and 30 days.
const DATE_UNITS: &[(char, i64)] = &[('Y', 365 * DAY), ('M', 30 * DAY), ('W', 7 * DAY), ('D', DAY)];

/// Time designators, after `T`.
const TIME_UNITS: &[(char, i64)] = &[('H', HOUR), ('M', MINUTE), ('S', 1)];

/// Parse an ISO-8601 duration such as `P1Y`, `P2W` or `PT36H`.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use pob_feeds::parse_duration;
///
/// assert_eq!(parse_duration("P1W").unwrap(), TimeDelta::days(7));
/// assert_eq!(parse_duration("P1DT12H").unwrap(), TimeDelta::hours(36));
/// assert!(parse_duration("1 year").is_err());
/// ```
pub fn parse_duration(value: &str) -> Result<TimeDelta, FeedError> {
    let invalid = || FeedError::InvalidDuration(value.to_owned());

    let rest = value.trim().strip_prefix('P').ok_or_else(invalid)?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) if time.is_empty() => return Err(invalid()),
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut components = 0;
    let mut seconds: i64 = 0;
    for (part, units) in [(date, DATE_UNITS), (time, TIME_UNITS)] {
        components += sum_components(part, units, &mut seconds).ok_or_else(invalid)?;
    }
    if components == 0 {
        return Err(invalid());
    }

    TimeDelta::try_seconds(seconds).ok_or_else(invalid)
}

/// Add the components of one duration part to `total`.
///
/// Returns the number of components, or `None` when the part is malformed
/// or overflows.
fn sum_components(part: &str, units: &[(char, i64)], total: &mut i64) -> Option<usize> {
    let mut next_unit = 0;
    let mut digits = String::new();
    let mut count = 0;

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let offset = units[next_unit..].iter().position(|(designator, _)| *designator == c)?;
        let (_, unit_seconds) = units[next_unit + offset];
        let amount: i64 = digits.parse().ok()?;
        *total = total.checked_add(amount.checked_mul(unit_seconds)?)?;
        digits.clear();
        next_unit += offset + 1;
        count += 1;
    }

    digits.is_empty().then_some(count)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_date_components() {
        assert_eq!(parse_duration("P1Y").unwrap(), TimeDelta::days(365));
        assert_eq!(parse_duration("P6M").unwrap(), TimeDelta::days(180));
        assert_eq!(parse_duration("P1Y2M3W4D").unwrap(), TimeDelta::days(365 + 60 + 21 + 4));
    }

    #[test]
    fn test_time_components() {
        assert_eq!(parse_duration("PT90M").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration("PT1H30M15S").unwrap(), TimeDelta::seconds(5415));
    }

    #[test]
    fn test_minutes_and_months_are_distinct() {
        assert_eq!(parse_duration("P1M").unwrap(), TimeDelta::days(30));
        assert_eq!(parse_duration("PT1M").unwrap(), TimeDelta::minutes(1));
    }

    #[test]
    fn test_invalid_durations() {
        for value in ["", "P", "PT", "1Y", "P1", "P1H", "PD", "P1D1Y", "P1Y1Y", "PT1D", "p1y"] {
            assert!(
                matches!(parse_duration(value), Err(FeedError::InvalidDuration(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(parse_duration("P99999999999999999Y").is_err());
    }
}
