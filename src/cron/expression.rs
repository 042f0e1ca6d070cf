//! Schedule expression builder.
//!
//! Translates a [`Recurrence`] into a five-field crontab expression
//! (minute, hour, day-of-month, month, day-of-week). The translation is
//! lenient on input: a malformed start time falls back to 00:00 and an
//! unparsable interval falls back to one hour, so the builder always
//! produces an expression. Whether that expression is acceptable is the
//! validator's job.

use std::sync::LazyLock;

use regex::Regex;

use crate::cron::models::Recurrence;

static INTERVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s*(min|h)$").expect("invalid interval regex"));

/// Parsed execution interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interval {
    Minutes(u32),
    Hours(u32),
}

/// Parses `<n>min` / `<n>h`, defaulting to one hour when the input is
/// absent, unparsable, or zero.
fn parse_interval(raw: &str) -> Interval {
    let Some(caps) = INTERVAL_RE.captures(raw.trim()) else {
        return Interval::Hours(1);
    };
    let magnitude: u32 = caps[1].parse().unwrap_or(0);
    if magnitude == 0 {
        return Interval::Hours(1);
    }
    match &caps[2] {
        "min" => Interval::Minutes(magnitude),
        _ => Interval::Hours(magnitude),
    }
}

/// Parses `HH:MM` into `(hour, minute)`, defaulting to `(0, 0)` when
/// malformed.
fn parse_start_time(raw: &str) -> (u32, u32) {
    let mut parts = raw.trim().splitn(2, ':');
    let hour = parts.next().and_then(|p| p.trim().parse().ok());
    let minute = parts.next().and_then(|p| p.trim().parse().ok());
    match (hour, minute) {
        (Some(h), Some(m)) => (h, m),
        _ => (0, 0),
    }
}

/// Builds the crontab expression for a recurrence.
pub fn build_expression(recurrence: &Recurrence) -> String {
    build_fields(
        recurrence.periodicity.code(),
        &recurrence.days,
        &recurrence.start_time,
        &recurrence.interval,
    )
}

/// Raw-code variant of [`build_expression`].
///
/// An unrecognized periodicity code falls back to a single daily run at
/// the parsed minute and hour.
pub fn build_fields(periodicity: u8, days: &[u32], start_time: &str, interval: &str) -> String {
    let (hour, minute) = parse_start_time(start_time);

    let (minute_field, hour_field) = match parse_interval(interval) {
        // Every N minutes from the start hour through the end of day.
        Interval::Minutes(n) => (format!("*/{n}"), format!("{hour}-23")),
        // Hourly keeps the range shorthand for every periodicity.
        Interval::Hours(1) => (minute.to_string(), format!("{hour}-23")),
        // Multi-hour intervals enumerate hours explicitly.
        Interval::Hours(n) => {
            let hours: Vec<String> = (0..)
                .map(|i| hour + i * n)
                .take_while(|h| *h < 24)
                .map(|h| h.to_string())
                .collect();
            (minute.to_string(), hours.join(","))
        }
    };

    match periodicity {
        1 => format!("{minute_field} {hour_field} * * *"),
        2 => {
            let weekdays: Vec<String> = days
                .iter()
                .filter(|d| (1..=7).contains(*d))
                .map(|d| (d % 7).to_string())
                .collect();
            let day_of_week = if weekdays.is_empty() {
                "0".to_string()
            } else {
                weekdays.join(",")
            };
            format!("{minute_field} {hour_field} * * {day_of_week}")
        }
        3 => {
            let month_days: Vec<String> = days
                .iter()
                .filter(|d| (1..=28).contains(*d))
                .map(|d| d.to_string())
                .collect();
            let day_of_month = if month_days.is_empty() {
                "1".to_string()
            } else {
                month_days.join(",")
            };
            format!("{minute_field} {hour_field} {day_of_month} * *")
        }
        _ => format!("{minute} {hour} * * *"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cron::models::Periodicity;
    use crate::cron::validate::is_valid_expression;
    use proptest::prelude::*;

    fn recurrence(
        periodicity: Periodicity,
        days: Vec<u32>,
        start_time: &str,
        interval: &str,
    ) -> Recurrence {
        Recurrence {
            periodicity,
            days,
            start_time: start_time.to_string(),
            interval: interval.to_string(),
        }
    }

    #[test]
    fn test_daily_hourly_uses_range_shorthand() {
        let rec = recurrence(Periodicity::Daily, vec![], "09:00", "1h");
        assert_eq!(build_expression(&rec), "0 9-23 * * *");
    }

    #[test]
    fn test_weekly_drops_out_of_range_days() {
        // 15 is not a weekday, only 1 survives the filter
        let rec = recurrence(Periodicity::Weekly, vec![1, 15], "09:00", "1h");
        assert_eq!(build_expression(&rec), "0 9-23 * * 1");
    }

    #[test]
    fn test_weekly_day_seven_wraps_to_zero() {
        let rec = recurrence(Periodicity::Weekly, vec![7], "06:00", "1h");
        assert_eq!(build_expression(&rec), "0 6-23 * * 0");
    }

    #[test]
    fn test_weekly_defaults_to_first_day_when_all_filtered() {
        let rec = recurrence(Periodicity::Weekly, vec![8, 15], "09:00", "1h");
        assert_eq!(build_expression(&rec), "0 9-23 * * 0");
    }

    #[test]
    fn test_monthly_hourly() {
        let rec = recurrence(Periodicity::Monthly, vec![1, 15], "00:00", "1h");
        assert_eq!(build_expression(&rec), "0 0-23 1,15 * *");
    }

    #[test]
    fn test_monthly_drops_days_above_28() {
        let rec = recurrence(Periodicity::Monthly, vec![15, 29, 31], "00:00", "1h");
        assert_eq!(build_expression(&rec), "0 0-23 15 * *");
    }

    #[test]
    fn test_monthly_defaults_to_first_when_empty() {
        let rec = recurrence(Periodicity::Monthly, vec![], "12:30", "1h");
        assert_eq!(build_expression(&rec), "30 12-23 1 * *");
    }

    #[test]
    fn test_minute_interval_uses_step_field() {
        let rec = recurrence(Periodicity::Daily, vec![], "09:00", "15min");
        assert_eq!(build_expression(&rec), "*/15 9-23 * * *");
    }

    #[test]
    fn test_multi_hour_interval_enumerates_hours() {
        let rec = recurrence(Periodicity::Daily, vec![], "09:15", "4h");
        assert_eq!(build_expression(&rec), "15 9,13,17,21 * * *");
    }

    #[test]
    fn test_monthly_multi_hour_enumerates_hours() {
        let rec = recurrence(Periodicity::Monthly, vec![5], "06:00", "6h");
        assert_eq!(build_expression(&rec), "0 6,12,18 5 * *");
    }

    #[test]
    fn test_multi_hour_near_end_of_day_single_hour() {
        let rec = recurrence(Periodicity::Daily, vec![], "23:45", "2h");
        assert_eq!(build_expression(&rec), "45 23 * * *");
    }

    #[test]
    fn test_malformed_start_time_defaults_to_midnight() {
        let rec = recurrence(Periodicity::Daily, vec![], "soon", "1h");
        assert_eq!(build_expression(&rec), "0 0-23 * * *");
    }

    #[test]
    fn test_unparsable_interval_defaults_to_hourly() {
        let rec = recurrence(Periodicity::Daily, vec![], "09:00", "whenever");
        assert_eq!(build_expression(&rec), "0 9-23 * * *");
    }

    #[test]
    fn test_zero_interval_defaults_to_hourly() {
        let rec = recurrence(Periodicity::Daily, vec![], "09:00", "0min");
        assert_eq!(build_expression(&rec), "0 9-23 * * *");
    }

    #[test]
    fn test_unrecognized_periodicity_falls_back_to_single_run() {
        assert_eq!(build_fields(9, &[], "09:30", "15min"), "30 9 * * *");
    }

    #[test]
    fn test_always_five_fields() {
        let rec = recurrence(Periodicity::Weekly, vec![1, 2, 3], "18:00", "30min");
        assert_eq!(build_expression(&rec).split_whitespace().count(), 5);
    }

    proptest! {
        // The validator must accept everything the builder emits for
        // inputs the API can produce.
        #[test]
        fn prop_builder_output_validates(
            periodicity in 1u8..=3,
            days in proptest::collection::vec(0u32..40, 0..6),
            hour in 0u32..24,
            min in 0u32..60,
            magnitude in 1u32..12,
            unit in prop_oneof![Just("min"), Just("h")],
        ) {
            let expr = build_fields(
                periodicity,
                &days,
                &format!("{hour:02}:{min:02}"),
                &format!("{magnitude}{unit}"),
            );
            prop_assert_eq!(expr.split_whitespace().count(), 5);
            prop_assert!(is_valid_expression(&expr), "rejected: {}", expr);
        }
    }
}
