//! Format checks for scheduling parameters
//!
//! Pure string predicates plus `require_*` wrappers that turn a failed check
//! into a [`ObscreenError::Validation`] naming the offending field. Handlers
//! call the wrappers before building any request.

use obscreen_domain::{ObscreenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_TIME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").ok());

static DATE_TIME_WITHOUT_SECONDS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").ok());

static TIME_OF_DAY: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").ok());

fn matches(pattern: &Lazy<Option<Regex>>, s: &str) -> bool {
    let pattern: &Option<Regex> = pattern;
    pattern.as_ref().is_some_and(|re| re.is_match(s))
}

/// `YYYY-MM-DD HH:MM:SS`. Format only; `2024-02-30 00:00:00` passes.
pub fn is_valid_date_time(s: &str) -> bool {
    matches(&DATE_TIME, s)
}

/// `YYYY-MM-DD HH:MM`, the form the scheduling pickers emit.
pub fn is_valid_date_time_without_seconds(s: &str) -> bool {
    matches(&DATE_TIME_WITHOUT_SECONDS, s)
}

/// Either date-time form.
pub fn is_valid_schedule_date_time(s: &str) -> bool {
    is_valid_date_time(s) || is_valid_date_time_without_seconds(s)
}

/// `HH:MM`
pub fn is_valid_time(s: &str) -> bool {
    matches(&TIME_OF_DAY, s)
}

/// 1 (Monday) through 7 (Sunday).
pub fn is_valid_day_of_week(day: i64) -> bool {
    (1..=7).contains(&day)
}

/// Six or seven whitespace separated fields. Field ranges are not checked.
pub fn is_valid_cron(s: &str) -> bool {
    let fields = s.split_whitespace().count();
    fields == 6 || fields == 7
}

pub fn require_schedule_date_time(field: &str, value: &str) -> Result<()> {
    if is_valid_schedule_date_time(value) {
        Ok(())
    } else {
        Err(ObscreenError::validation(
            field,
            format!("\"{value}\" is not a date-time, use YYYY-MM-DD HH:MM[:SS] (e.g. 2024-01-15 09:00)"),
        ))
    }
}

pub fn require_time(field: &str, value: &str) -> Result<()> {
    if is_valid_time(value) {
        Ok(())
    } else {
        Err(ObscreenError::validation(
            field,
            format!("\"{value}\" is not a time of day, use HH:MM (e.g. 09:00)"),
        ))
    }
}

pub fn require_day_of_week(field: &str, day: i64) -> Result<()> {
    if is_valid_day_of_week(day) {
        Ok(())
    } else {
        Err(ObscreenError::validation(
            field,
            format!("{day} is not a day of week, use 1 (Monday) to 7 (Sunday)"),
        ))
    }
}

pub fn require_cron(field: &str, value: &str) -> Result<()> {
    if is_valid_cron(value) {
        Ok(())
    } else {
        Err(ObscreenError::validation(
            field,
            format!("\"{value}\" is not a cron expression, use * * * * * * [*]"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_requires_seconds() {
        assert!(is_valid_date_time("2024-01-15 09:00:00"));
        assert!(!is_valid_date_time("2024-01-15 09:00"));
        assert!(!is_valid_date_time("15-01-2024 09:00:00"));
        assert!(!is_valid_date_time("2024-01-15T09:00:00"));
        assert!(!is_valid_date_time(" 2024-01-15 09:00:00"));
    }

    #[test]
    fn test_date_time_format_only() {
        assert!(is_valid_date_time("2024-02-30 25:61:99"));
    }

    #[test]
    fn test_schedule_date_time_accepts_both_forms() {
        assert!(is_valid_schedule_date_time("2024-01-15 09:00"));
        assert!(is_valid_schedule_date_time("2024-01-15 09:00:00"));
        assert!(!is_valid_schedule_date_time("2024-01-15"));
        assert!(!is_valid_date_time_without_seconds("2024-01-15 09:00:00"));
    }

    #[test]
    fn test_time_of_day() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("17:30"));
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("09:00:00"));
        assert!(!is_valid_time(""));
    }

    #[test]
    fn test_day_of_week_bounds() {
        assert!(!is_valid_day_of_week(0));
        assert!(is_valid_day_of_week(1));
        assert!(is_valid_day_of_week(7));
        assert!(!is_valid_day_of_week(8));
        assert!(!is_valid_day_of_week(-1));
    }

    #[test]
    fn test_cron_field_count() {
        assert!(is_valid_cron("0 9 * * * *"));
        assert!(is_valid_cron("0 9 * * * * *"));
        assert!(is_valid_cron("0  9 * * *\t* *"));
        assert!(!is_valid_cron("0 9 * * *"));
        assert!(!is_valid_cron("0 9 * * * * * *"));
        assert!(!is_valid_cron(""));
    }

    #[test]
    fn test_require_names_field() {
        let err = require_day_of_week("dayStart", 8).unwrap_err();
        match err {
            ObscreenError::Validation { field, message } => {
                assert_eq!(field, "dayStart");
                assert!(message.contains("1 (Monday) to 7 (Sunday)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(require_time("timeStart", "09:00").is_ok());
        assert!(require_schedule_date_time("datetimeStart", "tomorrow").is_err());
        assert!(require_cron("cronStart", "* * *").is_err());
    }
}
