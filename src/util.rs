use crate::error::{RepoScopeError, Result};
use crate::model::ROOT_DIRECTORY;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Calendar day of a commit, as seen by its author.
pub fn day_key(timestamp: &DateTime<FixedOffset>) -> NaiveDate {
    timestamp.date_naive()
}

/// First path segment, or the root bucket for files without a directory.
pub fn top_level_directory(path: &str) -> &str {
    if path.trim().is_empty() {
        return ROOT_DIRECTORY;
    }
    match path.split_once(['/', '\\']) {
        Some((first, _)) => first,
        None => ROOT_DIRECTORY,
    }
}

/// Parses the `--since`/`--until` bounds and checks their order.
pub fn resolve_range(
    since: Option<&str>,
    until: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let since_dt = since.map(|s| parse_date(s, false, now)).transpose()?;
    let until_dt = until.map(|u| parse_date(u, true, now)).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(RepoScopeError::InvalidDate(format!(
                "Invalid range: since ({s}) is after until ({u})"
            )));
        }
    }

    Ok((since_dt, until_dt))
}

/// Accepts RFC 3339, `YYYY-MM-DD` and relative forms such as `2 weeks ago` or `90d`.
///
/// A bare date used as an upper bound covers the whole day.
pub fn parse_date(input: &str, end_of_day: bool, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let time = if end_of_day {
            date.and_hms_opt(23, 59, 59)
        } else {
            date.and_hms_opt(0, 0, 0)
        };
        if let Some(datetime) = time {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    if let Some(duration) = parse_relative(input) {
        return now
            .checked_sub_signed(duration)
            .ok_or_else(|| RepoScopeError::InvalidDate(format!("Duration overflow for '{input}'")));
    }

    Err(RepoScopeError::InvalidDate(format!(
        "'{input}' is not RFC 3339, YYYY-MM-DD or a relative duration"
    )))
}

fn parse_relative(input: &str) -> Option<Duration> {
    let input = input.to_lowercase();
    let input = input.strip_suffix(" ago").unwrap_or(&input).trim();

    if let Some((count, unit)) = input.split_once(' ') {
        if let Ok(n) = count.trim().parse::<i64>() {
            let days = match unit.trim().trim_end_matches('s') {
                "day" => Some(n),
                "week" => Some(n * 7),
                "month" => Some(n * 30),
                "year" => Some(n * 365),
                _ => None,
            };
            if let Some(days) = days {
                return Duration::try_days(days);
            }
        }
    }

    humantime::parse_duration(input)
        .ok()
        .and_then(|d| Duration::from_std(d).ok())
}
