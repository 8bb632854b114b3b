use chrono::{
    DateTime, Datelike, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Utc,
};
use std::str::FromStr;

pub mod logging;
pub mod retry;

/// Formats an instant the way the provider expects in query values.
pub fn format_date_for_query(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a user-supplied date/time.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) or a bare
/// date (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Resolves an IANA timezone name, falling back to UTC.
pub fn parse_timezone(name: &str) -> chrono_tz::Tz {
    chrono_tz::Tz::from_str(name).unwrap_or_else(|_| {
        log::warn!("Unrecognized timezone '{}', using UTC", name);
        chrono_tz::UTC
    })
}

fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Wall-clock time skipped by a DST jump
        LocalResult::None => naive.and_utc(),
    }
}

fn last_millisecond(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + chrono::Duration::days(1) - chrono::Duration::milliseconds(1)
}

pub fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Utc> {
    localize(&at.timezone(), at.date_naive().and_time(NaiveTime::MIN))
}

pub fn end_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Utc> {
    localize(&at.timezone(), last_millisecond(at.date_naive()))
}

fn days_into_week(date: NaiveDate, start_on_monday: bool) -> i64 {
    let weekday = date.weekday();
    if start_on_monday {
        i64::from(weekday.num_days_from_monday())
    } else {
        i64::from(weekday.num_days_from_sunday())
    }
}

pub fn start_of_week<Tz: TimeZone>(at: &DateTime<Tz>, start_on_monday: bool) -> DateTime<Utc> {
    let date = at.date_naive();
    let first = date - chrono::Duration::days(days_into_week(date, start_on_monday));
    localize(&at.timezone(), first.and_time(NaiveTime::MIN))
}

pub fn end_of_week<Tz: TimeZone>(at: &DateTime<Tz>, start_on_monday: bool) -> DateTime<Utc> {
    let date = at.date_naive();
    let last = date + chrono::Duration::days(6 - days_into_week(date, start_on_monday));
    localize(&at.timezone(), last_millisecond(last))
}

pub fn start_of_month<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Utc> {
    let date = at.date_naive();
    let first = date.with_day(1).unwrap_or(date);
    localize(&at.timezone(), first.and_time(NaiveTime::MIN))
}

pub fn end_of_month<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Utc> {
    let date = at.date_naive();
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    localize(&at.timezone(), last_millisecond(last))
}
