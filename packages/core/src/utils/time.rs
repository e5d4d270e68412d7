// Cookie dates

use chrono::{DateTime, NaiveDateTime, Utc};

/// `expires` attribute format (RFC 1123, always GMT)
pub const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn format_cookie_date(at: &DateTime<Utc>) -> String {
    at.format(COOKIE_DATE_FORMAT).to_string()
}

pub fn parse_cookie_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, COOKIE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
