//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::locale::Locale;

const UZ_MONTHS: [&str; 12] = [
    "yan", "fev", "mar", "apr", "may", "iyn", "iyl", "avg", "sen", "okt", "noy", "dek",
];

/// Format a date the way each locale writes a short date
///
/// # Examples
/// ```ignore
/// format_date(&date, Locale::En) // -> "Jan 05, 2024"
/// format_date(&date, Locale::Ko) // -> "2024년 1월 05일"
/// format_date(&date, Locale::Uz) // -> "05 yan 2024"
/// ```
pub fn format_date(date: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::En => date.format("%b %d, %Y").to_string(),
        Locale::Ko => format!("{}년 {}월 {:02}일", date.year(), date.month(), date.day()),
        Locale::Uz => format!(
            "{:02} {} {}",
            date.day(),
            UZ_MONTHS[date.month0() as usize],
            date.year()
        ),
    }
}

/// RFC 822 date as used in RSS `<pubDate>`
pub fn date_rfc822(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// ISO 8601 date-time for sitemaps and `<time datetime>`
pub fn date_xml(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Parse a frontmatter date.
///
/// Values carrying an offset (RFC 3339) are taken as-is; naive values are
/// interpreted in `tz`.
pub fn parse_date(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 8] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
