//! Date parsing for statement and ledger dates

use chrono::NaiveDate;

/// Date layouts seen across bank statements and books exports, tried in order
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y", "%Y.%m.%d",
];

/// Parse a date in any of the accepted layouts; `None` if none fit
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Absolute number of days between two dates
pub fn days_apart(left: NaiveDate, right: NaiveDate) -> i64 {
    (left - right).num_days().abs()
}
