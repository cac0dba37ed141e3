use chrono::{DateTime, Local, NaiveDate, Utc};

/// Current calendar date in UTC; the "today" window is keyed on it.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Local timestamp used in export file names, e.g. `20250601_101500`.
pub fn export_stamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}
