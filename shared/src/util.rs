use chrono::{Local, Months, NaiveDate};

/// Query/payload date format (`YYYY-MM-DD`)
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Same day one calendar month earlier (clamped to the month's last day)
pub fn one_month_before(day: NaiveDate) -> NaiveDate {
    day.checked_sub_months(Months::new(1)).unwrap_or(day)
}

/// Parse the calendar day from an ISO 8601 date or date-time string
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, DAY_FORMAT).ok()
}

/// Format a day as `YYYY-MM-DD`
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}
