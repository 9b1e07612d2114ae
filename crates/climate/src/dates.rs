use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration,
    OffsetDateTime,
};

/// Calendar dates are stored and accepted as `YYYY-MM-DD`
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Length of the rolling window ending at the latest recorded date
pub const WINDOW_DAYS: i64 = 365;

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// First day of the twelve-month window that ends on `latest`
pub fn window_start(latest: Date) -> Date {
    latest.saturating_sub(Duration::days(WINDOW_DAYS))
}

/// Current UTC calendar date, evaluated on every call
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Clamp a requested `[start, end]` range to the dataset's `[earliest, latest]` span.
///
/// Returns `None` when nothing is left of the range after clamping.
pub fn clamp_window(start: Date, end: Date, earliest: Date, latest: Date) -> Option<(Date, Date)> {
    let date_from = start.max(earliest);
    let date_to = end.min(latest);
    (date_from <= date_to).then_some((date_from, date_to))
}
