use chrono::{Datelike, Local, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Years a `DateTime64(3)` column can hold.
pub const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2299;

/// Renders an enrollment timestamp (epoch millis) as local
/// `YYYY-MM-DD HH:MM:SS`, dropping sub-second precision.
pub fn format_enrollment_time(millis: i64) -> Option<String> {
    format_enrollment_time_in(millis, &Local)
}

pub fn format_enrollment_time_in<Tz>(millis: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|moment| moment.format(DISPLAY_FORMAT).to_string())
}

/// Converts a USB event timestamp (epoch seconds, possibly fractional) into a
/// naive local date-time for storage. Times outside `STORABLE_YEARS` are
/// rejected.
pub fn usb_event_local_time(seconds: f64) -> Option<NaiveDateTime> {
    usb_event_time_in(seconds, &Local)
}

pub fn usb_event_time_in<Tz: TimeZone>(seconds: f64, tz: &Tz) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    tz.timestamp_opt(whole as i64, nanos)
        .single()
        .map(|moment| moment.naive_local())
        .filter(|naive| STORABLE_YEARS.contains(&naive.year()))
}
