use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Timestamp type used by the CSV adapters.
pub type Timestamp = NaiveDateTime;

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts an Excel serial date into a timestamp.
///
/// Day 1 is 1900-01-01. Excel treats 1900 as a leap year, so every serial
/// after 59 (the phantom 1900-02-29) is shifted back by one day. The fraction
/// of a day is rounded half to even to whole seconds.
pub fn excel_to_datetime(serial: f64) -> Option<Timestamp> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let serial = if serial > 59.0 { serial - 1.0 } else { serial };
    let days = serial.trunc();
    let seconds = ((serial - days) * SECONDS_PER_DAY).round_ties_even();

    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?.and_hms_opt(0, 0, 0)?;
    epoch
        .checked_add_signed(Duration::try_days(days as i64 - 1)?)?
        .checked_add_signed(Duration::try_seconds(seconds as i64)?)
}

/// Parses an Excel serial number, an ISO-8601 date-time or a bare date.
pub fn parse_timestamp(field: &str) -> Option<Timestamp> {
    if let Ok(serial) = field.parse::<f64>() {
        return excel_to_datetime(serial);
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(field, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(field, DATE_FORMAT)
                .ok()?
                .and_hms_opt(0, 0, 0)
        })
}
