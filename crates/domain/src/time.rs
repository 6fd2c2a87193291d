//! Time and timestamp helpers.

use chrono::NaiveDateTime;

/// Timestamp as stored by the relational store: no timezone attached.
pub type Timestamp = NaiveDateTime;

/// Wire format of every timestamp sent to clients.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in [`TIMESTAMP_FORMAT`].
///
/// Sub-second precision is dropped.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn should_zero_pad_every_field() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-07 04:05:06");
    }

    #[test]
    fn should_use_24_hour_clock_and_drop_fraction() {
        let ts = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 58, 999)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "1999-12-31 23:59:58");
    }
}
