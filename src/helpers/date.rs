//! Date helper functions

use chrono::NaiveDateTime;

/// Display format used on post cards, post headers and the archive
pub const DISPLAY_FORMAT: &str = "%Y.%m.%d";

/// Format a date for display
///
/// # Examples
/// ```ignore
/// format_date(&date) // -> "2024.01.15"
/// ```
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Format a timezone-naive timestamp in ISO 8601, seconds precision unless
/// the timestamp carries a fractional part
pub fn date_iso(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(format_date(&date), "2024.01.15");
    }

    #[test]
    fn test_date_iso() {
        let midnight = NaiveDate::from_ymd_opt(2019, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(date_iso(&midnight), "2019-03-10T00:00:00");

        let with_millis = NaiveDate::from_ymd_opt(2019, 3, 10)
            .unwrap()
            .and_hms_milli_opt(8, 5, 1, 250)
            .unwrap();
        assert_eq!(date_iso(&with_millis), "2019-03-10T08:05:01.250");
    }
}
