use chrono::NaiveDate;

/// Format the GitHub contribution calendar uses for day entries.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar day as it appears on the wire. Returns [None] for anything that isn't a
/// `yyyy-mm-dd` date so callers can skip the record instead of aborting.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, CALENDAR_DATE_FORMAT).ok()
}

/// This is the standard way of converting a date to a string in gitgotchi.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Whole days from `from` to `to`, clamped so dates slightly in the future don't produce
/// negative spans.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{days_between, parse_calendar_date};

    #[test]
    fn parses_wire_dates() {
        assert_eq!(
            parse_calendar_date("2024-01-03"),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
        assert_eq!(parse_calendar_date("03/01/2024"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2024-13-40"), None);
    }

    #[test]
    fn day_spans_never_go_negative() {
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(days_between(earlier, later), 7);
        assert_eq!(days_between(later, earlier), 0);
        assert_eq!(days_between(later, later), 0);
    }
}
