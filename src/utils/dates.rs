use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date as entered in a date field.
///
/// Accepts `YYYY-MM-DD`, and also full ISO 8601 date-times. A date-time
/// with an offset is converted to the local clock before taking its date;
/// one without an offset is already local. Returns `None` for anything else.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|date_time| date_time.date())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("1990-01-01"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date(" 2030-12-31 "), Some(ymd(2030, 12, 31)));
    }

    #[test]
    fn test_parse_local_date_time_keeps_date() {
        assert_eq!(parse_date("2030-12-31T10:15"), Some(ymd(2030, 12, 31)));
        assert_eq!(parse_date("2030-12-31T23:59:59.500"), Some(ymd(2030, 12, 31)));
    }

    #[test]
    fn test_parse_offset_date_time_uses_local_date() {
        // Both name 2026-10-18T11:00Z, from opposite ends of the offset range.
        let east = parse_date("2026-10-19T01:00:00+14:00").unwrap();
        let west = parse_date("2026-10-17T23:00:00-12:00").unwrap();
        assert_eq!(east, west);

        let instant = DateTime::parse_from_rfc3339("2026-10-18T11:00:00Z").unwrap();
        assert_eq!(east, instant.with_timezone(&Local).date_naive());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2030-02-30"), None);
        assert_eq!(parse_date("31/12/2030"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2026, 1, 5)), "2026-01-05");
    }
}
