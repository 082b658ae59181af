use chrono::{NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today". Read once at startup.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// UTC calendar date from the system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Strict `YYYY-MM-DD`, returned in canonical form.
pub fn parse_date(raw: &str) -> Option<String> {
    let t = raw.trim();
    if t.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(t, DATE_FORMAT).ok().map(format_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_is_strict() {
        assert_eq!(parse_date("2024-03-15").as_deref(), Some("2024-03-15"));
        assert_eq!(parse_date(" 2024-02-29 ").as_deref(), Some("2024-02-29"));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-3-5"), None);
        assert_eq!(parse_date("15/03/2024"), None);
    }

    #[test]
    fn fixed_clock_formats_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!(format_date(FixedClock(d).today()), "2024-03-05");
    }
}
