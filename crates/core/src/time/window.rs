use chrono::{Duration, Local, NaiveDate};

/// Days of news considered by the sentiment flow.
pub const NEWS_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Window of `days` days ending on (and including) `today`.
pub fn trailing_window(today: NaiveDate, days: i64) -> DateWindow {
    DateWindow {
        from: today - Duration::days(days),
        to: today,
    }
}

/// Calendar date in the server's local timezone. History rows are keyed by it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_day_window_ends_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let w = trailing_window(today, NEWS_WINDOW_DAYS);
        assert_eq!(w.to, today);
        // Crosses the month boundary (2026 is not a leap year).
        assert_eq!(w.from, NaiveDate::from_ymd_opt(2026, 2, 24).unwrap());
    }

    #[test]
    fn zero_day_window_is_a_single_day() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let w = trailing_window(today, 0);
        assert_eq!(w.from, w.to);
    }
}
