use super::OutOfTimeError;
use std::fmt;
use time::{Date, Month};

const MONTHS_IN_YEAR: i64 = 12;

/// The month currently on display.  Only ever names a month; the day is
/// implicitly the 1st.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct MonthCursor {
    year: i32,
    month: Month,
}

impl MonthCursor {
    pub(crate) fn new(year: i32, month: Month) -> Result<MonthCursor, OutOfTimeError> {
        if (Date::MIN.year()..=Date::MAX.year()).contains(&year) {
            Ok(MonthCursor { year, month })
        } else {
            Err(OutOfTimeError)
        }
    }

    /// Construct a cursor from a zero-based month index that may lie outside
    /// `0..12`, carrying the excess into the year (so month 12 of 2025 is
    /// January 2026, and month -1 of 2025 is December 2024).
    pub(crate) fn from_index(year: i32, month0: i32) -> Result<MonthCursor, OutOfTimeError> {
        let total = i64::from(year) * MONTHS_IN_YEAR + i64::from(month0);
        let year = i32::try_from(total.div_euclid(MONTHS_IN_YEAR)).map_err(|_| OutOfTimeError)?;
        let month = u8::try_from(total.rem_euclid(MONTHS_IN_YEAR) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .expect("Euclidean remainder plus one should be a valid month number");
        MonthCursor::new(year, month)
    }

    pub(crate) fn containing(date: Date) -> MonthCursor {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    /// Zero-based month index, January = 0
    pub(crate) fn index0(&self) -> i32 {
        i32::from(u8::from(self.month)) - 1
    }

    pub(crate) fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("first of the month should exist for every in-range year")
    }

    pub(crate) fn next(&self) -> Result<MonthCursor, OutOfTimeError> {
        MonthCursor::from_index(self.year, self.index0() + 1)
    }

    pub(crate) fn previous(&self) -> Result<MonthCursor, OutOfTimeError> {
        MonthCursor::from_index(self.year, self.index0() - 1)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    fn cursor(year: i32, month: Month) -> MonthCursor {
        MonthCursor::new(year, month).unwrap()
    }

    #[test]
    fn test_from_index_in_range() {
        assert_eq!(MonthCursor::from_index(2025, 0), Ok(cursor(2025, January)));
        assert_eq!(MonthCursor::from_index(2025, 8), Ok(cursor(2025, September)));
        assert_eq!(MonthCursor::from_index(2025, 11), Ok(cursor(2025, December)));
    }

    #[test]
    fn test_from_index_carries_into_year() {
        assert_eq!(MonthCursor::from_index(2025, 12), Ok(cursor(2026, January)));
        assert_eq!(MonthCursor::from_index(2025, 25), Ok(cursor(2027, February)));
        assert_eq!(MonthCursor::from_index(2025, -1), Ok(cursor(2024, December)));
        assert_eq!(MonthCursor::from_index(2025, -13), Ok(cursor(2023, December)));
        assert_eq!(MonthCursor::from_index(2025, -24), Ok(cursor(2023, January)));
    }

    #[test]
    fn test_from_index_out_of_time() {
        assert_eq!(
            MonthCursor::from_index(Date::MAX.year(), 12),
            Err(OutOfTimeError)
        );
        assert_eq!(
            MonthCursor::from_index(Date::MIN.year(), -1),
            Err(OutOfTimeError)
        );
        assert_eq!(MonthCursor::from_index(i32::MAX, 12), Err(OutOfTimeError));
        assert_eq!(MonthCursor::new(10000, January), Err(OutOfTimeError));
    }

    #[test]
    fn test_next_previous_across_years() {
        assert_eq!(cursor(2025, January).previous(), Ok(cursor(2024, December)));
        assert_eq!(cursor(2025, December).next(), Ok(cursor(2026, January)));
        assert_eq!(cursor(2025, June).next(), Ok(cursor(2025, July)));
        assert_eq!(cursor(2025, June).previous(), Ok(cursor(2025, May)));
    }

    #[test]
    fn test_round_trip() {
        for year in [-1, 0, 1999, 2024, 2025, 2100] {
            for month0 in 0..12 {
                let c = MonthCursor::from_index(year, month0).unwrap();
                assert_eq!(c.previous().and_then(|p| p.next()), Ok(c));
                assert_eq!(c.next().and_then(|n| n.previous()), Ok(c));
            }
        }
    }

    #[test]
    fn test_containing_and_first_day() {
        let c = MonthCursor::containing(date!(2025 - 09 - 17));
        assert_eq!(c, cursor(2025, September));
        assert_eq!(c.first_day(), date!(2025 - 09 - 01));
        assert_eq!(c.index0(), 8);
    }

    #[test]
    fn test_display() {
        assert_eq!(cursor(2025, September).to_string(), "September 2025");
    }
}
