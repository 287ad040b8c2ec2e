use super::cursor::MonthCursor;
use super::rules::DisabledRule;
use super::OutOfTimeError;
use std::iter::successors;
use std::slice::ChunksExact;
use time::{Date, Weekday};

const DAYS_IN_WEEK: usize = 7;

pub(crate) const WEEKS_IN_GRID: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    pub(crate) is_current_month: bool,
    pub(crate) is_disabled: bool,
}

/// Six Sunday-first weeks covering a month, padded with the tail of the
/// previous month and the head of the next
#[derive(Clone, Debug, Eq, PartialEq)]
// Invariant: `days` holds exactly GRID_CELLS contiguous ascending dates
pub(crate) struct MonthGrid {
    cursor: MonthCursor,
    days: Vec<CalendarDay>,
}

impl MonthGrid {
    pub(crate) fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub(crate) fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub(crate) fn weeks(&self) -> ChunksExact<'_, CalendarDay> {
        self.days().chunks_exact(DAYS_IN_WEEK)
    }

    pub(crate) fn get(&self, date: Date) -> Option<CalendarDay> {
        self.days.iter().find(|cd| cd.date == date).copied()
    }

    pub(crate) fn last_day_of_month(&self) -> Date {
        self.days
            .iter()
            .rev()
            .find(|cd| cd.is_current_month)
            .map(|cd| cd.date)
            .expect("grid should contain at least one day of its month")
    }
}

/// Build the 42-day grid for the month at `cursor`, asking `rule` which days
/// are unavailable.
///
/// Fails only if the grid would extend past the range of dates representable
/// by [`time::Date`].
pub(crate) fn build_grid<R: DisabledRule>(
    cursor: MonthCursor,
    today: Date,
    rule: &R,
) -> Result<MonthGrid, OutOfTimeError> {
    let first = cursor.first_day();
    let starting_day = usize::from(first.weekday().index0());
    let mut dates = iter_days_before(first)
        .take(starting_day)
        .collect::<Vec<_>>();
    if dates.len() < starting_day {
        return Err(OutOfTimeError);
    }
    dates.reverse();
    dates.extend(
        successors(Some(first), |&d| d.next_day()).take_while(|d| d.month() == cursor.month()),
    );
    let month_end = dates.len();
    let trailing = GRID_CELLS
        .checked_sub(month_end)
        .expect("a month should never need more than six weeks");
    let last = dates[month_end - 1];
    dates.extend(iter_days_after(last).take(trailing));
    if dates.len() < GRID_CELLS {
        return Err(OutOfTimeError);
    }
    let days = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| CalendarDay {
            date,
            is_current_month: (starting_day..month_end).contains(&i),
            is_disabled: rule.is_disabled(date, today),
        })
        .collect::<Vec<_>>();
    debug_assert!(
        days.windows(2)
            .all(|w| matches!(w, [a, b] if a.date.next_day() == Some(b.date))),
        "grid dates should be contiguous"
    );
    Ok(MonthGrid { cursor, days })
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::rules::{studio_rule, Blackout, ClosedWeekdays};
    use time::macros::date;
    use time::Month::{self, *};
    use time::Weekday::*;

    fn never(_date: Date, _today: Date) -> bool {
        false
    }

    fn base_rule() -> impl DisabledRule {
        studio_rule(ClosedWeekdays(vec![Sunday]), Blackout::default())
    }

    fn grid(year: i32, month: Month, today: Date) -> MonthGrid {
        build_grid(MonthCursor::new(year, month).unwrap(), today, &base_rule()).unwrap()
    }

    #[test]
    fn test_grid_shape_for_many_months() {
        for year in [1900, 2000, 2023, 2024, 2025, 2026, 2100] {
            for month0 in 0..12 {
                let cursor = MonthCursor::from_index(year, month0).unwrap();
                let grid = build_grid(cursor, date!(2000 - 01 - 01), &never).unwrap();
                assert_eq!(grid.days().len(), GRID_CELLS);
                assert_eq!(grid.weeks().len(), WEEKS_IN_GRID);
                assert_eq!(grid.days()[0].date.weekday(), Sunday);
                for (a, b) in grid.days().iter().zip(grid.days().iter().skip(1)) {
                    assert_eq!(a.date.next_day(), Some(b.date));
                }
                let in_month = grid
                    .days()
                    .iter()
                    .filter(|cd| cd.is_current_month)
                    .collect::<Vec<_>>();
                assert!(in_month
                    .iter()
                    .all(|cd| MonthCursor::containing(cd.date) == cursor));
                assert_eq!(in_month[0].date.day(), 1);
                assert!(grid
                    .days()
                    .iter()
                    .filter(|cd| !cd.is_current_month)
                    .all(|cd| cd.date.month() != cursor.month()));
            }
        }
    }

    #[test]
    fn test_days_in_month() {
        let today = date!(2000 - 01 - 01);
        let count = |year, month| {
            grid(year, month, today)
                .days()
                .iter()
                .filter(|cd| cd.is_current_month)
                .count()
        };
        assert_eq!(count(2025, February), 28);
        assert_eq!(count(2024, February), 29);
        assert_eq!(count(1900, February), 28);
        assert_eq!(count(2000, February), 29);
        assert_eq!(count(2025, April), 30);
        assert_eq!(count(2025, January), 31);
    }

    #[test]
    fn test_september_2025() {
        let g = grid(2025, September, date!(2025 - 08 - 15));
        let days = g.days();
        assert_eq!(days.len(), 42);
        assert_eq!(days[0].date, date!(2025 - 08 - 31));
        assert!(!days[0].is_current_month);
        assert_eq!(days[1].date, date!(2025 - 09 - 01));
        assert!(days[1].is_current_month);
        assert_eq!(days[30].date, date!(2025 - 09 - 30));
        assert!(days[30].is_current_month);
        assert_eq!(days[31].date, date!(2025 - 10 - 01));
        assert!(!days[31].is_current_month);
        assert_eq!(days[41].date, date!(2025 - 10 - 11));
        assert_eq!(days.iter().filter(|cd| cd.is_current_month).count(), 30);
        assert_eq!(days.iter().filter(|cd| !cd.is_current_month).count(), 12);
        for d in [
            date!(2025 - 09 - 07),
            date!(2025 - 09 - 14),
            date!(2025 - 09 - 21),
            date!(2025 - 09 - 28),
        ] {
            assert_eq!(
                g.get(d),
                Some(CalendarDay {
                    date: d,
                    is_current_month: true,
                    is_disabled: true
                })
            );
        }
        assert!(days
            .iter()
            .filter(|cd| cd.date.weekday() != Sunday)
            .all(|cd| !cd.is_disabled));
        assert_eq!(g.last_day_of_month(), date!(2025 - 09 - 30));
    }

    #[test]
    fn test_today_boundary() {
        let today = date!(2025 - 09 - 10);
        let g = grid(2025, September, today);
        for cd in g.days() {
            if cd.date < today {
                assert!(cd.is_disabled, "{} should be disabled", cd.date);
            } else {
                assert_eq!(cd.is_disabled, cd.date.weekday() == Sunday, "{}", cd.date);
            }
        }
    }

    #[test]
    fn test_december_rollover() {
        let g = grid(2025, December, date!(2025 - 01 - 01));
        let days = g.days();
        assert_eq!(days.len(), 42);
        // December 2025 starts on a Monday
        assert_eq!(days[0].date, date!(2025 - 11 - 30));
        assert_eq!(days[1].date, date!(2025 - 12 - 01));
        assert_eq!(days[31].date, date!(2025 - 12 - 31));
        assert_eq!(days[32].date, date!(2026 - 01 - 01));
        assert_eq!(days[41].date, date!(2026 - 01 - 10));
        assert_eq!(
            MonthCursor::new(2025, December).unwrap().next(),
            MonthCursor::new(2026, January)
        );
    }

    #[test]
    fn test_january_rollover() {
        let g = grid(2026, January, date!(2025 - 01 - 01));
        let days = g.days();
        assert_eq!(days.len(), 42);
        // January 2026 starts on a Thursday
        assert_eq!(days[0].date, date!(2025 - 12 - 28));
        assert_eq!(days[3].date, date!(2025 - 12 - 31));
        assert!(!days[3].is_current_month);
        assert_eq!(days[4].date, date!(2026 - 01 - 01));
        assert!(days[4].is_current_month);
    }

    #[test]
    fn test_month_starting_on_sunday() {
        // February 2026 starts on a Sunday and has no leading days
        let g = grid(2026, February, date!(2025 - 01 - 01));
        assert_eq!(g.days()[0].date, date!(2026 - 02 - 01));
        assert!(g.days()[0].is_current_month);
        assert_eq!(g.days()[41].date, date!(2026 - 03 - 14));
    }

    #[test]
    fn test_month_starting_on_saturday() {
        // November 2025 starts on a Saturday and has 30 days: 6 + 30 + 6
        let g = grid(2025, November, date!(2025 - 01 - 01));
        assert_eq!(g.days()[6].date, date!(2025 - 11 - 01));
        assert_eq!(g.days()[35].date, date!(2025 - 11 - 30));
        assert_eq!(g.days()[41].date, date!(2025 - 12 - 06));
        assert_eq!(g.last_day_of_month(), date!(2025 - 11 - 30));
    }

    #[test]
    fn test_end_of_time() {
        let last = MonthCursor::new(Date::MAX.year(), December).unwrap();
        assert_eq!(build_grid(last, Date::MIN, &never), Err(OutOfTimeError));
        let first = MonthCursor::new(Date::MIN.year(), January).unwrap();
        assert_eq!(
            build_grid(first, Date::MIN, &never).is_ok(),
            first.first_day().weekday() == Sunday
        );
    }

    #[test]
    #[should_panic(expected = "holiday lookup failed")]
    fn test_rule_panic_propagates() {
        let rule = |_date: Date, _today: Date| -> bool { panic!("holiday lookup failed") };
        let _ = build_grid(
            MonthCursor::new(2025, September).unwrap(),
            date!(2025 - 09 - 10),
            &rule,
        );
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(Sunday.index0(), 0);
        assert_eq!(Wednesday.index0(), 3);
        assert_eq!(Saturday.index0(), 6);
    }
}
