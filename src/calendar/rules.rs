use std::collections::BTreeSet;
use time::{Date, Weekday};

/// Decides which days of a calendar grid can't be booked.
///
/// Rules compose with [`DisabledRule::or`], and any `Fn(Date, Date) -> bool`
/// closure (taking the date in question and today's date) is also a rule.
pub(crate) trait DisabledRule {
    fn is_disabled(&self, date: Date, today: Date) -> bool;

    fn or<R: DisabledRule>(self, other: R) -> AnyRule<Self, R>
    where
        Self: Sized,
    {
        AnyRule(self, other)
    }
}

impl<F: Fn(Date, Date) -> bool> DisabledRule for F {
    fn is_disabled(&self, date: Date, today: Date) -> bool {
        self(date, today)
    }
}

/// Days strictly before today
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BeforeToday;

impl DisabledRule for BeforeToday {
    fn is_disabled(&self, date: Date, today: Date) -> bool {
        date < today
    }
}

/// Weekdays on which the studio is closed
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ClosedWeekdays(pub(crate) Vec<Weekday>);

impl DisabledRule for ClosedWeekdays {
    fn is_disabled(&self, date: Date, _today: Date) -> bool {
        self.0.contains(&date.weekday())
    }
}

/// Individual closures: holidays, fully booked days, and the like
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Blackout(pub(crate) BTreeSet<Date>);

impl DisabledRule for Blackout {
    fn is_disabled(&self, date: Date, _today: Date) -> bool {
        self.0.contains(&date)
    }
}

/// Disables a day if either inner rule does
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AnyRule<A, B>(A, B);

impl<A: DisabledRule, B: DisabledRule> DisabledRule for AnyRule<A, B> {
    fn is_disabled(&self, date: Date, today: Date) -> bool {
        self.0.is_disabled(date, today) || self.1.is_disabled(date, today)
    }
}

pub(crate) type StudioRule = AnyRule<AnyRule<BeforeToday, ClosedWeekdays>, Blackout>;

pub(crate) fn studio_rule(closed: ClosedWeekdays, blackout: Blackout) -> StudioRule {
    BeforeToday.or(closed).or(blackout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 09 - 10);

    #[test]
    fn test_before_today() {
        assert!(BeforeToday.is_disabled(date!(2025 - 09 - 09), TODAY));
        assert!(BeforeToday.is_disabled(date!(2024 - 12 - 31), TODAY));
        assert!(!BeforeToday.is_disabled(TODAY, TODAY));
        assert!(!BeforeToday.is_disabled(date!(2025 - 09 - 11), TODAY));
    }

    #[test]
    fn test_closed_weekdays() {
        let rule = ClosedWeekdays(vec![Weekday::Sunday, Weekday::Monday]);
        assert!(rule.is_disabled(date!(2025 - 09 - 14), TODAY));
        assert!(rule.is_disabled(date!(2025 - 09 - 15), TODAY));
        assert!(!rule.is_disabled(date!(2025 - 09 - 16), TODAY));
        // Past days are someone else's business
        assert!(!rule.is_disabled(date!(2025 - 09 - 02), TODAY));
    }

    #[test]
    fn test_blackout() {
        let rule = Blackout(BTreeSet::from([date!(2025 - 12 - 25), date!(2026 - 01 - 01)]));
        assert!(rule.is_disabled(date!(2025 - 12 - 25), TODAY));
        assert!(rule.is_disabled(date!(2026 - 01 - 01), TODAY));
        assert!(!rule.is_disabled(date!(2025 - 12 - 26), TODAY));
    }

    #[test]
    fn test_studio_rule() {
        let rule = studio_rule(
            ClosedWeekdays(vec![Weekday::Sunday]),
            Blackout(BTreeSet::from([date!(2025 - 09 - 19)])),
        );
        // Past Tuesday
        assert!(rule.is_disabled(date!(2025 - 09 - 09), TODAY));
        // Today
        assert!(!rule.is_disabled(TODAY, TODAY));
        // Future Sunday
        assert!(rule.is_disabled(date!(2025 - 09 - 21), TODAY));
        // Blacked-out Friday
        assert!(rule.is_disabled(date!(2025 - 09 - 19), TODAY));
        // Ordinary Saturday
        assert!(!rule.is_disabled(date!(2025 - 09 - 20), TODAY));
    }

    #[test]
    fn test_closure_rule() {
        let first_of_month = |date: Date, _today: Date| date.day() == 1;
        let rule = BeforeToday.or(first_of_month);
        assert!(rule.is_disabled(date!(2025 - 10 - 01), TODAY));
        assert!(rule.is_disabled(date!(2025 - 09 - 01), TODAY));
        assert!(!rule.is_disabled(date!(2025 - 10 - 02), TODAY));
    }
}
