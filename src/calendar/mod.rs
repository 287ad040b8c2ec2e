mod cursor;
mod grid;
mod rules;
mod widget;
pub(crate) use self::cursor::MonthCursor;
pub(crate) use self::grid::{build_grid, MonthGrid};
pub(crate) use self::rules::{studio_rule, Blackout, ClosedWeekdays, DisabledRule, StudioRule};
pub(crate) use self::widget::{MonthView, CALENDAR_HEIGHT};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
