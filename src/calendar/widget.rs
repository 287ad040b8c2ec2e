use super::grid::{CalendarDay, MonthGrid, WeekdayExt, WEEKS_IN_GRID};
use crate::theme::{
    BASE_STYLE, DISABLED_STYLE, FOCUS_MODIFIER, OTHER_MONTH_STYLE, SELECTED_STYLE, TITLE_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Sun  Mon  Tue  Wed  Thu  Fri  Sat ";

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 35;

/// Number of lines taken up by the month title, the weekday header, and its
/// rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Offset of a day's number from the left edge of its column
const DAY_INSET: u16 = 1;

pub(crate) const CALENDAR_HEIGHT: u16 = HEADER_LINES + WEEK_LINES * 6;

const ACS_HLINE: char = '─';

/// Renders a [`MonthGrid`].  Which day is selected and which has the keyboard
/// focus are owned by the caller and passed in by value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    today: Date,
    selected: Option<Date>,
    focus: Option<Date>,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid, today: Date) -> Self {
        MonthView {
            grid,
            today,
            selected: None,
            focus: None,
        }
    }

    pub(crate) fn selected(mut self, date: Option<Date>) -> Self {
        self.selected = date;
        self
    }

    pub(crate) fn focus(mut self, date: Date) -> Self {
        self.focus = Some(date);
        self
    }

    fn day_style(&self, day: &CalendarDay) -> Style {
        let style = if day.is_disabled {
            DISABLED_STYLE
        } else if self.selected == Some(day.date) {
            SELECTED_STYLE
        } else if day.is_current_month {
            BASE_STYLE
        } else {
            OTHER_MONTH_STYLE
        };
        if self.focus == Some(day.date) {
            style.add_modifier(FOCUS_MODIFIER)
        } else {
            style
        }
    }

    fn show(&self, day: &CalendarDay) -> Span<'static> {
        let n = day.date.day();
        let s = if day.date == self.today {
            format!("[{n:2}]")
        } else {
            format!(" {n:2} ")
        };
        Span::styled(s, self.day_style(day))
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: MAIN_WIDTH.min(area.width),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.grid.cursor().to_string());
        canvas.draw_header();
        debug_assert_eq!(
            self.grid.weeks().len(),
            WEEKS_IN_GRID,
            "grid should have six weeks"
        );
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for day in week {
                canvas.draw_day(i, day.date.weekday().index0(), self.show(day));
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(MAIN_WIDTH);
        self.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd_index: u16, s: Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd_index + DAY_INSET,
            s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
