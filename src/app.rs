use crate::booking::{
    display_date, BookingError, BookingForm, BookingFormPopup, BookingRequest, Confirmation,
    ConfirmationPopup, FormInput, FormOutput, TimeSlot,
};
use crate::calendar::{
    build_grid, DisabledRule, MonthCursor, MonthGrid, MonthView, OutOfTimeError, CALENDAR_HEIGHT,
};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::slots::{SlotInput, SlotOutput, SlotPicker, SlotPickerState};
use crate::theme::{BASE_STYLE, HINT_STYLE, LABEL_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration};

static HINT: &str = "?: help  SPACE: select day  s: time slot  b: book  q: quit";

/// Source of the current local date.  Returns `None` if the date can't be
/// determined right now, in which case the previous date is kept.
pub(crate) type Clock = fn() -> Option<Date>;

#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    clock: Clock,
    today: Date,
    focus: Date,
    grid: MonthGrid,
    selected: Option<Date>,
    slots: Vec<TimeSlot>,
    slot: Option<usize>,
    rule: R,
    form: BookingForm,
    state: AppState,
}

impl<R: DisabledRule> App<R> {
    pub(crate) fn new(
        clock: Clock,
        today: Date,
        start_date: Date,
        rule: R,
        slots: Vec<TimeSlot>,
    ) -> Result<App<R>, OutOfTimeError> {
        let grid = build_grid(MonthCursor::containing(start_date), today, &rule)?;
        Ok(App {
            clock,
            today,
            focus: start_date,
            grid,
            selected: None,
            slots,
            slot: None,
            rule,
            form: BookingForm::new(),
            state: AppState::Calendar,
        })
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(today) = (self.clock)() {
            self.set_today(today);
        }
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or asked for
    // something that can't be done
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_focus(-Duration::DAY),
                KeyCode::Char('l') | KeyCode::Right => self.move_focus(Duration::DAY),
                KeyCode::Char('k') | KeyCode::Up => self.move_focus(-Duration::WEEK),
                KeyCode::Char('j') | KeyCode::Down => self.move_focus(Duration::WEEK),
                KeyCode::Char('p') | KeyCode::PageUp => self.shift_month(false),
                KeyCode::Char('n') | KeyCode::PageDown => self.shift_month(true),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char(' ') | KeyCode::Enter => self.select(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('s') => {
                    self.state =
                        AppState::PickingSlot(SlotPickerState::new(self.slots.len(), self.slot));
                    true
                }
                KeyCode::Char('b') => {
                    self.form.set_error(None);
                    self.state = AppState::Filling;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Confirmed(_) => {
                self.selected = None;
                self.slot = None;
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(cursor) => {
                            self.state = AppState::Calendar;
                            self.jump_to(cursor)
                        }
                    }
                }
            }
            AppState::PickingSlot(state) => {
                let output = match key {
                    KeyCode::Char('q' | 's') | KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char('k') | KeyCode::Up => state.handle_input(SlotInput::Up),
                    KeyCode::Char('j') | KeyCode::Down => state.handle_input(SlotInput::Down),
                    KeyCode::Char(' ') | KeyCode::Enter => state.handle_input(SlotInput::Enter),
                    _ => SlotOutput::Invalid,
                };
                match output {
                    SlotOutput::Ok => true,
                    SlotOutput::Invalid => false,
                    SlotOutput::Choose(i) => {
                        log::debug!("Selected time slot {}", self.slots[i]);
                        self.slot = Some(i);
                        self.state = AppState::Calendar;
                        true
                    }
                }
            }
            AppState::Filling => {
                let input = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Tab | KeyCode::Down => FormInput::NextField,
                    KeyCode::BackTab | KeyCode::Up => FormInput::PreviousField,
                    KeyCode::Right => FormInput::NextChoice,
                    KeyCode::Left => FormInput::PreviousChoice,
                    KeyCode::Backspace => FormInput::Backspace,
                    KeyCode::Enter => FormInput::Submit,
                    KeyCode::Char(c) => FormInput::Char(c),
                    _ => return false,
                };
                match self.form.handle_input(input) {
                    FormOutput::Ok => true,
                    FormOutput::Invalid => false,
                    FormOutput::Submit => self.submit(),
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn chosen_slot(&self) -> Option<TimeSlot> {
        self.slot.and_then(|i| self.slots.get(i)).copied()
    }

    /// Move "today" forward (or back) when the local date changes while the
    /// app is open, recomputing which days are available
    fn set_today(&mut self, today: Date) {
        if today != self.today {
            log::info!("Date changed from {} to {today}", self.today);
            self.today = today;
            self.set_cursor(self.grid.cursor());
        }
    }

    /// Display the month at `cursor`, building a fresh grid for it
    fn set_cursor(&mut self, cursor: MonthCursor) -> bool {
        match build_grid(cursor, self.today, &self.rule) {
            Ok(grid) => {
                log::debug!("Displaying {cursor}");
                self.grid = grid;
                true
            }
            Err(e) => {
                log::debug!("Cannot display {cursor}: {e}");
                false
            }
        }
    }

    fn focus_on(&mut self, date: Date) -> bool {
        let cursor = MonthCursor::containing(date);
        if cursor != self.grid.cursor() && !self.set_cursor(cursor) {
            return false;
        }
        self.focus = date;
        true
    }

    fn move_focus(&mut self, delta: Duration) -> bool {
        match self.focus.checked_add(delta) {
            Some(date) => self.focus_on(date),
            None => false,
        }
    }

    fn shift_month(&mut self, forwards: bool) -> bool {
        let current = self.grid.cursor();
        let cursor = if forwards {
            current.next()
        } else {
            current.previous()
        };
        let Ok(cursor) = cursor else {
            return false;
        };
        if !self.set_cursor(cursor) {
            return false;
        }
        // Keep the focused day of the month, or as close to it as the new
        // month allows
        let last = self.grid.last_day_of_month();
        self.focus = last
            .replace_day(self.focus.day().min(last.day()))
            .unwrap_or(last);
        true
    }

    fn jump_to(&mut self, cursor: MonthCursor) -> bool {
        if self.set_cursor(cursor) {
            self.focus = cursor.first_day();
            true
        } else {
            false
        }
    }

    fn reset(&mut self) -> bool {
        self.focus_on(self.today)
    }

    fn select(&mut self) -> bool {
        match self.grid.get(self.focus) {
            Some(day) if !day.is_disabled => {
                log::debug!("Selected {}", day.date);
                self.selected = Some(day.date);
                true
            }
            _ => {
                log::debug!("Ignoring selection of unavailable day {}", self.focus);
                false
            }
        }
    }

    fn booking_request(&self) -> Result<BookingRequest, BookingError> {
        BookingRequest::validate(
            self.selected,
            self.chosen_slot(),
            self.form.details(),
            self.today,
            &self.rule,
        )
    }

    fn submit(&mut self) -> bool {
        match self.booking_request() {
            Ok(request) => {
                self.form = BookingForm::new();
                self.state = AppState::Confirmed(request.submit());
                true
            }
            Err(e) => {
                log::debug!("Booking request rejected: {e}");
                self.form.set_error(Some(e.to_string()));
                false
            }
        }
    }

    fn when(&self) -> String {
        let date = self
            .selected
            .map_or_else(|| String::from("(no date)"), display_date);
        let slot = self
            .chosen_slot()
            .map_or_else(|| String::from("(no time)"), |s| s.to_string());
        format!("{date} at {slot}")
    }

    fn status_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::from_iter([
                Span::styled("Booking: ", LABEL_STYLE),
                Span::styled(self.when(), BASE_STYLE),
            ]),
            Line::styled(HINT, HINT_STYLE),
        ])
        .centered()
    }
}

impl<R: DisabledRule> Widget for &mut App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, _, status_area] = Layout::vertical([
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);
        MonthView::new(&self.grid, self.today)
            .selected(self.selected)
            .focus(self.focus)
            .render(cal_area, buf);
        self.status_text().render(status_area, buf);
        let when = self.when();
        match &mut self.state {
            AppState::Calendar | AppState::Quitting => (),
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Jumping(state) => JumpTo.render(area, buf, state),
            AppState::PickingSlot(state) => SlotPicker::new(&self.slots).render(area, buf, state),
            AppState::Filling => BookingFormPopup::new(&when).render(area, buf, &mut self.form),
            AppState::Confirmed(confirmation) => ConfirmationPopup(confirmation).render(area, buf),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    PickingSlot(SlotPickerState),
    Filling,
    Confirmed(Confirmation),
    Quitting,
}
