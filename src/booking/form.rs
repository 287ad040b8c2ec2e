use super::{ContactDetails, BODY_PLACEMENTS, ESTIMATED_DURATIONS, TATTOO_STYLES};
use crate::theme::{
    popup::{ACTIVE_ITEM_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE, ERROR_STYLE, HINT_STYLE, LABEL_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 64;

/// Width reserved for field labels, including the trailing colon and space
const LABEL_WIDTH: usize = 21;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BookingFormPopup<'a> {
    /// Summary of the chosen date & time slot, shown above the fields
    when: &'a str,
}

impl<'a> BookingFormPopup<'a> {
    pub(crate) fn new(when: &'a str) -> Self {
        BookingFormPopup { when }
    }
}

impl StatefulWidget for BookingFormPopup<'_> {
    type State = BookingForm;

    /*
     * ................................
     * .┌──── Booking Request ───────┐.
     * .│When: ...                   │.
     * .│                            │.
     * .│  Full Name *:  ...         │.
     * .│   ...                      │.
     * .│                            │.
     * .│<error or hint>             │.
     * .└────────────────────────────┘.
     * ................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let text = state.to_text(self.when);
        let outer_height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.height);
        let [outer_area] = Layout::horizontal([OUTER_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([outer_height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Booking Request ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(block_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Field {
    Name,
    Email,
    Phone,
    Style,
    Duration,
    Placement,
    Message,
}

impl Field {
    const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Style,
        Field::Duration,
        Field::Placement,
        Field::Message,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name *",
            Field::Email => "Email *",
            Field::Phone => "Phone Number",
            Field::Style => "Preferred Style",
            Field::Duration => "Estimated Duration",
            Field::Placement => "Body Placement",
            Field::Message => "Additional Details",
        }
    }

    fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Field::Style => Some(TATTOO_STYLES),
            Field::Duration => Some(ESTIMATED_DURATIONS),
            Field::Placement => Some(BODY_PLACEMENTS),
            _ => None,
        }
    }

    fn position(self) -> usize {
        Field::ALL
            .iter()
            .position(|&f| f == self)
            .expect("every field should be in Field::ALL")
    }

    fn next(self) -> Field {
        Field::ALL[(self.position() + 1) % Field::ALL.len()]
    }

    fn previous(self) -> Field {
        Field::ALL[(self.position() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct BookingForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    style: Option<usize>,
    duration: Option<usize>,
    placement: Option<usize>,
    active: usize,
    error: Option<String>,
}

impl BookingForm {
    pub(crate) fn new() -> BookingForm {
        BookingForm::default()
    }

    fn active(&self) -> Field {
        Field::ALL[self.active]
    }

    pub(crate) fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub(crate) fn details(&self) -> ContactDetails {
        ContactDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            style: pick(TATTOO_STYLES, self.style),
            duration: pick(ESTIMATED_DURATIONS, self.duration),
            placement: pick(BODY_PLACEMENTS, self.placement),
            message: self.message.clone(),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Message => Some(&mut self.message),
            _ => None,
        }
    }

    fn choice_mut(&mut self, field: Field) -> Option<&mut Option<usize>> {
        match field {
            Field::Style => Some(&mut self.style),
            Field::Duration => Some(&mut self.duration),
            Field::Placement => Some(&mut self.placement),
            _ => None,
        }
    }

    fn value(&self, field: Field) -> Option<&str> {
        let s = match field {
            Field::Name => self.name.as_str(),
            Field::Email => self.email.as_str(),
            Field::Phone => self.phone.as_str(),
            Field::Message => self.message.as_str(),
            Field::Style => return pick(TATTOO_STYLES, self.style),
            Field::Duration => return pick(ESTIMATED_DURATIONS, self.duration),
            Field::Placement => return pick(BODY_PLACEMENTS, self.placement),
        };
        (!s.is_empty()).then_some(s)
    }

    pub(crate) fn handle_input(&mut self, input: FormInput) -> FormOutput {
        let field = self.active();
        match input {
            FormInput::Char(c) => match self.text_mut(field) {
                Some(s) if !c.is_control() => {
                    s.push(c);
                    FormOutput::Ok
                }
                _ => FormOutput::Invalid,
            },
            FormInput::Backspace => {
                if self.text_mut(field).and_then(String::pop).is_some() {
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            FormInput::NextField => {
                self.active = field.next().position();
                FormOutput::Ok
            }
            FormInput::PreviousField => {
                self.active = field.previous().position();
                FormOutput::Ok
            }
            FormInput::NextChoice => {
                let Some(len) = field.choices().map(<[_]>::len) else {
                    return FormOutput::Invalid;
                };
                if let Some(choice) = self.choice_mut(field) {
                    // None -> 0 -> 1 -> ... -> len-1 -> None
                    *choice = match *choice {
                        None => Some(0),
                        Some(i) if i + 1 < len => Some(i + 1),
                        Some(_) => None,
                    };
                }
                FormOutput::Ok
            }
            FormInput::PreviousChoice => {
                let Some(len) = field.choices().map(<[_]>::len) else {
                    return FormOutput::Invalid;
                };
                if let Some(choice) = self.choice_mut(field) {
                    *choice = match *choice {
                        None => len.checked_sub(1),
                        Some(0) => None,
                        Some(i) => Some(i - 1),
                    };
                }
                FormOutput::Ok
            }
            FormInput::Submit => FormOutput::Submit,
        }
    }

    fn to_text(&self, when: &str) -> Text<'static> {
        let mut lines = vec![
            Line::from_iter([
                Span::styled("When: ", LABEL_STYLE),
                Span::styled(when.to_owned(), BASE_STYLE),
            ]),
            Line::styled("", BASE_STYLE),
        ];
        let active = self.active();
        for field in Field::ALL {
            let label = format!("{:>width$}: ", field.label(), width = LABEL_WIDTH - 2);
            let value = match (self.value(field), field.choices()) {
                (Some(v), Some(_)) => Span::styled(format!("< {v} >"), BASE_STYLE),
                (None, Some(_)) => Span::styled("< none >", UNFILLED_CELL_STYLE),
                (Some(v), None) => Span::styled(v.to_owned(), BASE_STYLE),
                (None, None) => Span::styled("", BASE_STYLE),
            };
            let label = if field == active {
                Span::styled(label, ACTIVE_ITEM_STYLE)
            } else {
                Span::styled(label, LABEL_STYLE)
            };
            lines.push(Line::from_iter([label, value]));
        }
        lines.push(Line::styled("", BASE_STYLE));
        lines.push(match &self.error {
            Some(e) => Line::styled(format!("Error: {e}"), ERROR_STYLE),
            None => Line::styled(
                "TAB/UP/DOWN: field  LEFT/RIGHT: choice  ENTER: submit  ESC: cancel",
                HINT_STYLE,
            ),
        });
        Text::from(lines)
    }
}

fn pick(choices: &'static [&'static str], index: Option<usize>) -> Option<&'static str> {
    index.and_then(|i| choices.get(i)).copied()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormInput {
    Char(char),
    Backspace,
    NextField,
    PreviousField,
    NextChoice,
    PreviousChoice,
    Submit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormOutput {
    Ok,
    Invalid,
    Submit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut BookingForm, s: &str) {
        for c in s.chars() {
            assert_eq!(form.handle_input(FormInput::Char(c)), FormOutput::Ok);
        }
    }

    #[test]
    fn test_fill_in_text_fields() {
        let mut form = BookingForm::new();
        type_str(&mut form, "Ada");
        assert_eq!(form.handle_input(FormInput::NextField), FormOutput::Ok);
        type_str(&mut form, "ada@example.comm");
        assert_eq!(form.handle_input(FormInput::Backspace), FormOutput::Ok);
        let details = form.details();
        assert_eq!(details.name, "Ada");
        assert_eq!(details.email, "ada@example.com");
        assert_eq!(details.phone, "");
        assert_eq!(details.style, None);
    }

    #[test]
    fn test_backspace_on_empty_field() {
        let mut form = BookingForm::new();
        assert_eq!(form.handle_input(FormInput::Backspace), FormOutput::Invalid);
    }

    #[test]
    fn test_cycle_choices() {
        let mut form = BookingForm::new();
        for _ in 0..3 {
            form.handle_input(FormInput::NextField);
        }
        assert_eq!(form.active(), Field::Style);
        assert_eq!(form.handle_input(FormInput::Char('x')), FormOutput::Invalid);
        assert_eq!(form.handle_input(FormInput::NextChoice), FormOutput::Ok);
        assert_eq!(form.details().style, Some("Blackwork"));
        form.handle_input(FormInput::NextChoice);
        assert_eq!(form.details().style, Some("Realism"));
        form.handle_input(FormInput::PreviousChoice);
        form.handle_input(FormInput::PreviousChoice);
        assert_eq!(form.details().style, None);
        form.handle_input(FormInput::PreviousChoice);
        assert_eq!(form.details().style, Some("Custom Design"));
        form.handle_input(FormInput::NextChoice);
        assert_eq!(form.details().style, None);
    }

    #[test]
    fn test_choice_on_text_field() {
        let mut form = BookingForm::new();
        assert_eq!(form.handle_input(FormInput::NextChoice), FormOutput::Invalid);
    }

    #[test]
    fn test_field_wraparound() {
        let mut form = BookingForm::new();
        form.handle_input(FormInput::PreviousField);
        assert_eq!(form.active(), Field::Message);
        form.handle_input(FormInput::NextField);
        assert_eq!(form.active(), Field::Name);
    }

    #[test]
    fn test_submit() {
        let mut form = BookingForm::new();
        assert_eq!(form.handle_input(FormInput::Submit), FormOutput::Submit);
    }
}
