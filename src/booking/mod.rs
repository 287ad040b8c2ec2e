mod confirm;
mod form;
pub(crate) use self::confirm::ConfirmationPopup;
pub(crate) use self::form::{BookingForm, BookingFormPopup, FormInput, FormOutput};
use crate::calendar::DisabledRule;
use std::fmt;
use thiserror::Error;
use time::{
    format_description::FormatItem,
    macros::{format_description, time},
    Date, Time,
};

static SLOT_DISPLAY_FMT: &[FormatItem<'_>] =
    format_description!("[hour repr:12]:[minute] [period]");

static SLOT_PARSE_FMT: &[FormatItem<'_>] = format_description!("[hour]:[minute]");

static DATE_DISPLAY_FMT: &[FormatItem<'_>] =
    format_description!("[weekday repr:short] [year]-[month]-[day]");

const DEFAULT_SLOTS: [Time; 9] = [
    time!(9:00),
    time!(10:00),
    time!(11:00),
    time!(12:00),
    time!(13:00),
    time!(14:00),
    time!(15:00),
    time!(16:00),
    time!(17:00),
];

pub(crate) static TATTOO_STYLES: &[&str] = &[
    "Blackwork",
    "Realism",
    "Minimalist",
    "Japanese (Irezumi)",
    "Watercolor",
    "Traditional (American)",
    "Custom Design",
];

pub(crate) static ESTIMATED_DURATIONS: &[&str] = &[
    "1-2 hours",
    "2-4 hours",
    "4-6 hours",
    "6-8 hours",
    "8+ hours",
];

pub(crate) static BODY_PLACEMENTS: &[&str] = &[
    "Arm", "Leg", "Back", "Chest", "Shoulder", "Rib", "Ankle", "Wrist", "Other",
];

pub(crate) static CONFIRMATION_MESSAGE: &str =
    "Booking request submitted successfully! We will contact you soon.";

/// A bookable starting time within a day
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct TimeSlot(Time);

impl TimeSlot {
    /// Parse a 24-hour `HH:MM` time
    pub(crate) fn parse(s: &str) -> Result<TimeSlot, time::error::Parse> {
        Time::parse(s, &SLOT_PARSE_FMT).map(TimeSlot)
    }

    pub(crate) fn defaults() -> Vec<TimeSlot> {
        DEFAULT_SLOTS.into_iter().map(TimeSlot).collect()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(s) = self.0.format(&SLOT_DISPLAY_FMT) else {
            return Err(fmt::Error);
        };
        f.write_str(&s)
    }
}

pub(crate) fn display_date(date: Date) -> String {
    date.format(&DATE_DISPLAY_FMT)
        .unwrap_or_else(|_| date.to_string())
}

/// Everything the customer types into the booking form
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ContactDetails {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) style: Option<&'static str>,
    pub(crate) duration: Option<&'static str>,
    pub(crate) placement: Option<&'static str>,
    pub(crate) message: String,
}

/// A validated booking request
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BookingRequest {
    date: Date,
    slot: TimeSlot,
    details: ContactDetails,
}

impl BookingRequest {
    /// Check a prospective booking.  The date is re-checked against `rule`
    /// here regardless of what the calendar allowed to be selected.
    pub(crate) fn validate<R: DisabledRule>(
        date: Option<Date>,
        slot: Option<TimeSlot>,
        mut details: ContactDetails,
        today: Date,
        rule: &R,
    ) -> Result<BookingRequest, BookingError> {
        let date = date.ok_or(BookingError::NoDate)?;
        if rule.is_disabled(date, today) {
            return Err(BookingError::DateUnavailable(date));
        }
        let slot = slot.ok_or(BookingError::NoTimeSlot)?;
        details.name = details.name.trim().to_owned();
        details.email = details.email.trim().to_owned();
        details.phone = details.phone.trim().to_owned();
        details.message = details.message.trim().to_owned();
        if details.name.is_empty() {
            return Err(BookingError::MissingName);
        }
        if details.email.is_empty() {
            return Err(BookingError::MissingEmail);
        }
        if !is_plausible_email(&details.email) {
            return Err(BookingError::InvalidEmail(details.email));
        }
        Ok(BookingRequest {
            date,
            slot,
            details,
        })
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub(crate) fn details(&self) -> &ContactDetails {
        &self.details
    }

    /// There is no studio backend; "submitting" a request just records it in
    /// the log and hands back a confirmation for display.
    pub(crate) fn submit(self) -> Confirmation {
        log::info!(
            "Booking submitted: date={}, time={}, name={:?}, email={:?}, phone={:?}, style={:?}, duration={:?}, placement={:?}, message={:?}",
            self.date,
            self.slot,
            self.details.name,
            self.details.email,
            self.details.phone,
            self.details.style,
            self.details.duration,
            self.details.placement,
            self.details.message,
        );
        Confirmation { request: self }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Confirmation {
    request: BookingRequest,
}

impl Confirmation {
    pub(crate) fn lines(&self) -> Vec<String> {
        let r = &self.request;
        let d = r.details();
        let mut lines = vec![
            CONFIRMATION_MESSAGE.to_owned(),
            String::new(),
            format!("When:  {} at {}", display_date(r.date()), r.slot()),
            format!("Name:  {}", d.name),
            format!("Email: {}", d.email),
        ];
        if !d.phone.is_empty() {
            lines.push(format!("Phone: {}", d.phone));
        }
        for (label, value) in [
            ("Style", d.style),
            ("Duration", d.duration),
            ("Placement", d.placement),
        ] {
            if let Some(v) = value {
                lines.push(format!("{label}: {v}"));
            }
        }
        if !d.message.is_empty() {
            lines.push(format!("Details: {}", d.message));
        }
        lines
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum BookingError {
    #[error("no date selected")]
    NoDate,
    #[error("{0} is not available")]
    DateUnavailable(Date),
    #[error("no time slot selected")]
    NoTimeSlot,
    #[error("full name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

fn is_plausible_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
