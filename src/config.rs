use crate::booking::TimeSlot;
use crate::calendar::{studio_rule, Blackout, ClosedWeekdays, StudioRule};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const CONFIG_PATH_ENV_VAR: &str = "INKBOOK_CONFIG";

/// The studio's opening days & hours
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StudioConfig {
    pub(crate) closed_weekdays: Vec<Weekday>,
    pub(crate) blackout_dates: BTreeSet<Date>,
    pub(crate) time_slots: Vec<TimeSlot>,
}

impl Default for StudioConfig {
    fn default() -> StudioConfig {
        StudioConfig {
            closed_weekdays: vec![Weekday::Sunday],
            blackout_dates: BTreeSet::new(),
            time_slots: TimeSlot::defaults(),
        }
    }
}

impl StudioConfig {
    /// Load the configuration from `path` if given (in which case the file
    /// must exist); otherwise, try the default locations in order and fall
    /// back to the built-in defaults if none exist.
    pub(crate) fn load(path: Option<&Path>) -> Result<StudioConfig, ConfigError> {
        match path {
            Some(p) => StudioConfig::from_file(p),
            None => StudioConfig::load_first(default_locations(env::var_os)),
        }
    }

    /// Load the first of `locations` that exists
    fn load_first(locations: Vec<PathBuf>) -> Result<StudioConfig, ConfigError> {
        for p in locations {
            match fs::read_to_string(&p) {
                Ok(s) => {
                    log::info!("Loading configuration from {}", p.display());
                    return StudioConfig::from_toml_str(&s).map_err(|e| e.at(&p));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at {}", p.display());
                }
                Err(source) => return Err(ConfigError::Read { path: p, source }),
            }
        }
        log::info!("No configuration file found; using defaults");
        Ok(StudioConfig::default())
    }

    fn from_file(path: &Path) -> Result<StudioConfig, ConfigError> {
        log::info!("Loading configuration from {}", path.display());
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        StudioConfig::from_toml_str(&s).map_err(|e| e.at(path))
    }

    pub(crate) fn from_toml_str(s: &str) -> Result<StudioConfig, ConfigError> {
        let raw = toml::from_str::<RawConfig>(s).map_err(|e| ConfigError::Toml(Box::new(e)))?;
        let mut config = StudioConfig::default();
        if let Some(days) = raw.closed_weekdays {
            config.closed_weekdays = days
                .iter()
                .map(|s| parse_weekday(s))
                .collect::<Result<_, _>>()?;
        }
        if let Some(dates) = raw.blackout_dates {
            config.blackout_dates = dates
                .into_iter()
                .map(|s| Date::parse(&s, &YMD_FMT).map_err(|_| ConfigError::Date(s)))
                .collect::<Result<_, _>>()?;
        }
        if let Some(slots) = raw.time_slots {
            let mut slots = slots
                .into_iter()
                .map(|s| TimeSlot::parse(&s).map_err(|_| ConfigError::Time(s)))
                .collect::<Result<Vec<_>, _>>()?;
            if slots.is_empty() {
                return Err(ConfigError::NoSlots);
            }
            slots.sort_unstable();
            slots.dedup();
            config.time_slots = slots;
        }
        Ok(config)
    }

    pub(crate) fn disabled_rule(&self) -> StudioRule {
        studio_rule(
            ClosedWeekdays(self.closed_weekdays.clone()),
            Blackout(self.blackout_dates.clone()),
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    closed_weekdays: Option<Vec<String>>,
    blackout_dates: Option<Vec<String>>,
    time_slots: Option<Vec<String>>,
}

fn default_locations<F>(getenv: F) -> Vec<PathBuf>
where
    F: Fn(&'static str) -> Option<OsString>,
{
    let mut locations = Vec::new();
    if let Some(path) = getenv(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }
    if let Some(dir) = getenv("XDG_CONFIG_HOME") {
        locations.push(PathBuf::from_iter([
            PathBuf::from(dir),
            PathBuf::from("inkbook"),
            PathBuf::from("config.toml"),
        ]));
    } else if let Some(home) = getenv("HOME") {
        locations.push(PathBuf::from_iter([
            PathBuf::from(home),
            PathBuf::from(".config"),
            PathBuf::from("inkbook"),
            PathBuf::from("config.toml"),
        ]));
    }
    locations
}

fn parse_weekday(s: &str) -> Result<Weekday, ConfigError> {
    let wd = match s.trim().to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Weekday::Sunday,
        "mon" | "monday" => Weekday::Monday,
        "tue" | "tuesday" => Weekday::Tuesday,
        "wed" | "wednesday" => Weekday::Wednesday,
        "thu" | "thursday" => Weekday::Thursday,
        "fri" | "friday" => Weekday::Friday,
        "sat" | "saturday" => Weekday::Saturday,
        _ => return Err(ConfigError::Weekday(s.to_owned())),
    };
    Ok(wd)
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid configuration syntax")]
    Toml(#[source] Box<toml::de::Error>),
    #[error("invalid weekday {0:?}")]
    Weekday(String),
    #[error("invalid date {0:?}; expected YYYY-MM-DD")]
    Date(String),
    #[error("invalid time slot {0:?}; expected HH:MM")]
    Time(String),
    #[error("time_slots must not be empty")]
    NoSlots,
    #[error("error in {}", path.display())]
    InFile {
        path: PathBuf,
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    fn at(self, path: &Path) -> ConfigError {
        ConfigError::InFile {
            path: path.to_owned(),
            source: Box::new(self),
        }
    }
}
