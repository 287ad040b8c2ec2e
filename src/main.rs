mod app;
mod booking;
mod calendar;
mod config;
mod help;
mod jumpto;
mod slots;
mod theme;
use crate::app::App;
use crate::config::{StudioConfig, YMD_FMT};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                log_file,
            } => {
                let _logger = log_file.map(init_logging).transpose()?;
                let config = StudioConfig::load(config.as_deref())
                    .context("failed to load studio configuration")?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                log::info!("Starting inkbook; today is {today}");
                let app = App::new(
                    local_today,
                    today,
                    date.unwrap_or(today),
                    config.disabled_rule(),
                    config.time_slots,
                )
                .context("starting date is too close to the end of time")?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: inkbook [<options>] [YYYY-MM-DD]");
                println!();
                println!("Terminal booking calendar for a tattoo studio");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Read studio configuration from the given file");
                println!("      --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// Logging is only enabled when a log file is given, as anything written to
// stderr would garble the calendar display.
fn init_logging(log_file: PathBuf) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(log_file)?)
        .append()
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}

fn local_today() -> Option<Date> {
    match OffsetDateTime::now_local() {
        Ok(now) => Some(now.date()),
        Err(e) => {
            log::warn!("Failed to determine local date: {e}");
            None
        }
    }
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
