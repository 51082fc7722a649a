use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use std::io::{self, Write};
use std::time::Duration;

use crate::error::CalendarError;
use crate::models::tracking_period::DEFAULT_LOCATION;
use crate::runtime::{CalendarSession, reveal_settled, run_show};
use crate::service::location_resolver;
use crate::view::host::{TerminalHost, VIEW_TYPE, ViewDescriptor, ViewHost};
use crate::view::render::progress_bar;

#[derive(Parser)]
#[command(name = "ramadan-calendar", about = "30-day fasting tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the calendar with dawn/sunset times
    Show,
    /// Advance one day through untracked -> completed -> makeup -> untracked
    Toggle { day: i64 },
    /// Print progress and day states without fetching times
    Status,
    /// Set the date of day 1 (YYYY-MM-DD)
    SetStart { date: String },
    /// Set the "City,Region" used for the times lookup
    SetLocation { location: String },
    /// List the known locations
    Locations,
    /// Interactive session
    Open,
}

pub async fn cli(
    cli: Cli,
    session: &mut CalendarSession,
    wait: Duration,
) -> Result<(), CalendarError> {
    let mut host = TerminalHost::new(io::stdout());
    match cli.command {
        Commands::Show => run_show(session, &mut host, wait).await?,
        Commands::Toggle { day } => {
            session.render_offline();
            let state = session.toggle(day).await?;
            println!("Day {}: {}", day, state);
            println!("{}", progress_bar(session.view().progress()));
        }
        Commands::Status => print_status(session),
        Commands::SetStart { date } => {
            let date = parse_start_date(&date)?;
            session.set_start_date(date).await?;
            println!("Start date set to {}", date.format("%Y-%m-%d"));
        }
        Commands::SetLocation { location } => {
            if !location_resolver::is_known(&location) {
                println!(
                    "Unknown location {:?}; times will use {}",
                    location.trim(),
                    DEFAULT_LOCATION
                );
            }
            session.set_location(&location).await?;
            println!("Location set to {}", location.trim());
        }
        Commands::Locations => {
            for name in location_resolver::known_locations() {
                println!("{}", name);
            }
        }
        Commands::Open => interactive(session, &mut host, wait).await?,
    }
    Ok(())
}

pub fn parse_start_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidStartDate(raw.to_string()))
}

fn print_status(session: &mut CalendarSession) {
    session.render_offline();
    let view = session.view();
    println!("{}", progress_bar(view.progress()));
    for cell in view.cells().iter().filter(|cell| cell.state.is_done()) {
        println!("{:>2} {:<7} {}", cell.day, cell.label, cell.state);
    }
}

const ACTION_TOGGLE: &str = "Toggle a day";
const ACTION_START: &str = "Change start date";
const ACTION_LOCATION: &str = "Change location";
const ACTION_REFRESH: &str = "Refresh";
const ACTION_QUIT: &str = "Quit";

async fn interactive<W: Write>(
    session: &mut CalendarSession,
    host: &mut TerminalHost<W>,
    wait: Duration,
) -> Result<(), CalendarError> {
    host.register_view(ViewDescriptor::calendar());
    session.render();

    loop {
        reveal_settled(session, host, wait).await?;

        let Some(action) = prompt(|| {
            Select::new(
                "What next?",
                vec![
                    ACTION_TOGGLE,
                    ACTION_START,
                    ACTION_LOCATION,
                    ACTION_REFRESH,
                    ACTION_QUIT,
                ],
            )
            .prompt()
            .map(str::to_string)
        })
        .await
        else {
            break;
        };

        match action.as_str() {
            ACTION_TOGGLE => {
                let Some(raw) = prompt(|| Text::new("Day (1-30):").prompt()).await else {
                    continue;
                };
                match raw.trim().parse::<i64>() {
                    Ok(day) => match session.toggle(day).await {
                        Ok(state) => println!("Day {}: {}", day, state),
                        Err(CalendarError::UnknownDay(day)) => {
                            println!("Day {} is not part of the calendar", day)
                        }
                        Err(err) => return Err(err),
                    },
                    Err(_) => println!("Not a day number: {:?}", raw.trim()),
                }
            }
            ACTION_START => {
                let Some(raw) = prompt(|| Text::new("Start date (YYYY-MM-DD):").prompt()).await
                else {
                    continue;
                };
                match parse_start_date(&raw) {
                    Ok(date) => {
                        session.set_start_date(date).await?;
                    }
                    Err(err) => println!("{}", err),
                }
            }
            ACTION_LOCATION => {
                let names: Vec<String> = location_resolver::known_locations()
                    .map(str::to_string)
                    .collect();
                let Some(location) =
                    prompt(move || Select::new("Location:", names).prompt()).await
                else {
                    continue;
                };
                session.set_location(&location).await?;
            }
            ACTION_REFRESH => {
                session.render();
            }
            _ => break,
        }
    }

    host.detach_views(VIEW_TYPE);
    Ok(())
}

/// Runs a blocking inquire prompt off the async runtime. Cancelled or failed
/// prompts read as `None`.
async fn prompt<T, F>(ask: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, inquire::InquireError> + Send + 'static,
{
    match tokio::task::spawn_blocking(ask).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "prompt ended");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "prompt task failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_date_must_be_iso() {
        assert_eq!(
            parse_start_date(" 2026-02-17 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()
        );
        assert!(matches!(
            parse_start_date("17/02/2026"),
            Err(CalendarError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn cli_parses_toggle_day() {
        let cli = Cli::try_parse_from(["ramadan-calendar", "toggle", "12"]).unwrap();
        assert!(matches!(cli.command, Commands::Toggle { day: 12 }));
    }
}
