use std::io::{self, IsTerminal};

use clap::{Parser, Subcommand};
use skycast_core::client::WeatherClient;
use skycast_core::prefs::{PrefStore, Theme};

use crate::session::Session;
use crate::view::{phase_message, View};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Current weather in the terminal, via Open-Meteo"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look a city up once and print the current weather.
    Show {
        /// City name, e.g. "Paris".
        city: String,

        /// Print the report as JSON instead of the card.
        #[arg(long)]
        json: bool,
    },

    /// Show or change the color theme.
    Theme {
        /// "light" or "dark"; prints the current theme when absent.
        theme: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => interactive().await,
            Some(Command::Show { city, json }) => show(&city, json).await,
            Some(Command::Theme { theme }) => switch_theme(theme.as_deref()),
        }
    }
}

/// Default mode: the prompt session, themed from saved preferences.
async fn interactive() -> anyhow::Result<()> {
    let store = PrefStore::open();
    let view = View::new(io::stdout(), Theme::default(), io::stdout().is_terminal());
    Session::new(WeatherClient::new(), store, view).run().await
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let store = PrefStore::open();
    let client = WeatherClient::new();

    if json {
        let report = client.lookup(city).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        store.save_city(city.trim());
        return Ok(());
    }

    let on_terminal = io::stdout().is_terminal();
    let mut view = View::new(io::stdout(), store.load().theme, on_terminal);

    // Progress lines are terminal-only; piped output carries the card alone.
    let outcome = if on_terminal {
        client
            .lookup_with(city, |phase| {
                let _ = view.show_busy(phase_message(phase));
            })
            .await
    } else {
        client.lookup(city).await
    };

    match outcome {
        Ok(report) => {
            view.show_result(&report)?;
            store.save_city(city.trim());
            Ok(())
        }
        Err(err) => {
            view.show_error(&err.to_string())?;
            std::process::exit(1);
        }
    }
}

fn switch_theme(requested: Option<&str>) -> anyhow::Result<()> {
    let store = PrefStore::open();

    let theme = match requested {
        Some(name) => {
            let theme = Theme::try_from(name)?;
            store.save_theme(theme);
            theme
        }
        None => store.load().theme,
    };

    let mut view = View::new(io::stdout(), theme, io::stdout().is_terminal());
    view.show_theme(theme)?;
    if let Some(path) = store.path() {
        view.show_note(&format!("Preferences file: {}", path.display()))?;
    }
    Ok(())
}
