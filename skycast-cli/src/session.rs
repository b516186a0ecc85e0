//! Interactive lookup loop around an [`inquire`] prompt.

use std::io::Write;

use anyhow::Result;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Text};
use skycast_core::client::WeatherClient;
use skycast_core::prefs::{PrefStore, Theme};

use crate::view::{phase_message, View};

const HELP_MESSAGE: &str = "/theme switches colors, /quit or Esc exits";

/// One submitted prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    Blank,
    City(String),
    ToggleTheme,
    Quit,
    Unknown(String),
}

fn parse_submission(input: &str) -> Submission {
    let input = input.trim();
    if input.is_empty() {
        return Submission::Blank;
    }
    match input {
        "/theme" | "/t" => Submission::ToggleTheme,
        "/quit" | "/q" => Submission::Quit,
        _ if input.starts_with('/') => Submission::Unknown(input.to_string()),
        _ => Submission::City(input.to_string()),
    }
}

/// Prompt-lookup-render loop. Restores the saved theme and city on start,
/// looks the saved city up right away, and keeps prompting until the user
/// quits.
pub struct Session<W: Write> {
    client: WeatherClient,
    store: PrefStore,
    view: View<W>,
}

impl<W: Write> Session<W> {
    pub fn new(client: WeatherClient, store: PrefStore, view: View<W>) -> Self {
        Self {
            client,
            store,
            view,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let prefs = self.store.load();
        self.view.set_theme(prefs.theme);

        let mut initial = prefs.last_city.unwrap_or_default();
        if !initial.is_empty() {
            self.run_lookup(&initial).await?;
        }

        loop {
            self.view.clear_result()?;

            let submitted = Text::new("City")
                .with_render_config(render_config(self.view.theme()))
                .with_initial_value(&initial)
                .with_help_message(HELP_MESSAGE)
                .prompt();

            let line = match submitted {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            };

            match parse_submission(&line) {
                Submission::Blank => self.view.show_warning("Enter a city")?,
                Submission::City(city) => {
                    self.run_lookup(&city).await?;
                    initial = city;
                }
                Submission::ToggleTheme => self.toggle_theme()?,
                Submission::Quit => break,
                Submission::Unknown(command) => self
                    .view
                    .show_warning(&format!("Unknown command: {command}"))?,
            }
        }

        Ok(())
    }

    /// Runs one lookup and renders the outcome. Lookup failures end up on
    /// the view, not in the returned `Result`; only I/O failures propagate.
    async fn run_lookup(&mut self, city: &str) -> Result<()> {
        let outcome = self
            .client
            .lookup_with(city, |phase| {
                let _ = self.view.show_busy(phase_message(phase));
            })
            .await;

        match outcome {
            Ok(report) => {
                self.view.show_result(&report)?;
                self.store.save_city(city.trim());
            }
            Err(err) => self.view.show_error(&err.to_string())?,
        }

        Ok(())
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let next = self.view.theme().toggle();
        self.view.set_theme(next);
        self.store.save_theme(next);
        self.view.show_theme(next)?;
        Ok(())
    }
}

fn render_config(theme: Theme) -> RenderConfig<'static> {
    let color = match theme {
        Theme::Dark => Color::LightCyan,
        Theme::Light => Color::DarkYellow,
    };
    RenderConfig::default().with_prompt_prefix(Styled::new(theme.icon()).with_fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn submissions_are_trimmed_and_classified() {
        assert_eq!(parse_submission(""), Submission::Blank);
        assert_eq!(parse_submission("   "), Submission::Blank);
        assert_eq!(
            parse_submission(" Paris "),
            Submission::City("Paris".to_string())
        );
        assert_eq!(
            parse_submission("Den Haag"),
            Submission::City("Den Haag".to_string())
        );
        assert_eq!(parse_submission("/theme"), Submission::ToggleTheme);
        assert_eq!(parse_submission("/t"), Submission::ToggleTheme);
        assert_eq!(parse_submission("/quit"), Submission::Quit);
        assert_eq!(parse_submission("/q"), Submission::Quit);
        assert_eq!(
            parse_submission("/frobnicate"),
            Submission::Unknown("/frobnicate".to_string())
        );
    }

    fn test_session(
        geocoding: &MockServer,
        forecast: &MockServer,
        dir: &TempDir,
    ) -> Session<Vec<u8>> {
        let client = WeatherClient::with_endpoints(
            format!("{}/v1/search", geocoding.uri()),
            format!("{}/v1/forecast", forecast.uri()),
        );
        let store = PrefStore::at(dir.path().join("prefs.toml"));
        Session::new(client, store, View::new(Vec::new(), Theme::Dark, false))
    }

    async fn mount_paris(geocoding: &MockServer, forecast: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {
                        "name": "Paris",
                        "country": "France",
                        "latitude": 48.8566,
                        "longitude": 2.3522
                    }
                ]
            })))
            .mount(geocoding)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": {
                    "temperature": 17.3,
                    "windspeed": 4.2,
                    "winddirection": 230.0,
                    "weathercode": 2,
                    "time": 1_700_000_000
                }
            })))
            .mount(forecast)
            .await;
    }

    #[tokio::test]
    async fn successful_lookup_remembers_the_submitted_city() {
        let geocoding = MockServer::start().await;
        let forecast = MockServer::start().await;
        mount_paris(&geocoding, &forecast).await;
        let dir = TempDir::new().unwrap();
        let mut session = test_session(&geocoding, &forecast, &dir);

        session.run_lookup(" Paris ").await.unwrap();

        assert_eq!(session.store.load().last_city.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn failed_lookup_keeps_the_previously_saved_city() {
        let geocoding = MockServer::start().await;
        let forecast = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&geocoding)
            .await;

        let dir = TempDir::new().unwrap();
        let mut session = test_session(&geocoding, &forecast, &dir);
        session.store.save_city("Oslo");

        session.run_lookup("Paris").await.unwrap();

        assert_eq!(session.store.load().last_city.as_deref(), Some("Oslo"));
    }

    #[tokio::test]
    async fn toggling_the_theme_persists_and_restyles_the_view() {
        let geocoding = MockServer::start().await;
        let forecast = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let mut session = test_session(&geocoding, &forecast, &dir);

        session.toggle_theme().unwrap();

        assert_eq!(session.view.theme(), Theme::Light);
        assert_eq!(session.store.load().theme, Theme::Light);
    }
}
