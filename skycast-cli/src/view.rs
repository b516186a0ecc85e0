//! Terminal rendering for lookup status, results and errors.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Stylize};
use skycast_core::client::LookupPhase;
use skycast_core::lexicon;
use skycast_core::model::WeatherReport;
use skycast_core::prefs::Theme;

/// Status line for a lookup phase.
pub fn phase_message(phase: LookupPhase) -> &'static str {
    match phase {
        LookupPhase::Geocoding => "Looking up…",
        LookupPhase::FetchingForecast => "Fetching weather…",
    }
}

struct Palette {
    accent: Color,
    muted: Color,
    error: Color,
    value: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Cyan,
            muted: Color::DarkGrey,
            error: Color::Red,
            value: Color::White,
        },
        Theme::Light => Palette {
            accent: Color::Blue,
            muted: Color::Grey,
            error: Color::DarkRed,
            value: Color::Black,
        },
    }
}

/// Writer-backed view. With `styled` off it prints plain text, for pipes
/// and tests.
pub struct View<W: Write> {
    out: W,
    theme: Theme,
    styled: bool,
    card_on_screen: bool,
}

impl<W: Write> View<W> {
    pub fn new(out: W, theme: Theme, styled: bool) -> Self {
        Self {
            out,
            theme,
            styled,
            card_on_screen: false,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Transient progress line, e.g. `Looking up…`.
    pub fn show_busy(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(message, palette(self.theme).muted, false);
        writeln!(self.out, "{line}")
    }

    /// Muted side note, e.g. where preferences live on disk.
    pub fn show_note(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(message, palette(self.theme).muted, false);
        writeln!(self.out, "{line}")
    }

    /// Complaint about the input itself, shown without an `Error:` prefix.
    pub fn show_warning(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(message, palette(self.theme).error, false);
        writeln!(self.out, "{line}")
    }

    /// Failed lookup.
    pub fn show_error(&mut self, message: &str) -> io::Result<()> {
        let line = self.paint(&format!("Error: {message}"), palette(self.theme).error, false);
        writeln!(self.out, "{line}")
    }

    /// The result card: place, conditions, temperature, wind, observation time.
    pub fn show_result(&mut self, report: &WeatherReport) -> io::Result<()> {
        let colors = palette(self.theme);

        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}",
            self.paint(&report.place.label(), colors.accent, true)
        )?;
        writeln!(
            self.out,
            "{}",
            self.paint(
                &lexicon::describe(report.current.weather_code).to_string(),
                colors.value,
                false
            )
        )?;
        writeln!(
            self.out,
            "{}",
            self.paint(
                &format_temperature(report.current.temperature_c),
                colors.value,
                true
            )
        )?;
        writeln!(
            self.out,
            "{}",
            self.paint(
                &format!("Wind: {} m/s", report.current.wind_speed_mps),
                colors.value,
                false
            )
        )?;
        writeln!(
            self.out,
            "{}",
            self.paint(
                &report
                    .current
                    .observed_at
                    .format("Observed at %Y-%m-%d %H:%M UTC")
                    .to_string(),
                colors.muted,
                false
            )
        )?;
        self.card_on_screen = true;
        Ok(())
    }

    /// Closes out a rendered card with a separating blank line. Does nothing
    /// when no card has been shown since the last call.
    pub fn clear_result(&mut self) -> io::Result<()> {
        if self.card_on_screen {
            self.card_on_screen = false;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Theme banner, e.g. `🌙 dark theme`.
    pub fn show_theme(&mut self, theme: Theme) -> io::Result<()> {
        let line = self.paint(
            &format!("{} {} theme", theme.icon(), theme),
            palette(self.theme).accent,
            false,
        );
        writeln!(self.out, "{line}")
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.styled {
            return text.to_string();
        }
        let styled = text.with(color);
        let styled = if bold {
            styled.attribute(Attribute::Bold)
        } else {
            styled
        };
        styled.to_string()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// Rounds to whole degrees, halfway values toward positive infinity.
fn format_temperature(temperature_c: f64) -> String {
    let rounded = (temperature_c + 0.5).floor();
    format!("{rounded} °C")
}
