use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Color theme for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The icon shown next to the theme name, matching the toggle label.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌞",
            Theme::Dark => "🌙",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!(
                "Unknown theme '{value}'. Supported themes: light, dark."
            )),
        }
    }
}

/// User preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Last city the user successfully looked up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_city: Option<String>,

    #[serde(default)]
    pub theme: Theme,
}

/// Best-effort store for [`Preferences`] on disk.
///
/// Persistence must never get in the way of a lookup: every operation absorbs
/// its own failures, logging them and falling back to defaults. A store
/// without a usable path (no platform config directory) stays inert.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: Option<PathBuf>,
}

impl PrefStore {
    /// Store at the platform config location, e.g.
    /// `~/.config/skycast/prefs.toml` on Linux.
    pub fn open() -> Self {
        match ProjectDirs::from("dev", "skycast", "skycast") {
            Some(dirs) => Self {
                path: Some(dirs.config_dir().join("prefs.toml")),
            },
            None => {
                tracing::warn!("no platform config directory; preferences will not persist");
                Self { path: None }
            }
        }
    }

    /// Store over an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Path of the preferences file, if the store has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load preferences, or defaults (dark theme, no city) when the file is
    /// missing or unreadable.
    pub fn load(&self) -> Preferences {
        self.read().unwrap_or_else(|err| {
            tracing::warn!("failed to load preferences: {err:#}");
            Preferences::default()
        })
    }

    /// Remember the last successfully looked-up city. Best-effort.
    pub fn save_city(&self, city: &str) {
        let mut prefs = self.load();
        prefs.last_city = Some(city.to_string());
        if let Err(err) = self.write(&prefs) {
            tracing::warn!("failed to save last city: {err:#}");
        }
    }

    /// Remember the theme preference. Best-effort.
    pub fn save_theme(&self, theme: Theme) {
        let mut prefs = self.load();
        prefs.theme = theme;
        if let Err(err) = self.write(&prefs) {
            tracing::warn!("failed to save theme: {err:#}");
        }
    }

    fn read(&self) -> Result<Preferences> {
        let Some(path) = &self.path else {
            return Ok(Preferences::default());
        };
        if !path.exists() {
            // First run: nothing stored yet.
            return Ok(Preferences::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;

        let prefs: Preferences = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?;

        Ok(prefs)
    }

    fn write(&self, prefs: &Preferences) -> Result<()> {
        let Some(path) = &self.path else {
            // Inert store; the missing directory was reported at open.
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(prefs).context("Failed to serialize preferences to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write preferences file: {}", path.display()))?;

        Ok(())
    }
}
