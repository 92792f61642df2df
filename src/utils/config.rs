use std::env;
use anyhow::{anyhow, Context, Result};
use simplelog::{ColorChoice, LevelFilter};

pub const LOG_LEVEL_VAR: &str = "GPA_LOG_LEVEL";
pub const LOG_COLOR_VAR: &str = "GPA_LOG_COLOR";

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub log_level: LevelFilter,
    pub color: ColorChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { log_level: LevelFilter::Info, color: ColorChoice::Auto }
    }
}

impl Settings {
    // Reads the settings from the process environment. `.env` must already be loaded.
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            settings.log_level = level
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("'{}' is not a log level", level))
                .with_context(|| format!("Invalid {}", LOG_LEVEL_VAR))?;
        }

        if let Some(color) = lookup(LOG_COLOR_VAR) {
            settings.color = parse_color(&color).with_context(|| format!("Invalid {}", LOG_COLOR_VAR))?;
        }

        Ok(settings)
    }
}

fn parse_color(value: &str) -> Result<ColorChoice> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(ColorChoice::Auto),
        "always" => Ok(ColorChoice::Always),
        "never" => Ok(ColorChoice::Never),
        other => Err(anyhow!("'{}' is not one of auto, always, never", other)),
    }
}
