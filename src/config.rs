//! Environment-driven configuration for the widget and the server

use ratatui::style::Color;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Optimizm AI";
pub const DEFAULT_BRAND_COLOR: &str = "#00E5D8";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hey! I'm Optimizm AI — ask me anything about automation, small business systems, or AI workflows.";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Embedding surface of the chat widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Endpoint every submission is POSTed to
    pub api_url: String,
    pub title: String,
    /// `#RRGGBB`
    pub brand_color: String,
    pub welcome_message: String,
}

impl WidgetConfig {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            title: DEFAULT_TITLE.to_string(),
            brand_color: DEFAULT_BRAND_COLOR.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }

    /// Read the widget settings from the process environment
    ///
    /// # Errors
    ///
    /// See [`WidgetConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// # Errors
    ///
    /// `Missing` when `OPTIMIZM_API_URL` is unset or blank, `Invalid` when
    /// `OPTIMIZM_BRAND_COLOR` is not `#RRGGBB`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("OPTIMIZM_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("OPTIMIZM_API_URL"))?;

        let mut config = Self::new(api_url);
        if let Some(title) = lookup("OPTIMIZM_TITLE") {
            config.title = title;
        }
        if let Some(color) = lookup("OPTIMIZM_BRAND_COLOR") {
            config.brand_color = color;
        }
        if let Some(welcome) = lookup("OPTIMIZM_WELCOME_MESSAGE") {
            config.welcome_message = welcome;
        }

        // Fail at startup rather than at first render
        config.brand()?;
        Ok(config)
    }

    /// Brand color for terminal rendering
    ///
    /// # Errors
    ///
    /// `Invalid` unless `brand_color` is `#` followed by six hex digits.
    pub fn brand(&self) -> Result<Color, ConfigError> {
        let invalid = || ConfigError::Invalid {
            var: "OPTIMIZM_BRAND_COLOR",
            value: self.brand_color.clone(),
        };

        if !self.brand_color.starts_with('#') || self.brand_color.len() != 7 {
            return Err(invalid());
        }
        Color::from_str(&self.brand_color).map_err(|_| invalid())
    }
}

/// Echo Responder server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// An unparsable port falls back to the default
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("OPTIMIZM_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}
