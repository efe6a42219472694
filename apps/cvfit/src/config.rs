use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::layout::estimate::{FitConfig, DEFAULT_WORDS_PER_PAGE};

/// Service configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Weighted words per rendered page, shared by every page-fit computation.
    pub words_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            words_per_page: DEFAULT_WORDS_PER_PAGE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let words_per_page: usize = parse_or(
            "FIT_WORDS_PER_PAGE",
            std::env::var("FIT_WORDS_PER_PAGE").ok(),
            defaults.words_per_page,
        )?;
        if words_per_page == 0 {
            bail!("FIT_WORDS_PER_PAGE must be greater than zero");
        }

        Ok(Config {
            port: parse_or("PORT", std::env::var("PORT").ok(), defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            words_per_page,
        })
    }

    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            words_per_page: self.words_per_page,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
