use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::grading::scoring::DEFAULT_WEIGHTS;
use crate::grading::Deadlines;
use crate::models::analysis::CategoryId;

const DEFAULT_ANALYZER_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_SESSION_TIMEOUT_MS: u64 = 2_500;
const DEFAULT_SESSION_RETENTION_MS: u64 = 15 * 60 * 1_000;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub grading: GradingConfig,
}

/// Which analyzers run, their weights, and how long they may take.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingConfig {
    pub weights: Vec<(CategoryId, u32)>,
    pub analyzer_timeout: Duration,
    pub session_timeout: Duration,
    /// How long a finished session stays readable before it is purged.
    pub session_retention: Duration,
}

impl GradingConfig {
    pub fn deadlines(&self) -> Deadlines {
        Deadlines {
            analyzer_timeout: self.analyzer_timeout,
            session_timeout: self.session_timeout,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let weights = match lookup("CATEGORY_WEIGHTS") {
            Some(raw) => parse_weights(&raw).context("CATEGORY_WEIGHTS is malformed")?,
            None => DEFAULT_WEIGHTS.to_vec(),
        };

        let analyzer_timeout = millis(&lookup, "ANALYZER_TIMEOUT_MS", DEFAULT_ANALYZER_TIMEOUT_MS)?;
        let session_timeout = millis(&lookup, "SESSION_TIMEOUT_MS", DEFAULT_SESSION_TIMEOUT_MS)?;
        if session_timeout < analyzer_timeout {
            bail!(
                "SESSION_TIMEOUT_MS ({}) must not be shorter than ANALYZER_TIMEOUT_MS ({})",
                session_timeout.as_millis(),
                analyzer_timeout.as_millis()
            );
        }

        let session_retention =
            millis(&lookup, "SESSION_RETENTION_MS", DEFAULT_SESSION_RETENTION_MS)?;

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            grading: GradingConfig {
                weights,
                analyzer_timeout,
                session_timeout,
                session_retention,
            },
        })
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    let ms = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of milliseconds"))?,
        None => default,
    };
    if ms == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_millis(ms))
}

/// Parses `category:weight,category:weight`. Sums and duplicates are left to the
/// registry so they surface as weight-table errors.
fn parse_weights(raw: &str) -> Result<Vec<(CategoryId, u32)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, weight) = pair
                .split_once(':')
                .with_context(|| format!("'{pair}' is not of the form category:weight"))?;
            let category = name
                .trim()
                .parse::<CategoryId>()
                .map_err(anyhow::Error::msg)?;
            let weight = weight
                .trim()
                .parse::<u32>()
                .with_context(|| format!("weight for '{}' is not a number", name.trim()))?;
            Ok((category, weight))
        })
        .collect()
}
