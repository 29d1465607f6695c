use std::env;

use anyhow::{Context, Result};

use crate::studio::Credentials;

/// Title used when `GRAPH_NAME` is unset or empty.
pub const DEFAULT_TITLE: &str = "DEMA";

/// Fixed input path, relative to the working directory.
pub const INPUT_PATH: &str = "results.csv";

// ---------------------------------------------------------------------------
// Title resolution
// ---------------------------------------------------------------------------

/// Resolve the chart title: the input if non-empty, otherwise [`DEFAULT_TITLE`].
///
/// An empty string counts as unset, matching the convention of the
/// environment it is read from.
pub fn resolve_title(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Runtime configuration, sourced from the process environment.
pub struct Config {
    /// Resolved chart title (doubles as the remote filename).
    pub title: String,
    /// Chart Studio credentials.
    pub credentials: Credentials,
}

impl Config {
    /// Read `GRAPH_NAME` (optional) and the Chart Studio credentials
    /// (required) from the environment.
    pub fn from_env() -> Result<Self> {
        let title = resolve_title(env::var("GRAPH_NAME").ok().as_deref());

        let username = env::var("PLOTLY_USERNAME")
            .context("PLOTLY_USERNAME must be set to upload to Chart Studio")?;
        let api_key = env::var("PLOTLY_API_KEY")
            .context("PLOTLY_API_KEY must be set to upload to Chart Studio")?;

        Ok(Config {
            title,
            credentials: Credentials { username, api_key },
        })
    }
}
