use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::chart::{render, Figure};

const DEFAULT_BASE_URL: &str = "https://plot.ly";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("chart studio request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chart studio rejected the figure: {0}")]
    Api(String),
    #[error("failed to encode figure: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Chart Studio account credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

/// Thin client for the Chart Studio upload endpoint.
pub struct StudioClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudioClient {
    pub fn new() -> Self {
        StudioClient {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Upload the figure for private rendering under its title and return
    /// the resulting chart URL.
    pub async fn upload(
        &self,
        figure: &Figure,
        credentials: &Credentials,
    ) -> Result<String, StudioError> {
        let form = upload_form(figure, credentials)?;
        let response: ClientResponse = self
            .http
            .post(format!("{}/clientresp", self.base_url))
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.warning.is_empty() {
            log::warn!("chart studio warning: {}", response.warning);
        }
        if !response.message.is_empty() {
            log::info!("chart studio: {}", response.message);
        }
        if !response.error.is_empty() {
            return Err(StudioError::Api(response.error));
        }
        Ok(response.url)
    }
}

impl Default for StudioClient {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Form fields for the classic `clientresp` upload endpoint: credentials,
/// the trace array as `args`, and the file options (filename from the
/// figure title, private sharing) as `kwargs`.
fn upload_form(
    figure: &Figure,
    credentials: &Credentials,
) -> Result<Vec<(&'static str, String)>, StudioError> {
    let data: Vec<Value> = render::traces(figure)
        .iter()
        .map(|trace| serde_json::from_str(&trace.to_json()))
        .collect::<Result<_, _>>()?;
    let layout = serde_json::to_value(render::layout(figure))?;

    let kwargs = json!({
        "filename": figure.title(),
        "fileopt": "overwrite",
        "sharing": "private",
        "world_readable": false,
        "layout": layout,
    });

    Ok(vec![
        ("un", credentials.username.clone()),
        ("key", credentials.api_key.clone()),
        ("origin", "plot".to_string()),
        ("platform", "rust".to_string()),
        ("args", serde_json::to_string(&data)?),
        ("kwargs", serde_json::to_string(&kwargs)?),
    ])
}

#[derive(Debug, Deserialize)]
struct ClientResponse {
    #[serde(default)]
    url: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    warning: String,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{FigureBuilder, Panel, Series, SeriesMode};
    use serde_json::Value;

    fn figure() -> Figure {
        let x = vec![chrono::DateTime::parse_from_rfc3339("2017-06-10T00:00:00Z").unwrap()];
        FigureBuilder::new("MyChart")
            .series(
                Panel::Price,
                Series::new("price", SeriesMode::Lines, x, vec![2500.0]),
            )
            .build()
    }

    fn field<'a>(form: &'a [(&'static str, String)], name: &str) -> &'a str {
        &form.iter().find(|(k, _)| *k == name).unwrap().1
    }

    #[test]
    fn test_upload_form_is_private_and_titled() {
        let credentials = Credentials {
            username: "trader".into(),
            api_key: "secret".into(),
        };
        let form = upload_form(&figure(), &credentials).unwrap();

        assert_eq!(field(&form, "un"), "trader");
        assert_eq!(field(&form, "key"), "secret");
        assert_eq!(field(&form, "origin"), "plot");

        let kwargs: Value = serde_json::from_str(field(&form, "kwargs")).unwrap();
        assert_eq!(kwargs["filename"], "MyChart");
        assert_eq!(kwargs["sharing"], "private");
        assert_eq!(kwargs["world_readable"], false);
        assert_eq!(kwargs["layout"]["title"]["text"], "MyChart");

        let args: Value = serde_json::from_str(field(&form, "args")).unwrap();
        assert_eq!(args.as_array().unwrap().len(), 1);
        assert_eq!(args[0]["name"], "price");
    }
}
