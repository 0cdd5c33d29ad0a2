use super::traits::{PlaceSuggestion, PlacesProvider, ProviderPlace, SuggestionQuery};
use crate::domain::shared::geo::CITY_RADIUS_METERS;
use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    status: String,
    result: Option<ProviderPlace>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteEnvelope {
    status: String,
    #[serde(default)]
    predictions: Vec<PlaceSuggestion>,
}

/// Client for the Google Places web service (details + autocomplete).
pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(base_url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("places API key is not configured"))
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> anyhow::Result<Url> {
        Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .context("invalid places provider URL")
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> anyhow::Result<Option<ProviderPlace>> {
        let url = self.endpoint(
            "details/json",
            &[
                ("place_id", place_id.to_string()),
                ("key", self.api_key()?.to_string()),
            ],
        )?;

        let envelope: DetailsEnvelope = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.result),
            "NOT_FOUND" | "ZERO_RESULTS" | "INVALID_REQUEST" => {
                debug!(status = %envelope.status, "provider has no such place");
                Ok(None)
            }
            other => {
                warn!(status = %other, "places provider rejected details request");
                bail!("places provider returned status {}", other)
            }
        }
    }

    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &SuggestionQuery) -> anyhow::Result<Vec<PlaceSuggestion>> {
        let mut params = vec![("input", query.input.clone())];
        if let Some(country_code) = &query.country_code {
            params.push(("components", format!("country:{}", country_code)));
            if let Some(bias) = query.bias {
                params.push(("location", format!("{},{}", bias.lat, bias.lng)));
                params.push(("radius", format!("{}", CITY_RADIUS_METERS as i64)));
            }
        }
        params.push(("key", self.api_key()?.to_string()));
        let url = self.endpoint("autocomplete/json", &params)?;

        let envelope: AutocompleteEnvelope = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(envelope.predictions),
            other => {
                warn!(status = %other, "places provider rejected autocomplete request");
                bail!("places provider returned status {}", other)
            }
        }
    }
}
