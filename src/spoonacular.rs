use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::Config;
use crate::models::{DishSummary, RecipeDetail, RecipeInformation, SearchFilters, SearchResponse};

const USER_AGENT: &str = "recipe-finder/0.1";

// ── Error type ───────────────────────────────────────────────────────────────

/// Every variant means "upstream call failed"; they only differ in what the
/// operator log says.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("could not decode upstream response: {0}")]
    Decode(#[source] reqwest::Error),
}

// ── Query parameters ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AuthParams<'a> {
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Serialize)]
struct SearchParams<'a> {
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cuisine: Option<&'a str>,
    #[serde(rename = "maxReadyTime", skip_serializing_if = "Option::is_none")]
    max_ready_time: Option<&'a str>,
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl SpoonacularClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let http = reqwest::ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(UpstreamError::Request)?;

        // A trailing slash keeps `join` from dropping the last path segment.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub async fn search_recipes(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<DishSummary>, UpstreamError> {
        let params = SearchParams {
            api_key: self.api_key.as_deref(),
            query: filters.query(),
            cuisine: filters.cuisine(),
            max_ready_time: filters.max_ready_time(),
        };
        let response: SearchResponse = self.get_json("recipes/complexSearch", &params).await?;
        Ok(response.results)
    }

    pub async fn get_recipe(&self, id: u64) -> Result<RecipeDetail, UpstreamError> {
        let params = AuthParams {
            api_key: self.api_key.as_deref(),
        };
        let info: RecipeInformation = self
            .get_json(&format!("recipes/{id}/information"), &params)
            .await?;
        Ok(info.into())
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::Endpoint(e.to_string()))
    }

    async fn get_json<P, T>(&self, path: &str, params: &P) -> Result<T, UpstreamError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "calling upstream");

        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response.json().await.map_err(UpstreamError::Decode)
    }
}
