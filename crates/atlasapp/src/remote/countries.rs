use super::{build_http_client, check_status, RequestTracker};
use crate::error::{AtlasError, Result};
use crate::filter::collect_languages;
use crate::model::{Country, LanguageProjection};
use serde::de::DeserializeOwned;

/// Client for the country record source (`{base}/v3.1/...`).
#[derive(Clone)]
pub struct CountryClient {
    http: reqwest::Client,
    base_url: String,
    tracker: RequestTracker,
}

impl CountryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tracker: RequestTracker::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "fetching");
        let response = self.http.get(&url).send().await?;
        let response = check_status(response)?;
        Ok(response.json::<T>().await?)
    }

    /// Every country, in the order the source returns them.
    pub async fn all_countries(&self) -> Result<Vec<Country>> {
        let countries: Vec<Country> = self.get_json("/v3.1/all").await?;
        tracing::debug!(count = countries.len(), "loaded countries");
        Ok(countries)
    }

    /// One country by cca2/cca3/ccn3/cioc code. The source answers with an
    /// array; only its first element is used.
    pub async fn country(&self, code: &str) -> Result<Country> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AtlasError::NotFound(String::new()));
        }
        let found: Vec<Country> = self.get_json(&format!("/v3.1/alpha/{}", code)).await?;
        found
            .into_iter()
            .next()
            .ok_or_else(|| AtlasError::NotFound(code.to_string()))
    }

    /// Like [`country`](Self::country), but an answer is only returned if no
    /// newer `country_latest` call was made in the meantime.
    pub async fn country_latest(&self, code: &str) -> Result<Country> {
        self.tracker.begin().run(self.country(code)).await
    }

    /// Distinct language names across all countries, sorted.
    pub async fn languages(&self) -> Result<Vec<String>> {
        let projections: Vec<LanguageProjection> =
            self.get_json("/v3.1/all?fields=languages").await?;
        Ok(collect_languages(&projections))
    }
}
