use super::{build_http_client, check_status, RequestTracker};
use crate::error::{AtlasError, Result};
use crate::geo::{Feature, FeatureCollection};
use crate::model::Country;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shown alongside an approximate boundary.
pub const APPROXIMATE_NOTICE: &str = "Using approximate location - detailed borders unavailable";

#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Real border polygons from the boundary source.
    Detailed(FeatureCollection),
    /// A single point at the country's coordinates.
    Approximate(FeatureCollection),
}

impl Boundary {
    pub fn features(&self) -> &FeatureCollection {
        match self {
            Boundary::Detailed(fc) | Boundary::Approximate(fc) => fc,
        }
    }

    pub fn is_approximate(&self) -> bool {
        matches!(self, Boundary::Approximate(_))
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.is_approximate().then_some(APPROXIMATE_NOTICE)
    }
}

/// Client for per-country GeoJSON files (`{base}/countries/{code}.geo.json`).
#[derive(Clone)]
pub struct BoundaryClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tracker: RequestTracker,
}

impl BoundaryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            tracker: RequestTracker::new(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Border geometry for `country`.
    ///
    /// Per-country files are tried for the lowercase cca3, cca2 and cioc
    /// codes, then the combined collection is searched. The whole lookup is
    /// bounded by the client timeout. When it fails or times out the result is
    /// an approximate point at the country's coordinates; without coordinates
    /// the lookup fails with `NotFound`.
    pub async fn boundaries(&self, country: &Country) -> Result<Boundary> {
        match bounded(self.timeout, self.detailed(country)).await {
            Ok(fc) => return Ok(Boundary::Detailed(fc)),
            Err(AtlasError::Timeout(after)) => {
                tracing::warn!(cca3 = %country.cca3, timeout = ?after, "boundary lookup timed out")
            }
            Err(e) => {
                tracing::debug!(cca3 = %country.cca3, error = %e, "no detailed boundary")
            }
        }

        match country.centroid() {
            Some((lat, lng)) => Ok(Boundary::Approximate(FeatureCollection::approximate_point(
                &country.name.common,
                lat,
                lng,
            ))),
            None => Err(AtlasError::NotFound(format!(
                "Couldn't find geographic data for {}",
                country.name.common
            ))),
        }
    }

    /// Like [`boundaries`](Self::boundaries), but superseded by any newer
    /// `boundaries_latest` call.
    pub async fn boundaries_latest(&self, country: &Country) -> Result<Boundary> {
        self.tracker.begin().run(self.boundaries(country)).await
    }

    async fn detailed(&self, country: &Country) -> Result<FeatureCollection> {
        for code in candidate_codes(country) {
            let url = format!("{}/countries/{}.geo.json", self.base_url, code);
            match self.fetch(&url).await {
                Ok(fc) if !fc.is_empty() => return Ok(fc),
                Ok(_) => tracing::debug!(%url, "empty boundary file"),
                Err(e) => tracing::debug!(%url, error = %e, "boundary file unavailable"),
            }
        }

        let url = format!("{}/countries.geo.json", self.base_url);
        let all = self.fetch(&url).await?;
        all.features
            .into_iter()
            .find(|feature| feature_matches(feature, country))
            .map(|feature| FeatureCollection::new(vec![feature]))
            .ok_or_else(|| AtlasError::NotFound(country.cca3.clone()))
    }

    async fn fetch(&self, url: &str) -> Result<FeatureCollection> {
        tracing::debug!(%url, "fetching boundary");
        let response = self.http.get(url).send().await?;
        let response = check_status(response)?;
        Ok(response.json::<FeatureCollection>().await?)
    }
}

/// Lowercase cca3, cca2, cioc; blanks and repeats skipped.
/// Run `lookup`, failing with `Timeout` if it outlives `limit`.
async fn bounded<T>(limit: Duration, lookup: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(limit, lookup)
        .await
        .unwrap_or(Err(AtlasError::Timeout(limit)))
}

fn candidate_codes(country: &Country) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    let raw = [
        Some(country.cca3.as_str()),
        country.cca2.as_deref(),
        country.cioc.as_deref(),
    ];
    for code in raw.into_iter().flatten() {
        let code = code.trim().to_lowercase();
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn feature_matches(feature: &Feature, country: &Country) -> bool {
    let cca3 = country.cca3.as_str();
    feature.property_str("name") == Some(country.name.common.as_str())
        || feature
            .property_str("iso_a3")
            .is_some_and(|code| code.eq_ignore_ascii_case(cca3))
        || feature
            .id_str()
            .is_some_and(|code| code.eq_ignore_ascii_case(cca3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_bounded_lookup_times_out() {
        let limit = Duration::from_secs(10);
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(1)
        };
        let err = bounded(limit, slow).await.unwrap_err();
        assert!(matches!(err, AtlasError::Timeout(after) if after == limit));
        assert!(err.is_fetch_error());

        assert_eq!(bounded(limit, async { Ok(2) }).await.unwrap(), 2);
    }

    #[test]
    fn test_candidate_codes_order_and_dedup() {
        let mut country = Country::new("FRA", "France");
        country.cca2 = Some("FR".into());
        country.cioc = Some("FRA".into());
        assert_eq!(candidate_codes(&country), vec!["fra", "fr"]);
    }

    #[test]
    fn test_candidate_codes_skip_missing() {
        let country = Country::new("ATA", "Antarctica");
        assert_eq!(candidate_codes(&country), vec!["ata"]);
    }

    #[test]
    fn test_feature_matches_by_name_or_code() {
        let country = Country::new("FRA", "France");
        let by_name: Feature = serde_json::from_value(json!({
            "type": "Feature", "properties": { "name": "France" }, "geometry": null
        }))
        .unwrap();
        let by_iso: Feature = serde_json::from_value(json!({
            "type": "Feature", "properties": { "iso_a3": "FRA" }, "geometry": null
        }))
        .unwrap();
        let by_id: Feature = serde_json::from_value(json!({
            "type": "Feature", "id": "FRA", "properties": {}, "geometry": null
        }))
        .unwrap();
        let other: Feature = serde_json::from_value(json!({
            "type": "Feature", "id": "DEU", "properties": { "name": "Germany" }, "geometry": null
        }))
        .unwrap();

        assert!(feature_matches(&by_name, &country));
        assert!(feature_matches(&by_iso, &country));
        assert!(feature_matches(&by_id, &country));
        assert!(!feature_matches(&other, &country));
    }

    #[test]
    fn test_notice_only_for_approximate() {
        let fc = FeatureCollection::approximate_point("X", 1.0, 2.0);
        assert_eq!(
            Boundary::Approximate(fc.clone()).notice(),
            Some(APPROXIMATE_NOTICE)
        );
        assert_eq!(Boundary::Detailed(fc).notice(), None);
    }
}
