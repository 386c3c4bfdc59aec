//! # Domain Model
//!
//! The types here mirror the JSON shapes of the remote country source and of the
//! values kept in the local key-value store. They are deliberately tolerant on
//! read: the remote source omits fields freely (no capital for Antarctica, no
//! languages for some territories), so everything a record can lack is an
//! `Option` or defaults to empty.
//!
//! ## Identity
//!
//! - A [`Country`] is identified by `cca3`. Favorites, detail lookups and
//!   boundary lookups all key on it.
//! - A [`User`] is whatever was supplied at login or registration. Nothing here
//!   validates uniqueness or credentials; sessions are a local simulation.
//!
//! ## Round-tripping
//!
//! Favorites are stored as full country records. Fields the core never reads
//! (timezones, tld, maps, ...) are kept in [`Country::extra`] so a record that
//! goes into storage comes back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The identity behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            email: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name to greet the user with: username, then email, then the raw id.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Caller-supplied registration data. The id is generated on registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoatOfArms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latlng: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A country record as served by the remote source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub cca3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cca2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cioc: Option<String>,
    #[serde(default)]
    pub name: CountryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<BTreeMap<String, Currency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latlng: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_info: Option<CapitalInfo>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_of_arms: Option<CoatOfArms>,
    /// Descriptive fields the core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Country {
    pub fn new(cca3: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            cca3: cca3.into(),
            name: CountryName {
                common: common_name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_official_name(mut self, official: impl Into<String>) -> Self {
        self.name.official = Some(official.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital.get_or_insert_with(Vec::new).push(capital.into());
        self
    }

    pub fn with_language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.languages
            .get_or_insert_with(BTreeMap::new)
            .insert(code.into(), name.into());
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_latlng(mut self, lat: f64, lng: f64) -> Self {
        self.latlng = Some(vec![lat, lng]);
        self
    }

    /// The country centroid as `(lat, lng)`, if the record carries one.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        match self.latlng.as_deref() {
            Some([lat, lng, ..]) => Some((*lat, *lng)),
            _ => None,
        }
    }

    /// Capital coordinates, falling back to the country centroid.
    pub fn capital_coords(&self) -> Option<(f64, f64)> {
        let capital = self
            .capital_info
            .as_ref()
            .and_then(|info| info.latlng.as_deref());
        match capital {
            Some([lat, lng, ..]) => Some((*lat, *lng)),
            _ => self.centroid(),
        }
    }

    /// Language names, in code order. Empty when the record has none.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|langs| langs.values().map(String::as_str))
    }
}

/// Projection returned by `GET /v3.1/all?fields=languages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageProjection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_country_parses_sparse_record() {
        let value = json!({
            "cca3": "ATA",
            "name": { "common": "Antarctica" },
            "region": "Antarctic",
            "population": 1000,
            "flags": { "png": "https://flagcdn.com/w320/aq.png" }
        });
        let country: Country = serde_json::from_value(value).unwrap();
        assert_eq!(country.cca3, "ATA");
        assert!(country.capital.is_none());
        assert!(country.languages.is_none());
        assert!(country.name.official.is_none());
        assert_eq!(country.language_names().count(), 0);
    }

    #[test]
    fn test_country_keeps_unknown_fields() {
        let value = json!({
            "cca3": "PRT",
            "name": {
                "common": "Portugal",
                "official": "Portuguese Republic",
                "nativeName": { "por": { "official": "República Portuguesa", "common": "Portugal" } }
            },
            "region": "Europe",
            "currencies": { "EUR": { "name": "Euro", "symbol": "€", "code": "EUR" } },
            "timezones": ["UTC-01:00", "UTC"],
            "capitalInfo": { "latlng": [38.72, -9.13] },
            "flags": { "png": "https://flagcdn.com/w320/pt.png", "width": 320 }
        });
        let country: Country = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(country.extra.get("timezones"), value.get("timezones"));
        assert_eq!(country.capital_coords(), Some((38.72, -9.13)));

        let back = serde_json::to_value(&country).unwrap();
        assert_eq!(back["timezones"], value["timezones"]);
        assert_eq!(back["capitalInfo"]["latlng"], json!([38.72, -9.13]));
        assert_eq!(back["name"], value["name"]);
        assert_eq!(back["currencies"], value["currencies"]);
        assert_eq!(back["flags"], value["flags"]);
    }

    #[test]
    fn test_capital_coords_fall_back_to_centroid() {
        let country = Country::new("ISL", "Iceland").with_latlng(65.0, -18.0);
        assert_eq!(country.capital_coords(), Some((65.0, -18.0)));
    }

    #[test]
    fn test_user_serialization_omits_missing_fields() {
        let user = User::new("1").with_username("testuser");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":"1","username":"testuser"}"#);
    }

    #[test]
    fn test_user_display_name_fallbacks() {
        assert_eq!(User::new("7").display_name(), "7");
        assert_eq!(User::new("7").with_email("a@b.c").display_name(), "a@b.c");
        assert_eq!(
            User::new("7")
                .with_email("a@b.c")
                .with_username("ann")
                .display_name(),
            "ann"
        );
    }
}
