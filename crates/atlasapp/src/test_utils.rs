//! Fixture payloads shaped like the remote country source.

use serde_json::{json, Value};

pub fn peru_json() -> Value {
    json!({
        "cca3": "PER",
        "cca2": "PE",
        "cioc": "PER",
        "name": { "common": "Peru", "official": "Republic of Peru" },
        "capital": ["Lima"],
        "region": "Americas",
        "subregion": "South America",
        "population": 32971846,
        "languages": { "aym": "Aymara", "que": "Quechua", "spa": "Spanish" },
        "currencies": { "PEN": { "name": "Peruvian sol", "symbol": "S/ " } },
        "borders": ["BOL", "BRA", "CHL", "COL", "ECU"],
        "latlng": [-10.0, -76.0],
        "capitalInfo": { "latlng": [-12.05, -77.05] },
        "flags": { "png": "https://flagcdn.com/w320/pe.png", "svg": "https://flagcdn.com/pe.svg" },
        "timezones": ["UTC-05:00"]
    })
}

pub fn japan_json() -> Value {
    json!({
        "cca3": "JPN",
        "cca2": "JP",
        "cioc": "JPN",
        "name": { "common": "Japan", "official": "Japan" },
        "capital": ["Tokyo"],
        "region": "Asia",
        "subregion": "Eastern Asia",
        "population": 125836021,
        "languages": { "jpn": "Japanese" },
        "currencies": { "JPY": { "name": "Japanese yen", "symbol": "¥" } },
        "latlng": [36.0, 138.0],
        "flags": { "png": "https://flagcdn.com/w320/jp.png", "alt": "A white field with a red circle" }
    })
}

pub fn antarctica_json() -> Value {
    json!({
        "cca3": "ATA",
        "cca2": "AQ",
        "name": { "common": "Antarctica", "official": "Antarctica" },
        "region": "Antarctic",
        "population": 1000,
        "flags": { "png": "https://flagcdn.com/w320/aq.png" }
    })
}

/// Peru, Japan and Antarctica, as `GET /v3.1/all` would return them.
pub fn all_countries_json() -> Value {
    json!([peru_json(), japan_json(), antarctica_json()])
}

/// A one-feature boundary file.
pub fn boundary_json(cca3: &str, name: &str) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "id": cca3,
            "properties": { "name": name },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-81.0, -18.0], [-68.0, -18.0], [-68.0, 0.0], [-81.0, -18.0]]]
            }
        }]
    })
}
