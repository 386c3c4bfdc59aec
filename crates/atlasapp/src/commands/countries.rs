use crate::commands::{CmdMessage, CmdResult, NO_GEO_DATA, NO_MATCHES};
use crate::error::{AtlasError, Result};
use crate::filter::{filter_countries, FilterState};
use crate::model::Country;
use crate::remote::boundaries::Boundary;

/// Countries passing `filter`, in source order.
pub fn list(countries: &[Country], filter: &FilterState) -> CmdResult {
    let matched: Vec<Country> = filter_countries(countries, filter)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(
        total = countries.len(),
        matched = matched.len(),
        ?filter,
        "filtered countries"
    );
    if matched.is_empty() {
        return CmdResult::default().with_message(CmdMessage::info(NO_MATCHES));
    }
    CmdResult::default().with_listed_countries(matched)
}

pub fn detail(country: Country) -> CmdResult {
    CmdResult::default().with_affected_countries(vec![country])
}

/// Map a boundary lookup onto a result: approximate boundaries carry a
/// warning, a country without coordinates gets an error message.
pub fn map(country: Country, lookup: Result<Boundary>) -> Result<CmdResult> {
    let mut result = detail(country);
    match lookup {
        Ok(boundary) => {
            if let Some(notice) = boundary.notice() {
                result.add_message(CmdMessage::warning(notice));
            }
            result.boundary = Some(boundary);
        }
        Err(AtlasError::NotFound(_)) => result.add_message(CmdMessage::error(NO_GEO_DATA)),
        Err(e) if e.is_fetch_error() => {
            result.add_message(CmdMessage::error(format!("Could not load borders: {}", e)))
        }
        Err(e) => return Err(e),
    }
    Ok(result)
}
