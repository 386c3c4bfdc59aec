//! # API Facade
//!
//! [`AtlasApi`] is the single entry point for every UI. It owns the session
//! store, the theme store and both remote clients, all wired to one shared
//! key-value backend, and dispatches each call to the matching command.
//!
//! ## Role and Responsibilities
//!
//! - **Fetches** remote data before handing it to a command
//! - **Caches** the country list so re-filtering never re-fetches
//! - **Translates** remote failures into user-facing messages
//!
//! ## Failure policy
//!
//! | Failure | Returned as |
//! |---------|-------------|
//! | country list unavailable | error message "Failed to load countries. Please try again later." |
//! | country detail unavailable | error message "Failed to load country details. Please try again later." |
//! | boundary unavailable | approximate point plus a warning (see [`crate::remote::boundaries`]) |
//! | language list unavailable | warning message, empty list |
//! | response superseded by a newer one | empty result, nothing to show |
//! | storage write failed | `Err` |
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `AtlasApi<FsBackend>`
//! - Testing: `AtlasApi<MemBackend>`

use crate::commands;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::filter::{FilterState, REGIONS};
use crate::model::Country;
use crate::remote::boundaries::BoundaryClient;
use crate::remote::countries::CountryClient;
use crate::session::{Clock, SessionStore};
use crate::store::KeyValueStore;
use crate::theme::{Theme, ThemeStore};
use std::rc::Rc;

pub struct AtlasApi<S: KeyValueStore> {
    backend: Rc<S>,
    session: SessionStore<Rc<S>>,
    themes: ThemeStore<Rc<S>>,
    countries: CountryClient,
    boundaries: BoundaryClient,
    config: AtlasConfig,
    cached: Option<Vec<Country>>,
}

impl<S: KeyValueStore> AtlasApi<S> {
    /// `theme_fallback` applies when no theme has been stored yet.
    pub fn new(backend: S, config: AtlasConfig, theme_fallback: Theme) -> Result<Self> {
        let backend = Rc::new(backend);
        let countries = CountryClient::new(config.api_url.as_str())?;
        let boundaries =
            BoundaryClient::new(config.boundary_url.as_str(), config.boundary_timeout())?;
        Ok(Self {
            session: SessionStore::new(Rc::clone(&backend)),
            themes: ThemeStore::load(Rc::clone(&backend), theme_fallback),
            backend,
            countries,
            boundaries,
            config,
            cached: None,
        })
    }

    /// Replace the registration clock. Resets the session to uninitialized.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.session = SessionStore::with_clock(Rc::clone(&self.backend), clock);
        self
    }

    pub fn initialize(&mut self) {
        self.session.initialize();
    }

    pub fn session(&self) -> &SessionStore<Rc<S>> {
        &self.session
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    // --- session ---

    pub fn login(&mut self, email: &str, password: &str) -> Result<CmdResult> {
        commands::auth::login(&mut self.session, email, password)
    }

    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<CmdResult> {
        commands::auth::register(&mut self.session, username, email, password, confirm)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        commands::auth::logout(&mut self.session)
    }

    pub fn whoami(&self) -> CmdResult {
        commands::auth::whoami(&self.session)
    }

    // --- countries ---

    /// Filtered country list. The full list is fetched once and reused.
    pub async fn list_countries(&mut self, filter: &FilterState) -> Result<CmdResult> {
        let countries = match self.all_countries().await {
            Ok(countries) => countries,
            Err(e) => return fetch_failure(e, commands::LOAD_COUNTRIES_FAILED),
        };
        Ok(commands::countries::list(countries, filter))
    }

    pub async fn view_country(&self, code: &str) -> Result<CmdResult> {
        match self.countries.country_latest(code).await {
            Ok(country) => Ok(commands::countries::detail(country)),
            Err(e) => fetch_failure(e, commands::LOAD_DETAILS_FAILED),
        }
    }

    pub async fn country_map(&self, code: &str) -> Result<CmdResult> {
        let country = match self.countries.country_latest(code).await {
            Ok(country) => country,
            Err(e) => return fetch_failure(e, commands::LOAD_DETAILS_FAILED),
        };
        match self.boundaries.boundaries_latest(&country).await {
            Err(AtlasError::Superseded) => Ok(CmdResult::default()),
            lookup => commands::countries::map(country, lookup),
        }
    }

    pub async fn languages(&self) -> Result<CmdResult> {
        match self.countries.languages().await {
            Ok(languages) => Ok(CmdResult {
                languages,
                ..Default::default()
            }),
            Err(e) if e.is_fetch_error() => {
                tracing::warn!(error = %e, "could not load languages");
                Ok(CmdResult::default()
                    .with_message(CmdMessage::warning("Could not load the language list")))
            }
            Err(e) => Err(e),
        }
    }

    pub fn regions(&self) -> CmdResult {
        CmdResult {
            regions: REGIONS.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    // --- favorites ---

    /// Toggle by code. A country already in the favorites is removed from
    /// its stored record without any network access.
    pub async fn toggle_favorite(&mut self, code: &str) -> Result<CmdResult> {
        if !self.session.is_authenticated() {
            return Ok(CmdResult::error(commands::LOGIN_REQUIRED));
        }

        let stored = self
            .session
            .favorites()
            .iter()
            .find(|fav| matches_code(fav, code))
            .cloned();
        let country = match stored {
            Some(country) => country,
            None => match self.countries.country(code).await {
                Ok(country) => country,
                Err(e) => return fetch_failure(e, commands::LOAD_DETAILS_FAILED),
            },
        };
        commands::favorites::toggle(&mut self.session, &country)
    }

    pub fn favorites(&self) -> CmdResult {
        commands::favorites::list(&self.session)
    }

    pub fn is_favorite(&self, cca3: &str) -> bool {
        self.session.is_favorite(cca3)
    }

    // --- theme ---

    pub fn theme(&self) -> CmdResult {
        commands::theme::show(&self.themes)
    }

    pub fn current_theme(&self) -> Theme {
        self.themes.theme()
    }

    pub fn toggle_theme(&mut self) -> Result<CmdResult> {
        commands::theme::toggle(&mut self.themes)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<CmdResult> {
        commands::theme::set(&mut self.themes, theme)
    }

    pub fn show_config(&self) -> CmdResult {
        CmdResult {
            config: Some(self.config.clone()),
            ..Default::default()
        }
    }

    async fn all_countries(&mut self) -> Result<&[Country]> {
        if self.cached.is_none() {
            let countries = self.countries.all_countries().await?;
            self.cached = Some(countries);
        }
        Ok(self.cached.as_deref().unwrap_or_default())
    }
}

fn matches_code(country: &Country, code: &str) -> bool {
    let code = code.trim();
    country.cca3.eq_ignore_ascii_case(code)
        || country
            .cca2
            .as_deref()
            .is_some_and(|cca2| cca2.eq_ignore_ascii_case(code))
}

/// Fetch failures become an error message; a superseded request becomes an
/// empty result. Anything else is a real error.
fn fetch_failure(err: AtlasError, message: &str) -> Result<CmdResult> {
    match err {
        AtlasError::Superseded => {
            tracing::debug!("dropping superseded response");
            Ok(CmdResult::default())
        }
        e if e.is_fetch_error() => {
            tracing::warn!(error = %e, "remote fetch failed");
            Ok(CmdResult::error(message))
        }
        e => Err(e),
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};
