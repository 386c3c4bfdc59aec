//! # Command Layer
//!
//! Each command is a plain function over the session, theme and country
//! types. Commands return a [`CmdResult`] carrying data plus leveled
//! messages; they never print, prompt or pick exit codes.
//!
//! User mistakes (empty login fields, an unknown country code) are reported
//! as error-level messages inside an `Ok(CmdResult)`. `Err` is reserved for
//! failures the user cannot fix by retyping, such as a storage write failing.
//!
//! Commands take already-fetched data. Talking to the remote sources is the
//! job of [`crate::api`], which also turns fetch failures into the retry
//! messages below.
//!
//! - [`auth`]: login, registration, logout, whoami
//! - [`favorites`]: toggle and list saved countries
//! - [`countries`]: filtered listing and country detail
//! - [`theme`]: show and change the light/dark preference

use crate::config::AtlasConfig;
use crate::model::{Country, User};
use crate::remote::boundaries::Boundary;
use crate::theme::Theme;
use serde::Serialize;

pub mod auth;
pub mod countries;
pub mod favorites;
pub mod theme;

pub const LOAD_COUNTRIES_FAILED: &str = "Failed to load countries. Please try again later.";
pub const LOAD_DETAILS_FAILED: &str = "Failed to load country details. Please try again later.";
pub const NO_GEO_DATA: &str = "Couldn't find geographic data for this country";
pub const NO_MATCHES: &str = "No countries found matching your criteria.";
pub const LOGIN_REQUIRED: &str = "Log in to save favorite countries.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Countries to show as a list (filtered grid, favorites).
    pub listed_countries: Vec<Country>,
    /// Countries the command acted on or looked up (toggle, detail).
    pub affected_countries: Vec<Country>,
    pub user: Option<User>,
    pub boundary: Option<Boundary>,
    pub theme: Option<Theme>,
    pub languages: Vec<String>,
    pub regions: Vec<String>,
    pub config: Option<AtlasConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_countries(mut self, countries: Vec<Country>) -> Self {
        self.listed_countries = countries;
        self
    }

    pub fn with_affected_countries(mut self, countries: Vec<Country>) -> Self {
        self.affected_countries = countries;
        self
    }

    pub fn with_user(mut self, user: Option<User>) -> Self {
        self.user = user;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// True if any message is error-level.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::error(content))
    }
}
