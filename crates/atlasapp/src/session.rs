//! # Session Store
//!
//! Tracks who is "logged in" and which countries they have saved. Sessions are
//! a local simulation: there are no credentials and no server. What matters is
//! that identity and favorites survive restarts through the key-value store.
//!
//! ## States
//!
//! ```text
//!              login / register
//!   Anonymous ─────────────────▶ Authenticated(user, favorites)
//!       ▲                              │   ▲
//!       └────────── logout ────────────┘   └── toggle_favorite
//! ```
//!
//! A fresh [`SessionStore`] is `Anonymous` and uninitialized. Call
//! [`SessionStore::initialize`] once before any UI reads from it, otherwise a
//! returning user briefly looks logged out.
//!
//! ## Persistence
//!
//! - `user` holds the active [`User`]; removed on logout.
//! - `favorites_{id}` holds that user's list; kept on logout so logging back in
//!   with the same id restores it.
//!
//! Every mutation writes storage first and only then updates memory. A failed
//! write therefore leaves the in-memory state exactly as it was. The list is
//! always replaced wholesale, never patched.
//!
//! ## Registration ids
//!
//! New ids are the clock's current millisecond timestamp as a string. Two
//! registrations within the same millisecond get the same id. That is
//! acceptable for a single-user local demo and nothing else: these ids are
//! neither unique nor unguessable.

use crate::error::Result;
use crate::model::{Country, User, UserProfile};
use crate::store::{favorites_key, read_json, write_json, KeyValueStore, USER_KEY};

/// Source of registration ids.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_millis(&self) -> i64 {
        self()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated {
        user: User,
        favorites: Vec<Country>,
    },
}

/// Outcome of [`SessionStore::toggle_favorite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// Nobody is logged in; nothing changed.
    NoSession,
}

pub struct SessionStore<S: KeyValueStore> {
    store: S,
    clock: Box<dyn Clock>,
    state: SessionState,
    initialized: bool,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            state: SessionState::Anonymous,
            initialized: false,
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// An unparseable `user` entry is treated as no session. Idempotent.
    pub fn initialize(&mut self) {
        if let Some(user) = read_json::<User, _>(&self.store, USER_KEY) {
            tracing::debug!(user_id = %user.id, "restoring session");
            let favorites = self.load_favorites(&user.id);
            self.state = SessionState::Authenticated { user, favorites };
        } else {
            self.state = SessionState::Anonymous;
        }
        self.initialized = true;
    }

    /// Make `user` the active identity, replacing any current session.
    ///
    /// No credential check happens here. Favorites are loaded from
    /// `favorites_{id}`, empty if absent or unreadable.
    pub fn login(&mut self, user: User) -> Result<User> {
        write_json(&self.store, USER_KEY, &user)?;
        let favorites = self.load_favorites(&user.id);
        tracing::info!(user_id = %user.id, favorites = favorites.len(), "logged in");
        self.state = SessionState::Authenticated {
            user: user.clone(),
            favorites,
        };
        self.initialized = true;
        Ok(user)
    }

    /// Create a user with a timestamp id and an empty favorites list.
    ///
    /// The favorites list is written before the user entry, so a failed
    /// write never leaves storage pointing at a user memory does not hold.
    pub fn register(&mut self, profile: UserProfile) -> Result<User> {
        let id = self.clock.now_millis().to_string();
        let user = profile.into_user(id);

        write_json(&self.store, &favorites_key(&user.id), &Vec::<Country>::new())?;
        write_json(&self.store, USER_KEY, &user)?;
        tracing::info!(user_id = %user.id, "registered");
        self.state = SessionState::Authenticated {
            user: user.clone(),
            favorites: Vec::new(),
        };
        self.initialized = true;
        Ok(user)
    }

    /// End the session. The user's favorites stay in storage.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        if let SessionState::Authenticated { user, .. } = &self.state {
            tracing::info!(user_id = %user.id, "logged out");
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Add `country` to the favorites, or remove it if one with the same
    /// `cca3` is already there. Exactly one flip per call.
    pub fn toggle_favorite(&mut self, country: &Country) -> Result<FavoriteToggle> {
        let SessionState::Authenticated { user, favorites } = &mut self.state else {
            return Ok(FavoriteToggle::NoSession);
        };

        let exists = favorites.iter().any(|fav| fav.cca3 == country.cca3);
        let (next, outcome) = if exists {
            let next: Vec<Country> = favorites
                .iter()
                .filter(|fav| fav.cca3 != country.cca3)
                .cloned()
                .collect();
            (next, FavoriteToggle::Removed)
        } else {
            let mut next = favorites.clone();
            next.push(country.clone());
            (next, FavoriteToggle::Added)
        };

        write_json(&self.store, &favorites_key(&user.id), &next)?;
        tracing::debug!(user_id = %user.id, cca3 = %country.cca3, ?outcome, "toggled favorite");
        *favorites = next;
        Ok(outcome)
    }

    /// In-memory membership test; never touches storage.
    pub fn is_favorite(&self, cca3: &str) -> bool {
        self.favorites().iter().any(|fav| fav.cca3 == cca3)
    }

    pub fn favorites(&self) -> &[Country] {
        match &self.state {
            SessionState::Authenticated { favorites, .. } => favorites,
            SessionState::Anonymous => &[],
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn load_favorites(&self, user_id: &str) -> Vec<Country> {
        let mut favorites: Vec<Country> =
            read_json(&self.store, &favorites_key(user_id)).unwrap_or_default();
        dedup_by_code(&mut favorites);
        favorites
    }
}

/// Keep the first entry for each `cca3`, preserving order. Guards the
/// uniqueness invariant against hand-edited storage.
fn dedup_by_code(favorites: &mut Vec<Country>) {
    let mut seen = std::collections::HashSet::new();
    favorites.retain(|c| seen.insert(c.cca3.clone()));
}
