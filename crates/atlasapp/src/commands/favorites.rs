use crate::commands::{CmdMessage, CmdResult, LOGIN_REQUIRED};
use crate::error::Result;
use crate::model::Country;
use crate::session::{FavoriteToggle, SessionStore};
use crate::store::KeyValueStore;

/// Add or remove `country`. Without a session nothing changes and the caller
/// is told to log in.
pub fn toggle<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    country: &Country,
) -> Result<CmdResult> {
    let name = &country.name.common;
    let message = match session.toggle_favorite(country)? {
        FavoriteToggle::Added => CmdMessage::success(format!("Added {} to favorites", name)),
        FavoriteToggle::Removed => {
            CmdMessage::success(format!("Removed {} from favorites", name))
        }
        FavoriteToggle::NoSession => return Ok(CmdResult::error(LOGIN_REQUIRED)),
    };
    Ok(CmdResult::default()
        .with_affected_countries(vec![country.clone()])
        .with_message(message))
}

pub fn list<S: KeyValueStore>(session: &SessionStore<S>) -> CmdResult {
    if !session.is_authenticated() {
        return CmdResult::default().with_message(CmdMessage::info(LOGIN_REQUIRED));
    }
    let favorites = session.favorites().to_vec();
    if favorites.is_empty() {
        return CmdResult::default().with_message(CmdMessage::info(
            "You haven't added any favorite countries yet.",
        ));
    }
    CmdResult::default().with_listed_countries(favorites)
}
