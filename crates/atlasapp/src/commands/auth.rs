use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{User, UserProfile};
use crate::session::SessionStore;
use crate::store::KeyValueStore;

pub const MISSING_FIELDS: &str = "Please fill in all fields";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Id given to every demo login.
pub const DEMO_USER_ID: &str = "1";

/// Demo login: any non-empty email/password pair is accepted.
///
/// The session user is `{ id: "1", email, username: <local part of email> }`.
/// The password is checked for presence only.
pub fn login<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    email: &str,
    password: &str,
) -> Result<CmdResult> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Ok(CmdResult::error(MISSING_FIELDS));
    }

    let username = email.split('@').next().unwrap_or(email);
    let user = User::new(DEMO_USER_ID)
        .with_email(email)
        .with_username(username);
    let user = session.login(user)?;

    let favorites = session.favorites().len();
    let mut result = CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Logged in as {}",
            user.display_name()
        )))
        .with_user(Some(user));
    if favorites > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} favorite countr{} restored",
            favorites,
            if favorites == 1 { "y" } else { "ies" }
        )));
    }
    Ok(result)
}

pub fn register<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<CmdResult> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Ok(CmdResult::error(MISSING_FIELDS));
    }
    if password != confirm {
        return Ok(CmdResult::error(PASSWORD_MISMATCH));
    }

    let user = session.register(UserProfile {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Registered and logged in as {}",
            user.display_name()
        )))
        .with_user(Some(user)))
}

pub fn logout<S: KeyValueStore>(session: &mut SessionStore<S>) -> Result<CmdResult> {
    if !session.is_authenticated() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Not logged in")));
    }
    session.logout()?;
    Ok(CmdResult::default().with_message(CmdMessage::success("Logged out")))
}

pub fn whoami<S: KeyValueStore>(session: &SessionStore<S>) -> CmdResult {
    match session.current_user() {
        Some(user) => CmdResult::default().with_user(Some(user.clone())),
        None => CmdResult::default().with_message(CmdMessage::info("Not logged in")),
    }
}
