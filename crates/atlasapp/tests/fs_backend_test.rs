use atlasapp::model::{Country, User, UserProfile};
use atlasapp::session::{FavoriteToggle, SessionStore};
use atlasapp::store::fs_backend::FsBackend;
use atlasapp::store::{favorites_key, KeyValueStore, USER_KEY};
use atlasapp::theme::{Theme, ThemeStore};
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.get("user").unwrap(), None);

    backend.set("user", "{\"id\":\"1\"}").unwrap();
    assert_eq!(
        backend.get("user").unwrap(),
        Some("{\"id\":\"1\"}".to_string())
    );

    backend.remove("user").unwrap();
    assert_eq!(backend.get("user").unwrap(), None);

    // Removing again is fine
    backend.remove("user").unwrap();
}

#[test]
fn test_fs_backend_creates_root_lazily() {
    let (_dir, backend) = setup();
    assert!(!backend.root().exists());

    backend.set("theme", "dark").unwrap();
    assert!(backend.root().exists());
    assert_eq!(
        fs::read_to_string(backend.entry_path("theme").unwrap()).unwrap(),
        "dark"
    );
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();

    backend.set("favorites_1", "[]").unwrap();
    backend.set("favorites_1", "[{\"cca3\":\"PER\"}]").unwrap();

    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_rejects_path_keys() {
    let (_dir, backend) = setup();
    assert!(backend.set("../escape", "x").is_err());
    assert!(backend.get("a/b").is_err());
}

#[test]
fn test_session_survives_restart() {
    let (_dir, backend) = setup();
    let backend = Rc::new(backend);
    let peru = Country::new("PER", "Peru").with_region("Americas");

    {
        let mut session = SessionStore::new(Rc::clone(&backend));
        session.initialize();
        session
            .login(User::new("42").with_username("ada"))
            .unwrap();
        assert_eq!(
            session.toggle_favorite(&peru).unwrap(),
            FavoriteToggle::Added
        );
    }

    let mut session = SessionStore::new(Rc::clone(&backend));
    assert!(!session.is_initialized());
    session.initialize();
    assert_eq!(session.current_user().unwrap().id, "42");
    assert!(session.is_favorite("PER"));
    assert_eq!(session.favorites()[0], peru);
}

#[test]
fn test_logout_keeps_favorites_on_disk() {
    let (_dir, backend) = setup();
    let mut session = SessionStore::with_clock(&backend, || 1700000000000_i64);
    session.initialize();
    session
        .register(UserProfile {
            username: Some("ada".into()),
            email: Some("ada@example.com".into()),
        })
        .unwrap();
    session.toggle_favorite(&Country::new("JPN", "Japan")).unwrap();
    session.logout().unwrap();

    assert_eq!(backend.get(USER_KEY).unwrap(), None);
    let stored = backend.get(&favorites_key("1700000000000")).unwrap().unwrap();
    assert!(stored.contains("\"JPN\""));

    session.login(User::new("1700000000000")).unwrap();
    assert!(session.is_favorite("JPN"));
}

#[test]
fn test_corrupt_user_entry_means_logged_out() {
    let (_dir, backend) = setup();
    backend.set(USER_KEY, "not json").unwrap();

    let mut session = SessionStore::new(&backend);
    session.initialize();
    assert!(session.is_initialized());
    assert!(!session.is_authenticated());
}

#[test]
fn test_theme_shares_backend_with_session() {
    let (_dir, backend) = setup();
    let backend = Rc::new(backend);

    let mut themes = ThemeStore::load(Rc::clone(&backend), Theme::Light);
    let mut session = SessionStore::new(Rc::clone(&backend));
    session.initialize();
    session.login(User::new("1")).unwrap();
    themes.toggle().unwrap();

    let reloaded = ThemeStore::load(Rc::clone(&backend), Theme::Light);
    assert!(reloaded.is_dark());
    assert!(backend.get(USER_KEY).unwrap().is_some());
}
