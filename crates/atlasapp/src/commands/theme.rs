use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::KeyValueStore;
use crate::theme::{Theme, ThemeStore};

pub fn show<S: KeyValueStore>(themes: &ThemeStore<S>) -> CmdResult {
    CmdResult::default().with_theme(themes.theme())
}

pub fn toggle<S: KeyValueStore>(themes: &mut ThemeStore<S>) -> Result<CmdResult> {
    let theme = themes.toggle()?;
    Ok(switched(theme))
}

/// Save `theme`. Only an identical saved choice is skipped; a matching
/// fallback still gets written.
pub fn set<S: KeyValueStore>(themes: &mut ThemeStore<S>, theme: Theme) -> Result<CmdResult> {
    if themes.stored() == Some(theme) {
        return Ok(CmdResult::default()
            .with_theme(theme)
            .with_message(CmdMessage::info(format!("Theme is already {}", theme))));
    }
    let theme = themes.set(theme)?;
    Ok(switched(theme))
}

fn switched(theme: Theme) -> CmdResult {
    CmdResult::default()
        .with_theme(theme)
        .with_message(CmdMessage::success(format!("Switched to {} mode", theme)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::THEME_KEY;

    #[test]
    fn test_toggle_reports_new_theme() {
        let backend = MemBackend::new();
        let mut themes = ThemeStore::load(&backend, Theme::Light);

        let result = toggle(&mut themes).unwrap();
        assert_eq!(result.theme, Some(Theme::Dark));
        assert_eq!(result.messages[0].content, "Switched to dark mode");
        assert_eq!(show(&themes).theme, Some(Theme::Dark));
    }

    #[test]
    fn test_set_same_stored_theme_does_not_write() {
        let backend = MemBackend::new();
        backend.set(THEME_KEY, "light").unwrap();
        let mut themes = ThemeStore::load(&backend, Theme::Dark);

        let result = set(&mut themes, Theme::Light).unwrap();
        assert_eq!(result.messages[0].content, "Theme is already light");
        assert_eq!(backend.write_count(), 1);

        set(&mut themes, Theme::Dark).unwrap();
        assert_eq!(backend.get(THEME_KEY).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_set_matching_fallback_is_saved() {
        let backend = MemBackend::new();
        let mut themes = ThemeStore::load(&backend, Theme::Light);

        let result = set(&mut themes, Theme::Light).unwrap();
        assert_eq!(result.messages[0].content, "Switched to light mode");
        assert_eq!(backend.get(THEME_KEY).unwrap(), Some("light".to_string()));
        assert_eq!(themes.stored(), Some(Theme::Light));
    }
}
