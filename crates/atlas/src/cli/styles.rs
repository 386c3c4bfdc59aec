//! Terminal palettes for the light and dark themes.
//!
//! Renderers ask for a [`Palette`] by the stored [`Theme`] and only ever use
//! its semantic slots (`title`, `muted`, `favorite`, ...), so the two themes
//! differ here and nowhere else. `console` drops the escapes when stdout is not
//! a terminal.

use atlasapp::theme::Theme;
use console::Style;
use once_cell::sync::Lazy;

pub struct Palette {
    pub title: Style,
    pub label: Style,
    pub muted: Style,
    pub code: Style,
    pub favorite: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

static LIGHT: Lazy<Palette> = Lazy::new(|| Palette {
    title: Style::new().bold().black(),
    label: Style::new().blue(),
    muted: Style::new().color256(244),
    code: Style::new().color256(130),
    favorite: Style::new().red(),
    info: Style::new().color256(244),
    success: Style::new().green(),
    warning: Style::new().color256(172),
    error: Style::new().red().bold(),
});

static DARK: Lazy<Palette> = Lazy::new(|| Palette {
    title: Style::new().bold().white(),
    label: Style::new().cyan(),
    muted: Style::new().color256(246),
    code: Style::new().yellow(),
    favorite: Style::new().color256(204),
    info: Style::new().color256(250),
    success: Style::new().green().bright(),
    warning: Style::new().yellow().bright(),
    error: Style::new().red().bright().bold(),
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}
