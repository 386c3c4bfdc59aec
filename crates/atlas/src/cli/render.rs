//! Turns `CmdResult` data into terminal text.
//!
//! Every `render_*` function returns a `String` so output can be checked
//! without a terminal; handlers print them.

use super::styles::Palette;
use atlasapp::api::{CmdMessage, MessageLevel};
use atlasapp::config::AtlasConfig;
use atlasapp::display;
use atlasapp::model::{Country, User};
use atlasapp::remote::boundaries::Boundary;
use atlasapp::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const FAVORITE_MARKER: &str = "♥";
const NAME_WIDTH: usize = 36;
const REGION_WIDTH: usize = 10;
const POPULATION_WIDTH: usize = 15;

pub fn render_messages(messages: &[CmdMessage], palette: &Palette) -> String {
    messages
        .iter()
        .map(|m| {
            let style = match m.level {
                MessageLevel::Info => &palette.info,
                MessageLevel::Success => &palette.success,
                MessageLevel::Warning => &palette.warning,
                MessageLevel::Error => &palette.error,
            };
            format!("{}\n", style.apply_to(&m.content))
        })
        .collect()
}

/// One line per country: favorite marker, cca3, name, region, population.
pub fn render_country_list(
    countries: &[Country],
    is_favorite: impl Fn(&str) -> bool,
    palette: &Palette,
) -> String {
    let mut out = String::new();
    for country in countries {
        let marker = if is_favorite(&country.cca3) {
            palette.favorite.apply_to(FAVORITE_MARKER).to_string()
        } else {
            " ".to_string()
        };
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            marker,
            palette.code.apply_to(format!("{:<3}", country.cca3)),
            pad_to_width(&country.name.common, NAME_WIDTH),
            palette
                .muted
                .apply_to(pad_to_width(&country.region, REGION_WIDTH)),
            format!(
                "{:>width$}",
                display::population(country.population),
                width = POPULATION_WIDTH
            )
        ));
    }
    if !countries.is_empty() {
        let noun = if countries.len() == 1 { "country" } else { "countries" };
        out.push_str(&format!(
            "{}\n",
            palette
                .muted
                .apply_to(format!("{} {}", countries.len(), noun))
        ));
    }
    out
}

pub fn render_country_detail(country: &Country, is_favorite: bool, palette: &Palette) -> String {
    let mut out = String::new();
    let heart = if is_favorite {
        format!(" {}", palette.favorite.apply_to(FAVORITE_MARKER))
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{}{}\n",
        palette.title.apply_to(&country.name.common),
        heart
    ));
    if let Some(official) = country.name.official.as_deref() {
        out.push_str(&format!("{}\n", palette.muted.apply_to(official)));
    }
    out.push('\n');

    let mut rows: Vec<(&str, String)> = vec![
        ("Code", country.cca3.clone()),
        ("Capital", display::capital(country)),
        ("Region", display::region(country)),
        ("Population", display::population(country.population)),
        ("Languages", display::languages(country)),
        ("Currencies", display::currencies(country)),
        ("Borders", display::borders(country)),
    ];
    if let Some(url) = display::flag_url(country) {
        rows.push(("Flag", format!("{} ({})", url, display::flag_alt(country))));
    }
    if let Some(arms) = country
        .coat_of_arms
        .as_ref()
        .and_then(|c| c.svg.as_deref().or(c.png.as_deref()))
    {
        rows.push(("Coat of arms", arms.to_string()));
    }

    for (label, value) in rows {
        out.push_str(&format!(
            "  {} {}\n",
            palette.label.apply_to(format!("{:<13}", format!("{}:", label))),
            value
        ));
    }
    out
}

pub fn render_boundary(boundary: &Boundary, palette: &Palette) -> String {
    let fc = boundary.features();
    let kinds: Vec<&str> = fc
        .features
        .iter()
        .filter_map(|f| f.geometry.as_ref().map(|g| g.kind.as_str()))
        .collect();
    let mut out = format!(
        "  {} {} ({})\n",
        palette.label.apply_to(format!("{:<13}", "Geometry:")),
        if kinds.is_empty() {
            "none".to_string()
        } else {
            kinds.join(", ")
        },
        if boundary.is_approximate() {
            "approximate"
        } else {
            "detailed"
        }
    );
    if let Some(bounds) = fc.bounds() {
        let (lat, lng) = bounds.center();
        out.push_str(&format!(
            "  {} {:.2}, {:.2} to {:.2}, {:.2}\n",
            palette.label.apply_to(format!("{:<13}", "Bounds:")),
            bounds.min_lat,
            bounds.min_lng,
            bounds.max_lat,
            bounds.max_lng
        ));
        out.push_str(&format!(
            "  {} {:.2}, {:.2}\n",
            palette.label.apply_to(format!("{:<13}", "Center:")),
            lat,
            lng
        ));
    }
    out
}

pub fn render_user(user: &User, palette: &Palette) -> String {
    let mut out = format!("{}\n", palette.title.apply_to(user.display_name()));
    out.push_str(&format!(
        "  {} {}\n",
        palette.label.apply_to(format!("{:<10}", "Id:")),
        user.id
    ));
    if let Some(email) = user.email.as_deref() {
        out.push_str(&format!(
            "  {} {}\n",
            palette.label.apply_to(format!("{:<10}", "Email:")),
            email
        ));
    }
    out
}

pub fn render_names(names: &[String]) -> String {
    names.iter().map(|n| format!("{}\n", n)).collect()
}

pub fn render_theme(theme: Theme, palette: &Palette) -> String {
    format!("{}\n", palette.title.apply_to(theme))
}

pub fn render_config(config: &AtlasConfig, palette: &Palette) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{} = {}\n",
                palette.label.apply_to(key),
                palette.code.apply_to(value)
            )
        })
        .collect()
}

/// Truncate with an ellipsis if wider than `width`, then pad with spaces.
fn pad_to_width(text: &str, width: usize) -> String {
    let mut fitted = if text.width() > width {
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        out
    } else {
        text.to_string()
    };
    let padding = width.saturating_sub(fitted.width());
    fitted.push_str(&" ".repeat(padding));
    fitted
}
