//! Text for country fields, with the placeholders used when a record lacks
//! them. Every UI renders through these so missing data looks the same
//! everywhere.

use crate::model::Country;

pub const NO_CAPITAL: &str = "N/A";
pub const NONE: &str = "None";

pub fn capital(country: &Country) -> String {
    match country.capital.as_deref() {
        Some(capitals) if !capitals.is_empty() => capitals.join(", "),
        _ => NO_CAPITAL.to_string(),
    }
}

pub fn languages(country: &Country) -> String {
    let names: Vec<&str> = country.language_names().collect();
    if names.is_empty() {
        NONE.to_string()
    } else {
        names.join(", ")
    }
}

/// "Euro (€), Swiss franc (Fr.)"
pub fn currencies(country: &Country) -> String {
    let Some(currencies) = country.currencies.as_ref().filter(|c| !c.is_empty()) else {
        return NONE.to_string();
    };
    currencies
        .values()
        .map(|c| match c.symbol.as_deref() {
            Some(symbol) => format!("{} ({})", c.name, symbol),
            None => c.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn borders(country: &Country) -> String {
    match country.borders.as_deref() {
        Some(codes) if !codes.is_empty() => codes.join(", "),
        _ => NONE.to_string(),
    }
}

/// "Europe (Western Europe)", or just the region without a subregion.
pub fn region(country: &Country) -> String {
    match country.subregion.as_deref().filter(|s| !s.is_empty()) {
        Some(sub) => format!("{} ({})", country.region, sub),
        None => country.region.clone(),
    }
}

/// 1234567 -> "1,234,567"
pub fn population(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// SVG flag if present, else PNG.
pub fn flag_url(country: &Country) -> Option<&str> {
    country
        .flags
        .svg
        .as_deref()
        .or(country.flags.png.as_deref())
}

pub fn flag_alt(country: &Country) -> String {
    match country.flags.alt.as_deref().filter(|a| !a.is_empty()) {
        Some(alt) => alt.to_string(),
        None => format!("Flag of {}", country.name.common),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Currency;
    use std::collections::BTreeMap;

    #[test]
    fn test_placeholders_for_sparse_record() {
        let country = Country::new("ATA", "Antarctica").with_region("Antarctic");
        assert_eq!(capital(&country), "N/A");
        assert_eq!(languages(&country), "None");
        assert_eq!(currencies(&country), "None");
        assert_eq!(borders(&country), "None");
        assert_eq!(region(&country), "Antarctic");
        assert_eq!(flag_url(&country), None);
        assert_eq!(flag_alt(&country), "Flag of Antarctica");
    }

    #[test]
    fn test_full_record() {
        let mut country = Country::new("CHE", "Switzerland")
            .with_capital("Bern")
            .with_region("Europe")
            .with_language("deu", "German")
            .with_language("fra", "French");
        country.subregion = Some("Western Europe".into());
        country.borders = Some(vec!["AUT".into(), "FRA".into()]);
        let mut money = BTreeMap::new();
        money.insert(
            "CHF".to_string(),
            Currency {
                name: "Swiss franc".into(),
                symbol: Some("Fr.".into()),
                ..Default::default()
            },
        );
        country.currencies = Some(money);
        country.flags.png = Some("https://flags/che.png".into());

        assert_eq!(capital(&country), "Bern");
        assert_eq!(languages(&country), "German, French");
        assert_eq!(currencies(&country), "Swiss franc (Fr.)");
        assert_eq!(borders(&country), "AUT, FRA");
        assert_eq!(region(&country), "Europe (Western Europe)");
        assert_eq!(flag_url(&country), Some("https://flags/che.png"));

        country.flags.svg = Some("https://flags/che.svg".into());
        assert_eq!(flag_url(&country), Some("https://flags/che.svg"));
    }

    #[test]
    fn test_population_separators() {
        assert_eq!(population(0), "0");
        assert_eq!(population(999), "999");
        assert_eq!(population(1000), "1,000");
        assert_eq!(population(38005238), "38,005,238");
        assert_eq!(population(1402112000), "1,402,112,000");
    }
}
