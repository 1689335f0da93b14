//! Free-text description parser
//!
//! Splits an invoice line such as
//! `"Москва - Тверь, от 01.02.24, 123 регион, Иванов И.И."` into route, date,
//! plate and driver surname. Every field falls back to `None`, nothing here fails.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"от\s+(\d{2}\.\d{2}\.\d{2})").expect("date pattern"));

static PLATE_FIRST_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})").expect("plate pattern"));

static PLATE_STANDALONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{3})(?:\D|$)").expect("plate pattern"));

static DRIVER_WITH_INITIALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*(\p{Lu}\p{Ll}+)\s+\p{Lu}\.\s*\p{Lu}\.").expect("driver pattern")
});

static DRIVER_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(\p{Lu}\p{Ll}+)").expect("driver pattern"));

/// How the vehicle plate is picked out of a description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PlateMode {
    /// First three consecutive digits anywhere, even inside a longer number (default)
    #[default]
    FirstRun,
    /// First run of exactly three digits not touching other digits
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedDescription {
    pub(crate) route: String,
    pub(crate) date: Option<String>,
    pub(crate) plate: Option<String>,
    pub(crate) driver: Option<String>,
}

pub(crate) fn parse_description(text: &str, plate_mode: PlateMode) -> ParsedDescription {
    ParsedDescription {
        route: parse_route(text),
        date: first_capture(&DATE_RE, text),
        plate: parse_plate(text, plate_mode),
        driver: parse_driver(text),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_route(text: &str) -> String {
    text.split(',').next().unwrap_or(text).trim().to_string()
}

// First-run mode takes "202" out of "2024"
fn parse_plate(text: &str, mode: PlateMode) -> Option<String> {
    let re = match mode {
        PlateMode::FirstRun => &PLATE_FIRST_RUN_RE,
        PlateMode::Standalone => &PLATE_STANDALONE_RE,
    };
    first_capture(re, text)
}

fn parse_driver(text: &str) -> Option<String> {
    first_capture(&DRIVER_WITH_INITIALS_RE, text)
        .or_else(|| first_capture(&DRIVER_FALLBACK_RE, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedDescription {
        parse_description(text, PlateMode::FirstRun)
    }

    #[test]
    fn full_description() {
        let p = parse("Москва - Тверь, от 01.02.24, 123 регион, Иванов И.И.");
        assert_eq!(p.route, "Москва - Тверь");
        assert_eq!(p.date.as_deref(), Some("01.02.24"));
        assert_eq!(p.plate.as_deref(), Some("123"));
        assert_eq!(p.driver.as_deref(), Some("Иванов"));
    }

    #[test]
    fn street_plate_and_driver() {
        let p = parse("улица Ленина, 123 регион, Иванов И.И.");
        assert_eq!(p.route, "улица Ленина");
        assert_eq!(p.plate.as_deref(), Some("123"));
        assert_eq!(p.driver.as_deref(), Some("Иванов"));
        assert_eq!(p.date, None);
    }

    #[test]
    fn route_without_comma_is_whole_text() {
        let p = parse("  Перевозка груза  ");
        assert_eq!(p.route, "Перевозка груза");
        assert_eq!(p.plate, None);
        assert_eq!(p.driver, None);
    }

    #[test]
    fn date_requires_ot_prefix() {
        assert_eq!(parse("рейс 01.02.24, 555").date, None);
        assert_eq!(parse("рейс от  15.11.23, 555").date.as_deref(), Some("15.11.23"));
    }

    #[test]
    fn date_takes_first_two_year_digits_of_long_year() {
        assert_eq!(parse("от 01.02.2024").date.as_deref(), Some("01.02.20"));
    }

    #[test]
    fn first_run_plate_can_hit_a_year() {
        let p = parse("Рейс 2024 года, 777, Петров П.П.");
        assert_eq!(p.plate.as_deref(), Some("202"));
    }

    #[test]
    fn standalone_plate_skips_longer_numbers() {
        let p = parse_description("Рейс 2024 года, 777, Петров П.П.", PlateMode::Standalone);
        assert_eq!(p.plate.as_deref(), Some("777"));
    }

    #[test]
    fn standalone_plate_at_text_edges() {
        assert_eq!(
            parse_description("123", PlateMode::Standalone).plate.as_deref(),
            Some("123")
        );
        assert_eq!(parse_description("1234", PlateMode::Standalone).plate, None);
    }

    #[test]
    fn driver_prefers_surname_with_initials() {
        // "Москва" follows a comma first but has no initials
        let p = parse("Тверь, Москва, 321, Сидоров А.Б.");
        assert_eq!(p.driver.as_deref(), Some("Сидоров"));
    }

    #[test]
    fn driver_initials_may_be_spaced() {
        let p = parse("Тверь, 321, Сидоров А. Б.");
        assert_eq!(p.driver.as_deref(), Some("Сидоров"));
    }

    #[test]
    fn driver_falls_back_to_any_capitalized_word_after_comma() {
        let p = parse("Тверь, 321 регион, Сидоров");
        assert_eq!(p.driver.as_deref(), Some("Сидоров"));
    }

    #[test]
    fn driver_missing_when_no_capitalized_word_follows_comma() {
        let p = parse("Тверь, 321 регион, без водителя");
        assert_eq!(p.driver, None);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let p = parse("");
        assert_eq!(p.route, "");
        assert_eq!(p.date, None);
        assert_eq!(p.plate, None);
        assert_eq!(p.driver, None);
    }
}
