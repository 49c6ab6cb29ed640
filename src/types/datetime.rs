//! Date and time input types

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::core::Element;

// YYYY-Www or YYYY-WW
static WEEK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-W?([0-9]{2})$").expect("WEEK_REGEX: invalid regex pattern")
});

pub fn date_element() -> Element {
    Element::of_type("date").with_attribute("placeholder", "enter a date")
}

/// `YYYY-MM-DD`; empty passes
pub fn validate_date(_elem: &Element, value: &str) -> bool {
    value.is_empty() || parse_date(value)
}

pub fn datetime_local_element() -> Element {
    Element::of_type("datetime-local").with_attribute("placeholder", "enter a local timestamp")
}

/// A local date and time, or a full RFC 3339 timestamp; empty passes
///
/// Values of 20 or more characters carry zone information and must be RFC
/// 3339. Shorter values are `YYYY-MM-DD`, a `T` or space, then `HH:MM:SS`.
pub fn validate_datetime_local(_elem: &Element, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.len() >= 20 {
        return DateTime::parse_from_rfc3339(value).is_ok();
    }
    let Some(date) = value.get(0..10) else {
        return false;
    };
    if !parse_date(date) {
        return false;
    }
    if !matches!(value.get(10..11), Some("T") | Some(" ")) {
        return false;
    }
    value
        .get(11..)
        .is_some_and(|time| NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok())
}

pub fn month_element() -> Element {
    Element::of_type("month")
        .with_attribute("placeholder", "Enter year dash month, example 2006-01")
}

/// `YYYY-MM`
pub fn validate_month(_elem: &Element, value: &str) -> bool {
    value.len() == 7 && parse_date(&format!("{}-01", value))
}

pub fn time_element() -> Element {
    Element::of_type("time")
        .with_attribute("placeholder", "E.g. 13:44 would be 1:44pm")
        .with_attribute(
            "pattern",
            "[0-2][0-9]:[0-5][0-9]|[0-2][0-9]:[0-5][0-9]:[0-5][0-9]",
        )
}

/// `HH:MM:SS` or `HH:MM`
pub fn validate_time(_elem: &Element, value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub fn week_element() -> Element {
    Element::of_type("week")
        .with_attribute(
            "placeholder",
            "Input as YYYY-WW where WW is week number, e.g. 2024-51",
        )
        .with_attribute("pattern", "[0-9]{4}-W?[0-5][0-9]")
}

/// `YYYY-Www` or `YYYY-WW` with a week number from 1 to 53
///
/// Does not check whether the given year actually has a 53rd week.
pub fn validate_week(_elem: &Element, value: &str) -> bool {
    WEEK_REGEX
        .captures(value)
        .and_then(|caps| caps.get(2)?.as_str().parse::<u32>().ok())
        .is_some_and(|week| (1..=53).contains(&week))
}

fn parse_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
