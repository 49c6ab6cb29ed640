//! Free-form, numeric and choice input types

use regex::Regex;
use std::sync::LazyLock;

use crate::core::Element;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?)*$",
    )
    .expect("EMAIL_REGEX: invalid regex pattern")
});

pub fn text_element() -> Element {
    Element::of_type("text")
}

/// Whole-value match against the element's pattern, when it has one
///
/// An unparsable pattern rejects every value.
pub fn validate_text(elem: &Element, value: &str) -> bool {
    if elem.pattern.is_empty() {
        return true;
    }
    match Regex::new(&format!("^(?:{})$", elem.pattern)) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            tracing::warn!(id = %elem.id, pattern = %elem.pattern, "invalid pattern: {}", e);
            false
        }
    }
}

pub fn textarea_element() -> Element {
    Element::of_type("textarea")
}

pub fn search_element() -> Element {
    Element::of_type("search")
}

pub fn password_element() -> Element {
    Element::of_type("password")
}

/// A single line, then the text rules
pub fn validate_password(elem: &Element, value: &str) -> bool {
    !value.contains(['\r', '\n']) && validate_text(elem, value)
}

pub fn email_element() -> Element {
    Element::of_type("email").with_attribute("placeholder", "E.g. jane.doe@example.org")
}

pub fn validate_email(_elem: &Element, value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn url_element() -> Element {
    Element::of_type("url")
        .with_attribute("placeholder", "https://example.edu")
        .with_attribute("pattern", "https://.*")
}

/// An absolute URL
pub fn validate_url(_elem: &Element, value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub fn tel_element() -> Element {
    Element::of_type("tel")
        .with_attribute("placeholder", "e.g. phone like 123-456-7890")
        .with_attribute("pattern", "[0-9]{3}-[0-9]{3}-[0-9]{4}")
}

/// A phone number; numbers without a country code are read as US numbers
pub fn validate_tel(_elem: &Element, value: &str) -> bool {
    phonenumber::parse(Some(phonenumber::country::Id::US), value).is_ok()
}

pub fn color_element() -> Element {
    Element::of_type("color")
        .with_attribute("value", "#000000")
        .with_attribute(
            "placeholder",
            "enter a color in hexadecimal format, e.g. green is #00FF00",
        )
}

/// Hexadecimal digits with an optional leading `#`
pub fn validate_color(_elem: &Element, value: &str) -> bool {
    let digits = value.strip_prefix('#').unwrap_or(value);
    !digits.is_empty() && digits.len() <= 16 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn number_element() -> Element {
    Element::of_type("number").with_attribute("value", "0")
}

pub fn validate_number(_elem: &Element, value: &str) -> bool {
    parse_number(value).is_some()
}

pub fn range_element() -> Element {
    Element::of_type("range")
        .with_attribute("value", "0")
        .with_attribute("min", "0")
        .with_attribute("max", "100")
        .with_attribute("step", "1")
}

/// A number within the element's `min` and `max` attributes
///
/// Both bounds must be present and numeric. The `step` is not checked.
pub fn validate_range(elem: &Element, value: &str) -> bool {
    let bound = |key: &str| elem.attributes.get(key).and_then(|v| parse_number(v));
    match (bound("min"), bound("max"), parse_number(value)) {
        (Some(min), Some(max), Some(n)) => n >= min && n <= max,
        _ => false,
    }
}

pub fn checkbox_element() -> Element {
    Element::of_type("checkbox")
}

pub fn radio_element() -> Element {
    Element::of_type("radio")
}

/// Checked boxes and selected radios submit a non-blank value
pub fn validate_checked(_elem: &Element, value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn button_element() -> Element {
    Element::of_type("button")
}

pub fn reset_element() -> Element {
    Element::of_type("reset").with_attribute("value", "reset")
}

pub fn submit_element() -> Element {
    Element::of_type("submit").with_attribute("value", "submit")
}

pub fn accept_any(_elem: &Element, _value: &str) -> bool {
    true
}

pub fn image_element() -> Element {
    Element::of_type("image")
}

/// Image inputs carry no value
pub fn validate_image(_elem: &Element, value: &str) -> bool {
    value.is_empty()
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_pattern_is_anchored() {
        let elem = Element::of_type("text")
            .with_id("orcid")
            .with_pattern("[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9A-Z]");
        assert!(validate_text(&elem, "0000-0003-0900-6903"));
        assert!(!validate_text(&elem, "id: 0000-0003-0900-6903"));
        assert!(validate_text(&Element::of_type("text"), "anything"));
    }

    #[test]
    fn test_text_invalid_pattern_fails() {
        let elem = Element::of_type("text").with_pattern("[unclosed");
        assert!(!validate_text(&elem, "x"));
    }

    #[test]
    fn test_password_single_line() {
        let elem = password_element();
        assert!(validate_password(&elem, "s3cret"));
        assert!(!validate_password(&elem, "two\nlines"));
    }

    #[test]
    fn test_email() {
        let elem = email_element();
        assert!(validate_email(&elem, "jane.doe@example.org"));
        assert!(validate_email(&elem, "root@localhost"));
        assert!(!validate_email(&elem, "jane.doe"));
        assert!(!validate_email(&elem, "jane@doe@example.org"));
    }

    #[test]
    fn test_url() {
        let elem = url_element();
        assert!(validate_url(&elem, "https://example.edu/path?q=1"));
        assert!(!validate_url(&elem, "example.edu"));
    }

    #[test]
    fn test_tel() {
        let elem = tel_element();
        assert!(validate_tel(&elem, "626-395-6811"));
        assert!(validate_tel(&elem, "+44 20 7946 0958"));
        assert!(!validate_tel(&elem, "call me"));
    }

    #[test]
    fn test_color() {
        let elem = color_element();
        assert!(validate_color(&elem, "#00FF00"));
        assert!(validate_color(&elem, "ff00ff"));
        assert!(!validate_color(&elem, "green"));
        assert!(!validate_color(&elem, "#"));
    }

    #[test]
    fn test_number_and_range() {
        let elem = number_element();
        assert!(validate_number(&elem, "42"));
        assert!(validate_number(&elem, "-2.5"));
        assert!(!validate_number(&elem, "forty"));

        let range = range_element();
        assert!(validate_range(&range, "0"));
        assert!(validate_range(&range, "100"));
        assert!(!validate_range(&range, "101"));

        let unbounded = Element::of_type("range").with_attribute("min", "0");
        assert!(!validate_range(&unbounded, "5"));
    }

    #[test]
    fn test_choices_and_buttons() {
        let elem = checkbox_element();
        assert!(validate_checked(&elem, "true"));
        assert!(!validate_checked(&elem, "  "));
        assert!(accept_any(&submit_element(), "anything"));
        assert!(validate_image(&image_element(), ""));
        assert!(!validate_image(&image_element(), "x"));
    }
}
