//! Persistent identifier input types: UUID, ROR, ISNI and ORCID

use regex::Regex;
use std::sync::LazyLock;

use crate::core::Element;

pub const ORCID_PATTERN: &str = "[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]";
pub const ISNI_PATTERN: &str = "[0-9]{4} ?-?[0-9]{4} ?-?[0-9]{4} ?-?[0-9]{3}[0-9X]";
pub const ROR_PATTERN: &str = "0[a-hj-km-np-tv-z0-9]{6}[0-9]{2}";

const ORCID_PREFIX: &str = "https://orcid.org/";
const ROR_PREFIX: &str = "https://ror.org/";

// ORCID iDs are allocated from this block of the ISNI range.
const ORCID_BODY_RANGE: std::ops::RangeInclusive<u64> = 15_000_000..=35_000_000;

static ROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", ROR_PATTERN)).expect("ROR_REGEX: invalid regex pattern")
});

pub fn uuid_element() -> Element {
    Element::of_type("uuid").with_attribute("placeholder", "enter a uuid")
}

/// Any UUID version; empty passes
pub fn validate_uuid(_elem: &Element, value: &str) -> bool {
    value.is_empty() || uuid::Uuid::parse_str(value).is_ok()
}

pub fn ror_element() -> Element {
    Element::of_type("ror")
        .with_attribute("placeholder", "e.g. https://ror.org/05dxps055")
        .with_attribute("pattern", format!("({})?{}", ROR_PREFIX, ROR_PATTERN))
}

/// A ROR id, bare or as its https URL; empty passes
///
/// Only the shape is checked, not the trailing checksum.
pub fn validate_ror(_elem: &Element, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let id = value.strip_prefix(ROR_PREFIX).unwrap_or(value);
    ROR_REGEX.is_match(id)
}

pub fn isni_element() -> Element {
    Element::of_type("isni")
        .with_attribute("placeholder", "e.g. 1111 2222 3333 444X")
        .with_attribute("pattern", ISNI_PATTERN)
}

/// 16 characters with an ISO 7064 MOD 11-2 check digit; empty passes
///
/// Spaces and dashes are ignored. The check character `X` stands for 10.
pub fn validate_isni(_elem: &Element, value: &str) -> bool {
    value.is_empty() || isni_digits(value).is_some()
}

pub fn orcid_element() -> Element {
    Element::of_type("orcid")
        .with_attribute("placeholder", "e.g. 0000-0002-1825-0097")
        .with_attribute("pattern", ORCID_PATTERN)
}

/// An ORCID iD, bare or as its https URL; empty passes
///
/// ORCID iDs are ISNIs drawn from a reserved block, so the checksum is
/// verified and the body must fall inside that block.
pub fn validate_orcid(_elem: &Element, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let value = value.strip_prefix(ORCID_PREFIX).unwrap_or(value);
    isni_digits(value)
        .and_then(|digits| digits[..15].parse::<u64>().ok())
        .is_some_and(|body| ORCID_BODY_RANGE.contains(&body))
}

/// Normalize an ISNI and verify its check digit, returning the 16 characters
fn isni_digits(value: &str) -> Option<String> {
    let digits: String = value
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if digits.len() != 16 || !digits.is_ascii() {
        return None;
    }

    let mut total: u64 = 0;
    for c in digits[..15].chars() {
        total = (total + u64::from(c.to_digit(10)?)) * 2;
    }
    let check = match digits.chars().last()? {
        'X' => 10,
        c => u64::from(c.to_digit(10)?),
    };
    ((12 - total % 11) % 11 == check).then_some(digits)
}
