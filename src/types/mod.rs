//! Built-in input types
//!
//! Each input type is a pair of functions: one builds a fresh [`Element`]
//! preset for that type, the other checks a submitted value. They are attached
//! to a model with [`Model::define`], so callers can replace or extend them.

pub mod datetime;
pub mod identifiers;
pub mod text;

use crate::core::{Element, Model};

type TypeDef = (&'static str, fn() -> Element, fn(&Element, &str) -> bool);

const DEFAULT_TYPES: &[TypeDef] = &[
    ("date", datetime::date_element, datetime::validate_date),
    (
        "datetime-local",
        datetime::datetime_local_element,
        datetime::validate_datetime_local,
    ),
    ("month", datetime::month_element, datetime::validate_month),
    ("color", text::color_element, text::validate_color),
    ("email", text::email_element, text::validate_email),
    ("text", text::text_element, text::validate_text),
    ("number", text::number_element, text::validate_number),
    ("range", text::range_element, text::validate_range),
    ("tel", text::tel_element, text::validate_tel),
    ("time", datetime::time_element, datetime::validate_time),
    ("url", text::url_element, text::validate_url),
    ("checkbox", text::checkbox_element, text::validate_checked),
    ("password", text::password_element, text::validate_password),
    ("radio", text::radio_element, text::validate_checked),
    ("textarea", text::textarea_element, text::validate_text),
    ("orcid", identifiers::orcid_element, identifiers::validate_orcid),
    ("isni", identifiers::isni_element, identifiers::validate_isni),
    ("uuid", identifiers::uuid_element, identifiers::validate_uuid),
    ("ror", identifiers::ror_element, identifiers::validate_ror),
];

const EXTENDED_TYPES: &[TypeDef] = &[
    ("week", datetime::week_element, datetime::validate_week),
    ("search", text::search_element, text::validate_text),
    ("button", text::button_element, text::accept_any),
    ("reset", text::reset_element, text::accept_any),
    ("submit", text::submit_element, text::accept_any),
    ("image", text::image_element, text::validate_image),
];

/// Register the standard input types on a model
pub fn define_defaults(model: &mut Model) {
    define_all(model, DEFAULT_TYPES);
}

/// Register the less common input types (week, search, buttons, image)
pub fn define_extended(model: &mut Model) {
    define_all(model, EXTENDED_TYPES);
}

fn define_all(model: &mut Model, types: &[TypeDef]) {
    for &(name, generate, validate) in types {
        model.define(name, generate, validate);
    }
}

/// Every built-in type name, paired with whether it is an extended type
pub fn catalog() -> Vec<(&'static str, bool)> {
    DEFAULT_TYPES
        .iter()
        .map(|(name, _, _)| (*name, false))
        .chain(EXTENDED_TYPES.iter().map(|(name, _, _)| (*name, true)))
        .collect()
}
