use crate::utils::error::{LookupError, LookupResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static HYPHENATED_CEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("CEP pattern is valid"));

/// A validated Brazilian postal code.
///
/// Built only through [`normalize`] (`NNNNN-NNN`) or [`validate_digits`]
/// (bare `NNNNNNNN`), so holding one means the value already passed the
/// matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn all_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

/// Canonicalises a raw CEP to `NNNNN-NNN`.
///
/// Accepts either the hyphenated form as-is or eight bare digits, which get a
/// hyphen inserted after the fifth digit. Everything else is rejected.
pub fn normalize(raw: &str) -> LookupResult<Cep> {
    if HYPHENATED_CEP.is_match(raw) {
        return Ok(Cep(raw.to_string()));
    }

    if raw.len() > 9 {
        return Err(LookupError::InvalidCep);
    }

    if raw.len() == 8 && !raw.contains('-') && all_digits(raw) {
        return Ok(Cep(format!("{}-{}", &raw[..5], &raw[5..])));
    }

    Err(LookupError::InvalidCep)
}

/// Accepts exactly eight ASCII digits and keeps them unhyphenated.
pub fn validate_digits(raw: &str) -> LookupResult<Cep> {
    if raw.len() == 8 && all_digits(raw) {
        Ok(Cep(raw.to_string()))
    } else {
        Err(LookupError::InvalidCep)
    }
}
