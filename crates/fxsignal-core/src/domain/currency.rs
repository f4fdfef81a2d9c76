use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Supported ISO 4217 currency.
///
/// The set is closed: anything else is rejected at parse time, so a
/// `CurrencyCode` value is always safe to send upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Sek,
    Nzd,
    Brl,
}

impl CurrencyCode {
    /// Every supported currency, in display order.
    pub const ALL: [Self; 11] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Aud,
        Self::Cad,
        Self::Chf,
        Self::Cny,
        Self::Sek,
        Self::Nzd,
        Self::Brl,
    ];

    /// Parse and normalize a code to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_code(input);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or(ValidationError::UnsupportedCurrency { value: normalized })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
            Self::Sek => "SEK",
            Self::Nzd => "NZD",
            Self::Brl => "BRL",
        }
    }

    /// Flag emoji shown next to the code in selects.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Usd => "\u{1F1FA}\u{1F1F8}",
            Self::Eur => "\u{1F1EA}\u{1F1FA}",
            Self::Gbp => "\u{1F1EC}\u{1F1E7}",
            Self::Jpy => "\u{1F1EF}\u{1F1F5}",
            Self::Aud => "\u{1F1E6}\u{1F1FA}",
            Self::Cad => "\u{1F1E8}\u{1F1E6}",
            Self::Chf => "\u{1F1E8}\u{1F1ED}",
            Self::Cny => "\u{1F1E8}\u{1F1F3}",
            Self::Sek => "\u{1F1F8}\u{1F1EA}",
            Self::Nzd => "\u{1F1F3}\u{1F1FF}",
            Self::Brl => "\u{1F1E7}\u{1F1F7}",
        }
    }

    /// ISO 3166-1 alpha-2 region used for flag images (`eu` for the euro).
    pub const fn region(self) -> &'static str {
        match self {
            Self::Usd => "us",
            Self::Eur => "eu",
            Self::Gbp => "gb",
            Self::Jpy => "jp",
            Self::Aud => "au",
            Self::Cad => "ca",
            Self::Chf => "ch",
            Self::Cny => "cn",
            Self::Sek => "se",
            Self::Nzd => "nz",
            Self::Brl => "br",
        }
    }
}

/// Trim and uppercase a raw code without checking it against the allow-list.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.as_str().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_code() {
        let parsed = CurrencyCode::parse(" usd ").expect("code should parse");
        assert_eq!(parsed, CurrencyCode::Usd);
        assert_eq!(parsed.to_string(), "USD");
    }

    #[test]
    fn rejects_codes_outside_allow_list() {
        let err = CurrencyCode::parse("xyz").expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::UnsupportedCurrency {
                value: String::from("XYZ")
            }
        );
    }

    #[test]
    fn rejects_blank_code() {
        let err = CurrencyCode::parse("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyCurrency);
    }

    #[test]
    fn allow_list_round_trips_through_as_str() {
        for code in CurrencyCode::ALL {
            assert_eq!(CurrencyCode::parse(code.as_str()), Ok(code));
            assert_eq!(code.region().len(), 2);
        }
    }

    #[test]
    fn serializes_as_uppercase_string() {
        let json = serde_json::to_string(&CurrencyCode::Chf).expect("serialize");
        assert_eq!(json, "\"CHF\"");
        let back: CurrencyCode = serde_json::from_str("\"chf\"").expect("deserialize");
        assert_eq!(back, CurrencyCode::Chf);
    }
}
