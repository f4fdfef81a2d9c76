use std::fmt::{Display, Formatter};

use crate::{normalize_code, CurrencyCode, ValidationError};

/// A validated conversion direction: two distinct supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CurrencyPair {
    /// Validate raw `base`/`target` input against `supported`.
    ///
    /// The same-currency check runs first, on the normalized strings, so
    /// `xyz`/`XYZ` reports `SameCurrency` rather than `UnsupportedCurrency`.
    pub fn validate(
        base: &str,
        target: &str,
        supported: &[CurrencyCode],
    ) -> Result<Self, ValidationError> {
        let base = normalize_code(base);
        let target = normalize_code(target);

        if base == target {
            return Err(ValidationError::SameCurrency { code: base });
        }

        Ok(Self {
            base: parse_supported(&base, supported)?,
            target: parse_supported(&target, supported)?,
        })
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}

fn parse_supported(code: &str, supported: &[CurrencyCode]) -> Result<CurrencyCode, ValidationError> {
    match CurrencyCode::parse(code) {
        Ok(parsed) if supported.contains(&parsed) => Ok(parsed),
        _ => Err(ValidationError::UnsupportedCurrency {
            value: code.to_owned(),
        }),
    }
}
