//! Payments
//!
//! Mobile money only records the payer's phone number. No payment request is
//! ever sent to a provider.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of digits in a mobile money phone number.
pub const MIN_PHONE_DIGITS: usize = 9;

/// Payment validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Not one of `cash`, `card` or `mobile`.
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),

    /// Mobile money selected without a phone number.
    #[error("mobile payments require a phone number")]
    MissingPhoneNumber,

    /// Phone number is malformed or too short.
    #[error("please enter a valid phone number")]
    InvalidPhoneNumber,
}

/// Payment method without its details, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Cash
    Cash,

    /// Card
    Card,

    /// Mobile money
    Mobile,
}

impl PaymentKind {
    /// Lowercase storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Mobile => "mobile",
        }
    }
}

impl Display for PaymentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentKind {
    type Err = PaymentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "mobile" => Ok(Self::Mobile),
            _ => Err(PaymentError::UnknownMethod(value.to_string())),
        }
    }
}

/// A validated mobile money phone number, digits only (with an optional `+`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a phone number, ignoring spaces and dashes.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidPhoneNumber`] for non-digit characters or
    /// fewer than [`MIN_PHONE_DIGITS`] digits.
    pub fn parse(value: &str) -> Result<Self, PaymentError> {
        let trimmed = value.trim();
        let (plus, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };

        let digits: String = rest.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

        if digits.len() < MIN_PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidPhoneNumber);
        }

        Ok(Self(format!("{plus}{digits}")))
    }

    /// Normalised form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash
    Cash,

    /// Card
    Card,

    /// Mobile money, with the payer's phone number
    Mobile(PhoneNumber),
}

impl PaymentMethod {
    /// Build a payment method from its kind and an optional phone number.
    ///
    /// The phone number is ignored for cash and card.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] for mobile payments without a valid phone number.
    pub fn new(kind: PaymentKind, phone: Option<&str>) -> Result<Self, PaymentError> {
        match kind {
            PaymentKind::Cash => Ok(Self::Cash),
            PaymentKind::Card => Ok(Self::Card),
            PaymentKind::Mobile => {
                let phone = phone
                    .filter(|phone| !phone.trim().is_empty())
                    .ok_or(PaymentError::MissingPhoneNumber)?;

                PhoneNumber::parse(phone).map(Self::Mobile)
            }
        }
    }

    /// The method without its details.
    pub const fn kind(&self) -> PaymentKind {
        match self {
            Self::Cash => PaymentKind::Cash,
            Self::Card => PaymentKind::Card,
            Self::Mobile(_) => PaymentKind::Mobile,
        }
    }

    /// Phone number for mobile payments.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        match self {
            Self::Mobile(phone) => Some(phone),
            Self::Cash | Self::Card => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() -> TestResult {
        assert_eq!("CASH".parse::<PaymentKind>()?, PaymentKind::Cash);
        assert_eq!("card".parse::<PaymentKind>()?, PaymentKind::Card);
        assert_eq!(" Mobile".parse::<PaymentKind>()?, PaymentKind::Mobile);
        assert!("cheque".parse::<PaymentKind>().is_err());

        Ok(())
    }

    #[test]
    fn phone_numbers_need_nine_digits() {
        assert!(PhoneNumber::parse("71234567").is_err());
        assert!(PhoneNumber::parse("712345678").is_ok());
        assert!(PhoneNumber::parse("0712abc678").is_err());
        assert!(PhoneNumber::parse("+").is_err());
    }

    #[test]
    fn phone_numbers_are_normalised() -> TestResult {
        assert_eq!(PhoneNumber::parse("+254 712-345-678")?.as_str(), "+254712345678");
        assert_eq!(PhoneNumber::parse(" 0712345678 ")?.as_str(), "0712345678");

        Ok(())
    }

    #[test]
    fn mobile_requires_phone_but_cash_ignores_it() -> TestResult {
        assert_eq!(
            PaymentMethod::new(PaymentKind::Mobile, None),
            Err(PaymentError::MissingPhoneNumber)
        );
        assert_eq!(
            PaymentMethod::new(PaymentKind::Mobile, Some("  ")),
            Err(PaymentError::MissingPhoneNumber)
        );
        assert_eq!(
            PaymentMethod::new(PaymentKind::Cash, Some("123"))?,
            PaymentMethod::Cash
        );

        let mobile = PaymentMethod::new(PaymentKind::Mobile, Some("0712345678"))?;

        assert_eq!(mobile.kind(), PaymentKind::Mobile);
        assert_eq!(mobile.phone().map(PhoneNumber::as_str), Some("0712345678"));

        Ok(())
    }
}
