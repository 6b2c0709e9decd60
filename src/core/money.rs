//! Currency and exact minor-unit money values

use anyhow::{Result, anyhow, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Largest scale `rust_decimal` supports.
const MAX_DIGITS: u32 = 28;

/// An ISO 4217 currency together with the number of minor-unit digits it uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: String,
    digits: u32,
}

impl Currency {
    /// Fails when `digits` exceeds what a decimal amount can represent.
    pub fn new(code: &str, digits: u32) -> Result<Self> {
        if digits > MAX_DIGITS {
            bail!(
                "Currency {} cannot use {} minor-unit digits (max {})",
                code,
                digits,
                MAX_DIGITS
            );
        }
        Ok(Self {
            code: code.to_uppercase(),
            digits,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Number of minor-unit digits, e.g. 2 for USD cents.
    pub fn digits(&self) -> u32 {
        self.digits
    }
}

fn default_digits(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        "BHD" | "KWD" | "JOD" | "OMR" | "TND" | "IQD" | "LYD" => 3,
        _ => 2,
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow!("Invalid currency code: {}", s));
        }
        let digits = default_digits(&code);
        Ok(Currency { code, digits })
    }
}

impl TryFrom<String> for Currency {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// An amount of money in integer minor units of a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    currency: Currency,
    cents: i64,
}

impl Money {
    pub fn new(currency: Currency, cents: i64) -> Self {
        Self { currency, cents }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// The amount in major units, scaled by the currency's digits.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, self.currency.digits)
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            bail!(
                "Cannot add {} to {}: currency mismatch",
                other.currency,
                self.currency
            );
        }
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or_else(|| anyhow!("Amount overflow adding {} and {}", self, other))?;
        Ok(Money::new(self.currency.clone(), cents))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.currency)
    }
}
