//! Search validation and per-provider quotes

use crate::core::currency::{self, REFERENCE_CURRENCY};
use crate::core::notice::UserFacing;
use crate::core::provider::{Provider, Route};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Largest transfer accepted, in the reference currency.
pub const DEFAULT_TRANSFER_LIMIT: f64 = 10_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Destination must differ from the source country")]
    SameCountry,
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("Maximum transfer amount is {limit}")]
    LimitExceeded { limit: String },
}

impl UserFacing for QuoteError {
    fn title(&self) -> &'static str {
        match self {
            QuoteError::MissingFields => "Please fill all fields",
            QuoteError::SameCountry => "Invalid destination",
            QuoteError::InvalidAmount(_) => "Invalid amount",
            QuoteError::LimitExceeded { .. } => "Amount Exceeds Limit",
        }
    }
}

/// Parses a non-negative decimal amount as typed into the amount field.
pub fn parse_amount(input: &str) -> Result<f64, QuoteError> {
    let input = input.trim();
    let well_formed = !input.is_empty()
        && input != "."
        && input.chars().all(|c| c.is_ascii_digit() || c == '.')
        && input.matches('.').count() <= 1;
    if !well_formed {
        return Err(QuoteError::InvalidAmount(input.to_string()));
    }
    match input.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(QuoteError::InvalidAmount(input.to_string())),
    }
}

/// Checks `amount` of `currency_code` against `limit` after converting it to
/// the reference currency. Returns the converted amount.
pub fn check_limit(amount: f64, currency_code: &str, limit: f64) -> Result<f64, QuoteError> {
    let in_reference = currency::to_reference(amount, currency_code);
    if in_reference > limit {
        debug!(
            amount,
            currency_code,
            in_reference,
            limit,
            "Transfer limit exceeded"
        );
        return Err(QuoteError::LimitExceeded {
            limit: currency::format_money(limit, REFERENCE_CURRENCY),
        });
    }
    Ok(in_reference)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub from_country: String,
    pub to_country: String,
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

impl SearchQuery {
    /// Validates the home search form and resolves both currencies.
    pub fn new(
        from_country: &str,
        to_country: &str,
        amount: &str,
        limit: f64,
    ) -> Result<Self, QuoteError> {
        let (from_country, to_country) = (from_country.trim(), to_country.trim());
        if from_country.is_empty() || to_country.is_empty() || amount.trim().is_empty() {
            return Err(QuoteError::MissingFields);
        }
        if from_country.eq_ignore_ascii_case(to_country) {
            return Err(QuoteError::SameCountry);
        }

        let amount = parse_amount(amount)?;
        let from_currency = currency::currency_for(from_country);
        let to_currency = currency::currency_for(to_country);
        check_limit(amount, from_currency.code, limit)?;

        Ok(Self {
            from_country: from_country.to_ascii_uppercase(),
            to_country: to_country.to_ascii_uppercase(),
            amount,
            from_currency: from_currency.code.to_string(),
            to_currency: to_currency.code.to_string(),
        })
    }

    pub fn route(&self) -> Route {
        Route {
            from: self.from_country.clone(),
            to: self.to_country.clone(),
        }
    }

    /// The amount in the reference currency, `None` when it already is.
    pub fn usd_equivalent(&self) -> Option<f64> {
        if self.from_currency == REFERENCE_CURRENCY {
            return None;
        }
        Some(currency::to_reference(self.amount, &self.from_currency))
    }

    pub fn amount_formatted(&self) -> String {
        currency::format_money(self.amount, &self.from_currency)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote<'a> {
    pub provider: &'a Provider,
    /// What the recipient gets, in the destination currency.
    pub received_amount: f64,
    /// Amount plus fee, in the source currency.
    pub total_cost: f64,
    pub usd_equivalent: Option<f64>,
}

impl Quote<'_> {
    pub fn received_formatted(&self, query: &SearchQuery) -> String {
        currency::format_money(self.received_amount, &query.to_currency)
    }

    pub fn total_cost_formatted(&self, query: &SearchQuery) -> String {
        currency::format_money(self.total_cost, &query.from_currency)
    }

    pub fn usd_equivalent_formatted(&self) -> Option<String> {
        self.usd_equivalent
            .map(|v| format!("≈ {}", currency::format_money(v, REFERENCE_CURRENCY)))
    }
}

pub fn quote<'a>(provider: &'a Provider, query: &SearchQuery) -> Quote<'a> {
    Quote {
        provider,
        received_amount: query.amount * provider.exchange_rate,
        total_cost: query.amount + provider.fee,
        usd_equivalent: query.usd_equivalent(),
    }
}
