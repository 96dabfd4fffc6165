//! Sorting and filtering of the provider list

use crate::core::notice::UserFacing;
use crate::core::provider::{PaymentMode, Provider, Route};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Best exchange rate first
    #[default]
    #[serde(alias = "exchangeRate")]
    Rate,
    /// Lowest fee first
    Fee,
    /// Fastest delivery first
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    #[default]
    All,
    Bank,
    Cash,
}

impl FilterKey {
    pub fn payment_mode(&self) -> Option<PaymentMode> {
        match self {
            FilterKey::All => None,
            FilterKey::Bank => Some(PaymentMode::Bank),
            FilterKey::Cash => Some(PaymentMode::Cash),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("Unknown sort option `{0}`, expected rate, fee or speed")]
    UnknownSortKey(String),
    #[error("Unknown filter option `{0}`, expected all, bank or cash")]
    UnknownFilterKey(String),
}

impl UserFacing for RankError {
    fn title(&self) -> &'static str {
        "Invalid option"
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::Rate => "Best Rate",
                SortKey::Fee => "Lowest Fee",
                SortKey::Speed => "Fastest",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rate" | "exchangerate" => Ok(SortKey::Rate),
            "fee" => Ok(SortKey::Fee),
            "speed" => Ok(SortKey::Speed),
            _ => Err(RankError::UnknownSortKey(s.to_string())),
        }
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FilterKey::All => "All Methods",
                FilterKey::Bank => "Bank Transfer",
                FilterKey::Cash => "Cash Pickup",
            }
        )
    }
}

impl FromStr for FilterKey {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterKey::All),
            "bank" => Ok(FilterKey::Bank),
            "cash" => Ok(FilterKey::Cash),
            _ => Err(RankError::UnknownFilterKey(s.to_string())),
        }
    }
}

/// Ordinal bucket of a delivery time label, lower is faster.
pub fn delivery_rank(estimated_time: &str) -> Option<u8> {
    match estimated_time {
        "Within minutes" => Some(1),
        "Same day" => Some(2),
        "1-2 business days" => Some(3),
        "2-3 business days" => Some(4),
        "3-5 business days" => Some(5),
        _ => None,
    }
}

/// Filters `providers` by payment mode, then orders them by `sort`. The sort
/// is stable so ties keep catalog order.
pub fn rank(providers: &[Provider], sort: SortKey, filter: FilterKey) -> Vec<&Provider> {
    let mut ranked: Vec<&Provider> = match filter.payment_mode() {
        None => providers.iter().collect(),
        Some(mode) => providers
            .iter()
            .filter(|p| p.payment_mode == mode)
            .collect(),
    };

    match sort {
        SortKey::Rate => ranked.sort_by(|a, b| b.exchange_rate.total_cmp(&a.exchange_rate)),
        SortKey::Fee => ranked.sort_by(|a, b| a.fee.total_cmp(&b.fee)),
        SortKey::Speed => {
            ranked.sort_by_key(|p| delivery_rank(&p.estimated_time).unwrap_or(u8::MAX))
        }
    }

    debug!(?sort, ?filter, count = ranked.len(), "Ranked providers");
    ranked
}

/// Keeps providers serving `route`. Providers that declare no sending
/// countries cannot be matched and are passed through unfiltered.
pub fn filter_by_route<'a>(
    providers: Vec<&'a Provider>,
    route: Option<&Route>,
) -> Vec<&'a Provider> {
    let Some(route) = route else {
        return providers;
    };

    let undeclared = providers
        .iter()
        .filter(|p| p.serves(route).is_none())
        .count();
    if undeclared > 0 {
        warn!(
            undeclared,
            from = %route.from,
            to = %route.to,
            "Providers without sending countries are not route filtered"
        );
    }

    providers
        .into_iter()
        .filter(|p| p.serves(route) != Some(false))
        .collect()
}
