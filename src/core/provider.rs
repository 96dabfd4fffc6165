//! Provider records and the in-memory catalog that owns them
//!
//! The catalog only changes through [`CatalogCommand`]s, applied by the pure
//! [`reduce`] function. [`ProviderStore`] is the single writer holding the
//! current state.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

pub type ProviderId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Bank,
    Cash,
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaymentMode::Bank => "bank",
                PaymentMode::Cash => "cash",
            }
        )
    }
}

impl FromStr for PaymentMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(PaymentMode::Bank),
            "cash" => Ok(PaymentMode::Cash),
            _ => Err(anyhow::anyhow!("Invalid payment mode: {}", s)),
        }
    }
}

/// An ordered (source country, destination country) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub fee: f64,
    pub exchange_rate: f64,
    pub estimated_time: String,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub sending_from: Option<String>,
    #[serde(default)]
    pub sending_to: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Provider {
    /// Whether this provider serves `route`. `None` when the provider does not
    /// declare the countries it sends between.
    pub fn serves(&self, route: &Route) -> Option<bool> {
        match (&self.sending_from, &self.sending_to) {
            (Some(from), Some(to)) => {
                Some(from.eq_ignore_ascii_case(&route.from) && to.eq_ignore_ascii_case(&route.to))
            }
            _ => None,
        }
    }
}

fn provider(
    id: ProviderId,
    name: &str,
    fee: f64,
    exchange_rate: f64,
    estimated_time: &str,
    payment_mode: PaymentMode,
    domain: &str,
) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        fee,
        exchange_rate,
        estimated_time: estimated_time.to_string(),
        payment_mode,
        website: Some(format!("https://{domain}")),
        sending_from: None,
        sending_to: None,
        is_favorite: false,
    }
}

/// The built-in provider list.
#[rustfmt::skip]
pub fn default_providers() -> Vec<Provider> {
    use PaymentMode::*;
    vec![
        provider(1, "WorldRemit",    3.99, 1.05, "1-2 business days", Bank, "www.worldremit.com"),
        provider(2, "Remitly",       3.99, 0.95, "3-5 business days", Bank, "www.remitly.com"),
        provider(3, "Xe",            4.50, 1.02, "2-3 business days", Bank, "www.xe.com"),
        provider(4, "Wise",          4.95, 1.03, "1-2 business days", Bank, "wise.com"),
        provider(5, "Western Union", 0.00, 0.89, "Within minutes",    Cash, "www.westernunion.com"),
        provider(6, "MoneyGram",     0.00, 0.90, "Same day",          Cash, "www.moneygram.com"),
    ]
}

/// Returns the first id that appears more than once.
pub fn find_duplicate_id(providers: &[Provider]) -> Option<ProviderId> {
    let mut seen = HashSet::new();
    providers.iter().map(|p| p.id).find(|id| !seen.insert(*id))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    providers: Vec<Provider>,
}

impl Catalog {
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    ToggleFavorite(ProviderId),
    SetCatalog(Vec<Provider>),
}

/// Applies `command` to `state` and returns the resulting catalog.
pub fn reduce(mut state: Catalog, command: CatalogCommand) -> Catalog {
    match command {
        CatalogCommand::ToggleFavorite(id) => {
            match state.providers.iter_mut().find(|p| p.id == id) {
                Some(p) => {
                    p.is_favorite = !p.is_favorite;
                    debug!(id, is_favorite = p.is_favorite, "Toggled favorite");
                }
                None => debug!(id, "Toggle ignored, no such provider"),
            }
            state
        }
        CatalogCommand::SetCatalog(providers) => {
            let mut seen = HashSet::new();
            let providers = providers
                .into_iter()
                .filter(|p| {
                    let fresh = seen.insert(p.id);
                    if !fresh {
                        warn!(id = p.id, "Dropping provider with duplicate id");
                    }
                    fresh
                })
                .collect();
            Catalog { providers }
        }
    }
}

/// Owner of the provider catalog shared by every view.
#[derive(Debug, Clone, Default)]
pub struct ProviderStore {
    state: Catalog,
}

impl ProviderStore {
    pub fn new(providers: Vec<Provider>) -> Self {
        let mut store = Self::default();
        store.dispatch(CatalogCommand::SetCatalog(providers));
        store
    }

    pub fn dispatch(&mut self, command: CatalogCommand) {
        self.state = reduce(std::mem::take(&mut self.state), command);
    }

    /// Providers in insertion order.
    pub fn list(&self) -> &[Provider] {
        self.state.providers()
    }

    pub fn find(&self, id: ProviderId) -> Option<&Provider> {
        self.list().iter().find(|p| p.id == id)
    }

    pub fn toggle_favorite(&mut self, id: ProviderId) {
        self.dispatch(CatalogCommand::ToggleFavorite(id));
    }

    pub fn favorites(&self) -> Vec<&Provider> {
        self.list().iter().filter(|p| p.is_favorite).collect()
    }

    pub fn favorite_ids(&self) -> Vec<ProviderId> {
        self.favorites().iter().map(|p| p.id).collect()
    }

    /// Marks exactly the providers in `ids` as favorites.
    pub fn restore_favorites(&mut self, ids: &[ProviderId]) {
        let toggles: Vec<_> = self
            .list()
            .iter()
            .filter(|p| p.is_favorite != ids.contains(&p.id))
            .map(|p| p.id)
            .collect();
        for id in toggles {
            self.toggle_favorite(id);
        }
    }
}
