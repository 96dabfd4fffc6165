//! Domain logic: currencies, providers, ranking, quotes and the mocked
//! account and payment flows

pub mod account;
pub mod config;
pub mod contact;
pub mod currency;
pub mod log;
pub mod notice;
pub mod payment;
pub mod provider;
pub mod quote;
pub mod ranking;
pub mod view;

// Re-export main types for cleaner imports
pub use notice::{Notice, NoticeStatus, UserFacing};
pub use provider::{Provider, ProviderId, ProviderStore};
pub use quote::{Quote, SearchQuery};
pub use ranking::{FilterKey, SortKey};
