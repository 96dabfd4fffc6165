//! Mocked transfers and the transaction history

use crate::core::account::User;
use crate::core::notice::UserFacing;
use crate::core::provider::Provider;
use crate::core::quote::{self, QuoteError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Processing,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionStatus::Completed => "completed",
                TransactionStatus::Processing => "processing",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TransactionStatus),
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Only(TransactionStatus::Completed)),
            "processing" => Ok(StatusFilter::Only(TransactionStatus::Processing)),
            _ => Err(anyhow::anyhow!("Invalid transaction status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub provider: String,
    pub amount: f64,
    pub fee: f64,
    pub status: TransactionStatus,
    pub recipient: String,
    pub destination: String,
    pub exchange_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub sender_name: String,
    pub sender_email: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub amount: String,
    pub payment_method: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentForm {
    /// Fills empty sender fields from the signed-in user.
    pub fn prefill_sender(mut self, user: Option<&User>) -> Self {
        if let Some(user) = user {
            if self.sender_name.trim().is_empty() {
                self.sender_name = user.full_name();
            }
            if self.sender_email.trim().is_empty() {
                self.sender_email = user.email.clone();
            }
        }
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    #[error("Please fill all required fields")]
    MissingFields,
    #[error(transparent)]
    Amount(#[from] QuoteError),
}

impl UserFacing for PaymentError {
    fn title(&self) -> &'static str {
        match self {
            PaymentError::MissingFields => "Please fill all required fields",
            PaymentError::Amount(e) => e.title(),
        }
    }
}

/// The transactions every account starts with.
pub fn sample_transactions() -> Vec<Transaction> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        Transaction {
            id: "1".to_string(),
            date: date(2024, 2, 20),
            provider: "Wise (TransferWise)".to_string(),
            amount: 1000.0,
            fee: 4.99,
            status: TransactionStatus::Completed,
            recipient: "John Doe".to_string(),
            destination: "Philippines".to_string(),
            exchange_rate: 50.25,
        },
        Transaction {
            id: "2".to_string(),
            date: date(2024, 2, 18),
            provider: "Western Union".to_string(),
            amount: 500.0,
            fee: 8.00,
            status: TransactionStatus::Processing,
            recipient: "Jane Smith".to_string(),
            destination: "Mexico".to_string(),
            exchange_rate: 17.35,
        },
        Transaction {
            id: "3".to_string(),
            date: date(2024, 2, 15),
            provider: "MoneyGram".to_string(),
            amount: 750.0,
            fee: 5.99,
            status: TransactionStatus::Completed,
            recipient: "Mike Johnson".to_string(),
            destination: "India".to_string(),
            exchange_rate: 82.90,
        },
    ]
}

/// Validates the payment form and builds the resulting `processing`
/// transaction. `history` is used to pick the next id.
pub fn prepare_transfer(
    provider: &Provider,
    form: &PaymentForm,
    destination: &str,
    date: NaiveDate,
    history: &[Transaction],
) -> Result<Transaction, PaymentError> {
    let required = [
        &form.sender_name,
        &form.recipient_name,
        &form.amount,
        &form.payment_method,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(PaymentError::MissingFields);
    }
    let amount = quote::parse_amount(&form.amount)?;

    let next_id = history
        .iter()
        .filter_map(|t| t.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1;

    info!(provider = %provider.name, amount, "Transfer initiated");
    Ok(Transaction {
        id: next_id.to_string(),
        date,
        provider: provider.name.clone(),
        amount,
        fee: provider.fee,
        status: TransactionStatus::Processing,
        recipient: form.recipient_name.trim().to_string(),
        destination: destination.to_string(),
        exchange_rate: provider.exchange_rate,
    })
}

pub fn filter_transactions(
    transactions: &[Transaction],
    filter: StatusFilter,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => t.status == status,
        })
        .collect()
}
