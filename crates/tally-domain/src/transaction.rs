//! Domain models for recorded sales and the input that creates them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::week::WeekRange;

/// Opaque identifier assigned to a transaction when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh identifier that is unique for the ledger's lifetime.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single recorded sale.
///
/// Fields are read-only once recorded: the ledger only ever adds or removes
/// whole transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    amount: f64,
    description: String,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Records a validated sale with a freshly generated id.
    pub fn record(sale: NewSale, created_at: DateTime<Utc>) -> Self {
        Self::with_id(TransactionId::generate(), sale, created_at)
    }

    /// Records a validated sale under a caller-chosen id.
    pub fn with_id(id: TransactionId, sale: NewSale, created_at: DateTime<Utc>) -> Self {
        let NewSale {
            date,
            amount,
            description,
        } = sale;
        Self {
            id,
            date,
            amount,
            description,
            created_at,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// A sale that passed validation: positive amount, trimmed non-empty description.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    date: NaiveDate,
    amount: f64,
    description: String,
}

impl NewSale {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        description: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        if !WeekRange::is_representable(date) {
            return Err(ValidationError::InvalidDate(date.to_string()));
        }
        Ok(Self {
            date,
            amount,
            description: description.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Raw, unvalidated input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub date: String,
    pub amount: String,
    pub description: String,
}

impl SaleDraft {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reasons a sale is rejected before it reaches the ledger.
pub enum ValidationError {
    MissingField(&'static str),
    InvalidAmount,
    InvalidDate(String),
}

impl ValidationError {
    /// Short machine-friendly category of the rejection.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing field",
            ValidationError::InvalidAmount => "invalid amount",
            ValidationError::InvalidDate(_) => "invalid date",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(_) => f.write_str("Please fill in all fields"),
            ValidationError::InvalidAmount => {
                f.write_str("Please enter a valid amount greater than 0")
            }
            ValidationError::InvalidDate(_) => {
                f.write_str("Please enter a valid date (YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
