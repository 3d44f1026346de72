//! Payment history.

use std::fmt;

use chrono::{DateTime, Utc};
use consulta_macros::Queryable;
use consulta_query::Dir;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl AsRef<str> for PaymentStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Payment {
    #[query(number)]
    pub id: u32,
    #[query(text, searchable)]
    pub concept: String,
    #[query(text, searchable)]
    pub therapist: String,
    /// Amount in euros.
    #[query(number)]
    pub amount: f64,
    #[query(text)]
    pub method: String,
    #[query(text)]
    pub status: PaymentStatus,
    #[query(timestamp)]
    pub paid_at: DateTime<Utc>,
    #[query(text)]
    #[serde(default)]
    pub invoice: Option<String>,
}

impl Record for Payment {
    const COLLECTION: &'static str = "payments";

    fn seed() -> Vec<Self> {
        seed::payments()
    }

    fn preferred_dir(field: &str) -> Dir {
        match field {
            Self::PAID_AT => Dir::Desc,
            _ => Dir::Asc,
        }
    }
}
