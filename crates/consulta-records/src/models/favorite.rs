//! Saved therapists.

use chrono::{DateTime, Utc};
use consulta_macros::Queryable;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::seed;

/// A therapist the user saved to their favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Favorite {
    #[query(number)]
    pub id: u32,
    #[query(number)]
    pub therapist_id: u32,
    #[query(text, searchable)]
    pub name: String,
    #[query(text, searchable)]
    pub title: String,
    #[query(tags, searchable)]
    pub specialties: Vec<String>,
    #[query(number)]
    pub rating: f64,
    #[query(number)]
    pub price: u32,
    #[query(timestamp)]
    pub added_at: DateTime<Utc>,
}

impl Record for Favorite {
    const COLLECTION: &'static str = "favorites";

    fn seed() -> Vec<Self> {
        seed::favorites()
    }
}
