//! Inbox notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use consulta_macros::Queryable;
use consulta_query::Dir;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Appointment,
    Payment,
    Message,
    Reminder,
    System,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Appointment => "appointment",
            NotificationCategory::Payment => "payment",
            NotificationCategory::Message => "message",
            NotificationCategory::Reminder => "reminder",
            NotificationCategory::System => "system",
        }
    }
}

impl AsRef<str> for NotificationCategory {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Notification {
    #[query(number)]
    pub id: u32,
    #[query(text, searchable)]
    pub title: String,
    #[query(text, searchable)]
    pub message: String,
    #[query(text)]
    pub category: NotificationCategory,
    #[query(boolean)]
    pub read: bool,
    #[query(timestamp)]
    pub created_at: DateTime<Utc>,
}

impl Record for Notification {
    const COLLECTION: &'static str = "notifications";

    fn seed() -> Vec<Self> {
        seed::notifications()
    }

    fn preferred_dir(field: &str) -> Dir {
        match field {
            Self::CREATED_AT => Dir::Desc,
            _ => Dir::Asc,
        }
    }
}
