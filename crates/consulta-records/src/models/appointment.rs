//! Booked sessions.

use std::fmt;

use chrono::{DateTime, Utc};
use consulta_query::{FieldAccessors, Queryable, TimeRange, Timestamp, Value};
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentKind {
    Online,
    Presencial,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Online => "online",
            AppointmentKind::Presencial => "presencial",
        }
    }
}

impl fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "upcoming",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked session with a therapist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub therapist_id: u32,
    pub therapist: String,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    pub const STARTS_AT: &'static str = "starts_at";
    pub const SLOT: &'static str = "slot";

    /// The booked interval, `[starts_at, ends_at]`.
    pub fn slot(&self) -> TimeRange {
        TimeRange::new(self.starts_at, self.ends_at)
    }
}

impl Queryable for Appointment {
    fn field_accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new()
            .field("id", |a| Value::from(a.id))
            .field("therapist_id", |a| Value::from(a.therapist_id))
            .field("therapist", |a| Value::text(&a.therapist))
            .field("kind", |a| Value::text(a.kind.as_str()))
            .field("status", |a| Value::text(a.status.as_str()))
            .field(Self::STARTS_AT, |a| {
                Value::Timestamp(Timestamp::from(a.starts_at))
            })
            .field("ends_at", |a| Value::Timestamp(Timestamp::from(a.ends_at)))
            .field(Self::SLOT, |a| Value::Range(a.slot()))
            .field("price", |a| Value::from(a.price))
            .field("notes", |a| Value::from(a.notes.as_ref()))
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["therapist", "kind"]
    }
}

impl Record for Appointment {
    const COLLECTION: &'static str = "appointments";

    fn seed() -> Vec<Self> {
        seed::appointments()
    }
}
