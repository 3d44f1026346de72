//! The record shapes behind each list screen.

mod appointment;
mod favorite;
mod notification;
mod payment;
mod therapist;

pub use appointment::{Appointment, AppointmentKind, AppointmentStatus};
pub use favorite::Favorite;
pub use notification::{Notification, NotificationCategory};
pub use payment::{Payment, PaymentStatus};
pub use therapist::{by_availability, by_relevance, Therapist, TODAY_PREFIX};
