//! Built-in records served by the in-memory source.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    Appointment, AppointmentKind, AppointmentStatus, Favorite, Notification,
    NotificationCategory, Payment, PaymentStatus, Therapist,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn therapist(
    id: u32,
    name: &str,
    title: &str,
    specialties: &[&str],
    location: &str,
    price: u32,
    rating: f64,
    review_count: u32,
    experience_years: u32,
    next_available: &str,
    online: bool,
    in_person: bool,
) -> Therapist {
    let mut modalities = Vec::new();
    if online {
        modalities.push("Online".to_string());
    }
    if in_person {
        modalities.push("Presencial".to_string());
    }
    Therapist {
        id,
        name: name.to_string(),
        title: title.to_string(),
        specialties: strings(specialties),
        modalities,
        languages: strings(&["Español"]),
        location: location.to_string(),
        price,
        rating,
        review_count,
        experience_years,
        next_available: next_available.to_string(),
        online,
        in_person,
    }
}

pub fn therapists() -> Vec<Therapist> {
    let mut list = vec![
        therapist(
            1,
            "Dra. María González",
            "Terapeuta Holística",
            &["Reiki", "Sanación con Cristales", "Meditación"],
            "Madrid",
            45,
            4.9,
            127,
            12,
            "Hoy, 16:00",
            true,
            true,
        ),
        therapist(
            2,
            "Carlos Ruiz",
            "Instructor de Yoga Terapéutico",
            &["Yoga Terapéutico", "Respiración"],
            "Barcelona",
            40,
            4.7,
            89,
            8,
            "Mañana, 10:00",
            true,
            false,
        ),
        therapist(
            3,
            "Ana Martínez",
            "Psicóloga Clínica",
            &["Psicoterapia", "Ansiedad", "Depresión"],
            "Valencia",
            90,
            4.8,
            203,
            15,
            "Hoy, 18:30",
            true,
            true,
        ),
        therapist(
            4,
            "Lucía Fernández",
            "Coach de Mindfulness",
            &["Mindfulness", "Estrés"],
            "Sevilla",
            75,
            4.6,
            54,
            6,
            "Jueves, 12:00",
            true,
            false,
        ),
        therapist(
            5,
            "Javier López",
            "Terapeuta de Pareja",
            &["Terapia de Pareja", "Comunicación"],
            "Madrid",
            85,
            4.8,
            76,
            10,
            "Mañana, 17:00",
            false,
            true,
        ),
        therapist(
            6,
            "Elena Sánchez",
            "Psicóloga Infantil",
            &["Psicología Infantil", "TDAH"],
            "Bilbao",
            95,
            5.0,
            12,
            9,
            "Hoy, 19:00",
            true,
            true,
        ),
        therapist(
            7,
            "Pablo Moreno",
            "Acupuntor",
            &["Acupuntura", "Medicina China"],
            "Granada",
            75,
            4.5,
            38,
            20,
            "Viernes, 09:30",
            false,
            true,
        ),
        therapist(
            8,
            "Sofía Navarro",
            "Terapeuta Gestalt",
            &["Gestalt", "Autoestima", "Ansiedad"],
            "Zaragoza",
            60,
            4.7,
            64,
            7,
            "Hoy, 20:00",
            true,
            false,
        ),
    ];
    list[2].languages.push("Inglés".to_string());
    list[5].languages.push("Catalán".to_string());
    list
}

pub fn favorites() -> Vec<Favorite> {
    therapists()
        .into_iter()
        .filter(|t| matches!(t.id, 1 | 3 | 6 | 8))
        .enumerate()
        .map(|(i, t)| Favorite {
            id: i as u32 + 1,
            therapist_id: t.id,
            name: t.name,
            title: t.title,
            specialties: t.specialties,
            rating: t.rating,
            price: t.price,
            added_at: at(2024, 5, 2 + i as u32 * 6, 9, 15),
        })
        .collect()
}

pub fn appointments() -> Vec<Appointment> {
    let rows = [
        (1, 1, "Dra. María González", AppointmentKind::Online, AppointmentStatus::Upcoming, at(2024, 6, 14, 16, 0), 45),
        (2, 3, "Ana Martínez", AppointmentKind::Presencial, AppointmentStatus::Upcoming, at(2024, 6, 18, 18, 30), 90),
        (3, 2, "Carlos Ruiz", AppointmentKind::Online, AppointmentStatus::Completed, at(2024, 5, 28, 10, 0), 40),
        (4, 5, "Javier López", AppointmentKind::Presencial, AppointmentStatus::Cancelled, at(2024, 6, 3, 17, 0), 85),
        (5, 1, "Dra. María González", AppointmentKind::Online, AppointmentStatus::Completed, at(2024, 5, 17, 16, 0), 45),
        (6, 6, "Elena Sánchez", AppointmentKind::Online, AppointmentStatus::Upcoming, at(2024, 6, 25, 19, 0), 95),
    ];
    rows.into_iter()
        .map(
            |(id, therapist_id, therapist, kind, status, starts_at, price)| Appointment {
                id,
                therapist_id,
                therapist: therapist.to_string(),
                kind,
                status,
                starts_at,
                ends_at: starts_at + chrono::Duration::minutes(50),
                price,
                notes: (status == AppointmentStatus::Cancelled)
                    .then(|| "Cancelada por el paciente".to_string()),
            },
        )
        .collect()
}

pub fn notifications() -> Vec<Notification> {
    let rows = [
        (1, "Recordatorio de cita", "Tu sesión con Dra. María González es mañana a las 16:00", NotificationCategory::Reminder, false, at(2024, 6, 13, 9, 0)),
        (2, "Pago recibido", "Hemos recibido tu pago de 90,00 €", NotificationCategory::Payment, true, at(2024, 6, 10, 12, 30)),
        (3, "Nuevo mensaje", "Ana Martínez te ha enviado un mensaje", NotificationCategory::Message, false, at(2024, 6, 12, 18, 45)),
        (4, "Cita confirmada", "Tu cita con Elena Sánchez ha sido confirmada", NotificationCategory::Appointment, true, at(2024, 6, 8, 11, 0)),
        (5, "Cita cancelada", "Tu cita con Javier López ha sido cancelada", NotificationCategory::Appointment, true, at(2024, 6, 2, 20, 15)),
        (6, "Actualización de la app", "Hemos mejorado la búsqueda de terapeutas", NotificationCategory::System, false, at(2024, 6, 1, 8, 0)),
    ];
    rows.into_iter()
        .map(|(id, title, message, category, read, created_at)| Notification {
            id,
            title: title.to_string(),
            message: message.to_string(),
            category,
            read,
            created_at,
        })
        .collect()
}

pub fn payments() -> Vec<Payment> {
    let rows = [
        (1, "Sesión individual", "Dra. María González", 45.0, "Tarjeta", PaymentStatus::Completed, at(2024, 5, 17, 16, 55), Some("FAC-2024-0017")),
        (2, "Sesión individual", "Carlos Ruiz", 40.0, "PayPal", PaymentStatus::Completed, at(2024, 5, 28, 10, 55), Some("FAC-2024-0021")),
        (3, "Cancelación", "Javier López", 85.0, "Tarjeta", PaymentStatus::Refunded, at(2024, 6, 3, 9, 0), None),
        (4, "Sesión presencial", "Ana Martínez", 90.0, "Tarjeta", PaymentStatus::Completed, at(2024, 6, 10, 12, 30), Some("FAC-2024-0026")),
        (5, "Bono 4 sesiones", "Elena Sánchez", 340.0, "Transferencia", PaymentStatus::Pending, at(2024, 6, 12, 19, 5), None),
    ];
    rows.into_iter()
        .map(
            |(id, concept, therapist, amount, method, status, paid_at, invoice)| Payment {
                id,
                concept: concept.to_string(),
                therapist: therapist.to_string(),
                amount,
                method: method.to_string(),
                status,
                paid_at,
                invoice: invoice.map(str::to_string),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn therapist_prices_cover_directory_scenarios() {
        let prices: Vec<u32> = therapists().iter().take(7).map(|t| t.price).collect();
        assert_eq!(prices, vec![45, 40, 90, 75, 85, 95, 75]);
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<u32> = therapists().iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), therapists().len());
    }

    #[test]
    fn favorites_copy_therapist_fields() {
        let favs = favorites();
        assert_eq!(favs.len(), 4);
        assert_eq!(favs[0].name, "Dra. María González");
        assert!(favs.windows(2).all(|w| w[0].added_at < w[1].added_at));
    }

    #[test]
    fn cancelled_appointments_carry_a_note() {
        for a in appointments() {
            assert_eq!(a.notes.is_some(), a.status == AppointmentStatus::Cancelled);
            assert!(a.ends_at > a.starts_at);
        }
    }

    #[test]
    fn seed_dates_are_valid() {
        let epoch = DateTime::<Utc>::default();
        assert!(notifications().iter().all(|n| n.created_at != epoch));
        assert!(payments().iter().all(|p| p.paid_at != epoch));
    }
}
