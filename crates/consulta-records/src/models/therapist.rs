//! Therapist directory entries.

use std::cmp::Ordering;
use std::sync::Arc;

use consulta_query::{collate, Comparator, Dir, FieldAccessors, Queryable, Value};
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::seed;

/// Prefix of `next_available` for therapists with a slot later today.
pub const TODAY_PREFIX: &str = "Hoy";

/// A therapist as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Therapist {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub specialties: Vec<String>,
    pub modalities: Vec<String>,
    pub languages: Vec<String>,
    pub location: String,
    /// Session price in euros.
    pub price: u32,
    pub rating: f64,
    pub review_count: u32,
    pub experience_years: u32,
    /// Display string for the next free slot, e.g. "Hoy, 16:00" or "Mañana, 10:00".
    pub next_available: String,
    pub online: bool,
    pub in_person: bool,
}

impl Therapist {
    pub const NAME: &'static str = "name";
    pub const PRICE: &'static str = "price";
    pub const RATING: &'static str = "rating";
    pub const RELEVANCE: &'static str = "relevance";
    pub const AVAILABILITY: &'static str = "availability";

    /// `rating * ln(review_count + 1)`: well-reviewed ratings outrank a
    /// handful of perfect scores.
    pub fn relevance(&self) -> f64 {
        self.rating * f64::from(self.review_count).ln_1p()
    }

    /// Whether the next free slot is today.
    pub fn available_today(&self) -> bool {
        self.next_available.starts_with(TODAY_PREFIX)
    }
}

/// Orders by relevance score, lowest first. Use with [`Dir::Desc`].
pub fn by_relevance(a: &Therapist, b: &Therapist) -> Ordering {
    a.relevance().total_cmp(&b.relevance())
}

/// Orders therapists available today first, then by name.
pub fn by_availability(a: &Therapist, b: &Therapist) -> Ordering {
    b.available_today()
        .cmp(&a.available_today())
        .then_with(|| collate(&a.name, &b.name))
}

impl Queryable for Therapist {
    fn field_accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new()
            .field("id", |t| Value::from(t.id))
            .field(Self::NAME, |t| Value::text(&t.name))
            .field("title", |t| Value::text(&t.title))
            .field("specialties", |t| Value::tags(&t.specialties))
            .field("modalities", |t| Value::tags(&t.modalities))
            .field("languages", |t| Value::tags(&t.languages))
            .field("location", |t| Value::text(&t.location))
            .field(Self::PRICE, |t| Value::from(t.price))
            .field(Self::RATING, |t| Value::from(t.rating))
            .field("review_count", |t| Value::from(t.review_count))
            .field("experience_years", |t| Value::from(t.experience_years))
            .field("next_available", |t| Value::text(&t.next_available))
            .field("online", |t| Value::Bool(t.online))
            .field("in_person", |t| Value::Bool(t.in_person))
            .field(Self::RELEVANCE, |t| Value::from(t.relevance()))
            .field(Self::AVAILABILITY, |t| Value::Bool(t.available_today()))
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "title", "specialties", "location"]
    }
}

impl Record for Therapist {
    const COLLECTION: &'static str = "therapists";

    fn seed() -> Vec<Self> {
        seed::therapists()
    }

    fn comparator(name: &str) -> Option<Comparator<Self>> {
        match name {
            Self::RELEVANCE => Some(Arc::new(by_relevance)),
            Self::AVAILABILITY => Some(Arc::new(by_availability)),
            _ => None,
        }
    }

    fn preferred_dir(field: &str) -> Dir {
        match field {
            Self::RELEVANCE | Self::RATING => Dir::Desc,
            _ => Dir::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sort_spec;
    use consulta_query::{execute, Query};

    fn therapist(name: &str, rating: f64, reviews: u32, next: &str) -> Therapist {
        Therapist {
            id: 0,
            name: name.into(),
            title: "Psicóloga".into(),
            specialties: vec![],
            modalities: vec![],
            languages: vec![],
            location: "Madrid".into(),
            price: 60,
            rating,
            review_count: reviews,
            experience_years: 5,
            next_available: next.into(),
            online: true,
            in_person: false,
        }
    }

    #[test]
    fn relevance_weights_review_volume() {
        let few = therapist("few", 5.0, 2, "Mañana");
        let many = therapist("many", 4.6, 120, "Mañana");
        assert!(many.relevance() > few.relevance());
        assert_eq!(by_relevance(&few, &many), Ordering::Less);
    }

    #[test]
    fn zero_reviews_score_zero() {
        assert_eq!(therapist("new", 5.0, 0, "Hoy").relevance(), 0.0);
    }

    #[test]
    fn availability_puts_today_first_then_name() {
        let records = vec![
            therapist("Zoe", 4.0, 1, "Hoy, 18:00"),
            therapist("Ana", 4.0, 1, "Mañana, 10:00"),
            therapist("Óscar", 4.0, 1, "Hoy, 16:00"),
        ];
        let query = Query::new().sort(sort_spec::<Therapist>(Therapist::AVAILABILITY, None));
        let result = execute(&records, &Therapist::field_accessors(), &query).unwrap();
        let names: Vec<&str> = result.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Óscar", "Zoe", "Ana"]);
    }

    #[test]
    fn searchable_fields_resolve() {
        let table = Therapist::field_accessors();
        assert!(table.missing(Therapist::searchable_fields().iter().copied()).is_empty());
    }

    #[test]
    fn unknown_comparator_is_none() {
        assert!(Therapist::comparator("price").is_none());
        assert_eq!(Therapist::preferred_dir("relevance"), Dir::Desc);
        assert_eq!(Therapist::preferred_dir("price"), Dir::Asc);
    }
}
