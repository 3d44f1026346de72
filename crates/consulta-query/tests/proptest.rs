//! Property-based tests for the list pipeline using proptest.

use consulta_query::{execute, Dir, FieldAccessors, Query, Value};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Listing {
    id: usize,
    name: String,
    price: u32,
    rating: u8,
    online: bool,
}

fn accessors() -> FieldAccessors<Listing> {
    FieldAccessors::<Listing>::new()
        .field("name", |l| Value::text(&l.name))
        .field("price", |l| Value::from(l.price))
        .field("rating", |l| Value::from(l.rating))
        .field("online", |l| Value::Bool(l.online))
}

fn listings_strategy() -> impl Strategy<Value = Vec<Listing>> {
    prop::collection::vec(("[a-e]{1,6}", 0u32..200, 0u8..6, any::<bool>()), 0..60).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(id, (name, price, rating, online))| Listing {
                    id,
                    name,
                    price,
                    rating,
                    online,
                })
                .collect()
        },
    )
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

fn ids(items: &[&Listing]) -> Vec<usize> {
    items.iter().map(|l| l.id).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Running the same query twice over the same records gives equal results.
    #[test]
    fn execution_is_idempotent(
        records in listings_strategy(),
        term in "[a-e]{0,2}",
        max_price in 0u32..200,
        dir in dir_strategy(),
        index in 0usize..6,
        size in 0usize..8,
    ) {
        let accessors = accessors();
        let query = Query::new()
            .search(term)
            .search_in(["name"])
            .and_lte("price", max_price)
            .order_by("rating", dir)
            .page(index, size);

        let first = execute(&records, &accessors, &query).unwrap();
        let second = execute(&records, &accessors, &query).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Items are a contiguous window of the filtered, sorted sequence, and
    /// every item satisfies every predicate.
    #[test]
    fn items_are_contiguous_window_of_matches(
        records in listings_strategy(),
        min_price in 0u32..200,
        online in any::<bool>(),
        index in 1usize..6,
        size in 1usize..8,
    ) {
        let accessors = accessors();
        let base = Query::new()
            .and_gte("price", min_price)
            .and_eq("online", online)
            .order_asc("price");

        let everything = execute(&records, &accessors, &base).unwrap();
        let paged = execute(&records, &accessors, &base.clone().page(index, size)).unwrap();

        for item in &paged.items {
            prop_assert!(item.price >= min_price);
            prop_assert_eq!(item.online, online);
        }

        let all_ids = ids(&everything.items);
        let page_ids = ids(&paged.items);
        let start = ((index - 1) * size).min(all_ids.len());
        let end = (start + size).min(all_ids.len());
        prop_assert_eq!(&page_ids[..], &all_ids[start..end]);
        prop_assert_eq!(paged.total, everything.total);
    }

    /// total equals the number of matches; page_count is max(1, ceil(total / size)).
    #[test]
    fn page_math_holds(
        records in listings_strategy(),
        max_price in 0u32..200,
        index in 0usize..20,
        size in 1usize..10,
    ) {
        let accessors = accessors();
        let query = Query::new().and_lte("price", max_price).page(index, size);
        let result = execute(&records, &accessors, &query).unwrap();

        let expected_total = records.iter().filter(|l| l.price <= max_price).count();
        prop_assert_eq!(result.total, expected_total);
        prop_assert_eq!(result.page_count, std::cmp::max(1, expected_total.div_ceil(size)));
        prop_assert!(result.items.len() <= size);
        if index > result.page_count {
            prop_assert!(result.items.is_empty());
        }
    }

    /// Records with equal sort keys keep their relative input order.
    #[test]
    fn sort_is_stable(records in listings_strategy(), dir in dir_strategy()) {
        let accessors = accessors();
        let query = Query::new().order_by("rating", dir);
        let result = execute(&records, &accessors, &query).unwrap();

        for pair in result.items.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match dir {
                Dir::Asc => prop_assert!(a.rating <= b.rating),
                Dir::Desc => prop_assert!(a.rating >= b.rating),
            }
            if a.rating == b.rating {
                prop_assert!(a.id < b.id);
            }
        }
    }

    /// An empty query returns the input in order.
    #[test]
    fn empty_query_is_identity(records in listings_strategy()) {
        let result = execute(&records, &accessors(), &Query::new()).unwrap();
        let expected: Vec<usize> = (0..records.len()).collect();
        prop_assert_eq!(ids(&result.items), expected);
    }
}
