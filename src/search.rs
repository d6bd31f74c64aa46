//! Menu search.
//!
//! Matching is a pure function over the loaded catalog: case-insensitive
//! containment on name and description, widened to an exact price match when
//! the query parses as a money amount.

use crate::{models::MenuItem, money};

pub fn matches_query(item: &MenuItem, query: &str) -> bool {
    let q = query.trim();
    if q.is_empty() {
        return true;
    }

    let needle = q.to_lowercase();
    let text_hit = item.name.to_lowercase().contains(&needle)
        || item.description.to_lowercase().contains(&needle);

    match money::parse_cents(q) {
        Some(cents) => text_hit || item.price_cents == cents,
        None => text_hit,
    }
}

pub fn search_items(items: Vec<MenuItem>, query: &str) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| matches_query(item, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{matches_query, search_items};
    use crate::models::MenuItem;

    fn item(name: &str, description: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: 1,
            name: name.to_string(),
            description: description.to_string(),
            image: String::new(),
            price_cents,
        }
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let burger = item("Smash Burger", "Two patties", 850);

        assert!(matches_query(&burger, "smash"));
        assert!(matches_query(&burger, "PATTIES"));
        assert!(!matches_query(&burger, "salad"));
    }

    #[test]
    fn test_numeric_query_matches_price_or_text() {
        let combo = item("Combo 5", "Five piece combo", 700);

        // "5" hits the name, "7" only the price, "9" neither.
        assert!(matches_query(&combo, "5"));
        assert!(matches_query(&combo, "7"));
        assert!(matches_query(&combo, "7.00"));
        assert!(!matches_query(&combo, "9"));
    }

    #[test]
    fn test_non_numeric_query_ignores_price() {
        let fries = item("Fries", "Crispy", 250);

        assert!(!matches_query(&fries, "2.5x"));
        assert!(matches_query(&fries, "2.5"));
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let items = vec![item("A", "", 100), item("B", "", 200)];

        assert_eq!(search_items(items, "  ").len(), 2);
    }
}
