//! Client-side pagination.
//!
//! Upstream ignores page parameters entirely, so the full result set of a
//! single call is sliced here. Slicing past the available length yields a
//! shorter or empty page, never an error. No multi-request aggregation is
//! attempted beyond what one call returns.

use super::transport::SearchOutcome;

/// Slices `outcome.records` to the 1-indexed page, leaving any envelope
/// fields untouched.
pub fn paginate(mut outcome: SearchOutcome, page_size: usize, page_number: usize) -> SearchOutcome {
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    outcome.records = if start >= outcome.records.len() {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(outcome.records.len());
        outcome.records.drain(..).skip(start).take(end - start).collect()
    };
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn twelve_records() -> SearchOutcome {
        let records: Vec<Value> = (1..=12).map(|id| json!({"MichrazID": id})).collect();
        SearchOutcome {
            records,
            envelope: None,
        }
    }

    fn ids(outcome: &SearchOutcome) -> Vec<i64> {
        outcome
            .records
            .iter()
            .map(|r| r["MichrazID"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_pages_are_disjoint_and_ordered() {
        let first = paginate(twelve_records(), 5, 1);
        let second = paginate(twelve_records(), 5, 2);
        let third = paginate(twelve_records(), 5, 3);

        assert_eq!(ids(&first), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&second), vec![6, 7, 8, 9, 10]);
        assert_eq!(ids(&third), vec![11, 12]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate(twelve_records(), 5, 4);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_zero_page_number_behaves_as_first_page() {
        let page = paginate(twelve_records(), 5, 0);
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_envelope_fields_survive_slicing() {
        let mut outcome = twelve_records();
        let mut wrapper = serde_json::Map::new();
        wrapper.insert("totalCount".to_string(), json!(12));
        outcome.envelope = Some(wrapper);

        let page = paginate(outcome, 5, 3);
        assert_eq!(page.records.len(), 2);
        let value = page.into_value();
        assert_eq!(value["totalCount"], json!(12));
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_page_size_larger_than_input() {
        let page = paginate(twelve_records(), 100, 1);
        assert_eq!(page.records.len(), 12);
    }
}
