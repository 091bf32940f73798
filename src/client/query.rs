//! Builds the upstream search payload from a [`SearchCriteria`].
//!
//! Upstream distinguishes an absent key from a present-but-null key for
//! some fields, so every optional filter is inserted only when its source
//! value is present and non-empty. The builder performs no I/O and its
//! output is deterministic for identical criteria.

use crate::constants::DATE_FORMAT;
use crate::models::{DateRange, SearchCriteria};
use serde_json::{json, Map, Value};

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty_list(value: &Option<Vec<i64>>) -> Option<&[i64]> {
    value.as_deref().filter(|list| !list.is_empty())
}

/// Renders a date range as a `{from, to}` sub-object, each key present
/// only if the corresponding bound was supplied. An empty range renders
/// as `None` and must not be emitted at all.
fn date_range_value(range: &Option<DateRange>) -> Option<Value> {
    let range = range.as_ref().filter(|r| !r.is_empty())?;
    let mut object = Map::new();
    if let Some(from) = range.from {
        object.insert("from".into(), json!(from.format(DATE_FORMAT).to_string()));
    }
    if let Some(to) = range.to {
        object.insert("to".into(), json!(to.format(DATE_FORMAT).to_string()));
    }
    Some(Value::Object(object))
}

/// Maps criteria onto the upstream search form's payload keys.
///
/// The two mode flags are always present. A resolved settlement code
/// (`KodYeshuv`) suppresses the settlement name (`Yishuv`); the name alone
/// is forwarded best-effort and may not be honored upstream. Legacy
/// free-text `purpose`/`region` are emitted only when their structured
/// replacements are absent, so contradictory filters are never sent.
/// Page parameters are deliberately not part of the payload: upstream
/// ignores them and pagination happens client-side.
pub fn build_payload(criteria: &SearchCriteria) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("ActiveQuickSearch".into(), json!(criteria.quick_search));
    payload.insert("ActiveMichraz".into(), json!(criteria.active_only));

    if let Some(number) = non_empty(&criteria.tender_number) {
        payload.insert("MisMichraz".into(), json!(number));
    }
    if let Some(types) = non_empty_list(&criteria.tender_types) {
        payload.insert("SugMichraz".into(), json!(types));
    }
    if let Some(kod_yeshuv) = criteria.kod_yeshuv {
        payload.insert("KodYeshuv".into(), json!(kod_yeshuv));
    } else if let Some(settlement) = non_empty(&criteria.settlement) {
        payload.insert("Yishuv".into(), json!(settlement));
    }
    if let Some(neighborhood) = non_empty(&criteria.neighborhood) {
        payload.insert("Shchuna".into(), json!(neighborhood));
    }

    if let Some(purposes) = non_empty_list(&criteria.tender_purposes) {
        payload.insert("YeudMichraz".into(), json!(purposes));
    }
    if let Some(regions) = non_empty_list(&criteria.regions) {
        payload.insert("Merchav".into(), json!(regions));
    }
    if let Some(statuses) = non_empty_list(&criteria.tender_statuses) {
        payload.insert("StatusMichraz".into(), json!(statuses));
    }
    if let Some(populations) = non_empty_list(&criteria.priority_populations) {
        payload.insert("PriorityPopulations".into(), json!(populations));
    }

    if let Some(range) = date_range_value(&criteria.submission_deadline) {
        payload.insert("CloseDate".into(), range);
    }
    if let Some(range) = date_range_value(&criteria.committee_date) {
        payload.insert("VaadaDate".into(), range);
    }
    if let Some(range) = date_range_value(&criteria.publication_date) {
        payload.insert("PirsumDate".into(), range);
    }

    // Legacy compatibility fallbacks; the structured lists win silently.
    if criteria.tender_purposes.is_none() {
        if let Some(purpose) = non_empty(&criteria.purpose) {
            payload.insert("purpose".into(), json!(purpose));
        }
    }
    if criteria.regions.is_none() {
        if let Some(region) = non_empty(&criteria.region) {
            payload.insert("region".into(), json!(region));
        }
    }

    if let Some(has_results) = criteria.has_results {
        payload.insert("hasResults".into(), json!(has_results));
    }
    if let Some(sort_by) = non_empty(&criteria.sort_by) {
        payload.insert("sortBy".into(), json!(sort_by));
    }
    if let Some(sort_order) = criteria.sort_order {
        payload.insert("sortOrder".into(), json!(sort_order.as_str()));
    }

    payload
}
