//! Read-only reference data exports.
//!
//! Each catalog serializes as a JSON object with a single array-valued
//! top-level key, addressed by a stable `rami://` name. These mirror the
//! static catalogs in [`crate::reference`] and never change at runtime.

use crate::errors::AppResult;
use crate::reference;
use serde_json::json;

/// Names of all exported resources, in their canonical order.
pub const RESOURCE_NAMES: &[&str] = &[
    "tender-types",
    "regions",
    "land-uses",
    "tender-statuses",
    "priority-populations",
    "settlements",
    "server-info",
];

/// Serializes the resource with the given name as pretty-printed JSON.
///
/// Returns `Ok(None)` for unknown names.
pub fn resource(name: &str) -> AppResult<Option<String>> {
    let value = match name {
        "tender-types" => json!({"tender_types": reference::tender_types()}),
        "regions" => json!({"regions": reference::regions()}),
        "land-uses" => json!({"land_uses": reference::land_uses()}),
        "tender-statuses" => json!({"tender_statuses": reference::tender_statuses()}),
        "priority-populations" => {
            json!({"priority_populations": reference::priority_populations()})
        }
        "settlements" => json!({"settlements": reference::settlements()}),
        "server-info" => server_info(),
        _ => return Ok(None),
    };
    Ok(Some(serde_json::to_string_pretty(&value)?))
}

fn server_info() -> serde_json::Value {
    json!({
        "name": "Israeli Land Authority tender client",
        "description": "Provides access to רמ״י (Israeli Land Authority) public tender data",
        "version": env!("CARGO_PKG_VERSION"),
        "capabilities": [
            "Search land tenders with comprehensive filtering",
            "Get detailed tender information",
            "Location-based searches",
            "Type and purpose-based searches",
            "Recent results monitoring",
            "Geographic mapping data",
            "Reference data exports for types, regions, and land uses",
        ],
        "resources": RESOURCE_NAMES
            .iter()
            .map(|name| format!("rami://{name}"))
            .collect::<Vec<_>>(),
        "tools": [
            "search_tenders - Dynamic tender search with filtering",
            "get_tender_details - Get specific tender details",
            "get_active_tenders - Get currently active tenders",
            "search_by_type - Search by tender type or purpose",
            "get_recent_results - Get recent tender results",
            "get_tender_map_details - Get geographic mapping data",
            "get_kod_yeshuv - Convert settlement name to code (with fuzzy matching)",
        ],
        "data_source": "Israeli Land Authority (apps.land.gov.il)",
        "language_support": "Hebrew and English",
        "rate_limiting": "Implemented with 1-second delays",
        "notes": [
            "Hebrew text is supported for settlement and neighborhood searches",
            "Dates are in Israeli timezone (UTC+3)",
            "Some fields may be null depending on tender status",
            "API returns maximum 10,000 results per request",
        ],
    })
}
