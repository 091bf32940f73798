//! Tool façade over the client: typed operation arguments in, uniform
//! JSON envelopes out.
//!
//! Every operation returns `{"success": true, ...}` on success and
//! `{"success": false, "error": ..., ...echoed context}` on any failure.
//! Errors from the layers below never cross this boundary; no retries
//! happen here either, the transport layer already did them.

use crate::client::LandClient;
use crate::constants::MAX_TOOL_PAGE_SIZE;
use crate::errors::AppResult;
use crate::models::{DateRange, SearchCriteria, SortOrder, TenderRecord};
use crate::resolver::{self, SettlementMatch};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Textual date range argument in the upstream's dd/mm/yy form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeArg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

impl DateRangeArg {
    fn to_range(&self) -> AppResult<DateRange> {
        DateRange::parse(self.from_date.as_deref(), self.to_date.as_deref())
    }
}

pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Arguments for the search operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTendersArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_types: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kod_yeshuv: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_purposes: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_statuses: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_populations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<DateRangeArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_date: Option<DateRangeArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateRangeArg>,
    pub active_only: bool,
    pub quick_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction: "desc" for descending, anything else ascending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    pub max_results: usize,
    pub page_size: usize,
    pub page_number: usize,
    /// Legacy: free-text land use purpose (use `tender_purposes` instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Legacy: free-text region name (use `regions` instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Legacy: search tenders from the last N days (use date ranges instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_back: Option<i64>,
}

impl Default for SearchTendersArgs {
    fn default() -> Self {
        Self {
            tender_number: None,
            tender_types: None,
            settlement: None,
            kod_yeshuv: None,
            neighborhood: None,
            tender_purposes: None,
            regions: None,
            tender_statuses: None,
            priority_populations: None,
            submission_deadline: None,
            committee_date: None,
            publication_date: None,
            active_only: false,
            quick_search: false,
            sort_by: None,
            sort_order: None,
            max_results: DEFAULT_MAX_RESULTS,
            page_size: DEFAULT_PAGE_SIZE,
            page_number: DEFAULT_PAGE_NUMBER,
            purpose: None,
            region: None,
            days_back: None,
        }
    }
}

/// Arguments for type/purpose searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSearchArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_types: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

fn echo(args: &impl Serialize) -> Value {
    serde_json::to_value(args).unwrap_or(Value::Null)
}

/// Searches land tenders with the full criteria set.
///
/// Settlement names are converted to a Kod Yeshuv code on exact match
/// before the payload is built, so the code and the name are never sent
/// together. Malformed date strings fail fast into an error envelope
/// before anything is dispatched.
pub async fn search_tenders(client: &LandClient, args: &SearchTendersArgs) -> Value {
    search_tenders_at(client, args, Utc::now().date_naive()).await
}

/// Same as [`search_tenders`] with an injected `today` for the legacy
/// `days_back` computation, keeping time-dependent behavior testable.
pub async fn search_tenders_at(
    client: &LandClient,
    args: &SearchTendersArgs,
    today: NaiveDate,
) -> Value {
    match search_tenders_inner(client, args, today).await {
        Ok(envelope) => envelope,
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "search_parameters": echo(args),
        }),
    }
}

async fn search_tenders_inner(
    client: &LandClient,
    args: &SearchTendersArgs,
    today: NaiveDate,
) -> AppResult<Value> {
    let mut submission_deadline = args
        .submission_deadline
        .as_ref()
        .map(DateRangeArg::to_range)
        .transpose()?;
    let committee_date = args
        .committee_date
        .as_ref()
        .map(DateRangeArg::to_range)
        .transpose()?;
    let publication_date = args
        .publication_date
        .as_ref()
        .map(DateRangeArg::to_range)
        .transpose()?;

    // Legacy days_back only fills the gap when no structured lower bound
    // was supplied.
    if let Some(days) = args.days_back {
        let has_from = submission_deadline.map(|r| r.from.is_some()).unwrap_or(false);
        if !has_from {
            let mut range = submission_deadline.unwrap_or_default();
            range.from = Some(today - chrono::Duration::days(days));
            submission_deadline = Some(range);
        }
    }

    let resolved_kod_yeshuv = match args.kod_yeshuv {
        Some(kod) => Some(kod),
        None => args.settlement.as_deref().and_then(resolver::exact_code),
    };

    let criteria = SearchCriteria {
        tender_number: args.tender_number.clone(),
        tender_types: args.tender_types.clone(),
        settlement: if resolved_kod_yeshuv.is_some() {
            None
        } else {
            args.settlement.clone()
        },
        kod_yeshuv: resolved_kod_yeshuv,
        neighborhood: args.neighborhood.clone(),
        tender_purposes: args.tender_purposes.clone(),
        regions: args.regions.clone(),
        tender_statuses: args.tender_statuses.clone(),
        priority_populations: args.priority_populations.clone(),
        submission_deadline,
        committee_date,
        publication_date,
        purpose: args.purpose.clone(),
        region: args.region.clone(),
        active_only: args.active_only,
        quick_search: args.quick_search,
        sort_by: args.sort_by.clone(),
        sort_order: args.sort_order.as_deref().map(SortOrder::from),
        page_size: args.page_size.min(MAX_TOOL_PAGE_SIZE),
        page_number: args.page_number,
        ..SearchCriteria::default()
    };

    let outcome = client.search_tenders(&criteria).await?;
    let mut tenders = outcome.records;
    tenders.truncate(args.max_results);

    let converted = args.settlement.is_some() && args.kod_yeshuv.is_none();
    let search_summary = json!({
        "parameters_used": echo(args),
        "new_features": {
            "enhanced_date_ranges": args.submission_deadline.is_some()
                || args.publication_date.is_some(),
            "priority_populations": args.priority_populations.is_some(),
            "multiple_statuses": args.tender_statuses.is_some(),
            "multiple_purposes": args.tender_purposes.is_some(),
            "multiple_regions": args.regions.is_some(),
        },
        "settlement_conversion": {
            "settlement_name_provided": args.settlement.is_some(),
            "kod_yeshuv_resolved": if converted { json!(resolved_kod_yeshuv) } else { Value::Null },
            "conversion_successful": converted && resolved_kod_yeshuv.is_some(),
        },
    });

    Ok(json!({
        "success": true,
        "count": tenders.len(),
        "tenders": tenders,
        "search_summary": search_summary,
    }))
}

/// Fetches comprehensive details for a tender by id.
///
/// A "does not exist" answer is still `success: true`: upstream reports
/// it as data (identifier 0 plus an embedded message object). The payload
/// is passed through intact, with a `not_found` flag alongside it so
/// callers need not re-derive the marker convention.
pub async fn get_tender_details(client: &LandClient, michraz_id: i64) -> Value {
    match client.get_tender_details(michraz_id).await {
        Ok(details) => {
            let not_found = TenderRecord::from_value(&details)
                .map(|record| record.is_not_found())
                .unwrap_or(false);
            json!({
                "success": true,
                "tender_id": michraz_id,
                "not_found": not_found,
                "details": details,
            })
        }
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "tender_id": michraz_id,
        }),
    }
}

/// Fetches all currently active tenders, truncated to `max_results`.
pub async fn get_active_tenders(client: &LandClient, max_results: usize) -> Value {
    match client.get_active_tenders().await {
        Ok(outcome) => {
            let mut tenders = outcome.records;
            tenders.truncate(max_results);
            json!({
                "success": true,
                "count": tenders.len(),
                "active_tenders": tenders,
            })
        }
        Err(e) => json!({"success": false, "error": e.to_string()}),
    }
}

/// Searches tenders by type or land use purpose.
pub async fn search_by_type(client: &LandClient, args: &TypeSearchArgs) -> Value {
    let type_search = json!({
        "tender_types": args.tender_types,
        "purpose": args.purpose,
    });
    match client
        .search_by_type(args.tender_types.clone(), args.purpose.clone())
        .await
    {
        Ok(outcome) => json!({
            "success": true,
            "count": outcome.records.len(),
            "tenders": outcome.records,
            "type_search": type_search,
        }),
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "type_search": type_search,
        }),
    }
}

/// Fetches tenders with results from the last `days` days.
pub async fn get_recent_results(client: &LandClient, days: i64) -> Value {
    match client.get_recent_results(days).await {
        Ok(outcome) => json!({
            "success": true,
            "count": outcome.records.len(),
            "days_back": days,
            "recent_results": outcome.records,
        }),
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "days_back": days,
        }),
    }
}

/// Fetches geographic and mapping data for a tender.
pub async fn get_tender_map_details(client: &LandClient, michraz_id: i64) -> Value {
    match client.get_tender_map_details(michraz_id).await {
        Ok(map_details) => json!({
            "success": true,
            "tender_id": michraz_id,
            "map_details": map_details,
        }),
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "tender_id": michraz_id,
        }),
    }
}

/// Looks up the Kod Yeshuv for a Hebrew settlement name.
///
/// An exact match returns the code; partial matches return up to 10
/// candidates; a miss returns `success: false` with a suggestion string.
/// This operation is pure and never touches the network.
pub fn get_kod_yeshuv(settlement_name: &str) -> Value {
    let trimmed = settlement_name.trim();
    match resolver::resolve(trimmed) {
        SettlementMatch::Exact { kod_yeshuv } => json!({
            "success": true,
            "settlement_name": trimmed,
            "kod_yeshuv": kod_yeshuv,
            "match_type": "exact",
        }),
        SettlementMatch::Partial { matches } => {
            let partial_matches: Vec<Value> = matches
                .iter()
                .map(|s| {
                    json!({
                        "settlement_name": s.name_hebrew,
                        "kod_yeshuv": s.kod_yeshuv,
                        "similarity": "partial",
                    })
                })
                .collect();
            json!({
                "success": true,
                "searched_name": trimmed,
                "exact_match": false,
                "partial_matches": partial_matches,
                "match_type": "partial",
            })
        }
        SettlementMatch::None => json!({
            "success": false,
            "error": format!("No settlement found matching '{trimmed}'"),
            "searched_name": trimmed,
            "suggestion": "Try using the exact Hebrew name or check the settlement name spelling",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kod_yeshuv_exact_match() {
        let envelope = get_kod_yeshuv("תל אביב");
        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["kod_yeshuv"], json!(5000));
        assert_eq!(envelope["match_type"], json!("exact"));
    }

    #[test]
    fn test_kod_yeshuv_partial_match_capped() {
        let envelope = get_kod_yeshuv("קריית");
        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["match_type"], json!("partial"));
        let matches = envelope["partial_matches"].as_array().unwrap();
        assert!(!matches.is_empty());
        assert!(matches.len() <= 10);
        assert_eq!(matches[0]["similarity"], json!("partial"));
    }

    #[test]
    fn test_kod_yeshuv_no_match_is_structured_failure() {
        let envelope = get_kod_yeshuv("אטלנטיס");
        assert_eq!(envelope["success"], json!(false));
        assert!(envelope["error"].as_str().unwrap().contains("אטלנטיס"));
        assert!(envelope["suggestion"].is_string());
    }

    #[test]
    fn test_search_args_echo_omits_unset_options() {
        let args = SearchTendersArgs {
            settlement: Some("חיפה".into()),
            ..SearchTendersArgs::default()
        };
        let echoed = echo(&args);
        assert_eq!(echoed["settlement"], json!("חיפה"));
        assert!(echoed.get("tender_number").is_none());
        assert_eq!(echoed["active_only"], json!(false));
    }

    #[test]
    fn test_date_range_arg_rejects_malformed_dates() {
        let arg = DateRangeArg {
            from_date: Some("June 1st".into()),
            to_date: None,
        };
        assert!(arg.to_range().is_err());
    }
}
