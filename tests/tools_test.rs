//! Tests for the tool façade envelopes

mod common;

use chrono::NaiveDate;
use common::{request_body, tender_records, test_config, MockUpstream};
use rami_cli::client::LandClient;
use rami_cli::tools::{self, DateRangeArg, SearchTendersArgs, TypeSearchArgs};
use serde_json::json;

/// Client pointed at a port nothing listens on; used when the test must
/// fail before any request is dispatched.
fn offline_client() -> LandClient {
    LandClient::with_config(&test_config("http://127.0.0.1:9")).unwrap()
}

#[tokio::test]
async fn test_search_resolves_settlement_name_to_code() {
    let upstream = MockUpstream::start(vec![(200, "[]".to_string())]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        settlement: Some("תל אביב".to_string()),
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&client, &args).await;

    assert_eq!(envelope["success"], json!(true));
    let conversion = &envelope["search_summary"]["settlement_conversion"];
    assert_eq!(conversion["settlement_name_provided"], json!(true));
    assert_eq!(conversion["kod_yeshuv_resolved"], json!(5000));
    assert_eq!(conversion["conversion_successful"], json!(true));

    // The resolved code replaces the name on the wire.
    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["KodYeshuv"], json!(5000));
    assert!(payload.get("Yishuv").is_none());
}

#[tokio::test]
async fn test_search_unresolved_name_is_forwarded_best_effort() {
    let upstream = MockUpstream::start(vec![(200, "[]".to_string())]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        settlement: Some("כפר לא קיים".to_string()),
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&client, &args).await;

    assert_eq!(envelope["success"], json!(true));
    let conversion = &envelope["search_summary"]["settlement_conversion"];
    assert_eq!(conversion["conversion_successful"], json!(false));

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["Yishuv"], json!("כפר לא קיים"));
    assert!(payload.get("KodYeshuv").is_none());
}

#[tokio::test]
async fn test_search_returns_third_page_of_twelve_records() {
    let upstream = MockUpstream::start(vec![(200, tender_records(12))]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        page_size: 5,
        page_number: 3,
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&client, &args).await;

    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["count"], json!(2));
    let tenders = envelope["tenders"].as_array().unwrap();
    assert_eq!(tenders[0]["MichrazID"], json!(11));
    assert_eq!(tenders[1]["MichrazID"], json!(12));

    upstream.finish().await;
}

#[tokio::test]
async fn test_search_malformed_date_fails_before_dispatch() {
    let args = SearchTendersArgs {
        submission_deadline: Some(DateRangeArg {
            from_date: Some("2025-06-01".to_string()),
            to_date: None,
        }),
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&offline_client(), &args).await;

    assert_eq!(envelope["success"], json!(false));
    let error = envelope["error"].as_str().unwrap();
    assert!(error.contains("Invalid input"));
    assert!(error.contains("2025-06-01"));
    assert!(envelope["search_parameters"]["submission_deadline"].is_object());
}

#[tokio::test]
async fn test_search_failure_envelope_echoes_parameters() {
    let upstream = MockUpstream::start(vec![(404, String::new())]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        tender_statuses: Some(vec![1]),
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&client, &args).await;

    assert_eq!(envelope["success"], json!(false));
    assert!(envelope["error"].as_str().unwrap().contains("404"));
    assert_eq!(envelope["search_parameters"]["tender_statuses"], json!([1]));

    upstream.finish().await;
}

#[tokio::test]
async fn test_search_days_back_fills_submission_lower_bound() {
    let upstream = MockUpstream::start(vec![(200, "[]".to_string())]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        days_back: Some(10),
        ..SearchTendersArgs::default()
    };
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let envelope = tools::search_tenders_at(&client, &args, today).await;
    assert_eq!(envelope["success"], json!(true));

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["CloseDate"]["from"], json!("20/06/25"));
    assert!(payload["CloseDate"].get("to").is_none());
}

#[tokio::test]
async fn test_details_not_found_message_passes_through_as_success() {
    let body = json!({
        "MichrazID": 0,
        "MessageDetails": {"messageCode": 1, "messageText": "המכרז המבוקש לא קיים"}
    })
    .to_string();
    let upstream = MockUpstream::start(vec![(200, body)]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let envelope = tools::get_tender_details(&client, -1).await;

    // The call itself succeeded; "does not exist" is data, not an error.
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["tender_id"], json!(-1));
    assert_eq!(envelope["not_found"], json!(true));
    assert_eq!(envelope["details"]["MichrazID"], json!(0));
    assert_eq!(
        envelope["details"]["MessageDetails"]["messageText"],
        json!("המכרז המבוקש לא קיים")
    );

    upstream.finish().await;
}

#[tokio::test]
async fn test_details_existing_tender_is_not_flagged() {
    let body = json!({"MichrazID": 20250101, "MichrazName": "ים/101/2025"}).to_string();
    let upstream = MockUpstream::start(vec![(200, body)]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let envelope = tools::get_tender_details(&client, 20250101).await;
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["not_found"], json!(false));
    assert_eq!(envelope["details"]["MichrazName"], json!("ים/101/2025"));

    upstream.finish().await;
}

#[tokio::test]
async fn test_search_sort_controls_reach_the_payload() {
    let upstream = MockUpstream::start(vec![(200, "[]".to_string())]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = SearchTendersArgs {
        sort_by: Some("SgiraDate".to_string()),
        sort_order: Some("DESC".to_string()),
        ..SearchTendersArgs::default()
    };
    let envelope = tools::search_tenders(&client, &args).await;
    assert_eq!(envelope["success"], json!(true));

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["sortBy"], json!("SgiraDate"));
    // Direction is normalized to the wire form regardless of input case.
    assert_eq!(payload["sortOrder"], json!("desc"));
}

#[tokio::test]
async fn test_details_transport_failure_is_error_envelope() {
    let envelope = tools::get_tender_details(&offline_client(), 42).await;
    assert_eq!(envelope["success"], json!(false));
    assert_eq!(envelope["tender_id"], json!(42));
    assert!(envelope["error"].is_string());
}

#[tokio::test]
async fn test_active_tenders_sets_flag_and_truncates() {
    let upstream = MockUpstream::start(vec![(200, tender_records(5))]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let envelope = tools::get_active_tenders(&client, 3).await;
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["count"], json!(3));
    assert_eq!(envelope["active_tenders"].as_array().unwrap().len(), 3);

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["ActiveMichraz"], json!(true));
}

#[tokio::test]
async fn test_by_type_envelope_echoes_search_terms() {
    let upstream = MockUpstream::start(vec![(200, tender_records(3))]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let args = TypeSearchArgs {
        tender_types: Some(vec![1, 3]),
        purpose: Some("מגורים".to_string()),
    };
    let envelope = tools::search_by_type(&client, &args).await;

    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["count"], json!(3));
    assert_eq!(envelope["type_search"]["tender_types"], json!([1, 3]));
    assert_eq!(envelope["type_search"]["purpose"], json!("מגורים"));

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["SugMichraz"], json!([1, 3]));
    // Legacy purpose text rides along since no structured purposes exist.
    assert_eq!(payload["purpose"], json!("מגורים"));
}

#[tokio::test]
async fn test_recent_results_envelope_reports_days_back() {
    let upstream = MockUpstream::start(vec![(200, tender_records(2))]).await;
    let client = LandClient::with_config(&test_config(&upstream.base_url)).unwrap();

    let envelope = tools::get_recent_results(&client, 14).await;
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["days_back"], json!(14));
    assert_eq!(envelope["count"], json!(2));

    let requests = upstream.finish().await;
    let payload = request_body(&requests[0]);
    assert_eq!(payload["hasResults"], json!(true));
    assert!(payload["CloseDate"]["from"].is_string());
}
