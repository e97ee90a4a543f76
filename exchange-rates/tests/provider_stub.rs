//! End-to-end client tests against a local stub provider.
//!
//! Each test spins up a throwaway axum server on an ephemeral port that
//! plays the role of the rate provider, then points the client at it.

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use exchange_rates::{ConvertError, ConvertRequest, RateClient};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn request(from: &str, to: &str, amount: serde_json::Value, date: Option<&str>) -> ConvertRequest {
    ConvertRequest {
        from: Some(from.into()),
        to: Some(to.into()),
        amount: Some(amount),
        date: date.map(Into::into),
    }
}

fn rate_table(date: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "base": "EUR",
        "date": date,
        "rates": { "EUR": 1.0, "USD": 1.1, "GBP": 0.85, "ZRO": 0.0 }
    })
}

fn stub_provider() -> Router {
    Router::new()
        .route(
            "/latest",
            get(|| async { Json(rate_table("1999-12-31")) }),
        )
        .route(
            "/{date}",
            get(|Path(date): Path<String>| async move { Json(rate_table(&date)) }),
        )
}

#[tokio::test]
async fn converts_through_the_pivot_currency() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let conversion = client
        .convert(request("EUR", "USD", serde_json::json!(100), None))
        .await
        .unwrap();

    assert_eq!(conversion.from, "EUR");
    assert_eq!(conversion.to, "USD");
    assert_eq!(conversion.amount, 100.0);
    assert!((conversion.rate - 1.1).abs() < 1e-12);
    assert!((conversion.result - 110.0).abs() < 1e-9);
}

#[tokio::test]
async fn omitted_date_uses_the_latest_table() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let conversion = client
        .convert(request("EUR", "GBP", serde_json::json!(10), None))
        .await
        .unwrap();

    // The stub marks /latest with a sentinel date.
    assert_eq!(conversion.date, "1999-12-31");
}

#[tokio::test]
async fn todays_date_uses_the_latest_table() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    // "Today" is the server's UTC calendar day. A caller in another timezone
    // sending its own local date near midnight falls through to the
    // historical path instead; that boundary behavior is deliberate.
    let today = chrono::Utc::now().date_naive().to_string();

    let conversion = client
        .convert(request("EUR", "USD", serde_json::json!(1), Some(&today)))
        .await
        .unwrap();

    assert_eq!(conversion.date, "1999-12-31");
}

#[tokio::test]
async fn empty_date_uses_the_latest_table() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let conversion = client
        .convert(request("EUR", "USD", serde_json::json!(100), Some("")))
        .await
        .unwrap();

    assert_eq!(conversion.date, "1999-12-31");
    assert!((conversion.result - 110.0).abs() < 1e-9);
}

#[tokio::test]
async fn historical_date_requests_the_dated_table() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let conversion = client
        .convert(request("EUR", "USD", serde_json::json!(1), Some("2025-01-15")))
        .await
        .unwrap();

    assert_eq!(conversion.date, "2025-01-15");
}

#[tokio::test]
async fn provider_substituted_date_is_passed_through() {
    // Provider answers a dated lookup with the nearest available table.
    let app = Router::new().route(
        "/{date}",
        get(|| async { Json(rate_table("2025-01-14")) }),
    );
    let base_url = spawn(app).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let conversion = client
        .convert(request("EUR", "USD", serde_json::json!(1), Some("2025-01-15")))
        .await
        .unwrap();

    assert_eq!(conversion.date, "2025-01-14");
}

#[tokio::test]
async fn unknown_currency_is_rejected_not_divided() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let err = client
        .convert(request("XXX", "USD", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::InvalidRequest(msg) if msg.contains("XXX")));
}

#[tokio::test]
async fn zero_rate_target_currency_is_rejected_not_multiplied() {
    let base_url = spawn(stub_provider()).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let err = client
        .convert(request("EUR", "ZRO", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::InvalidRequest(msg) if msg.contains("ZRO")));
}

#[tokio::test]
async fn provider_logical_error_is_forwarded_verbatim() {
    let app = Router::new().route(
        "/latest",
        get(|| async {
            Json(serde_json::json!({
                "success": false,
                "error": { "code": 104, "info": "Your monthly usage limit has been reached" }
            }))
        }),
    );
    let base_url = spawn(app).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let err = client
        .convert(request("EUR", "USD", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::InvalidRequest(msg) if msg == "Your monthly usage limit has been reached"
    ));
}

#[tokio::test]
async fn non_success_status_maps_to_upstream_error() {
    let app = Router::new().route(
        "/latest",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let base_url = spawn(app).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let err = client
        .convert(request("EUR", "USD", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Upstream { status: 503 }));
}

#[tokio::test]
async fn malformed_body_maps_to_internal_error() {
    let app = Router::new().route("/latest", get(|| async { "not json" }));
    let base_url = spawn(app).await;
    let client = RateClient::new(Some("test-key".into())).with_base_url(base_url);

    let err = client
        .convert(request("EUR", "USD", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Internal { .. }));
}

#[tokio::test]
async fn network_failure_maps_to_internal_error() {
    let client = RateClient::new(Some("test-key".into())).with_base_url("http://127.0.0.1:1");

    let err = client
        .convert(request("EUR", "USD", serde_json::json!(100), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Internal { .. }));
}
