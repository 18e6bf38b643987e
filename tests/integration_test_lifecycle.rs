mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{create_company, create_type, datetime_str, parse_body, upcoming_date, TestApp};
use serde_json::json;

async fn calendar_event_count(app: &TestApp) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM calendar_events")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    row.0
}

async fn book(app: &TestApp, type_id: &str, start: &str) -> serde_json::Value {
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Frank",
                "guest_email": "frank@example.com",
                "start_datetime": start
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn paid_type_waits_for_payment_before_confirming() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(
        &app,
        &company_id,
        json!({
            "category": "paid_consultation",
            "require_payment": true,
            "payment_amount": 50.0,
            "currency": "EUR"
        }),
    )
    .await;

    let start = datetime_str(upcoming_date(0), 10, 0);
    let body = book(&app, &type_id, &start).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();

    // Auto-confirm is deferred while unpaid.
    assert_eq!(body["booking"]["state"], "draft");
    assert_eq!(body["booking"]["payment_status"], "pending");
    assert_eq!(body["booking"]["payment_amount"], 50.0);
    assert!(body["redirect"].as_str().unwrap().contains("/pay"));
    assert_eq!(calendar_event_count(&app).await, 0);

    // Confirming an unpaid booking is refused.
    let res = app
        .post(
            &format!("/api/v1/{}/bookings/{}/confirm", company_id, booking_id),
            json!({}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Payment callback marks paid and auto-confirms.
    let res = app
        .post(
            &format!("/api/v1/payments/{}/complete", booking_id),
            json!({ "transaction_ref": "tx-123" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let paid = parse_body(res).await;
    assert_eq!(paid["payment_status"], "paid");
    assert_eq!(paid["payment_transaction_ref"], "tx-123");
    assert_eq!(paid["state"], "confirmed");
    assert_eq!(calendar_event_count(&app).await, 1);

    // A duplicate callback stays idempotent: still one calendar event.
    let res = app
        .post(
            &format!("/api/v1/payments/{}/complete", booking_id),
            json!({ "transaction_ref": "tx-123" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(calendar_event_count(&app).await, 1);

    // The pay page now redirects to the confirmation view.
    let res = app
        .get(&format!("/appointment/booking/{}/pay?token={}", booking_id, token))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let mails = app.mails.sent.lock().unwrap();
    let confirmation = mails
        .iter()
        .find(|m| m.subject.contains("confirmed"))
        .expect("confirmation mail sent");
    assert_eq!(confirmation.recipient, "frank@example.com");
    assert!(confirmation.has_attachment);
}

#[tokio::test]
async fn pay_page_lists_enabled_providers() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(
        &app,
        &company_id,
        json!({ "require_payment": true, "payment_amount": 20.0, "payment_per_person": true }),
    )
    .await;

    app.post(
        &format!("/api/v1/{}/payment-providers", company_id),
        json!({ "name": "Stripe", "code": "stripe" }),
    )
    .await;

    let start = datetime_str(upcoming_date(0), 10, 0);
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Gus",
                "guest_email": "gus@example.com",
                "guest_count": 3,
                "start_datetime": start
            }),
        )
        .await;
    let body = parse_body(res).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();
    // Per-person pricing multiplies by the guest count.
    assert_eq!(body["booking"]["payment_amount"], 60.0);

    let res = app
        .get(&format!("/appointment/booking/{}/pay?token={}", booking_id, token))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = parse_body(res).await;
    assert_eq!(page["amount"], 60.0);
    assert_eq!(page["providers"][0]["code"], "stripe");
}

#[tokio::test]
async fn cancellation_deadline_is_enforced_inline() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "cancel_before_hours": 48.0 })).await;

    // Starts tomorrow, inside the 48h deadline.
    let start = (Utc::now() + Duration::hours(24)).format("%Y-%m-%d %H:%M:%S").to_string();
    let body = book(&app, &type_id, &start).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["booking"]["state"], "confirmed");

    // Guest route renders the refusal inline instead of failing.
    let res = app
        .post(
            &format!("/appointment/booking/{}/cancel?token={}", booking_id, token),
            json!({}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let result = parse_body(res).await;
    assert!(result["error"].as_str().unwrap().contains("48"));
    assert_eq!(result["booking"]["state"], "confirmed");

    // Admin route surfaces the same rule as a conflict.
    let res = app
        .post(
            &format!("/api/v1/{}/bookings/{}/cancel", company_id, booking_id),
            json!({}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancel_removes_calendar_event_and_notifies() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;

    let start = datetime_str(upcoming_date(0), 11, 0);
    let body = book(&app, &type_id, &start).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(calendar_event_count(&app).await, 1);

    let res = app
        .post(
            &format!("/appointment/booking/{}/cancel?token={}", booking_id, token),
            json!({}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let result = parse_body(res).await;
    assert!(result["error"].is_null());
    assert_eq!(result["booking"]["state"], "cancelled");
    assert_eq!(calendar_event_count(&app).await, 0);

    let mails = app.mails.sent.lock().unwrap();
    let cancellation = mails
        .iter()
        .find(|m| m.subject.contains("cancelled"))
        .expect("cancellation mail sent");
    assert!(!cancellation.has_attachment);
}

#[tokio::test]
async fn state_machine_transitions_and_no_ops() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "auto_confirm": false })).await;

    let start = datetime_str(upcoming_date(0), 15, 0);
    let body = book(&app, &type_id, &start).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["booking"]["state"], "draft");

    let transition = |action: &'static str| {
        let uri = format!("/api/v1/{}/bookings/{}/{}", company_id, booking_id, action);
        let app = &app;
        async move {
            let res = app.post(&uri, json!({})).await;
            (res.status(), parse_body(res).await)
        }
    };

    // done before confirm is a no-op.
    let (status, b) = transition("done").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(b["state"], "draft");

    let (_, b) = transition("confirm").await;
    assert_eq!(b["state"], "confirmed");
    assert_eq!(calendar_event_count(&app).await, 1);

    // Confirming twice neither fails nor duplicates the calendar event.
    let (status, b) = transition("confirm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(b["state"], "confirmed");
    assert_eq!(calendar_event_count(&app).await, 1);

    let (_, b) = transition("cancel").await;
    assert_eq!(b["state"], "cancelled");

    // Cancelling again is a no-op, reopening returns to draft.
    let (status, b) = transition("cancel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(b["state"], "cancelled");

    let (_, b) = transition("reopen").await;
    assert_eq!(b["state"], "draft");

    let (_, _) = transition("confirm").await;
    let (_, b) = transition("done").await;
    assert_eq!(b["state"], "done");

    // A completed booking cannot be cancelled or reopened.
    let (status, _) = transition("cancel").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, b) = transition("reopen").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(b["state"], "done");
}
