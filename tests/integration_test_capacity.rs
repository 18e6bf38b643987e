mod common;

use axum::http::StatusCode;
use common::{create_company, create_type, datetime_str, parse_body, upcoming_date, TestApp};
use serde_json::json;

async fn create_resource(app: &TestApp, company_id: &str, capacity: i32) -> String {
    let res = app
        .post(
            &format!("/api/v1/{}/resources", company_id),
            json!({ "name": "Table 5", "capacity": capacity }),
        )
        .await;
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn resource_capacity_caps_concurrent_bookings() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "category": "table", "manage_capacity": true })).await;
    let resource_id = create_resource(&app, &company_id, 2).await;
    app.post(
        &format!("/api/v1/{}/types/{}/resources/{}", company_id, type_id, resource_id),
        json!({}),
    )
    .await;

    let start = datetime_str(upcoming_date(0), 13, 0);
    let book = |name: &str, email: &str| {
        json!({
            "guest_name": name,
            "guest_email": email,
            "start_datetime": start,
            "resource_id": resource_id
        })
    };

    let res = app
        .post(&format!("/appointment/{}/book", type_id), book("A", "a@example.com"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = app
        .post(&format!("/appointment/{}/book", type_id), book("B", "b@example.com"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Third guest over the same window is turned away.
    let res = app
        .post(&format!("/appointment/{}/book", type_id), book("C", "c@example.com"))
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("no longer available"));
}

#[tokio::test]
async fn guest_count_consumes_capacity() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "category": "table" })).await;
    let resource_id = create_resource(&app, &company_id, 4).await;
    app.post(
        &format!("/api/v1/{}/types/{}/resources/{}", company_id, type_id, resource_id),
        json!({}),
    )
    .await;

    let start = datetime_str(upcoming_date(0), 13, 0);
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Party of three",
                "guest_email": "host@example.com",
                "guest_count": 3,
                "start_datetime": start,
                "resource_id": resource_id
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Two more guests no longer fit, one still does.
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Pair",
                "guest_email": "pair@example.com",
                "guest_count": 2,
                "start_datetime": start,
                "resource_id": resource_id
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Single",
                "guest_email": "single@example.com",
                "start_datetime": start,
                "resource_id": resource_id
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn day_query_reports_remaining_capacity() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "category": "table" })).await;
    let resource_id = create_resource(&app, &company_id, 2).await;
    app.post(
        &format!("/api/v1/{}/types/{}/resources/{}", company_id, type_id, resource_id),
        json!({}),
    )
    .await;

    let date = upcoming_date(0);
    let query = json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "resource_id": resource_id
    });

    let res = app.post(&format!("/appointment/{}/slots", type_id), query.clone()).await;
    let body = parse_body(res).await;
    let slot = &body["slots"].as_array().unwrap()[0];
    assert_eq!(slot["available"], 2);
    let start = slot["start"].as_str().unwrap().to_string();

    app.post(
        &format!("/appointment/{}/book", type_id),
        json!({
            "guest_name": "First",
            "guest_email": "first@example.com",
            "start_datetime": start,
            "resource_id": resource_id
        }),
    )
    .await;

    let res = app.post(&format!("/appointment/{}/slots", type_id), query).await;
    let body = parse_body(res).await;
    assert_eq!(body["slots"][0]["available"], 1);
}

#[tokio::test]
async fn materialized_slot_tracks_booked_counts() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "category": "table" })).await;

    app.post(
        &format!("/api/v1/{}/types/{}/rules", company_id, type_id),
        json!({ "weekday": 0, "hour_from": 9.0, "hour_to": 10.0 }),
    )
    .await;
    let monday = upcoming_date(0);
    app.post(
        &format!("/api/v1/{}/types/{}/slots/generate", company_id, type_id),
        json!({
            "start_date": monday.format("%Y-%m-%d").to_string(),
            "end_date": monday.format("%Y-%m-%d").to_string()
        }),
    )
    .await;

    let slots: Vec<(String,)> = sqlx::query_as("SELECT id FROM appointment_slots")
        .fetch_all(&app.pool)
        .await
        .unwrap();
    let slot_id = slots[0].0.clone();
    let res = app
        .put(
            &format!("/api/v1/{}/slots/{}/capacity", company_id, slot_id),
            json!({ "capacity": 2 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Seated",
                "guest_email": "seated@example.com",
                "slot_id": slot_id
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["booking"]["state"], "confirmed");

    let row: (i32, i32, String) =
        sqlx::query_as("SELECT booked_count, available_count, state FROM appointment_slots WHERE id = ?")
            .bind(&slot_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(row.0, 1);
    assert_eq!(row.1, 1);
    assert_eq!(row.2, "partial");
}
