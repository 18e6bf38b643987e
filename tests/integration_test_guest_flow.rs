mod common;

use axum::http::{header, StatusCode};
use common::{create_company, create_type, datetime_str, parse_body, upcoming_date, TestApp};
use serde_json::json;

#[tokio::test]
async fn listing_shows_only_published_active_types() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;

    create_type(&app, &company_id, json!({ "name": "Visible" })).await;
    create_type(&app, &company_id, json!({ "name": "Hidden", "is_published": false })).await;
    let archived = create_type(&app, &company_id, json!({ "name": "Archived" })).await;
    app.put(
        &format!("/api/v1/{}/types/{}", company_id, archived),
        json!({ "active": false }),
    )
    .await;

    let res = app.get("/appointment").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Visible"]);
}

#[tokio::test]
async fn unpublished_type_detail_redirects_to_listing() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({ "is_published": false })).await;

    let res = app.get(&format!("/appointment/{}", type_id)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/appointment");

    let res = app.get("/appointment/no-such-type").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn booking_with_answers_round_trips_display_values() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;

    let res = app
        .post(
            &format!("/api/v1/{}/types/{}/questions", company_id, type_id),
            json!({ "label": "Allergies", "question_type": "text", "required": true }),
        )
        .await;
    let text_q = parse_body(res).await;

    let res = app
        .post(
            &format!("/api/v1/{}/types/{}/questions", company_id, type_id),
            json!({
                "label": "Seating",
                "question_type": "select",
                "options": ["Window seat", "Aisle seat"]
            }),
        )
        .await;
    let select_q = parse_body(res).await;
    let window_id = select_q["options"][0]["id"].as_str().unwrap();

    let res = app
        .post(
            &format!("/api/v1/{}/types/{}/questions", company_id, type_id),
            json!({ "label": "Party size", "question_type": "number" }),
        )
        .await;
    let number_q = parse_body(res).await;

    let start = datetime_str(upcoming_date(0), 10, 0);
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Alice",
                "guest_email": "alice@example.com",
                "start_datetime": start,
                "answers": {
                    (text_q["id"].as_str().unwrap()): "Peanuts",
                    (select_q["id"].as_str().unwrap()): window_id,
                    (number_q["id"].as_str().unwrap()): "3"
                }
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();
    assert!(body["redirect"].as_str().unwrap().contains("/confirm"));

    let res = app
        .get(&format!("/appointment/booking/{}?token={}", booking_id, token))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let detail = parse_body(res).await;
    let answers = detail["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 3);
    let value_of = |label: &str| {
        answers
            .iter()
            .find(|a| a["label"] == label)
            .unwrap()["value"]
            .as_str()
            .unwrap()
            .to_string()
    };
    assert_eq!(value_of("Allergies"), "Peanuts");
    assert_eq!(value_of("Seating"), "Window seat");
    assert_eq!(value_of("Party size"), "3");
}

#[tokio::test]
async fn missing_required_answer_echoes_form_back() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;

    app.post(
        &format!("/api/v1/{}/types/{}/questions", company_id, type_id),
        json!({ "label": "Allergies", "question_type": "text", "required": true }),
    )
    .await;

    let start = datetime_str(upcoming_date(0), 10, 0);
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Bob",
                "guest_email": "bob@example.com",
                "start_datetime": start
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("Allergies"));
    assert_eq!(body["form"]["guest_name"], "Bob");
    assert_eq!(body["form"]["guest_email"], "bob@example.com");
}

#[tokio::test]
async fn missing_guest_fields_are_rejected_with_echo() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;
    let start = datetime_str(upcoming_date(0), 10, 0);

    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({ "guest_email": "x@example.com", "start_datetime": start }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["form"]["guest_email"], "x@example.com");

    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({ "guest_name": "X", "guest_email": "not-an-email", "start_datetime": start }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn token_mismatch_redirects_without_detail() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;

    let start = datetime_str(upcoming_date(0), 14, 0);
    let res = app
        .post(
            &format!("/appointment/{}/book", type_id),
            json!({
                "guest_name": "Carol",
                "guest_email": "carol@example.com",
                "start_datetime": start
            }),
        )
        .await;
    let body = parse_body(res).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let token = body["booking"]["access_token"].as_str().unwrap().to_string();

    let res = app
        .get(&format!("/appointment/booking/{}?token=wrong-token", booking_id))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/appointment");

    let res = app
        .get(&format!("/appointment/booking/{}?token={}", booking_id, token))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Token-less access by id stays reachable.
    let res = app.get(&format!("/appointment/booking/{}", booking_id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/appointment/booking/no-such-id").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn repeat_guest_reuses_contact() {
    let app = TestApp::new().await;
    let company_id = create_company(&app).await;
    let type_id = create_type(&app, &company_id, json!({})).await;

    let date = upcoming_date(0);
    for hour in [9, 11] {
        let res = app
            .post(
                &format!("/appointment/{}/book", type_id),
                json!({
                    "guest_name": "Dora",
                    "guest_email": "dora@example.com",
                    "start_datetime": datetime_str(date, hour, 0)
                }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE email = 'dora@example.com'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(row.0, 1);
}
