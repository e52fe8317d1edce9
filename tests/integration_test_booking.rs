mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp, TEST_PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn book_request(slot_id: &str, guest_name: &str, guest_email: &str, note: Option<&str>) -> Request<Body> {
    let mut payload = json!({
        "guest_name": guest_name,
        "guest_email": guest_email,
    });
    if let Some(note) = note {
        payload["guest_note"] = json!(note);
    }

    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/slots/{slot_id}/book"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn setup_one_slot(app: &TestApp) -> (AuthHeaders, String) {
    app.register_host("alice").await;
    let auth = app.login("alice", TEST_PASSWORD).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/slots")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::from(json!({ "slots": [
                { "date": "2026-03-09", "start_time": "09:00:00", "end_time": "09:30:00" }
            ]}).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let slot_id = body["slots"][0]["id"].as_str().unwrap().to_string();
    (auth, slot_id)
}

#[tokio::test]
async fn test_booking_happy_path() {
    let app = TestApp::new().await;
    let (_, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", Some("Vegan meal please"))
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let booked = parse_body(res).await;
    assert_eq!(booked["is_booked"], true);
    assert_eq!(booked["guest_name"], "Minh");
    assert_eq!(booked["guest_email"], "minh@example.com");
    assert_eq!(booked["guest_note"], "Vegan meal please");
    assert_eq!(booked["booked_by"], "minh@example.com");
    assert!(booked["booked_at"].is_string());
    // Booking does not touch the visibility flag.
    assert_eq!(booked["is_available"], true);
}

#[tokio::test]
async fn test_guest_fields_are_trimmed_and_required() {
    let app = TestApp::new().await;
    let (_, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "   ", "minh@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "  ", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // The slot is still free after the rejected attempts.
    let res = app.router.clone().oneshot(
        book_request(&slot_id, "  Minh  ", "  minh@example.com ", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let booked = parse_body(res).await;
    assert_eq!(booked["guest_name"], "Minh");
    assert_eq!(booked["guest_email"], "minh@example.com");
    assert!(booked["guest_note"].is_null());
}

#[tokio::test]
async fn test_second_booking_loses() {
    let app = TestApp::new().await;
    let (_, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Lan", "lan@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The first writer's data is intact.
    let res = app.router.clone().oneshot(
        Request::builder().uri("/api/v1/slots").body(Body::empty()).unwrap()
    ).await.unwrap();
    let slots = parse_body(res).await;
    assert_eq!(slots[0]["guest_name"], "Minh");
    assert_eq!(slots[0]["booked_by"], "minh@example.com");
}

#[tokio::test]
async fn test_concurrent_bookings_exactly_one_wins() {
    let app = TestApp::new().await;
    let (_, slot_id) = setup_one_slot(&app).await;

    let first = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", None)
    );
    let second = app.router.clone().oneshot(
        book_request(&slot_id, "Lan", "lan@example.com", None)
    );

    let (first, second) = tokio::join!(first, second);
    let mut statuses = [first.unwrap().status(), second.unwrap().status()];
    statuses.sort();

    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    // Exactly one guest's data landed on the slot.
    let res = app.router.clone().oneshot(
        Request::builder().uri("/api/v1/slots").body(Body::empty()).unwrap()
    ).await.unwrap();
    let slots = parse_body(res).await;
    let winner = slots[0]["guest_name"].as_str().unwrap();
    assert!(winner == "Minh" || winner == "Lan");
    assert_eq!(slots[0]["is_booked"], true);
    assert_eq!(
        slots[0]["booked_by"],
        format!("{}@example.com", winner.to_lowercase()).as_str()
    );
}

#[tokio::test]
async fn test_booking_unknown_slot_is_not_found() {
    let app = TestApp::new().await;
    setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request("no-such-slot", "Minh", "minh@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hidden_slot_can_still_be_booked() {
    // The atomic guard only checks the booked flag; visibility is a
    // display concern and deliberately not part of the predicate.
    let app = TestApp::new().await;
    let (auth, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/slots/{slot_id}/availability"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::from(json!({ "is_available": false }).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let booked = parse_body(res).await;
    assert_eq!(booked["is_booked"], true);
    assert_eq!(booked["is_available"], false);
}

#[tokio::test]
async fn test_cancel_clears_guest_fields_and_is_idempotent() {
    let app = TestApp::new().await;
    let (auth, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", Some("note"))
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let cancel = |auth: &AuthHeaders| {
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/slots/{slot_id}/cancel"))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty())
            .unwrap()
    };

    let res = app.router.clone().oneshot(cancel(&auth)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let cancelled = parse_body(res).await;
    assert_eq!(cancelled["is_booked"], false);
    assert_eq!(cancelled["is_available"], true);
    assert!(cancelled["guest_name"].is_null());
    assert!(cancelled["guest_email"].is_null());
    assert!(cancelled["guest_note"].is_null());
    assert!(cancelled["booked_at"].is_null());
    assert!(cancelled["booked_by"].is_null());

    // Cancelling an already-available slot is a no-op, not an error.
    let res = app.router.clone().oneshot(cancel(&auth)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cancelled = parse_body(res).await;
    assert_eq!(cancelled["is_booked"], false);

    // And the slot can be booked again.
    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Lan", "lan@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_booked_slot_can_be_deleted() {
    let app = TestApp::new().await;
    let (auth, slot_id) = setup_one_slot(&app).await;

    let res = app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/slots/{slot_id}"))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_host_lists_only_its_booked_slots() {
    let app = TestApp::new().await;
    let (auth, slot_id) = setup_one_slot(&app).await;

    // A second host with a slot that stays unbooked.
    app.register_host("bob").await;
    let bob = app.login("bob", TEST_PASSWORD).await;
    app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/slots")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("access_token={}", bob.access_token))
            .header("X-CSRF-Token", &bob.csrf_token)
            .body(Body::from(json!({ "slots": [
                { "date": "2026-03-09", "start_time": "10:00:00", "end_time": "10:30:00" }
            ]}).to_string()))
            .unwrap()
    ).await.unwrap();

    app.router.clone().oneshot(
        book_request(&slot_id, "Minh", "minh@example.com", None)
    ).await.unwrap();

    let res = app.router.clone().oneshot(
        Request::builder()
            .uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bookings = parse_body(res).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], slot_id.as_str());

    let res = app.router.clone().oneshot(
        Request::builder()
            .uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", bob.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}
