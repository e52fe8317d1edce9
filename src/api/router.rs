use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{auth, booking, export, feed, health, host, slot};
use crate::state::AppState;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The booking page is a browser client served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth & host accounts
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/hosts", post(host::register_host))

        // Slots: public listing/booking, host administration
        .route("/api/v1/slots", get(slot::list_slots).post(slot::create_slots))
        .route("/api/v1/slots/generate", post(slot::generate_slots))
        .route("/api/v1/slots/feed", get(feed::slot_feed))
        .route("/api/v1/slots/{slot_id}", delete(slot::delete_slot))
        .route("/api/v1/slots/{slot_id}/availability", put(slot::set_availability))
        .route("/api/v1/slots/{slot_id}/book", post(booking::book_slot))
        .route("/api/v1/slots/{slot_id}/cancel", post(booking::cancel_booking))

        // Bookings
        .route("/api/v1/bookings", get(booking::list_bookings))
        .route("/api/v1/bookings/export.csv", get(export::export_bookings_csv))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        host_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .with_state(state)
}
