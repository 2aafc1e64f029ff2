use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::json;
use std::sync::{Arc, Mutex};

use villa_docs_backend::config::BookingStoreConfig;
use villa_docs_backend::model::document::{MediaType, UploadedDocument};
use villa_docs_backend::model::traveler::DocumentType;
use villa_docs_backend::service::document_service::DocumentService;
use villa_docs_backend::util::booking_store::{BookingStore, BookingStoreError, HttpBookingStore};

const API_KEY: &str = "test-api-key";

/// Field name to (file name, text or byte length) as received by the fake store
type ReceivedFields = Arc<Mutex<Vec<(String, Option<String>, String)>>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

async fn booking(headers: HeaderMap, Path(id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"})));
    }
    if id == "404" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Booking not found"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "bookingId": 1234567,
            "guestName": "A. Guest",
            "guestEmail": "guest@example.com",
            "checkInDate": "2026-07-01",
            "checkOutDate": "2026-07-08",
            "status": "confirmed"
        })),
    )
}

async fn upcoming(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!([])));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"bookingId": "1", "guestEmail": "a@example.com", "checkInDate": "2026-07-01", "status": "confirmed"},
            {"bookingId": 2, "guestEmail": "b@example.com", "checkInDate": "2026-07-02 15:00:00", "status": "pending"}
        ])),
    )
}

async fn has_documents(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "garbled" => (StatusCode::OK, "not json").into_response(),
        "down" => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        _ => Json(json!({"bookingId": id, "hasDocuments": id == "1"})).into_response(),
    }
}

async fn upload(State(received): State<ReceivedFields>, mut multipart: Multipart) -> impl IntoResponse {
    let mut booking_id = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let value = if file_name.is_some() {
            field.bytes().await.unwrap().len().to_string()
        } else {
            field.text().await.unwrap()
        };
        if name == "bookingId" {
            booking_id = value.clone();
        }
        received.lock().unwrap().push((name, file_name, value));
    }
    if booking_id == "refused" {
        return Json(json!({"success": false, "message": "Booking is closed"}));
    }
    Json(json!({"success": true}))
}

async fn spawn_store() -> (String, ReceivedFields) {
    let received: ReceivedFields = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/booking/{id}", get(booking))
        .route("/bookings/upcoming", get(upcoming))
        .route("/has-documents/{id}", get(has_documents))
        .route("/upload-documents", post(upload))
        .with_state(received.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), received)
}

fn store_for(api_url: &str, api_key: &str) -> HttpBookingStore {
    HttpBookingStore::new(BookingStoreConfig {
        api_url: api_url.to_string(),
        api_key: api_key.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_booking_sends_api_key() {
    let (url, _) = spawn_store().await;
    let booking = store_for(&url, API_KEY).get_booking("1234567").await.unwrap();
    assert_eq!(booking.booking_id, "1234567");
    assert_eq!(booking.guest_email, "guest@example.com");
    assert!(booking.is_confirmed());

    let err = store_for(&url, "wrong").get_booking("1234567").await.unwrap_err();
    assert!(matches!(err, BookingStoreError::UpstreamStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_get_booking_not_found() {
    let (url, _) = spawn_store().await;
    match store_for(&url, API_KEY).get_booking("404").await {
        Err(BookingStoreError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("Booking not found"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Store mounted below `/api/v1` next to an unrelated path on the same host
async fn spawn_nested_store() -> (String, Arc<Mutex<usize>>) {
    let other_hits = Arc::new(Mutex::new(0usize));
    let counter = other_hits.clone();
    let app = Router::new()
        .route(
            "/api/v1/booking/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({"bookingId": id, "status": "confirmed"}))
            }),
        )
        .route(
            "/admin/secret",
            get(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Json(json!({"bookingId": "admin", "status": "confirmed"}))
                }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api/v1", addr), other_hits)
}

#[tokio::test]
async fn test_booking_id_stays_inside_booking_endpoint() {
    let (url, other_hits) = spawn_nested_store().await;
    let store = store_for(&url, API_KEY);

    let booking = store.get_booking("../../../admin/secret").await.unwrap();
    assert_eq!(booking.booking_id, "../../../admin/secret");

    let booking = store.get_booking("42?x=1#frag").await.unwrap();
    assert_eq!(booking.booking_id, "42?x=1#frag");
    assert_eq!(*other_hits.lock().unwrap(), 0);

    for id in ["..", ".", ""] {
        assert!(matches!(store.get_booking(id).await, Err(BookingStoreError::InvalidBookingId(_))), "{id:?}");
        assert!(matches!(store.has_documents(id).await, Err(BookingStoreError::InvalidBookingId(_))), "{id:?}");
    }
    assert_eq!(*other_hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_upcoming_bookings_accepts_numeric_ids() {
    let (url, _) = spawn_store().await;
    let bookings = store_for(&url, API_KEY).upcoming_bookings().await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].booking_id, "2");
    assert!(bookings[1].check_in_at().is_some());
}

#[tokio::test]
async fn test_has_documents_results() {
    let (url, _) = spawn_store().await;
    let store = store_for(&url, API_KEY);
    assert!(store.has_documents("1").await.unwrap());
    assert!(!store.has_documents("2").await.unwrap());
    assert!(matches!(store.has_documents("garbled").await, Err(BookingStoreError::Decode(_))));
    assert!(matches!(
        store.has_documents("down").await,
        Err(BookingStoreError::UpstreamStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_presence_fails_open_when_store_unreachable() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(store_for(&format!("http://{}", addr), API_KEY));
    assert!(matches!(store.has_documents("1").await, Err(BookingStoreError::Transport(_))));

    let service = DocumentService::new(store);
    assert!(!service.has_documents_or_false("1").await);
}

fn document(name: &str, media_type: MediaType, content: &'static [u8]) -> UploadedDocument {
    UploadedDocument {
        original_name: name.to_string(),
        content: Bytes::from_static(content),
        media_type,
        traveler_name: "A. Guest".to_string(),
        document_type: DocumentType::IdCard,
        document_number: "ID1".to_string(),
        size: content.len(),
    }
}

#[tokio::test]
async fn test_upload_documents_form_layout() {
    let (url, received) = spawn_store().await;
    let documents = vec![
        document("front.jpg", MediaType::Jpeg, b"jpeg-bytes"),
        document("scan.pdf", MediaType::Pdf, b"%PDF-1.4"),
    ];
    store_for(&url, API_KEY).upload_documents("1234567", &documents).await.unwrap();

    let fields = received.lock().unwrap().clone();
    let names: Vec<&str> = fields.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, vec!["bookingId", "file_0", "file_info_file_0", "file_1", "file_info_file_1"]);
    assert_eq!(fields[0].2, "1234567");
    assert_eq!(fields[1].1.as_deref(), Some("front.jpg"));
    assert_eq!(fields[1].2, "10");

    let info: serde_json::Value = serde_json::from_str(&fields[2].2).unwrap();
    assert_eq!(info["travelerName"], "A. Guest");
    assert_eq!(info["documentType"], "id_card");
    assert_eq!(info["documentNumber"], "ID1");
}

#[tokio::test]
async fn test_upload_documents_explicit_refusal() {
    let (url, _) = spawn_store().await;
    let documents = vec![document("front.jpg", MediaType::Jpeg, b"jpeg-bytes")];
    let err = store_for(&url, API_KEY).upload_documents("refused", &documents).await.unwrap_err();
    match err {
        BookingStoreError::Rejected(message) => assert_eq!(message, "Booking is closed"),
        other => panic!("unexpected error: {:?}", other),
    }
}
