use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::router::submit_handler;
use super::*;
use crate::catalog::PropertyId;

#[derive(Default)]
struct MemoryRelay {
    published: Mutex<Vec<LeadRecord>>,
}

impl MemoryRelay {
    fn published(&self) -> Vec<LeadRecord> {
        self.published.lock().expect("relay mutex poisoned").clone()
    }
}

impl LeadRelay for MemoryRelay {
    fn publish(&self, lead: &LeadRecord) -> Result<(), RelayError> {
        self.published
            .lock()
            .expect("relay mutex poisoned")
            .push(lead.clone());
        Ok(())
    }
}

struct DownRelay;

impl LeadRelay for DownRelay {
    fn publish(&self, _lead: &LeadRecord) -> Result<(), RelayError> {
        Err(RelayError::Transport("timeout".to_string()))
    }
}

fn contact_submission() -> LeadSubmission {
    LeadSubmission {
        name: "Claire Martin".to_string(),
        email: "claire@example.fr".to_string(),
        phone: Some("  ".to_string()),
        request: LeadRequest::Contact {
            message: "Je souhaite visiter la maison de Boulange.".to_string(),
            property_id: Some(PropertyId("1".to_string())),
        },
    }
}

#[test]
fn submit_stamps_and_relays_valid_leads() {
    let relay = Arc::new(MemoryRelay::default());
    let service = LeadService::new(relay.clone());

    let record = service.submit(contact_submission()).expect("lead accepted");

    assert!(record.lead_id.0.starts_with("lead-"));
    assert_eq!(record.kind, LeadKind::Contact);
    let published = relay.published();
    assert_eq!(published, vec![record.clone()]);

    let fields = record.fields();
    assert_eq!(fields.get("subject").map(String::as_str), Some("New contact message"));
    assert_eq!(fields.get("property_id").map(String::as_str), Some("1"));
    assert!(!fields.contains_key("phone"), "blank phone is omitted");
}

#[test]
fn invalid_leads_never_reach_the_relay() {
    let relay = Arc::new(MemoryRelay::default());
    let service = LeadService::new(relay.clone());
    let submission = LeadSubmission {
        name: " ".to_string(),
        ..contact_submission()
    };

    match service.submit(submission) {
        Err(LeadServiceError::Invalid(LeadError::MissingName)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(relay.published().is_empty());
}

#[test]
fn estimation_fields_carry_surface_with_unit() {
    let relay = Arc::new(MemoryRelay::default());
    let service = LeadService::new(relay);
    let submission = LeadSubmission {
        request: LeadRequest::Estimation {
            property_type: crate::catalog::PropertyType::Land,
            city: "Crusnes".to_string(),
            surface: 640.0,
            rooms: None,
        },
        ..contact_submission()
    };

    let record = service.submit(submission).expect("lead accepted");
    let fields = record.fields();

    assert_eq!(fields.get("subject").map(String::as_str), Some("New estimation request"));
    assert_eq!(fields.get("type").map(String::as_str), Some("Land"));
    assert_eq!(fields.get("surface").map(String::as_str), Some("640 m²"));
    assert!(!fields.contains_key("rooms"));
}

#[tokio::test]
async fn lead_route_accepts_contact_payloads() {
    let router = lead_router(Arc::new(LeadService::new(Arc::new(MemoryRelay::default()))));
    let payload = json!({
        "kind": "contact",
        "name": "Claire Martin",
        "email": "claire@example.fr",
        "message": "Bonjour, je cherche une maison à Boulange.",
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/leads")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collected");
    let body: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
    assert_eq!(body["kind"], json!("contact"));
    assert!(body["lead_id"].as_str().is_some());
}

#[tokio::test]
async fn submit_handler_maps_validation_and_relay_failures() {
    let invalid = submit_handler::<MemoryRelay>(
        State(Arc::new(LeadService::new(Arc::new(MemoryRelay::default())))),
        axum::Json(LeadSubmission {
            email: "claire.example.fr".to_string(),
            ..contact_submission()
        }),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unreachable = submit_handler::<DownRelay>(
        State(Arc::new(LeadService::new(Arc::new(DownRelay)))),
        axum::Json(contact_submission()),
    )
    .await;
    assert_eq!(unreachable.status(), StatusCode::BAD_GATEWAY);
}
