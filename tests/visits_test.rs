//! Visit listing redaction against mocked remote services

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use noteguard::adapters::presidio::{AnonymizationClient, EntityAnalysisClient};
use noteguard::config::{AnalyzerConfig, AnonymizerConfig};
use noteguard::domain::{VisitNote, REDACTION_FAILED_NOTE};
use noteguard::redaction::{LocalRedactor, RedactionOrchestrator, VisitRedactor};
use serde_json::json;
use std::sync::Arc;

fn visit(visit_id: i64, month: u32, note: &str) -> VisitNote {
    VisitNote::new(
        42,
        visit_id,
        note,
        Utc.with_ymd_and_hms(2024, month, 1, 10, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_failed_note_never_leaks() {
    let mut analyzer = Server::new_async().await;
    let anonymizer = Server::new_async().await;

    let _fails = analyzer
        .mock("POST", "/analyze")
        .match_body(Matcher::PartialJson(json!({ "text": "Discussed results with Robin" })))
        .with_status(503)
        .with_body("analyzer overloaded")
        .create_async()
        .await;
    let _clean = analyzer
        .mock("POST", "/analyze")
        .match_body(Matcher::PartialJson(json!({ "text": "Routine follow-up" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let orchestrator = RedactionOrchestrator::new(
        LocalRedactor::builtin().unwrap(),
        Arc::new(
            EntityAnalysisClient::new(&AnalyzerConfig {
                base_url: analyzer.url(),
                ..Default::default()
            })
            .unwrap(),
        ),
        Arc::new(
            AnonymizationClient::new(&AnonymizerConfig {
                base_url: anonymizer.url(),
                ..Default::default()
            })
            .unwrap(),
        ),
    );
    let redactor = VisitRedactor::new(orchestrator, 2);

    let (visits, summary) = redactor
        .redact_visits_with_summary(vec![
            visit(2, 6, "Discussed results with Robin"),
            visit(1, 2, "Routine follow-up"),
        ])
        .await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 1);

    assert_eq!(visits[0].visit_id, 1);
    assert_eq!(visits[0].doctors_note, "Routine follow-up");
    assert!(visits[0].phi_redacted);

    assert_eq!(visits[1].visit_id, 2);
    assert_eq!(visits[1].doctors_note, REDACTION_FAILED_NOTE);
    assert!(!visits[1].phi_redacted);
}

#[tokio::test]
async fn test_redacted_visit_json_shape() {
    let redactor = VisitRedactor::new(
        RedactionOrchestrator::from_config(&noteguard::config::NoteGuardConfig::default())
            .unwrap()
            .with_local_only(true),
        1,
    );

    let visits = redactor
        .redact_visits(vec![visit(9, 3, "SSN 123-45-6789")])
        .await;
    let value = serde_json::to_value(&visits[0]).unwrap();

    assert_eq!(value["patientID"], 42);
    assert_eq!(value["visitID"], 9);
    assert_eq!(value["doctorsNote"], "[SSN REDACTED]");
    assert_eq!(value["phiRedacted"], false);
    assert!(value.get("visitDate").is_some());
}

#[tokio::test]
async fn test_null_note_short_circuits_alongside_normal_note() {
    let listing = r#"[
        {"patient_id": 42, "visit_id": 1, "doctors_note": "Routine follow-up", "visit_date": "2024-01-01T10:00:00Z"},
        {"patient_id": 42, "visit_id": 2, "doctors_note": null, "visit_date": "2024-02-01T10:00:00Z"}
    ]"#;
    let visits: Vec<VisitNote> = serde_json::from_str(listing).unwrap();

    let mut analyzer = Server::new_async().await;
    let mut anonymizer = Server::new_async().await;
    let _clean = analyzer
        .mock("POST", "/analyze")
        .match_body(Matcher::PartialJson(json!({ "text": "Routine follow-up" })))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let empty = analyzer
        .mock("POST", "/analyze")
        .match_body(Matcher::PartialJson(json!({ "text": "" })))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let never = anonymizer
        .mock("POST", "/anonymize")
        .expect(0)
        .create_async()
        .await;

    let orchestrator = RedactionOrchestrator::new(
        LocalRedactor::builtin().unwrap(),
        Arc::new(
            EntityAnalysisClient::new(&AnalyzerConfig {
                base_url: analyzer.url(),
                ..Default::default()
            })
            .unwrap(),
        ),
        Arc::new(
            AnonymizationClient::new(&AnonymizerConfig {
                base_url: anonymizer.url(),
                ..Default::default()
            })
            .unwrap(),
        ),
    );

    let (redacted, summary) = VisitRedactor::new(orchestrator, 1)
        .redact_visits_with_summary(visits)
        .await;

    empty.assert_async().await;
    never.assert_async().await;
    assert_eq!(summary.failed, 0);
    assert_eq!(redacted[0].doctors_note, "Routine follow-up");
    assert_eq!(redacted[1].visit_id, 2);
    assert_eq!(redacted[1].doctors_note, "");
    assert!(redacted[1].phi_redacted);
}
