//! Integration tests for the extraction pipeline.
//!
//! These tests verify the complete flow of:
//! - Entity recognition with confidence scoring and overlap resolution
//! - Dosage span extraction alongside configured entity types
//! - Event trigger scanning and attribute binding
//! - Statistics aggregation and timeline assembly

use gleanrs_engine::stats;
use gleanrs_engine::{Annotator, EngineConfig};
use gleanrs_rules::RuleCatalog;

const CLINICAL_NOTE: &str = "Patient John Doe was admitted to City General Hospital on \
March 15, 2024, with complaints of chest pain and shortness of breath. The patient has \
a history of hypertension and type 2 diabetes. Dr. Smith prescribed aspirin 81mg daily \
and metoprolol 50mg twice daily. The patient underwent cardiac catheterization on March \
16, 2024, and was discharged home on March 18, 2024, with follow-up scheduled in two weeks.";

/// Test the canonical prescription sentence end to end.
#[test]
fn test_prescription_sentence() {
    let annotator = Annotator::with_defaults().unwrap();
    let analysis = annotator
        .analyze(
            "Patient John Doe was prescribed aspirin 81mg daily.",
            "healthcare",
            None,
        )
        .unwrap();

    let medication = analysis
        .entities
        .iter()
        .find(|e| e.entity_type == "MEDICATION")
        .unwrap();
    assert_eq!(medication.text, "aspirin");

    let dosage = analysis
        .entities
        .iter()
        .find(|e| e.entity_type == "DOSAGE")
        .unwrap();
    assert_eq!(dosage.text, "81mg");
    assert!((dosage.confidence - 1.0).abs() < f64::EPSILON);

    assert_eq!(analysis.events.len(), 1);
    let event = &analysis.events[0];
    assert_eq!(event.event_type, "prescription");
    assert_eq!(event.trigger, "prescribed");
    assert_eq!(
        event.attributes.get("medication"),
        Some(&vec!["aspirin".to_string()])
    );
    assert_eq!(
        event.attributes.get("dosage"),
        Some(&vec!["81mg".to_string()])
    );
}

/// Test structural invariants over a realistic clinical note.
#[test]
fn test_clinical_note_invariants() {
    let annotator = Annotator::with_defaults().unwrap();
    let analysis = annotator.analyze(CLINICAL_NOTE, "healthcare", None).unwrap();

    // Spans are sorted and never overlap.
    for pair in analysis.entities.windows(2) {
        assert!(pair[0].start <= pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }

    // Confidence stays in range, rounded to two decimals.
    for entity in &analysis.entities {
        assert!((0.0..=1.0).contains(&entity.confidence));
        let scaled = entity.confidence * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    let entity_types: Vec<&str> = analysis
        .entities
        .iter()
        .map(|e| e.entity_type.as_str())
        .collect();
    for expected in ["PATIENT", "MEDICATION", "DISEASE", "SYMPTOM", "TREATMENT", "DOSAGE"] {
        assert!(entity_types.contains(&expected), "missing {expected}");
    }

    let event_types: Vec<&str> = analysis
        .events
        .iter()
        .map(|e| e.event_type.as_str())
        .collect();
    assert_eq!(analysis.events.len(), 5);
    for expected in ["admission", "prescription", "procedure", "discharge", "follow_up"] {
        assert!(event_types.contains(&expected), "missing {expected}");
    }

    assert_eq!(analysis.statistics.total_entities, analysis.entities.len());
    assert_eq!(analysis.statistics.total_events, analysis.events.len());

    // Per-type counts partition the totals.
    let entity_count_sum: usize = analysis.statistics.entities.values().map(|s| s.count).sum();
    let event_count_sum: usize = analysis.statistics.events.values().map(|s| s.count).sum();
    assert_eq!(entity_count_sum, analysis.statistics.total_entities);
    assert_eq!(event_count_sum, analysis.statistics.total_events);
}

/// Test that the longest candidate wins when patterns nest.
#[test]
fn test_nested_patterns_resolve_to_longest() {
    let annotator = Annotator::with_defaults().unwrap();
    let analysis = annotator
        .analyze(
            "History of type 2 diabetes mellitus, treated with cardiac catheterization.",
            "healthcare",
            None,
        )
        .unwrap();

    let texts: Vec<&str> = analysis.entities.iter().map(|e| e.text.as_str()).collect();
    assert!(texts.contains(&"type 2 diabetes mellitus"));
    assert!(!texts.contains(&"diabetes"));
    assert!(texts.contains(&"cardiac catheterization"));
    assert!(!texts.contains(&"catheterization"));
}

/// Test finance extraction and acquisition attribute binding.
#[test]
fn test_finance_acquisition() {
    let annotator = Annotator::with_defaults().unwrap();
    let analysis = annotator
        .analyze(
            "Acme Corp acquired Beta Industries Ltd for 3.5 billion dollars on January 15, 2024.",
            "finance",
            None,
        )
        .unwrap();

    let companies: Vec<&str> = analysis
        .entities
        .iter()
        .filter(|e| e.entity_type == "COMPANY")
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(companies, vec!["Acme Corp", "Industries Ltd"]);

    let amount = analysis
        .entities
        .iter()
        .find(|e| e.entity_type == "AMOUNT")
        .unwrap();
    assert_eq!(amount.text, "3.5 billion dollars");

    assert_eq!(analysis.events.len(), 1);
    let event = &analysis.events[0];
    assert_eq!(event.event_type, "acquisition");
    assert_eq!(
        event.attributes.get("amount"),
        Some(&vec!["3.5 billion dollars".to_string()])
    );
    assert_eq!(
        event.attributes.get("date"),
        Some(&vec!["January 15, 2024".to_string()])
    );
}

/// Test that type selection narrows entity output but keeps dosages.
#[test]
fn test_type_selection() {
    let annotator = Annotator::with_defaults().unwrap();
    let analysis = annotator
        .analyze(
            "Patient prescribed aspirin 81mg daily for hypertension.",
            "healthcare",
            Some(&["MEDICATION".to_string()]),
        )
        .unwrap();

    assert!(
        analysis
            .entities
            .iter()
            .all(|e| e.entity_type == "MEDICATION" || e.entity_type == "DOSAGE")
    );
    assert!(analysis.entities.iter().any(|e| e.text == "aspirin"));
    assert!(analysis.entities.iter().any(|e| e.text == "81mg"));
}

/// Test timeline assembly from dated events.
#[test]
fn test_timeline_orders_dated_events() {
    let annotator = Annotator::with_defaults().unwrap();
    let padding = "x".repeat(160);
    let text =
        format!("Admitted to Mercy Hospital on 03/03/2024. {padding} Discharged home on 03/10/2024.");
    let analysis = annotator.analyze(&text, "healthcare", None).unwrap();

    let timeline = stats::timeline(&analysis.events);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].event_type, "admission");
    assert_eq!(timeline[0].dates, vec!["03/03/2024".to_string()]);
    assert_eq!(timeline[1].event_type, "discharge");
    assert_eq!(timeline[1].dates, vec!["03/10/2024".to_string()]);
}

/// Test running the pipeline over a caller-supplied catalog.
#[test]
fn test_custom_catalog() {
    let rules = r#"{
        "support_entities": {
            "PRODUCT": {
                "patterns": ["router", "modem"],
                "context_words": ["rebooted", "firmware"]
            }
        },
        "support_events": {
            "escalation": {
                "triggers": ["escalated"],
                "attributes": ["product", "date"]
            }
        }
    }"#;
    let catalog = RuleCatalog::from_json(rules).unwrap();
    let annotator = Annotator::new(catalog, EngineConfig::default());

    let analysis = annotator
        .analyze(
            "Customer rebooted the router, case escalated yesterday.",
            "support",
            None,
        )
        .unwrap();

    let product = analysis
        .entities
        .iter()
        .find(|e| e.entity_type == "PRODUCT")
        .unwrap();
    assert_eq!(product.text, "router");
    assert!((product.confidence - 0.7).abs() < f64::EPSILON);

    assert_eq!(analysis.events.len(), 1);
    assert_eq!(
        analysis.events[0].attributes.get("product"),
        Some(&vec!["router".to_string()])
    );
    assert_eq!(
        analysis.events[0].attributes.get("date"),
        Some(&vec!["yesterday".to_string()])
    );
}

/// Test that entity extraction alone skips confidence filtering.
#[test]
fn test_extract_entities_is_unfiltered() {
    let catalog = RuleCatalog::builtin().unwrap();
    let annotator = Annotator::new(
        catalog,
        EngineConfig {
            min_confidence: 0.95,
            ..EngineConfig::default()
        },
    );

    let raw = annotator
        .extract_entities("aspirin was mentioned", "healthcare", None)
        .unwrap();
    assert_eq!(raw.len(), 1);

    let analysis = annotator
        .analyze("aspirin was mentioned", "healthcare", None)
        .unwrap();
    assert!(analysis.entities.is_empty());
    assert_eq!(analysis.statistics.total_entities, 0);
}
