//! Tests for the engine module.

use tempfile::TempDir;

use super::*;
use crate::{
    error::RelayError,
    params::{
        ApprovalCreate, CircuitIds, CreateCircuit, DocumentAssign, Id, ListCircuits, StepCreate,
        TransitionCreate,
    },
};

/// Helper function to create a test engine
async fn create_test_relay() -> (TempDir, Relay) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let backup_dir = temp_dir.path().join("backups");
    let relay = RelayBuilder::new()
        .with_database_path(Some(&db_path))
        .with_backup_dir(Some(&backup_dir))
        .build()
        .await
        .expect("Failed to create relay");
    (temp_dir, relay)
}

async fn create_circuit(relay: &Relay, key: &str, title: &str) -> crate::models::Circuit {
    relay
        .create_circuit(&CreateCircuit {
            key: key.to_string(),
            title: title.to_string(),
            description: None,
        })
        .await
        .expect("Failed to create circuit")
}

#[tokio::test]
async fn test_create_and_show_circuit() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "INVOICES", "Invoice validation").await;
    assert_eq!(circuit.key, "INVOICES");

    let loaded = relay
        .get_circuit(&Id { id: circuit.id })
        .await
        .expect("Failed to get circuit")
        .expect("Circuit should exist");
    assert_eq!(loaded.title, "Invoice validation");
    assert!(loaded.steps.is_empty());
}

#[tokio::test]
async fn test_create_circuit_rejects_empty_key() {
    let (_temp_dir, relay) = create_test_relay().await;

    let result = relay
        .create_circuit(&CreateCircuit {
            key: "  ".to_string(),
            title: "No key".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(result, Err(RelayError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_list_circuits_with_counts() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "EXPENSES", "Expense validation").await;
    relay
        .add_step(&StepCreate {
            circuit_id: circuit.id,
            key: "MANAGER-REVIEW".to_string(),
            role: Some("manager".to_string()),
            is_final: false,
        })
        .await
        .expect("Failed to add step");
    relay
        .assign_document(&DocumentAssign {
            circuit_id: circuit.id,
            reference: "EXP-1".to_string(),
        })
        .await
        .expect("Failed to assign document");

    let summaries = relay
        .list_circuits(&ListCircuits::default())
        .await
        .expect("Failed to list circuits");

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_steps, 1);
    assert_eq!(summaries[0].live_documents, 1);
    assert_eq!(summaries[0].pending_approvals, 0);
}

#[tokio::test]
async fn test_deactivate_and_activate_round_trip() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "ORDERS", "Order routing").await;

    let deactivated = relay
        .deactivate_circuit(&Id { id: circuit.id })
        .await
        .expect("Failed to deactivate")
        .expect("Circuit should exist");
    assert_eq!(deactivated.status, crate::models::CircuitStatus::Inactive);

    // Inactive circuits are hidden from the default listing
    let active = relay
        .list_circuits(&ListCircuits::default())
        .await
        .expect("Failed to list circuits");
    assert!(active.is_empty());

    let all = relay
        .list_circuits(&ListCircuits {
            include_inactive: true,
        })
        .await
        .expect("Failed to list all circuits");
    assert_eq!(all.len(), 1);

    let restored = relay
        .activate_circuit(&Id { id: circuit.id })
        .await
        .expect("Failed to activate")
        .expect("Circuit should exist");
    assert_eq!(restored.status, crate::models::CircuitStatus::Active);
}

#[tokio::test]
async fn test_deactivation_guard_blocks_live_documents() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "CONTRACTS", "Contract review").await;
    let document = relay
        .assign_document(&DocumentAssign {
            circuit_id: circuit.id,
            reference: "CTR-9".to_string(),
        })
        .await
        .expect("Failed to assign document");

    let check = relay
        .can_deactivate(&Id { id: circuit.id })
        .await
        .expect("Failed to run guard");
    assert!(!check.allowed);
    assert_eq!(check.document_count, 1);

    let blocked = relay.deactivate_circuit(&Id { id: circuit.id }).await;
    assert!(matches!(
        blocked,
        Err(RelayError::DeactivationBlocked { documents: 1, .. })
    ));

    // Completing the document lifts the guard
    relay
        .complete_document(&Id { id: document.id })
        .await
        .expect("Failed to complete document");

    let check = relay
        .can_deactivate(&Id { id: circuit.id })
        .await
        .expect("Failed to run guard");
    assert!(check.allowed);
    assert_eq!(check.document_count, 0);

    relay
        .deactivate_circuit(&Id { id: circuit.id })
        .await
        .expect("Failed to deactivate")
        .expect("Circuit should exist");
}

#[tokio::test]
async fn test_can_deactivate_unknown_circuit() {
    let (_temp_dir, relay) = create_test_relay().await;

    let result = relay.can_deactivate(&Id { id: 99 }).await;
    assert!(matches!(result, Err(RelayError::CircuitNotFound { id: 99 })));
}

#[tokio::test]
async fn test_step_removal_compacts_order() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "PURCHASES", "Purchase approval").await;
    let mut steps = Vec::new();
    for key in ["DRAFT", "REVIEW", "SIGNOFF"] {
        steps.push(
            relay
                .add_step(&StepCreate {
                    circuit_id: circuit.id,
                    key: key.to_string(),
                    role: None,
                    is_final: key == "SIGNOFF",
                })
                .await
                .expect("Failed to add step"),
        );
    }

    relay
        .remove_step(&Id { id: steps[1].id })
        .await
        .expect("Failed to remove step");

    let remaining = relay
        .get_steps(&Id { id: circuit.id })
        .await
        .expect("Failed to get steps");
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].key, "DRAFT");
    assert_eq!(remaining[0].order, 0);
    assert_eq!(remaining[1].key, "SIGNOFF");
    assert_eq!(remaining[1].order, 1);
    assert!(remaining[1].is_final);
}

#[tokio::test]
async fn test_transitions_are_loaded_with_circuit() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "LEAVE", "Leave requests").await;
    relay
        .define_transition(&TransitionCreate {
            circuit_id: circuit.id,
            from_status: "submitted".to_string(),
            to_status: "approved".to_string(),
        })
        .await
        .expect("Failed to define transition");

    let loaded = relay
        .get_circuit(&Id { id: circuit.id })
        .await
        .expect("Failed to get circuit")
        .expect("Circuit should exist");
    assert_eq!(loaded.transitions.len(), 1);
    assert_eq!(loaded.transitions[0].from_status, "submitted");
}

#[tokio::test]
async fn test_validate_deletion_reports_blockers() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "BUDGET", "Budget sign-off").await;

    let clean = relay
        .validate_deletion(&CircuitIds {
            ids: vec![circuit.id],
        })
        .await
        .expect("Failed to validate");
    assert!(clean.can_delete);
    assert!(clean.reasons.is_empty());

    let approval = relay
        .open_approval(&ApprovalCreate {
            circuit_id: circuit.id,
            step_id: None,
            document_ref: "BUD-3".to_string(),
        })
        .await
        .expect("Failed to open approval");

    let blocked = relay
        .validate_deletion(&CircuitIds {
            ids: vec![circuit.id],
        })
        .await
        .expect("Failed to validate");
    assert!(!blocked.can_delete);
    assert_eq!(blocked.reasons.len(), 1);
    assert!(blocked.reasons[0].contains("pending approval"));

    // Resolving the approval unblocks deletion
    let resolved = relay
        .resolve_approval(&Id { id: approval.id })
        .await
        .expect("Failed to resolve approval");
    assert!(resolved);

    let unblocked = relay
        .validate_deletion(&CircuitIds {
            ids: vec![circuit.id],
        })
        .await
        .expect("Failed to validate");
    assert!(unblocked.can_delete);
}

#[tokio::test]
async fn test_analyze_dependencies_unknown_id() {
    let (_temp_dir, relay) = create_test_relay().await;

    let result = relay
        .analyze_dependencies(&CircuitIds { ids: vec![42] })
        .await;
    assert!(matches!(result, Err(RelayError::CircuitNotFound { id: 42 })));
}

#[tokio::test]
async fn test_analysis_includes_forceable_and_blocking_records() {
    let (_temp_dir, relay) = create_test_relay().await;

    let circuit = create_circuit(&relay, "HIRING", "Hiring pipeline").await;
    relay
        .add_step(&StepCreate {
            circuit_id: circuit.id,
            key: "SCREENING".to_string(),
            role: None,
            is_final: false,
        })
        .await
        .expect("Failed to add step");
    relay
        .assign_document(&DocumentAssign {
            circuit_id: circuit.id,
            reference: "CAND-7".to_string(),
        })
        .await
        .expect("Failed to assign document");
    relay
        .open_approval(&ApprovalCreate {
            circuit_id: circuit.id,
            step_id: None,
            document_ref: "CAND-7".to_string(),
        })
        .await
        .expect("Failed to open approval");

    let analysis = relay
        .analyze_dependencies(&CircuitIds {
            ids: vec![circuit.id],
        })
        .await
        .expect("Failed to analyze");

    assert_eq!(analysis.dependencies.len(), 3);
    assert!(analysis.has_blocking_dependencies);
    assert!(!analysis.can_delete);
    assert!(analysis
        .suggestions
        .iter()
        .any(|s| s.contains("Deactivate circuit")));

    let blocking: Vec<_> = analysis.blocking().collect();
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].kind, crate::models::DependencyKind::Approvals);
    assert_eq!(blocking[0].details, vec!["CAND-7".to_string()]);
}
