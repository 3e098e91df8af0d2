//! Integration tests for the database layer.

use relay_core::{Database, DependencyKind, RelayError};
use tempfile::TempDir;

/// Helper function to create a temporary database
fn create_test_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).expect("Failed to create database");
    (temp_dir, db)
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    {
        let mut db = Database::new(&db_path).expect("Failed to create database");
        db.create_circuit("FIRST", "First circuit", None)
            .expect("Failed to create circuit");
    }

    // Re-opening runs the schema and migrations again without damage
    let db = Database::new(&db_path).expect("Failed to reopen database");
    let circuits = db.list_circuits(false).expect("Failed to list circuits");
    assert_eq!(circuits.len(), 1);
    assert_eq!(circuits[0].key, "FIRST");
}

#[test]
fn test_duplicate_circuit_key_rejected() {
    let (_temp_dir, mut db) = create_test_database();

    db.create_circuit("DUP", "Original", None)
        .expect("Failed to create circuit");
    let result = db.create_circuit("DUP", "Copy", None);

    assert!(matches!(result, Err(RelayError::Database { .. })));
}

#[test]
fn test_dependency_counts() {
    let (_temp_dir, mut db) = create_test_database();

    let circuit = db
        .create_circuit("COUNTS", "Counted circuit", None)
        .expect("Failed to create circuit");
    let step = db
        .add_step(circuit.id, "REVIEW", Some("reviewer"), false)
        .expect("Failed to add step");
    db.add_transition(circuit.id, "draft", "review")
        .expect("Failed to add transition");
    db.add_transition(circuit.id, "review", "done")
        .expect("Failed to add transition");
    let document = db
        .assign_document(circuit.id, "DOC-1")
        .expect("Failed to assign document");
    db.open_approval(circuit.id, Some(step.id), "DOC-1")
        .expect("Failed to open approval");

    assert_eq!(db.count_steps(circuit.id).unwrap(), 1);
    assert_eq!(db.count_transitions(circuit.id).unwrap(), 2);
    assert_eq!(db.count_live_documents(circuit.id).unwrap(), 1);
    assert_eq!(db.count_pending_approvals(circuit.id).unwrap(), 1);

    // Completed documents and resolved approvals stop counting
    db.complete_document(document.id)
        .expect("Failed to complete document");
    assert_eq!(db.count_live_documents(circuit.id).unwrap(), 0);

    let samples = db
        .sample_dependency_details(DependencyKind::Transitions, circuit.id, 5)
        .expect("Failed to sample details");
    assert_eq!(samples, vec!["draft -> review", "review -> done"]);
}

#[test]
fn test_plain_delete_fails_while_dependents_exist() {
    let (_temp_dir, mut db) = create_test_database();

    let circuit = db
        .create_circuit("GUARDED", "Guarded circuit", None)
        .expect("Failed to create circuit");
    db.add_step(circuit.id, "ONLY", None, true)
        .expect("Failed to add step");

    // The steps table still references the circuit; the store's foreign
    // keys reject the plain delete.
    let result = db.delete_circuit(circuit.id);
    assert!(matches!(result, Err(RelayError::Database { .. })));
    assert!(db.circuit_exists(circuit.id).unwrap());

    // Cascade removes dependents first and succeeds.
    db.cascade_delete_circuit(circuit.id)
        .expect("Failed to cascade delete");
    assert!(!db.circuit_exists(circuit.id).unwrap());
}

#[test]
fn test_cascade_removes_dependents_but_not_documents() {
    let (_temp_dir, mut db) = create_test_database();

    let circuit = db
        .create_circuit("CASCADE", "Cascade circuit", None)
        .expect("Failed to create circuit");
    let step = db
        .add_step(circuit.id, "REVIEW", None, false)
        .expect("Failed to add step");
    db.add_transition(circuit.id, "draft", "review")
        .expect("Failed to add transition");
    db.assign_document(circuit.id, "DOC-1")
        .expect("Failed to assign document");
    db.open_approval(circuit.id, Some(step.id), "DOC-1")
        .expect("Failed to open approval");

    db.cascade_delete_circuit(circuit.id)
        .expect("Failed to cascade delete");

    assert!(!db.circuit_exists(circuit.id).unwrap());
    assert_eq!(db.count_steps(circuit.id).unwrap(), 0);
    assert_eq!(db.count_transitions(circuit.id).unwrap(), 0);
    assert_eq!(db.count_pending_approvals(circuit.id).unwrap(), 0);
    // Document assignments are owned by the editing workflow and are left
    // orphaned, not deleted.
    assert_eq!(db.count_live_documents(circuit.id).unwrap(), 1);
}

#[test]
fn test_cascade_delete_unknown_circuit() {
    let (_temp_dir, mut db) = create_test_database();

    let result = db.cascade_delete_circuit(404);
    assert!(matches!(
        result,
        Err(RelayError::CircuitNotFound { id: 404 })
    ));
}

#[test]
fn test_approval_must_match_circuit() {
    let (_temp_dir, mut db) = create_test_database();

    let first = db
        .create_circuit("FIRST", "First circuit", None)
        .expect("Failed to create circuit");
    let second = db
        .create_circuit("SECOND", "Second circuit", None)
        .expect("Failed to create circuit");
    let step = db
        .add_step(first.id, "REVIEW", None, false)
        .expect("Failed to add step");

    let result = db.open_approval(second.id, Some(step.id), "DOC-1");
    assert!(matches!(result, Err(RelayError::InvalidInput { .. })));
}

#[test]
fn test_resolve_approval_is_single_shot() {
    let (_temp_dir, mut db) = create_test_database();

    let circuit = db
        .create_circuit("ONCE", "Single-shot circuit", None)
        .expect("Failed to create circuit");
    let approval = db
        .open_approval(circuit.id, None, "DOC-1")
        .expect("Failed to open approval");

    assert!(db.resolve_approval(approval.id).unwrap());
    assert!(!db.resolve_approval(approval.id).unwrap());
    assert!(!db.resolve_approval(999).unwrap());
}

#[test]
fn test_step_orders_are_unique_per_circuit() {
    let (_temp_dir, mut db) = create_test_database();

    let a = db
        .create_circuit("A", "Circuit A", None)
        .expect("Failed to create circuit");
    let b = db
        .create_circuit("B", "Circuit B", None)
        .expect("Failed to create circuit");

    let a1 = db.add_step(a.id, "ONE", None, false).unwrap();
    let a2 = db.add_step(a.id, "TWO", None, false).unwrap();
    let b1 = db.add_step(b.id, "ONE", None, false).unwrap();

    assert_eq!(a1.order, 0);
    assert_eq!(a2.order, 1);
    // Orders restart per circuit
    assert_eq!(b1.order, 0);
}
