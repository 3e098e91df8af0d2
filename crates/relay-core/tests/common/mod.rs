use relay_core::RelayBuilder;
use tempfile::TempDir;

/// Helper function to create a test engine with temp database and backup dir
pub async fn create_test_relay() -> (TempDir, relay_core::Relay) {
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
