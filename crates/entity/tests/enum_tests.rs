//! Tests for entity enum serialization and database value mapping.

use entity::pull_requests::PrStatus;
use sea_orm::ActiveEnum;

#[test]
fn test_pr_status_db_values() {
    assert_eq!(PrStatus::Open.to_value(), "OPEN");
    assert_eq!(PrStatus::Merged.to_value(), "MERGED");
}

#[test]
fn test_pr_status_serde() {
    assert_eq!(serde_json::to_string(&PrStatus::Open).unwrap(), "\"OPEN\"");
    assert_eq!(
        serde_json::to_string(&PrStatus::Merged).unwrap(),
        "\"MERGED\""
    );

    let open: PrStatus = serde_json::from_str("\"OPEN\"").unwrap();
    assert_eq!(open, PrStatus::Open);
}

#[test]
fn test_pr_status_try_from_db_value() {
    assert_eq!(
        PrStatus::try_from_value(&"MERGED".to_string()).unwrap(),
        PrStatus::Merged
    );
    assert!(PrStatus::try_from_value(&"CLOSED".to_string()).is_err());
}
