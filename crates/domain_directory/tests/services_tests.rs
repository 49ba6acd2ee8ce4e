//! Directory Service Tests
//!
//! Exercises `DirectoryService` against the in-memory store.
//!
//! # Test Organization
//!
//! - `fetch_by_code` - headquarters with branches, branches, missing codes
//! - `fetch_by_country` - country listings and empty countries
//! - `create` - validation, duplicates, missing headquarters, storage failures
//! - `delete` - removal and non-cascading behavior
//! - `sessions` - session accounting across operations

use std::sync::Arc;

use domain_directory::{
    BankRecord, DirectoryConfig, DirectoryError, DirectoryService, FailureMode, MockBankStore,
    NewBankRecord,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn new_record(code: &str, country: &str) -> NewBankRecord {
    NewBankRecord {
        swift_code: code.to_string(),
        bank_name: "Test Bank".to_string(),
        address: "Main Street 1".to_string(),
        country_iso2: country.to_string(),
        country_name: country_name(country).to_string(),
        is_headquarter: None,
    }
}

fn country_name(iso2: &str) -> &'static str {
    match iso2 {
        "PL" => "Poland",
        "DE" => "Germany",
        _ => "Somewhere",
    }
}

fn record(code: &str, country: &str) -> BankRecord {
    BankRecord::create(new_record(code, country)).unwrap()
}

async fn seeded_store() -> MockBankStore {
    MockBankStore::with_records(vec![
        record("CITIPLPPXXX", "PL"),
        record("CITIPLPP123", "PL"),
        record("CITIPLPPABC", "PL"),
        record("BPKOPLPWXXX", "PL"),
        record("DEUTDEFFXXX", "DE"),
    ])
    .await
}

fn service(store: &MockBankStore) -> DirectoryService {
    DirectoryService::new(Arc::new(store.clone()), DirectoryConfig::default())
}

// ============================================================================
// FETCH BY CODE
// ============================================================================

mod fetch_by_code {
    use super::*;

    #[tokio::test]
    async fn test_headquarter_includes_branches() {
        let store = seeded_store().await;
        let lookup = service(&store).fetch_by_code("CITIPLPPXXX").await.unwrap();

        assert!(lookup.record.is_headquarter());
        let branches: Vec<&str> = lookup
            .branches
            .as_ref()
            .unwrap()
            .iter()
            .map(|b| b.swift_code().as_str())
            .collect();
        assert_eq!(branches, vec!["CITIPLPP123", "CITIPLPPABC"]);
    }

    #[tokio::test]
    async fn test_headquarter_without_branches_has_empty_list() {
        let store = seeded_store().await;
        let lookup = service(&store).fetch_by_code("BPKOPLPWXXX").await.unwrap();

        assert_eq!(lookup.branches, Some(vec![]));
    }

    #[tokio::test]
    async fn test_branch_has_no_branch_list() {
        let store = seeded_store().await;
        let lookup = service(&store).fetch_by_code("CITIPLPP123").await.unwrap();

        assert!(!lookup.record.is_headquarter());
        assert!(lookup.branches.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_and_padding_insensitive() {
        let store = seeded_store().await;
        let lookup = service(&store).fetch_by_code("  citiplpp123 ").await.unwrap();

        assert_eq!(lookup.record.swift_code().as_str(), "CITIPLPP123");
    }

    #[tokio::test]
    async fn test_missing_code_is_not_found() {
        let store = seeded_store().await;
        let error = service(&store).fetch_by_code("ABCDEFGHXXX").await.unwrap_err();

        assert!(matches!(error, DirectoryError::NotFound(_)));
        assert_eq!(error.to_string(), "SWIFT code ABCDEFGHXXX not found");
    }

    #[tokio::test]
    async fn test_malformed_code_never_opens_session() {
        let store = seeded_store().await;
        let error = service(&store).fetch_by_code("TESTHQXXX").await.unwrap_err();

        assert!(matches!(error, DirectoryError::InvalidFormat(_)));
        assert_eq!(store.sessions_opened(), 0);
    }
}

// ============================================================================
// FETCH BY COUNTRY
// ============================================================================

mod fetch_by_country {
    use super::*;

    #[tokio::test]
    async fn test_lists_every_record_of_country() {
        let store = seeded_store().await;
        let lookup = service(&store).fetch_by_country("pl").await.unwrap();

        assert_eq!(lookup.country_iso2.as_str(), "PL");
        assert_eq!(lookup.country_name, "POLAND");
        assert_eq!(lookup.records.len(), 4);
        assert!(lookup.records.iter().all(|r| r.country_iso2().as_str() == "PL"));
    }

    #[tokio::test]
    async fn test_country_without_records_is_not_found() {
        let store = seeded_store().await;
        let error = service(&store).fetch_by_country("FR").await.unwrap_err();

        assert_eq!(error.to_string(), "No SWIFT codes found for country FR");
    }

    #[tokio::test]
    async fn test_malformed_country_is_rejected() {
        let store = seeded_store().await;

        let error = service(&store).fetch_by_country("POL").await.unwrap_err();
        assert_eq!(error.to_string(), "Country code must be exactly 2 characters long");

        let error = service(&store).fetch_by_country("P1").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Country code must contain only alphabetic characters"
        );
        assert_eq!(store.sessions_opened(), 0);
    }
}

// ============================================================================
// CREATE
// ============================================================================

mod create {
    use super::*;

    #[tokio::test]
    async fn test_headquarter_then_branch_round_trip() {
        let store = MockBankStore::new();
        let service = service(&store);

        let confirmation = service.create(new_record("citiplppxxx", "PL")).await.unwrap();
        assert_eq!(confirmation.message, "SWIFT code CITIPLPPXXX added successfully");

        service.create(new_record("CITIPLPP123", "PL")).await.unwrap();

        let lookup = service.fetch_by_code("CITIPLPPXXX").await.unwrap();
        assert_eq!(lookup.record.bank_name(), "TEST BANK");
        assert_eq!(lookup.branches.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_branch_without_headquarter_is_rejected() {
        let store = MockBankStore::new();
        let error = service(&store)
            .create(new_record("CITIPLPP123", "PL"))
            .await
            .unwrap_err();

        match &error {
            DirectoryError::MissingHeadquarter { branch, headquarter } => {
                assert_eq!(branch.as_str(), "CITIPLPP123");
                assert_eq!(headquarter.as_str(), "CITIPLPPXXX");
            }
            other => panic!("Expected MissingHeadquarter, got {:?}", other),
        }
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_branch_allowed_when_headquarter_not_required() {
        let store = MockBankStore::new();
        let service = DirectoryService::new(
            Arc::new(store.clone()),
            DirectoryConfig {
                require_headquarter_for_branches: false,
            },
        );

        service.create(new_record("CITIPLPP123", "PL")).await.unwrap();
        assert!(store.contains("CITIPLPP123").await);
    }

    #[tokio::test]
    async fn test_duplicate_code_already_exists() {
        let store = seeded_store().await;
        let error = service(&store)
            .create(new_record("citiplppxxx", "PL"))
            .await
            .unwrap_err();

        assert!(matches!(error, DirectoryError::AlreadyExists(_)));
        assert_eq!(error.to_string(), "SWIFT code CITIPLPPXXX already exists");
    }

    #[tokio::test]
    async fn test_headquarter_flag_mismatch() {
        let store = MockBankStore::new();
        let mut input = new_record("CITIPLPPXXX", "PL");
        input.is_headquarter = Some(false);

        let error = service(&store).create(input).await.unwrap_err();
        assert!(matches!(error, DirectoryError::HeadquarterMismatch { .. }));
        assert_eq!(store.sessions_opened(), 0);
    }

    #[tokio::test]
    async fn test_blank_bank_name_rejected() {
        let store = MockBankStore::new();
        let mut input = new_record("CITIPLPPXXX", "PL");
        input.bank_name = "   ".to_string();

        let error = service(&store).create(input).await.unwrap_err();
        assert_eq!(error.to_string(), "Bank name cannot be empty");
    }

    #[tokio::test]
    async fn test_insert_failure_rolls_back() {
        let store = MockBankStore::new();
        let failing = store.failing(FailureMode::OnWrite);

        let error = service(&failing)
            .create(new_record("CITIPLPPXXX", "PL"))
            .await
            .unwrap_err();

        assert!(matches!(error, DirectoryError::StorageFailure(_)));
        assert!(!error.is_client_error());
        assert_eq!(store.rollbacks(), 1);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_failure_stores_nothing() {
        let store = MockBankStore::new();
        let failing = store.failing(FailureMode::OnCommit);

        let error = service(&failing)
            .create(new_record("CITIPLPPXXX", "PL"))
            .await
            .unwrap_err();

        assert!(matches!(error, DirectoryError::StorageFailure(_)));
        assert_eq!(store.commits(), 0);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_is_storage_failure() {
        let store = MockBankStore::new().failing(FailureMode::Unavailable);
        let error = service(&store)
            .create(new_record("CITIPLPPXXX", "PL"))
            .await
            .unwrap_err();

        assert!(matches!(error, DirectoryError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_one_wins() {
        let store = MockBankStore::new();
        let service = service(&store);

        let (first, second) = tokio::join!(
            service.create(new_record("CITIPLPPXXX", "PL")),
            service.create(new_record("CITIPLPPXXX", "PL")),
        );

        let outcomes = [first, second];
        let created = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!(outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, DirectoryError::AlreadyExists(_))));
        assert_eq!(store.records().await.len(), 1);
    }
}

// ============================================================================
// DELETE
// ============================================================================

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = seeded_store().await;
        let service = service(&store);

        let confirmation = service.delete("CITIPLPPABC").await.unwrap();
        assert_eq!(confirmation.message, "SWIFT code CITIPLPPABC deleted successfully");
        assert!(!store.contains("CITIPLPPABC").await);

        let error = service.fetch_by_code("CITIPLPPABC").await.unwrap_err();
        assert!(matches!(error, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deleting_headquarter_keeps_branches() {
        let store = seeded_store().await;
        service(&store).delete("CITIPLPPXXX").await.unwrap();

        assert!(store.contains("CITIPLPP123").await);
        assert!(store.contains("CITIPLPPABC").await);
    }

    #[tokio::test]
    async fn test_delete_missing_code() {
        let store = seeded_store().await;
        let error = service(&store).delete("ABCDEFGHXXX").await.unwrap_err();

        assert_eq!(error.to_string(), "SWIFT code ABCDEFGHXXX not found");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record() {
        let store = seeded_store().await;
        let failing = store.failing(FailureMode::OnWrite);

        let error = service(&failing).delete("CITIPLPP123").await.unwrap_err();
        assert!(matches!(error, DirectoryError::StorageFailure(_)));
        assert!(store.contains("CITIPLPP123").await);
        assert_eq!(store.rollbacks(), 1);
    }

    #[tokio::test]
    async fn test_delete_of_concurrently_removed_code_is_not_found() {
        let store = seeded_store().await;
        let racing = store.failing(FailureMode::DeletedConcurrently);

        let error = service(&racing).delete("CITIPLPPXXX").await.unwrap_err();
        assert!(matches!(error, DirectoryError::NotFound(_)));
        assert_eq!(error.to_string(), "SWIFT code CITIPLPPXXX not found");
        assert_eq!(store.rollbacks(), 1);
    }
}

// ============================================================================
// SESSION ACCOUNTING
// ============================================================================

mod sessions {
    use super::*;

    #[tokio::test]
    async fn test_each_operation_uses_one_session() {
        let store = seeded_store().await;
        let service = service(&store);

        service.fetch_by_code("CITIPLPPXXX").await.unwrap();
        service.fetch_by_country("DE").await.unwrap();
        service.create(new_record("CITIPLPP999", "PL")).await.unwrap();
        service.delete("CITIPLPP999").await.unwrap();

        assert_eq!(store.sessions_opened(), 4);
        assert_eq!(store.commits(), 4);
        assert_eq!(store.rollbacks(), 0);
    }

    #[tokio::test]
    async fn test_health_reflects_store() {
        let store = MockBankStore::new();
        assert!(service(&store).health().await.is_operational());

        let unavailable = store.failing(FailureMode::Unavailable);
        assert!(!service(&unavailable).health().await.is_operational());
    }
}
