use growloop_backend::application::{check_import, import_recyclers, parse_import_document};
use growloop_backend::error::{AppError, AppResult};
use growloop_backend::infrastructure::repositories::RecyclerRepository;

use crate::common::fixtures::new_recycler;
use crate::common::mocks::MockRecyclerRepo;

#[tokio::test]
async fn imports_valid_records_and_skips_invalid_ones() -> AppResult<()> {
    let repo = MockRecyclerRepo::default();
    let records = vec![
        new_recycler("North Depot", 51.5, -0.12),
        new_recycler("Off the map", 95.0, 0.0),
        new_recycler("South Depot", 51.4, -0.10),
    ];

    let summary = import_recyclers(&repo, records).await?;

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 1);
    let names: Vec<String> = repo.find_all().await?.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["North Depot", "South Depot"]);
    Ok(())
}

#[tokio::test]
async fn dry_run_matches_the_real_import_counts() -> AppResult<()> {
    let records = || {
        vec![
            new_recycler("Depot", 1.0, 1.0),
            new_recycler("Nowhere", 1.0, 181.0),
        ]
    };

    let checked = check_import(records());
    let repo = MockRecyclerRepo::default();
    let imported = import_recyclers(&repo, records()).await?;

    assert_eq!(checked, imported);
    assert_eq!(checked.skipped, 1);
    Ok(())
}

#[tokio::test]
async fn storage_failure_aborts_the_import() {
    let repo = MockRecyclerRepo {
        fail_on_create_named: Some("Broken".to_string()),
        ..MockRecyclerRepo::default()
    };
    let records = vec![
        new_recycler("First", 1.0, 1.0),
        new_recycler("Broken", 1.0, 1.0),
        new_recycler("Never reached", 1.0, 1.0),
    ];

    let error = import_recyclers(&repo, records)
        .await
        .expect_err("repository failure must propagate");

    assert!(matches!(error, AppError::ServiceUnavailable { .. }));
    assert_eq!(repo.recyclers.lock().expect("mutex").len(), 1);
}

#[tokio::test]
async fn legacy_comma_delimited_items_are_split() -> AppResult<()> {
    let records = parse_import_document(
        r#"[{"name":"Legacy","address":"1 Old Rd","latitude":10.5,"longitude":20.5,
            "rating":4.2,"isVerified":true,"acceptedItems":"plastic, glass,,paper "}]"#,
    )?;
    let repo = MockRecyclerRepo::default();

    import_recyclers(&repo, records).await?;

    let stored = repo.find_all().await?;
    assert_eq!(stored[0].accepted_items, vec!["plastic", "glass", "paper"]);
    assert!(stored[0].is_verified);
    Ok(())
}
