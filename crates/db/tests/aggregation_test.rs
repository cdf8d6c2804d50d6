//! Integration tests for the ledger aggregation job.

mod common;

use common::{Fixture, create_scenarios, date, jobs, setup_db};
use fiscora_core::outcome::{AggregationSummary, JobOutcome};
use fiscora_core::record::RecordKey;
use fiscora_db::JobError;
use fiscora_db::repositories::FinancialRecordRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_groups_ledger_into_monthly_actuals() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    fixture
        .post(
            &db,
            actual,
            slice,
            &[
                (date(2024, 10, 5), dec!(100)),
                (date(2024, 10, 20), dec!(50)),
                (date(2024, 11, 1), dec!(30)),
            ],
        )
        .await;

    let outcome = jobs(&db)
        .aggregate_historical_data(2024, Some(date(2024, 11, 30)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        JobOutcome::Completed(AggregationSummary {
            created: 2,
            updated: 0
        })
    );
    assert_eq!(outcome.count(), 2);

    let records = FinancialRecordRepository::list_for_scenario(&db, actual)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].year, records[0].month), (2024, 10));
    assert_eq!(records[0].value, dec!(150));
    assert_eq!((records[1].year, records[1].month), (2024, 11));
    assert_eq!(records[1].value, dec!(30));
    assert!(records.iter().all(|r| !r.is_editable));
}

#[tokio::test]
async fn test_rerun_updates_instead_of_duplicating() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    fixture
        .post(&db, actual, slice, &[(date(2024, 10, 5), dec!(100))])
        .await;
    let jobs = jobs(&db);

    let first = jobs
        .aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();
    let second = jobs
        .aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();

    assert_eq!(first.completed().map(|s| s.created), Some(1));
    assert_eq!(
        second,
        JobOutcome::Completed(AggregationSummary {
            created: 0,
            updated: 1
        })
    );
    let records = FinancialRecordRepository::list_for_scenario(&db, actual)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value, dec!(100));
}

#[tokio::test]
async fn test_new_ledger_lines_overwrite_existing_total() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    let jobs = jobs(&db);

    fixture
        .post(&db, actual, slice, &[(date(2024, 10, 5), dec!(100))])
        .await;
    jobs.aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();
    fixture
        .post(&db, actual, slice, &[(date(2024, 10, 9), dec!(-25.50))])
        .await;
    jobs.aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();

    let key = RecordKey {
        slice,
        year: 2024,
        month: 10,
    };
    let record = FinancialRecordRepository::find(&db, actual, &key)
        .await
        .unwrap()
        .expect("record exists");
    assert_eq!(record.value, dec!(74.50));
}

#[tokio::test]
async fn test_missing_actual_scenario_is_not_an_error() {
    let db = setup_db().await;

    let outcome = jobs(&db)
        .aggregate_historical_data(2024, Some(date(2024, 11, 30)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        JobOutcome::ScenarioMissing {
            name: "ACTUAL".to_string()
        }
    );
    assert_eq!(outcome.count(), 0);
}

#[tokio::test]
async fn test_cutoff_before_start_writes_nothing() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    fixture
        .post(&db, actual, slice, &[(date(2024, 9, 15), dec!(10))])
        .await;

    let outcome = jobs(&db)
        .aggregate_historical_data(2024, Some(date(2024, 9, 30)))
        .await
        .unwrap();

    assert_eq!(outcome.count(), 0);
    assert!(
        FinancialRecordRepository::list_for_scenario(&db, actual)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_only_actual_ledger_lines_are_aggregated() {
    let db = setup_db().await;
    let (actual, forecast) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    fixture
        .post(&db, actual, slice, &[(date(2024, 10, 5), dec!(10))])
        .await;
    fixture
        .post(&db, forecast, slice, &[(date(2024, 10, 6), dec!(999))])
        .await;

    jobs(&db)
        .aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();

    let records = FinancialRecordRepository::list_for_scenario(&db, actual)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value, dec!(10));
    assert!(
        FinancialRecordRepository::list_for_scenario(&db, forecast)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_cutoff_past_year_end_labels_next_fiscal_year() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let slice = fixture.slice(&db, "4000").await;
    fixture
        .post(
            &db,
            actual,
            slice,
            &[
                (date(2025, 9, 30), dec!(5)),
                (date(2025, 10, 1), dec!(7)),
            ],
        )
        .await;

    jobs(&db)
        .aggregate_historical_data(2024, Some(date(2025, 10, 31)))
        .await
        .unwrap();

    let records = FinancialRecordRepository::list_for_scenario(&db, actual)
        .await
        .unwrap();
    let labels: Vec<(i32, i32, Decimal)> =
        records.iter().map(|r| (r.year, r.month, r.value)).collect();
    assert_eq!(labels, vec![(2024, 9, dec!(5)), (2025, 10, dec!(7))]);
}

#[tokio::test]
async fn test_slices_are_aggregated_separately() {
    let db = setup_db().await;
    let (actual, _) = create_scenarios(&db).await;
    let fixture = Fixture::create(&db).await;
    let revenue = fixture.slice(&db, "4000").await;
    let expense = fixture.slice(&db, "5000").await;
    fixture
        .post(&db, actual, revenue, &[(date(2024, 10, 5), dec!(100))])
        .await;
    fixture
        .post(&db, actual, expense, &[(date(2024, 10, 5), dec!(-40))])
        .await;

    let outcome = jobs(&db)
        .aggregate_historical_data(2024, Some(date(2024, 10, 31)))
        .await
        .unwrap();

    assert_eq!(outcome.count(), 2);
    let key = |slice| RecordKey {
        slice,
        year: 2024,
        month: 10,
    };
    let revenue_record = FinancialRecordRepository::find(&db, actual, &key(revenue))
        .await
        .unwrap()
        .unwrap();
    let expense_record = FinancialRecordRepository::find(&db, actual, &key(expense))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(revenue_record.value, dec!(100));
    assert_eq!(expense_record.value, dec!(-40));
}

#[tokio::test]
async fn test_out_of_range_fiscal_year_is_rejected() {
    let db = setup_db().await;
    create_scenarios(&db).await;

    let result = jobs(&db)
        .aggregate_historical_data(i32::MAX, Some(date(2024, 10, 31)))
        .await;

    assert!(matches!(result, Err(JobError::Fiscal(_))));
}
