use std::time::Duration;

use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobtrack_store::{
    bulk_delete, bulk_update, JobRecord, JobStatus, RestJobStore, StoreError, StoreEvent,
    StoreHandle, StoreSettings,
};

fn store_for(server: &MockServer) -> RestJobStore {
    let base = Url::parse(&server.uri()).expect("mock server uri");
    RestJobStore::new(StoreSettings::new(base)).expect("client")
}

fn record(id: u64, title: &str, company: &str, status: JobStatus) -> JobRecord {
    JobRecord {
        id,
        title: title.to_string(),
        company: company.to_string(),
        status,
        date_applied: None,
        notes: None,
    }
}

fn record_body(id: u64, title: &str, company: &str, status: &str) -> serde_json::Value {
    serde_json::json!({ "id": id, "title": title, "company": company, "status": status })
}

#[tokio::test]
async fn bulk_update_settles_every_id_despite_failures() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record_body(1, "Dev", "Acme", "offer")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/jobs/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let outcome = bulk_update(
        &store,
        vec![
            record(1, "Dev", "Acme", JobStatus::Offer),
            record(2, "QA", "Beta", JobStatus::Offer),
        ],
        4,
    )
    .await;

    assert_eq!(outcome.succeeded, vec![record(1, "Dev", "Acme", JobStatus::Offer)]);
    assert_eq!(outcome.failed, vec![(2, StoreError::HttpStatus(500))]);
    assert!(!outcome.fully_succeeded());
}

#[tokio::test]
async fn bulk_delete_counts_missing_records_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let outcome = bulk_delete(&store, vec![1, 2, 3], 2).await;

    assert_eq!(outcome.succeeded, vec![1, 2]);
    assert_eq!(outcome.failed, vec![(3, StoreError::HttpStatus(500))]);
}

#[tokio::test]
async fn bulk_update_with_zero_concurrency_still_makes_progress() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record_body(1, "Dev", "Acme", "offer")),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    // Concurrency is clamped to at least one in-flight request.
    let outcome = bulk_update(&store, vec![record(1, "Dev", "Acme", JobStatus::Offer)], 0).await;

    assert!(outcome.fully_succeeded());
}

async fn next_event(handle: &StoreHandle) -> StoreEvent {
    for _ in 0..500 {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no store event within 5s");
}

#[tokio::test]
async fn handle_round_trips_load_and_bulk_commands() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            record_body(1, "Dev", "Acme", "applied"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record_body(1, "Dev", "Acme", "offer")),
        )
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).expect("mock server uri");
    let handle = StoreHandle::new(StoreSettings::new(base)).expect("handle");

    handle.load();
    let loaded = next_event(&handle).await;
    assert_eq!(
        loaded,
        StoreEvent::Loaded(Ok(vec![record(1, "Dev", "Acme", JobStatus::Applied)]))
    );

    handle.bulk_set_status(vec![record(1, "Dev", "Acme", JobStatus::Offer)]);
    let settled = next_event(&handle).await;
    match settled {
        StoreEvent::BulkStatusSettled(outcome) => {
            assert_eq!(outcome.succeeded, vec![record(1, "Dev", "Acme", JobStatus::Offer)]);
            assert!(outcome.fully_succeeded());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
