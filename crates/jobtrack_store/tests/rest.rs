use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobtrack_store::{JobRecord, JobStatus, JobStore, NewJob, RestJobStore, StoreError, StoreSettings};

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

#[tokio::test]
async fn list_preserves_store_order_and_accepts_legacy_status_spellings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 2, "title": "QA", "company": "Beta", "status": "Interviewing" },
            { "id": 1, "title": "Dev", "company": "Acme", "status": "applied" },
        ])))
        .mount(&server)
        .await;

    let jobs = store_for(&server).list().await.expect("list ok");

    assert_eq!(
        jobs,
        vec![
            record(2, "QA", "Beta", JobStatus::Interview),
            record(1, "Dev", "Acme", JobStatus::Applied),
        ]
    );
}

#[tokio::test]
async fn list_fails_with_decode_error_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = store_for(&server).list().await.unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn list_fails_with_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store_for(&server).list().await.unwrap_err();
    assert_eq!(err, StoreError::HttpStatus(500));
}

#[tokio::test]
async fn list_fails_with_network_error_when_unreachable() {
    // Nothing listens on the discard port.
    let base = Url::parse("http://127.0.0.1:1").expect("url");
    let store = RestJobStore::new(StoreSettings::new(base)).expect("client");

    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn create_posts_fields_without_id_and_returns_assigned_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(serde_json::json!({
            "title": "QA",
            "company": "Beta",
            "status": "applied",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7, "title": "QA", "company": "Beta", "status": "applied",
        })))
        .mount(&server)
        .await;

    let created = store_for(&server)
        .create(NewJob {
            title: "QA".to_string(),
            company: "Beta".to_string(),
            status: JobStatus::Applied,
            date_applied: None,
            notes: None,
        })
        .await
        .expect("create ok");

    assert_eq!(created, record(7, "QA", "Beta", JobStatus::Applied));
}

#[tokio::test]
async fn update_puts_full_record_and_returns_server_copy() {
    let server = MockServer::start().await;
    let sent = record(3, "Dev", "Acme", JobStatus::Rejected);
    Mock::given(method("PUT"))
        .and(path("/jobs/3"))
        .and(body_json(serde_json::json!({
            "id": 3, "title": "Dev", "company": "Acme", "status": "rejected",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3, "title": "Dev", "company": "Acme", "status": "rejected",
            "notes": "normalized by server",
        })))
        .mount(&server)
        .await;

    let updated = store_for(&server).update(sent).await.expect("update ok");

    // The server's copy, not the optimistic guess, is the result.
    assert_eq!(updated.notes.as_deref(), Some("normalized by server"));
    assert_eq!(updated.status, JobStatus::Rejected);
}

#[tokio::test]
async fn delete_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    store_for(&server).delete(5).await.expect("delete ok");
}

#[tokio::test]
async fn delete_treats_404_as_already_gone() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/5"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // A repeated delete (e.g. a double click) must be a no-op.
    store_for(&server).delete(5).await.expect("delete idempotent");
}

#[tokio::test]
async fn delete_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store_for(&server).delete(5).await.unwrap_err();
    assert_eq!(err, StoreError::HttpStatus(500));
}
