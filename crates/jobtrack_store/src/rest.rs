use std::time::Duration;

use url::Url;

use crate::{JobId, JobRecord, NewJob, StoreError};

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cap on in-flight requests during a bulk fan-out.
    pub bulk_concurrency: usize,
}

impl StoreSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            bulk_concurrency: 8,
        }
    }
}

/// Remote collection resource, one method per HTTP call. Holds no state
/// beyond the connection itself.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    /// `GET /jobs`, in the order the store delivers.
    async fn list(&self) -> Result<Vec<JobRecord>, StoreError>;
    /// `POST /jobs`; the returned record carries the store-assigned id.
    async fn create(&self, job: NewJob) -> Result<JobRecord, StoreError>;
    /// `PUT /jobs/{id}` with the full record; the store's reply is the new
    /// truth for that id.
    async fn update(&self, record: JobRecord) -> Result<JobRecord, StoreError>;
    /// `DELETE /jobs/{id}`. Idempotent: a 404 means the record is already
    /// gone and counts as success.
    async fn delete(&self, id: JobId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct RestJobStore {
    client: reqwest::Client,
    settings: StoreSettings,
}

impl RestJobStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| StoreError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn jobs_url(&self) -> Result<Url, StoreError> {
        self.settings
            .base_url
            .join("/jobs")
            .map_err(|err| StoreError::InvalidUrl(err.to_string()))
    }

    fn job_url(&self, id: JobId) -> Result<Url, StoreError> {
        self.settings
            .base_url
            .join(&format!("/jobs/{id}"))
            .map_err(|err| StoreError::InvalidUrl(err.to_string()))
    }

    async fn read_json<T>(response: reqwest::Response) -> Result<T, StoreError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::HttpStatus(status.as_u16()));
        }
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes).map_err(|err| StoreError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobStore for RestJobStore {
    async fn list(&self) -> Result<Vec<JobRecord>, StoreError> {
        let response = self
            .client
            .get(self.jobs_url()?)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response).await
    }

    async fn create(&self, job: NewJob) -> Result<JobRecord, StoreError> {
        let response = self
            .client
            .post(self.jobs_url()?)
            .json(&job)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response).await
    }

    async fn update(&self, record: JobRecord) -> Result<JobRecord, StoreError> {
        let response = self
            .client
            .put(self.job_url(record.id)?)
            .json(&record)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: JobId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.job_url(id)?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // Already gone; repeating a delete is a no-op.
            return Ok(());
        }
        if !status.is_success() {
            return Err(StoreError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}

fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Network(err.to_string())
    }
}
