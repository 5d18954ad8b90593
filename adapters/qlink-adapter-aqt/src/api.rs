//! AQT gateway REST client.
//!
//! The gateway exposes a single endpoint per device target. Both job
//! submission and status queries are `PUT` requests to that endpoint,
//! authenticated with the `Ocp-Apim-Subscription-Key` header and an
//! `access_token` body field.
//!
//! ```text
//!   PUT {access_token, no_qubits, repetitions, data} ──→ {id, status}
//!   PUT {id, access_token}                           ──→ {id, status, samples?}
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use qlink_hal::{Job, JobStatus};

use crate::config::PollPolicy;
use crate::error::{AqtError, AqtResult};

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// HTTP statuses the gateway uses for accepted requests.
pub const VALID_STATUS_CODES: [u16; 3] = [200, 201, 202];

/// Join a base URL and a target path with exactly one slash between them.
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Whether a gateway response status counts as success.
pub fn is_valid_status(status: u16) -> bool {
    VALID_STATUS_CODES.contains(&status)
}

/// An outgoing gateway request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: serde_json::Value,
}

/// A raw gateway response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Deserialize the body, or fail with the status and body if the status is invalid.
    pub fn into_json<T: for<'de> Deserialize<'de>>(self) -> AqtResult<T> {
        if !is_valid_status(self.status) {
            return Err(AqtError::ApiError {
                status: self.status,
                message: self.body,
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Performs HTTP exchanges with the gateway.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response.
    async fn send(&self, request: HttpRequest) -> AqtResult<HttpResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given timeouts.
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> AqtResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(AqtError::Http)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> AqtResult<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Request body for job submission.
#[derive(Debug, Serialize)]
pub struct JobSubmission<'a> {
    /// API key.
    pub access_token: &'a str,
    /// Number of wires.
    pub no_qubits: usize,
    /// Number of shots.
    pub repetitions: u32,
    /// Serialized circuit (a JSON string).
    pub data: &'a str,
}

/// Request body for a job status query.
#[derive(Debug, Serialize)]
pub struct JobQuery<'a> {
    /// Job id returned by the submission.
    pub id: &'a str,
    /// API key.
    pub access_token: &'a str,
}

/// Gateway job record.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    /// Job identifier.
    #[serde(default)]
    pub id: String,
    /// `queued | ongoing | finished | error | cancelled`.
    pub status: String,
    /// One integer outcome per shot, present when finished.
    #[serde(default)]
    pub samples: Option<Vec<u64>>,
    /// Error description when `status == "error"`.
    #[serde(default)]
    pub message: Option<String>,
}

impl JobResponse {
    /// Map the gateway status string onto the job state machine.
    pub fn job_status(&self) -> JobStatus {
        match self.status.to_lowercase().as_str() {
            "finished" => JobStatus::Completed,
            "error" => JobStatus::Failed(
                self.message
                    .clone()
                    .unwrap_or_else(|| "gateway reported an error".into()),
            ),
            "cancelled" => JobStatus::Cancelled,
            "ongoing" => JobStatus::Running,
            _ => JobStatus::Queued,
        }
    }
}

/// Client bound to one gateway endpoint and API key.
pub struct AqtClient {
    transport: Arc<dyn Transport>,
    method: Method,
    url: String,
    api_key: String,
    poll: PollPolicy,
}

impl std::fmt::Debug for AqtClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AqtClient")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("poll", &self.poll)
            .finish()
    }
}

impl AqtClient {
    /// Create a client for `url`.
    pub fn new(
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
        api_key: impl Into<String>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            transport,
            method: Method::PUT,
            url: url.into(),
            api_key: api_key.into(),
            poll,
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// API key sent as `access_token`.
    pub fn access_token(&self) -> &str {
        &self.api_key
    }

    /// Polling bound.
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    async fn put<T: for<'de> Deserialize<'de>>(&self, body: &impl Serialize) -> AqtResult<T> {
        let request = HttpRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: vec![(SUBSCRIPTION_KEY_HEADER.to_string(), self.api_key.clone())],
            body: serde_json::to_value(body)?,
        };
        self.transport.send(request).await?.into_json()
    }

    /// Submit a circuit.
    #[instrument(skip(self, submission), fields(url = %self.url))]
    pub async fn submit(&self, submission: &JobSubmission<'_>) -> AqtResult<JobResponse> {
        debug!(
            "Submitting circuit: {} qubits, {} repetitions",
            submission.no_qubits, submission.repetitions
        );
        let response: JobResponse = self.put(submission).await?;
        if response.id.is_empty() && response.job_status().is_pending() {
            return Err(AqtError::MissingJobId(response.status));
        }
        info!("AQT job submitted: {} ({})", response.id, response.status);
        Ok(response)
    }

    /// Query a job's status.
    #[instrument(skip(self))]
    pub async fn query(&self, job_id: &str) -> AqtResult<JobResponse> {
        let query = JobQuery {
            id: job_id,
            access_token: &self.api_key,
        };
        self.put(&query).await
    }

    /// Poll until the job finishes and return its samples.
    ///
    /// Starts from the submission response, which may already be finished.
    /// Every observed status is recorded on `job`.
    #[instrument(skip(self, initial, job), fields(job_id = %job.id))]
    pub async fn wait(&self, initial: JobResponse, job: &mut Job) -> AqtResult<Vec<u64>> {
        let started = Instant::now();
        let mut response = initial;
        job.set_status(response.job_status());

        loop {
            match response.job_status() {
                JobStatus::Completed => {
                    info!("AQT job {} finished after {} polls", job.id, job.polls);
                    return response
                        .samples
                        .ok_or_else(|| AqtError::MissingSamples(job.id.0.clone()));
                }
                JobStatus::Failed(msg) => return Err(AqtError::JobFailed(msg)),
                JobStatus::Cancelled => {
                    return Err(AqtError::JobFailed(format!("job {} was cancelled", job.id)));
                }
                JobStatus::Queued | JobStatus::Running => {}
            }

            if self.poll.is_exhausted(job.polls, started.elapsed()) {
                return Err(AqtError::Timeout(job.id.0.clone()));
            }
            if !self.poll.interval.is_zero() {
                tokio::time::sleep(self.poll.interval).await;
            }

            response = self.query(&job.id.0).await?;
            job.record_poll(response.job_status());
            debug!("AQT job {} status: {}", job.id, response.status);
        }
    }
}
