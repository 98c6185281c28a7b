use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, PollConfig};
use crate::error::{JobError, Result};
use crate::logging::truncate;
use crate::types::*;

const APP_HEADER: &str = "x-youchuan-app";
const SECRET_HEADER: &str = "x-youchuan-secret";

/// Async client for the Youchuan job API.
///
/// Submits text-to-image jobs and polls the job-status endpoint until the job
/// reaches a terminal status, a single check completes, or the wait budget
/// runs out. Credentials are passed per call and never retained.
///
/// # Example
/// ```no_run
/// use youchuan_rs::{ClientConfig, Credentials, JobClient, PollConfig, PollMode, DEFAULT_ENDPOINT};
///
/// # async fn example() -> youchuan_rs::Result<()> {
/// let client = JobClient::new(ClientConfig::default());
/// let creds = Credentials::new("my-app", "my-secret")?;
/// let job = client.submit(DEFAULT_ENDPOINT, &creds, "a lighthouse at dusk").await?;
/// if let Some(id) = job.job_id {
///     let snapshot = client
///         .poll(&creds, &id, &PollConfig::default(), PollMode::Continuous)
///         .await?;
///     println!("{}", snapshot.body);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JobClient {
    http: Client,
    config: ClientConfig,
    tag: &'static str,
}

impl JobClient {
    /// Create a client for the host described by `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            tag: "JobClient",
        }
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Set the `node` field attached to every log event from this client.
    pub fn with_log_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn log_tag(&self) -> &'static str {
        self.tag
    }

    fn authorized(&self, builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        builder
            .header(APP_HEADER, credentials.app_id.as_str())
            .header(SECRET_HEADER, credentials.secret_key.as_str())
            .header(CONTENT_TYPE, "application/json")
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Submit a prompt to `endpoint`. The text is trimmed before sending.
    pub async fn submit(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        text: &str,
    ) -> Result<SubmittedJob> {
        require("text", text)?;
        let prompt = text.trim();

        info!(
            node = self.tag,
            endpoint,
            text = %truncate(prompt, 50),
            "submitting job"
        );

        let resp = self
            .authorized(self.http.post(endpoint), credentials)
            .timeout(self.config.submit_timeout)
            .json(&json!({ "text": prompt }))
            .send()
            .await
            .map_err(|e| JobError::Network {
                context: format!("API request to {} failed", endpoint),
                source: e,
            })?;

        let body = read_json(resp, "submission").await?;
        let job = SubmittedJob::from_body(body);

        match &job.job_id {
            Some(id) => info!(
                node = self.tag,
                job_id = %id,
                status = job.status.code(),
                "job submitted"
            ),
            None => warn!(
                node = self.tag,
                status = job.status.code(),
                "submission accepted without a job id"
            ),
        }

        Ok(job)
    }

    // ── Status ──────────────────────────────────────────────────────

    /// Fetch the current status of a job once.
    pub async fn job_status(&self, credentials: &Credentials, job_id: &str) -> Result<JobSnapshot> {
        let url = self.config.job_url(job_id);
        debug!(node = self.tag, job_id, "checking job status");

        let resp = self
            .authorized(self.http.get(&url), credentials)
            .timeout(self.config.poll_timeout)
            .send()
            .await
            .map_err(|e| JobError::Network {
                context: "poll request failed".into(),
                source: e,
            })?;

        let snapshot = JobSnapshot::from_body(read_json(resp, "job status").await?);
        info!(
            node = self.tag,
            job_id,
            status = snapshot.status.code(),
            comment = %snapshot.comment,
            "job status"
        );
        Ok(snapshot)
    }

    // ── Polling ─────────────────────────────────────────────────────

    /// Poll a job until it succeeds, fails, reports an unknown status, or has
    /// kept running past `config.max_wait_time`.
    ///
    /// With [`PollMode::SingleQuery`] the first response is returned whatever
    /// its status. A single failed request ends the poll; there is no retry.
    pub async fn poll(
        &self,
        credentials: &Credentials,
        job_id: &str,
        config: &PollConfig,
        mode: PollMode,
    ) -> Result<JobSnapshot> {
        require("job_id", job_id)?;
        let job_id = job_id.trim();
        let start = Instant::now();

        info!(node = self.tag, job_id, ?mode, "polling started");
        loop {
            let snapshot = self.job_status(credentials, job_id).await?;

            match snapshot.status {
                JobStatus::Succeeded | JobStatus::Failed => {
                    self.log_finished(job_id, &snapshot);
                    return Ok(snapshot);
                }
                _ if mode == PollMode::SingleQuery => return Ok(snapshot),
                JobStatus::Running => {
                    if start.elapsed() > config.max_wait_time {
                        return Err(self.timed_out(job_id, config));
                    }
                    tokio::time::sleep(config.poll_interval).await;
                }
                JobStatus::Other(_) => {
                    self.log_finished(job_id, &snapshot);
                    return Ok(snapshot);
                }
            }
        }
    }

    /// Wait for a freshly submitted job and return its final body.
    ///
    /// Unlike [`poll`](Self::poll) the deadline is checked before every
    /// request and there is no status channel: callers read `status` and
    /// `comment` from the returned body.
    pub async fn wait_for_completion(
        &self,
        credentials: &Credentials,
        job_id: &str,
        config: &PollConfig,
    ) -> Result<Value> {
        let start = Instant::now();

        info!(node = self.tag, job_id, "auto-polling started");
        loop {
            if start.elapsed() > config.max_wait_time {
                return Err(self.timed_out(job_id, config));
            }

            let snapshot = self.job_status(credentials, job_id).await?;
            if snapshot.status.is_terminal() {
                self.log_finished(job_id, &snapshot);
                return Ok(snapshot.body);
            }
            tokio::time::sleep(config.poll_interval).await;
        }
    }

    fn log_finished(&self, job_id: &str, snapshot: &JobSnapshot) {
        match snapshot.status {
            JobStatus::Succeeded => info!(node = self.tag, job_id, "job completed"),
            JobStatus::Failed => warn!(
                node = self.tag,
                job_id,
                comment = %snapshot.comment,
                "job failed"
            ),
            JobStatus::Other(code) => warn!(node = self.tag, job_id, code, "unknown job status"),
            JobStatus::Running => {}
        }
    }

    fn timed_out(&self, job_id: &str, config: &PollConfig) -> JobError {
        let err = JobError::Timeout {
            job_id: job_id.to_string(),
            last_status: JobStatus::Running.code(),
            waited: config.max_wait_time,
        };
        warn!(node = self.tag, job_id, "{}", err);
        err
    }
}

async fn read_json(resp: Response, context: &str) -> Result<Value> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(JobError::Http { status, body });
    }

    let text = resp.text().await.map_err(|e| JobError::Network {
        context: format!("failed to read {} response", context),
        source: e,
    })?;

    serde_json::from_str(&text).map_err(|e| JobError::Decode {
        context: format!("JSON parse of {} response failed", context),
        source: e,
    })
}
