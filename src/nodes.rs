//! Host-facing units.
//!
//! Each function takes the primitive inputs a visual-workflow node collects
//! and returns primitive outputs. Nothing here returns an error: failures are
//! logged and folded into an `{"error": ...}` JSON body (submit/poll) or the
//! caller's default value (extraction).

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::JobClient;
use crate::config::{PollConfig, DEFAULT_ENDPOINT};
use crate::error::{JobError, Result};
use crate::extract::{self as extractor, KeyPath};
use crate::logging::truncate;
use crate::types::*;

/// Category the units are listed under in the host's node menu.
pub const CATEGORY: &str = "Midjourney";

const DEFAULT_PROMPT: &str = "A beautiful sunset over the mountains";

/// The four units registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Submit and, optionally, wait for the result.
    Generate,
    /// Submit only; hands the job id downstream.
    Submit,
    /// Poll an existing job.
    Poll,
    /// Pull a field out of a JSON result.
    JsonExtractor,
}

impl NodeKind {
    /// Registration order.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Generate,
        NodeKind::Submit,
        NodeKind::Poll,
        NodeKind::JsonExtractor,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            NodeKind::Generate => "MidjourneyAPI",
            NodeKind::Submit => "MidjourneyAPISubmit",
            NodeKind::Poll => "MidjourneyAPIPoll",
            NodeKind::JsonExtractor => "MidjourneyJSONExtractor",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Generate => "Midjourney API",
            NodeKind::Submit => "Midjourney API Submit",
            NodeKind::Poll => "Midjourney API Poll",
            NodeKind::JsonExtractor => "Midjourney JSON Extractor",
        }
    }

    /// Whether the host should treat the unit as a workflow sink.
    pub fn is_output_node(self) -> bool {
        !matches!(self, NodeKind::Submit)
    }

    /// `node` field used in log events.
    pub fn log_tag(self) -> &'static str {
        match self {
            NodeKind::JsonExtractor => "JSONExtractor",
            other => other.class_name(),
        }
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.class_name() == name)
    }
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

fn error_value(tag: &str, err: &JobError, job_id: Option<&str>) -> Value {
    warn!(node = tag, job_id, error = %err, "request failed");
    let mut body = json!({ "error": err.to_string() });
    if let Some(id) = job_id {
        body["job_id"] = json!(id);
    }
    body
}

// ── Generate ────────────────────────────────────────────────────────

/// Inputs of the combined submit + poll unit.
#[derive(Debug, Clone)]
pub struct GenerateInputs {
    pub text: String,
    pub app_id: String,
    pub secret_key: String,
    pub endpoint: String,
    /// Seconds, clamped to 1–30.
    pub poll_interval: u64,
    /// Seconds, clamped to 30–1800.
    pub max_wait_time: u64,
    pub auto_poll: bool,
}

impl Default for GenerateInputs {
    fn default() -> Self {
        Self {
            text: DEFAULT_PROMPT.to_string(),
            app_id: String::new(),
            secret_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: 3,
            max_wait_time: 300,
            auto_poll: true,
        }
    }
}

/// Submit a prompt and, when the job comes back running and `auto_poll` is
/// set, wait for it. Returns the final JSON body as text.
///
/// There is no separate status output: a finished job's own `status` and
/// `comment` fields tell success from failure.
pub async fn generate(client: &JobClient, inputs: &GenerateInputs) -> String {
    let config = PollConfig::from_secs(inputs.poll_interval, inputs.max_wait_time);
    generate_with(client, inputs, &config).await
}

/// [`generate`] with an explicit cadence instead of the clamped host inputs.
pub async fn generate_with(
    client: &JobClient,
    inputs: &GenerateInputs,
    config: &PollConfig,
) -> String {
    let tag = NodeKind::Generate.log_tag();
    let client = client.clone().with_log_tag(tag);

    let (creds, job) = match submit_inner(
        &client,
        &inputs.text,
        &inputs.app_id,
        &inputs.secret_key,
        &inputs.endpoint,
    )
    .await
    {
        Ok(submitted) => submitted,
        Err(err) => return error_value(tag, &err, None).to_string(),
    };

    let job_id = match job.job_id {
        Some(id) if inputs.auto_poll && job.status == JobStatus::Running => id,
        _ => return pretty(&job.body),
    };

    match client.wait_for_completion(&creds, &job_id, config).await {
        Ok(body) => pretty(&body),
        Err(err) => error_value(tag, &err, Some(&job_id)).to_string(),
    }
}

async fn submit_inner(
    client: &JobClient,
    text: &str,
    app_id: &str,
    secret_key: &str,
    endpoint: &str,
) -> Result<(Credentials, SubmittedJob)> {
    require("text", text)?;
    let creds = Credentials::new(app_id, secret_key)?;
    let job = client.submit(endpoint, &creds, text).await?;
    Ok((creds, job))
}

// ── Submit ──────────────────────────────────────────────────────────

/// Inputs of the submit-only unit.
#[derive(Debug, Clone)]
pub struct SubmitInputs {
    pub text: String,
    pub app_id: String,
    pub secret_key: String,
    pub endpoint: String,
}

impl Default for SubmitInputs {
    fn default() -> Self {
        Self {
            text: DEFAULT_PROMPT.to_string(),
            app_id: String::new(),
            secret_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Outputs of the submit-only unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutput {
    /// Empty when submission failed or the service returned no id.
    pub job_id: String,
    pub response: String,
}

/// Submit a prompt without waiting.
pub async fn submit(client: &JobClient, inputs: &SubmitInputs) -> SubmitOutput {
    let tag = NodeKind::Submit.log_tag();
    let client = client.clone().with_log_tag(tag);

    let submitted = submit_inner(
        &client,
        &inputs.text,
        &inputs.app_id,
        &inputs.secret_key,
        &inputs.endpoint,
    )
    .await;

    match submitted {
        Ok((_, job)) => SubmitOutput {
            response: pretty(&job.body),
            job_id: job.job_id.unwrap_or_default(),
        },
        Err(err) => SubmitOutput {
            job_id: String::new(),
            response: error_value(tag, &err, None).to_string(),
        },
    }
}

// ── Poll ────────────────────────────────────────────────────────────

/// Inputs of the poll-only unit.
#[derive(Debug, Clone)]
pub struct PollInputs {
    pub job_id: String,
    pub app_id: String,
    pub secret_key: String,
    /// Seconds, clamped to 1–30.
    pub poll_interval: u64,
    /// Seconds, clamped to 30–1800.
    pub max_wait_time: u64,
    pub single_query: bool,
}

impl Default for PollInputs {
    fn default() -> Self {
        Self {
            job_id: String::new(),
            app_id: String::new(),
            secret_key: String::new(),
            poll_interval: 3,
            max_wait_time: 300,
            single_query: false,
        }
    }
}

impl PollInputs {
    fn config(&self) -> PollConfig {
        PollConfig::from_secs(self.poll_interval, self.max_wait_time)
    }

    fn mode(&self) -> PollMode {
        if self.single_query {
            PollMode::SingleQuery
        } else {
            PollMode::Continuous
        }
    }
}

/// Outputs of the poll-only unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOutput {
    pub result: String,
    /// `2` success, `3` failure, `1` still running (single query), `-1` timed
    /// out, `0` request error, anything else passed through from the service.
    pub status: i64,
}

/// Poll an existing job; see [`JobClient::poll`] for the state machine.
pub async fn poll(client: &JobClient, inputs: &PollInputs) -> PollOutput {
    poll_with(client, inputs, &inputs.config()).await
}

/// [`poll`] with an explicit cadence instead of the clamped host inputs.
pub async fn poll_with(
    client: &JobClient,
    inputs: &PollInputs,
    config: &PollConfig,
) -> PollOutput {
    let tag = NodeKind::Poll.log_tag();
    let client = client.clone().with_log_tag(tag);

    match poll_inner(&client, inputs, config).await {
        Ok(snapshot) => PollOutput {
            result: pretty(&snapshot.body),
            status: PollStatus::Job(snapshot.status).code(),
        },
        Err(err) => {
            let job_id = match err {
                JobError::Validation(_) => None,
                _ => Some(inputs.job_id.trim()),
            };
            let mut body = error_value(tag, &err, job_id);
            let status = match err {
                JobError::Timeout { last_status, .. } => {
                    body["last_status"] = json!(last_status);
                    PollStatus::TimedOut
                }
                _ => PollStatus::RequestError,
            };
            PollOutput {
                result: body.to_string(),
                status: status.code(),
            }
        }
    }
}

async fn poll_inner(
    client: &JobClient,
    inputs: &PollInputs,
    config: &PollConfig,
) -> Result<JobSnapshot> {
    require("job_id", &inputs.job_id)?;
    let creds = Credentials::new(inputs.app_id.as_str(), inputs.secret_key.as_str())?;
    client.poll(&creds, &inputs.job_id, config, inputs.mode()).await
}

// ── Extract ─────────────────────────────────────────────────────────

/// Inputs of the extraction unit.
#[derive(Debug, Clone)]
pub struct ExtractInputs {
    /// JSON text (as a `Value::String`) or an already-decoded value.
    pub json_input: Value,
    pub key_path: String,
    pub default_value: String,
    pub return_as_string: bool,
}

impl ExtractInputs {
    pub fn new(json_input: impl Into<Value>) -> Self {
        Self {
            json_input: json_input.into(),
            key_path: "urls.0".to_string(),
            default_value: String::new(),
            return_as_string: true,
        }
    }

    pub fn key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = key_path.into();
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn return_as_string(mut self, enabled: bool) -> Self {
        self.return_as_string = enabled;
        self
    }
}

/// Structured copy of the result for the host's preview widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractPreview {
    pub json: Value,
    pub text: String,
}

/// Outputs of the extraction unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractOutput {
    pub value: String,
    /// `None` when the default value was returned.
    pub preview: Option<ExtractPreview>,
}

/// Resolve `key_path` in `json_input`, returning `default_value` on any
/// parse or lookup failure.
pub fn extract(inputs: &ExtractInputs) -> ExtractOutput {
    let tag = NodeKind::JsonExtractor.log_tag();
    let path = KeyPath::parse(&inputs.key_path);

    match extractor::extract(&inputs.json_input, &path) {
        Ok(found) => {
            let value = extractor::render(&found, inputs.return_as_string);
            info!(
                node = tag,
                key_path = %inputs.key_path,
                value = %truncate(&value, 100),
                "extracted key path"
            );
            ExtractOutput {
                preview: Some(ExtractPreview {
                    json: extractor::preview(&value),
                    text: value.clone(),
                }),
                value,
            }
        }
        Err(err) => {
            warn!(
                node = tag,
                key_path = %inputs.key_path,
                error = %err,
                "extraction failed, returning default"
            );
            ExtractOutput {
                value: inputs.default_value.clone(),
                preview: None,
            }
        }
    }
}
