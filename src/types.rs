use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JobError, Result};

/// Per-call API credentials, sent verbatim as the
/// `x-youchuan-app` / `x-youchuan-secret` headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub app_id: String,
    pub secret_key: String,
}

impl Credentials {
    /// Both values must be non-blank after trimming.
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let secret_key = secret_key.into();
        require("app_id", &app_id)?;
        require("secret_key", &secret_key)?;
        Ok(Self { app_id, secret_key })
    }
}

pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(JobError::Validation(name.to_string()));
    }
    Ok(())
}

/// Status code reported by the job API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// `1`: still generating.
    Running,
    /// `2`: finished, result fields are present.
    Succeeded,
    /// `3`: the service gave up; `comment` says why.
    Failed,
    /// Any other code, including a missing `status` field (`0`).
    Other(i64),
}

impl JobStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => JobStatus::Running,
            2 => JobStatus::Succeeded,
            3 => JobStatus::Failed,
            other => JobStatus::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            JobStatus::Running => 1,
            JobStatus::Succeeded => 2,
            JobStatus::Failed => 3,
            JobStatus::Other(code) => code,
        }
    }

    /// Read `status` from a response body.
    pub fn from_body(body: &Value) -> Self {
        Self::from_code(body.get("status").and_then(Value::as_i64).unwrap_or(0))
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// Integer status channel of the poll unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// The last status response, passed through.
    Job(JobStatus),
    /// Still running when the wait budget ran out (`-1`).
    TimedOut,
    /// Transport, HTTP, decode, or input failure (`0`).
    RequestError,
}

impl PollStatus {
    pub fn code(self) -> i64 {
        match self {
            PollStatus::Job(status) => status.code(),
            PollStatus::TimedOut => -1,
            PollStatus::RequestError => 0,
        }
    }
}

/// One decoded job-status response.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub comment: String,
    pub body: Value,
}

impl JobSnapshot {
    pub fn from_body(body: Value) -> Self {
        let status = JobStatus::from_body(&body);
        let comment = body
            .get("comment")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        Self {
            status,
            comment,
            body,
        }
    }
}

/// Decoded submission response.
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    /// `None` when the service answered without a usable `id`.
    pub job_id: Option<String>,
    pub status: JobStatus,
    pub body: Value,
}

impl SubmittedJob {
    pub fn from_body(body: Value) -> Self {
        let job_id = match body.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            job_id,
            status: JobStatus::from_body(&body),
            body,
        }
    }
}

/// How a poll call treats a still-running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollMode {
    /// Keep checking until a terminal status or the wait budget runs out.
    #[default]
    Continuous,
    /// Return after exactly one status check.
    SingleQuery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_status_codes() {
        assert_eq!(JobStatus::from_code(1), JobStatus::Running);
        assert_eq!(JobStatus::from_code(2), JobStatus::Succeeded);
        assert_eq!(JobStatus::from_code(3), JobStatus::Failed);
        assert_eq!(JobStatus::from_code(7), JobStatus::Other(7));
        for code in [-4, 0, 1, 2, 3, 9] {
            assert_eq!(JobStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_missing_status_reads_as_zero() {
        assert_eq!(JobStatus::from_body(&json!({"id": "x"})), JobStatus::Other(0));
        assert_eq!(JobStatus::from_body(&json!({"status": "2"})), JobStatus::Other(0));
    }

    #[test]
    fn test_poll_status_codes() {
        assert_eq!(PollStatus::TimedOut.code(), -1);
        assert_eq!(PollStatus::RequestError.code(), 0);
        assert_eq!(PollStatus::Job(JobStatus::Succeeded).code(), 2);
        assert_eq!(PollStatus::Job(JobStatus::Other(5)).code(), 5);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Other(4).is_terminal());
    }

    #[test]
    fn test_credentials_reject_blank() {
        assert!(Credentials::new("app", "secret").is_ok());
        let err = Credentials::new("   ", "secret").unwrap_err();
        assert_eq!(err.to_string(), "app_id must not be empty");
        let err = Credentials::new("app", "").unwrap_err();
        assert_eq!(err.to_string(), "secret_key must not be empty");
    }

    #[test]
    fn test_snapshot_reads_comment() {
        let snap = JobSnapshot::from_body(json!({"status": 3, "comment": "banned prompt"}));
        assert_eq!(snap.status, JobStatus::Failed);
        assert_eq!(snap.comment, "banned prompt");

        let snap = JobSnapshot::from_body(json!({"status": 1}));
        assert_eq!(snap.comment, "");
    }

    #[test]
    fn test_submitted_job_id() {
        let job = SubmittedJob::from_body(json!({"id": "job-42", "status": 1}));
        assert_eq!(job.job_id.as_deref(), Some("job-42"));
        assert_eq!(job.status, JobStatus::Running);

        let job = SubmittedJob::from_body(json!({"id": "", "status": 1}));
        assert_eq!(job.job_id, None);

        let job = SubmittedJob::from_body(json!({"status": 2}));
        assert_eq!(job.job_id, None);
        assert_eq!(job.status, JobStatus::Succeeded);
    }

    #[test]
    fn test_poll_mode_default() {
        assert_eq!(PollMode::default(), PollMode::Continuous);
    }
}
