use std::time::Duration;

use thiserror::Error;

/// Errors returned by job submission and polling.
#[derive(Error, Debug)]
pub enum JobError {
    /// A required input was missing or blank.
    #[error("{0} must not be empty")]
    Validation(String),

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// The job API returned a non-success HTTP status.
    #[error("job API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("{context}: {source}")]
    Decode {
        context: String,
        source: serde_json::Error,
    },

    /// The job was still running when the wait budget ran out.
    #[error("job polling timed out ({}s)", .waited.as_secs())]
    Timeout {
        job_id: String,
        last_status: i64,
        waited: Duration,
    },
}

/// Errors returned while navigating a JSON value by key path.
#[derive(Error, Debug)]
pub enum PathError {
    /// The input text was not valid JSON.
    #[error("JSON parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mapping key was absent, or the segment could not address the node.
    #[error("key '{0}' not found")]
    KeyNotFound(String),

    /// A sequence index was past the end.
    #[error("array index {index} out of range (len {len})")]
    IndexOutOfRange { index: String, len: usize },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = JobError::Validation("app_id".into());
        assert_eq!(err.to_string(), "app_id must not be empty");
    }

    #[test]
    fn test_timeout_message_uses_seconds() {
        let err = JobError::Timeout {
            job_id: "job-1".into(),
            last_status: 1,
            waited: Duration::from_secs(300),
        };
        assert_eq!(err.to_string(), "job polling timed out (300s)");
    }

    #[test]
    fn test_http_message() {
        let err = JobError::Http {
            status: 502,
            body: "bad gateway".into(),
        };
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_path_error_messages() {
        assert_eq!(
            PathError::KeyNotFound("urls".into()).to_string(),
            "key 'urls' not found"
        );
        let err = PathError::IndexOutOfRange {
            index: "4".into(),
            len: 2,
        };
        assert_eq!(err.to_string(), "array index 4 out of range (len 2)");
    }
}
