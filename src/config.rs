use std::time::Duration;

/// Production host of the job API.
pub const DEFAULT_BASE_URL: &str = "https://ali.youchuan.cn";

/// Default text-to-image submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ali.youchuan.cn/v1/tob/diffusion";

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_TIMEOUT: Duration = Duration::from_secs(10);

const MIN_POLL_INTERVAL_SECS: u64 = 1;
const MAX_POLL_INTERVAL_SECS: u64 = 30;
const MIN_MAX_WAIT_SECS: u64 = 30;
const MAX_MAX_WAIT_SECS: u64 = 1800;

pub(crate) fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Transport settings for [`JobClient`](crate::JobClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the job API, without a trailing slash.
    pub base_url: String,

    /// Per-attempt timeout for the submission POST.
    pub submit_timeout: Duration,

    /// Per-attempt timeout for each job-status GET.
    pub poll_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            submit_timeout: SUBMIT_TIMEOUT,
            poll_timeout: POLL_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Point the client at a different host (staging, a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize(base_url.into());
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Submission endpoint on the configured host.
    pub fn submit_url(&self) -> String {
        format!("{}/v1/tob/diffusion", self.base_url)
    }

    /// Status URL for a single job.
    pub fn job_url(&self, job_id: &str) -> String {
        format!("{}/v1/tob/job/{}", self.base_url, job_id)
    }
}

/// Cadence and wait budget for the poll loop.
///
/// The deadline is measured from the first status request of a poll call,
/// not from submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Sleep between consecutive status checks.
    pub poll_interval: Duration,

    /// Give up once a still-running job has been polled for longer than this.
    pub max_wait_time: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            max_wait_time: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    /// Raw durations, no clamping.
    pub fn new(poll_interval: Duration, max_wait_time: Duration) -> Self {
        Self {
            poll_interval,
            max_wait_time,
        }
    }

    /// Whole-second inputs as the host widgets provide them, clamped to
    /// 1–30 s for the interval and 30–1800 s for the wait budget.
    pub fn from_secs(poll_interval: u64, max_wait_time: u64) -> Self {
        Self {
            poll_interval: Duration::from_secs(
                poll_interval.clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
            ),
            max_wait_time: Duration::from_secs(
                max_wait_time.clamp(MIN_MAX_WAIT_SECS, MAX_MAX_WAIT_SECS),
            ),
        }
    }
}
