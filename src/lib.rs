//! # youchuan-rs
//!
//! Async Rust client for the Youchuan (Midjourney) text-to-image job API,
//! packaged as the four units a visual-workflow host wires together:
//! submit + wait, submit only, poll, and JSON field extraction.
//!
//! The remote service is asynchronous: a submission returns a job id with
//! `status: 1` (running), and the job-status endpoint is polled on a fixed
//! interval until it reports `2` (success) or `3` (failure), or the wait
//! budget runs out.
//!
//! ## Quick Start
//!
//! ```no_run
//! use youchuan_rs::{nodes, ClientConfig, ExtractInputs, GenerateInputs, JobClient};
//!
//! # async fn example() {
//! youchuan_rs::init_logging();
//! let client = JobClient::new(ClientConfig::default());
//!
//! let response = nodes::generate(&client, &GenerateInputs {
//!     text: "a lighthouse at dusk, oil painting".into(),
//!     app_id: "my-app".into(),
//!     secret_key: "my-secret".into(),
//!     ..Default::default()
//! })
//! .await;
//!
//! let first_url = nodes::extract(&ExtractInputs::new(response).key_path("urls.0"));
//! println!("{}", first_url.value);
//! # }
//! ```
//!
//! ## Error handling
//!
//! [`JobClient`] and [`extract()`] return typed errors ([`JobError`],
//! [`PathError`]). The [`nodes`] functions never fail: submit/poll errors
//! become `{"error": ...}` JSON bodies and extraction errors yield the
//! caller's default value.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod nodes;
pub mod types;

pub use client::JobClient;
pub use config::{ClientConfig, PollConfig, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
pub use error::{JobError, PathError, Result};
pub use extract::{extract, lookup, preview, render, JsonInput, KeyPath, Segment};
pub use logging::init_logging;
pub use nodes::{
    ExtractInputs, ExtractOutput, ExtractPreview, GenerateInputs, NodeKind, PollInputs,
    PollOutput, SubmitInputs, SubmitOutput,
};
pub use types::{
    Credentials, JobSnapshot, JobStatus, PollMode, PollStatus, SubmittedJob,
};
