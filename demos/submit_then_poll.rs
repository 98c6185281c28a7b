//! Submit without waiting, then check on the job with the poll unit: first a
//! single status query, then a blocking poll until the job finishes.
//!
//! ```sh
//! cargo run --example submit_then_poll -- <app_id> <secret_key> "a koi pond, ukiyo-e"
//! ```

use youchuan_rs::{nodes, ClientConfig, JobClient, PollInputs, SubmitInputs};

#[tokio::main]
async fn main() {
    youchuan_rs::init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(app_id), Some(secret_key)) = (args.next(), args.next()) else {
        eprintln!("usage: submit_then_poll <app_id> <secret_key> [prompt]");
        return;
    };
    let text = args
        .next()
        .unwrap_or_else(|| "a koi pond, ukiyo-e".to_string());

    let client = JobClient::new(ClientConfig::default());
    let submitted = nodes::submit(
        &client,
        &SubmitInputs {
            text,
            app_id: app_id.clone(),
            secret_key: secret_key.clone(),
            ..Default::default()
        },
    )
    .await;

    if submitted.job_id.is_empty() {
        eprintln!("Submission failed: {}", submitted.response);
        return;
    }
    println!("Submitted job {}", submitted.job_id);

    let inputs = PollInputs {
        job_id: submitted.job_id,
        app_id,
        secret_key,
        poll_interval: 5,
        max_wait_time: 600,
        single_query: true,
    };
    let peek = nodes::poll(&client, &inputs).await;
    println!("Current status: {}", peek.status);

    let done = nodes::poll(
        &client,
        &PollInputs {
            single_query: false,
            ..inputs
        },
    )
    .await;
    match done.status {
        2 => println!("Finished:\n{}", done.result),
        3 => eprintln!("Job failed:\n{}", done.result),
        -1 => eprintln!("Gave up waiting: {}", done.result),
        0 => eprintln!("Request error: {}", done.result),
        other => eprintln!("Unexpected status {}:\n{}", other, done.result),
    }
}
