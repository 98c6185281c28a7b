//! Submit a prompt and wait for the finished job.
//!
//! ```sh
//! cargo run --example generate -- <app_id> <secret_key> "a lighthouse at dusk"
//! ```

use youchuan_rs::{nodes, ClientConfig, ExtractInputs, GenerateInputs, JobClient};

#[tokio::main]
async fn main() {
    youchuan_rs::init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(app_id), Some(secret_key)) = (args.next(), args.next()) else {
        eprintln!("usage: generate <app_id> <secret_key> [prompt]");
        return;
    };
    let text = args
        .next()
        .unwrap_or_else(|| "a beautiful sunset over mountains".to_string());

    let client = JobClient::new(ClientConfig::default());
    let response = nodes::generate(
        &client,
        &GenerateInputs {
            text,
            app_id,
            secret_key,
            ..Default::default()
        },
    )
    .await;
    println!("{}", response);

    // Pull the first image URL out of the finished job.
    let url = nodes::extract(&ExtractInputs::new(response).key_path("urls.0"));
    if url.value.is_empty() {
        eprintln!("No image URL in response");
    } else {
        println!("First image: {}", url.value);
    }
}
