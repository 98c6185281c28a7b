//! Extract fields from a job result without touching the network.
//!
//! ```sh
//! cargo run --example extract_fields
//! ```

use youchuan_rs::{nodes, ExtractInputs};

const RESULT: &str = r#"{
  "id": "5f0c2a",
  "status": 2,
  "comment": "",
  "urls": [
    "https://cdn.example.com/5f0c2a/0.png",
    "https://cdn.example.com/5f0c2a/1.png"
  ],
  "size": {"width": 1024, "height": 1024}
}"#;

fn main() {
    for path in ["urls.0", "urls.1", "size", "size.width", "urls.9", "missing"] {
        let out = nodes::extract(
            &ExtractInputs::new(RESULT)
                .key_path(path)
                .default_value("<none>"),
        );
        println!("{:<12} => {}", path, out.value);
    }
}
