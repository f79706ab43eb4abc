//! Writes the JSON Schema for group preset files to stdout.

use entrain_core::GroupConfig;

fn main() {
    let schema = schemars::schema_for!(GroupConfig);
    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize schema: {e}");
            std::process::exit(1);
        }
    }
}
