//! Prints the Linker OpenAPI document as JSON.
//!
//! Usage:
//!   cargo run -p linker-api --bin generate-openapi --features openapi > openapi.json

use linker_api::ApiDoc;

fn main() {
    match ApiDoc::to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
