//! WOMATE payment verifier server.

mod config;
mod run;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run::run().await
}
