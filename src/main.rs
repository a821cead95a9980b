//! Students API entry point.
//!
//! Initializes configuration and storage, then serves HTTP until shutdown.

use students_api::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
