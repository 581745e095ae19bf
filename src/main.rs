use anyhow::Result;
use clap::Parser;
use course_api::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    course_api::init_tracing();
    cli::run(Cli::parse()).await
}
