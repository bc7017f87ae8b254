use clap::Parser;

use vex_harness::{cli::Cli, telemetry::init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing("info");

    vex_harness::run(cli).await
}
