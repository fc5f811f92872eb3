use clap::Parser;
use rerank_tester_cli::{Cli, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,rerank_tester=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env(Cli::parse())?;
    rerank_tester_cli::run(settings).await?;
    Ok(())
}
