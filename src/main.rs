use anyhow::Result;
use clap::Parser;
use zettel_slack::config::Config;
use zettel_slack::slack;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing `.env` file is fine, deployments pass the environment directly.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::init();

    // Parse our configuration from the environment.
    // This will exit with a help message if something is wrong.
    let config = Config::parse();

    slack::serve(config).await?;

    Ok(())
}
