use anyhow::{Context, Result};
use sentiment_ops::config::Settings;
use sentiment_ops::infrastructure::init_tracing;
use sentiment_ops::Application;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;
    init_tracing(&settings.logging)?;

    let app = Application::new(settings).await?;
    app.run().await?;

    Ok(())
}
