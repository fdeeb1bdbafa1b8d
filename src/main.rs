use anyhow::Result;
use evasion_gateway::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let config = Config::from_env()?;

    // optional professor name: show that professor's permitted risk list
    let professor = std::env::args().nth(1);

    let app = App::initialize(config).await?;
    app.run(professor.as_deref()).await?;

    Ok(())
}
