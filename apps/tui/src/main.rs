use color_eyre::Result;
use dotenv::dotenv;
use tracing::info;

use shared_config::AppConfig;

mod action;
mod app;
mod components;
mod logging;
mod tui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    color_eyre::install()?;
    logging::init()?;

    info!("Starting medbook terminal client");

    let config = AppConfig::from_env();
    if !config.is_configured() {
        eprintln!("SCHEDULER_API_BASE_URL is not set. Point it at the scheduling service and retry.");
        std::process::exit(1);
    }

    let mut app = App::new(&config)?;
    app.run().await
}
