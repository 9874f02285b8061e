mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use infrastructure::{AppConfig, AppContainer};
use presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Starting pdfchat on port {} (uploads in {})",
        config.port,
        config.upload_dir.display()
    );

    let container = AppContainer::new(config).await?;

    HttpServer::new(container.chatbot_handler.clone(), Some(container.config.port))
        .with_max_upload_bytes(container.config.max_upload_bytes)
        .run()
        .await
}
