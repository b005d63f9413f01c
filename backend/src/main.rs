use std::sync::Arc;

use mediscript::{
    generation::GenerationService, provider::OpenAiClient, server, types::Config,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(Config::from_env()?);

    // Use JSON format for staging/production, regular format for development
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            config
                .environment
                .tracing_level(config.debug)
                .as_str()
                .to_lowercase(),
        )
    });
    if config.environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    tracing::info!(
        environment = %config.environment,
        model = %config.openai_model,
        "Starting Mediscript API"
    );
    if !config.has_openai_api_key() {
        tracing::error!("OPENAI_API_KEY is not set; /api/generate will answer 500 until it is configured");
    }

    let openai_client = Arc::new(OpenAiClient::from_config(&config)?);
    let generation_service = Arc::new(GenerationService::from_config(openai_client, &config));

    server::start(config, generation_service).await
}
