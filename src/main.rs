use actix_web::HttpServer;
use tracing_subscriber::EnvFilter;
use weather_relay::{
    AppMetrics, LogFormat, MetricsConfig, RelayConfig, ServerConfig, WeatherRelay, create_app,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    // Refuse to start without a provider credential
    let relay_config = RelayConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid relay configuration");
        std::io::Error::other(e.to_string())
    })?;
    let server_config = ServerConfig::from_env();
    let metrics_config = MetricsConfig::from_env();

    let metrics = AppMetrics::new().map_err(|e| std::io::Error::other(e.to_string()))?;
    let relay = WeatherRelay::new(&relay_config, Some(metrics.clone()))
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    tracing::info!(
        host = %server_config.host,
        port = server_config.port,
        upstream = %relay_config.base_url,
        units = %relay_config.units,
        "Weather relay starting"
    );

    HttpServer::new(move || create_app(relay.clone(), metrics.clone(), metrics_config.clone()))
        .bind(server_config.bind_address())?
        .run()
        .await
}
