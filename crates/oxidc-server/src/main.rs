use std::env;

use oxidc_server::config::loader::load_config;
use oxidc_server::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; only a malformed file is worth a warning
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    let config_path = env::var("OXIDC_CONFIG").ok();
    let config = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };
    observability::apply_logging_level(&config.logging.level);

    let app = oxidc_server::build_app(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        issuer = %config.auth.issuer,
        "oxidc server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
