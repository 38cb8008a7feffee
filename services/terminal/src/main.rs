use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terminal::config::Config;
use terminal::{HttpBettingApi, Reply, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, JSON when LOG_FORMAT=json
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "terminal=info,composer=info".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(
        service = "terminal",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if use_json { "json" } else { "text" },
        "Starting bet terminal"
    );

    let config = Config::load()?;
    tracing::info!(base_url = %config.api.base_url, "Configuration loaded");

    let api = HttpBettingApi::new(&config.api)?;
    let mut session = Session::new(
        api,
        config.default_throw_id.clone(),
        config.keypad.auto_advance_delay(),
    );

    if let Err(err) = session.load_catalogs().await {
        tracing::error!(error = %err, "Could not load catalogs");
        if !err.category.is_recoverable() {
            anyhow::bail!("{}", err);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.handle_line(&line).await {
            Reply::Text(text) => println!("{}", text),
            Reply::Error(text) => println!("! {}", text),
            Reply::SessionExpired(text) => {
                println!("! {}", text);
                anyhow::bail!("Session expired, sign in again");
            }
            Reply::Quit => break,
        }
    }

    tracing::info!("Bet terminal stopped");
    Ok(())
}
