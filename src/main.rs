use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use touchline::baseline::{refresher, BaselineLoader, BaselineStore};
use touchline::binance::rest::BinanceRestClient;
use touchline::binance::ws::BinanceWsClient;
use touchline::config::Config;
use touchline::engine::Engine;
use touchline::notifier::TelegramNotifier;
use touchline::universe::SymbolUniverse;

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env file exists with TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .init();

    tracing::info!(
        rest_url = %config.binance.rest_base_url,
        ws_url = %config.binance.ws_base_url,
        touch_threshold = config.alert.touch_threshold,
        reset_threshold = config.alert.reset_threshold,
        "Starting touchline"
    );

    let rest = Arc::new(BinanceRestClient::new(
        &config.binance.rest_base_url,
        Duration::from_secs(config.binance.request_timeout_secs),
    )?);

    let watch_list = config.universe.watch_list();
    let universe = if watch_list.is_empty() {
        let universe = SymbolUniverse::fetch(&rest).await?;
        tracing::info!(symbols = universe.len(), "Universe loaded from exchange catalog");
        universe
    } else {
        tracing::info!(symbols = watch_list.len(), "Universe from configured watch list");
        SymbolUniverse::from_symbols(watch_list)
    };
    if universe.is_empty() {
        anyhow::bail!("symbol universe is empty, nothing to monitor");
    }

    let notifier = TelegramNotifier::new(&config.telegram.bot_token, &config.telegram.chat_id)?;
    let store = Arc::new(BaselineStore::new());
    let loader = Arc::new(BaselineLoader::new(
        Arc::clone(&rest),
        config.alert.ema_span,
        config.alert.history_limit,
    ));

    let (tick_tx, tick_rx) = mpsc::channel(1024);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let refresher_handle = tokio::spawn(refresher::run(
        Arc::clone(&store),
        Arc::clone(&loader),
        Duration::from_secs(config.refresh.period_secs),
        config.refresh.max_symbols_per_cycle,
        shutdown_rx.clone(),
    ));

    let ws = BinanceWsClient::new(&config.binance.ws_base_url, "!miniTicker@arr");
    let ws_shutdown = shutdown_rx.clone();
    let ws_handle = tokio::spawn(async move {
        if let Err(e) = ws.connect_and_run(tick_tx, ws_shutdown).await {
            tracing::error!(error = %e, "WebSocket task ended with error");
        }
    });

    let engine = Engine::new(
        store,
        loader,
        universe,
        notifier,
        config.alert.ema_span,
        config.alert.touch_threshold,
        config.alert.reset_threshold,
    );
    let engine_handle = tokio::spawn(engine.run(tick_rx, shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");
    let _ = shutdown_tx.send(true);

    let _ = engine_handle.await;
    let _ = ws_handle.await;
    let _ = refresher_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
