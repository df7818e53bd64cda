//! BETSLIP — fixed-odds match card with a simulated bet ledger
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the catalog and the betting session, and serves the dashboard
//! API until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use betslip::config::AppConfig;
use betslip::dashboard::{self, routes::DashboardState};
use betslip::engine::{LedgerEngine, Session};
use betslip::notify::TracingSink;

const BANNER: &str = r#"
 ____  _____ _____ ____  _     ___ ____
| __ )| ____|_   _/ ___|| |   |_ _|  _ \
|  _ \|  _|   | | \___ \| |    | || |_) |
| |_) | |___  | |  ___) | |___ | ||  __/
|____/|_____| |_| |____/|_____|___|_|

  Fixed-odds match card — simulated balance
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = AppConfig::path_from_env();
    let cfg = AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        initial_balance = %cfg.session.initial_balance,
        default_stake = %cfg.session.default_stake,
        currency = %cfg.session.currency,
        "BETSLIP starting up"
    );

    let catalog = cfg.catalog()?;
    info!(matches = catalog.len(), live = catalog.live_count(), "Catalog loaded");
    for m in catalog.list_matches() {
        info!("{m}");
    }

    let session = Session::new(
        catalog,
        LedgerEngine::new(cfg.ledger_config()),
        Box::new(TracingSink),
        cfg.session.notification_history,
    );

    if !cfg.dashboard.enabled {
        warn!("Dashboard disabled; nothing to serve. Exiting.");
        return Ok(());
    }

    let state = Arc::new(DashboardState::new(
        session,
        cfg.session.min_stake,
        cfg.session.currency.clone(),
    ));

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received.");
    };

    dashboard::serve(state.clone(), cfg.dashboard.port, shutdown).await?;

    let session = state.session.lock().await;
    let totals = session.ledger().compute_aggregates();
    info!(
        balance = %session.ledger().balance(),
        bets = session.ledger().bets().len(),
        staked = %totals.total_staked,
        potential_payout = %totals.potential_payout,
        "BETSLIP shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betslip=info"));

    let json_logging = std::env::var("BETSLIP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
