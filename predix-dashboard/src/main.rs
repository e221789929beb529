//! Headless dashboard runner
//!
//! Opens the file store, refreshes the current machine on a timer until
//! Ctrl-C, then writes a maintenance report next to the stored data.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use chrono::Utc;
use predix_connectors::{RefreshScheduler, SchedulerConfig};
use predix_dashboard::{Dashboard, DashboardConfig, FileStore};

type SharedDashboard = Arc<Mutex<Dashboard<FileStore>>>;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env()?;
    let store = FileStore::open(&config.data_dir)
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let dashboard = Dashboard::open(&config, store)?;

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(config, Arc::new(Mutex::new(dashboard))))
}

async fn run(config: DashboardConfig, dashboard: SharedDashboard) -> anyhow::Result<()> {
    let scheduler = RefreshScheduler::new(SchedulerConfig::new(config.refresh_interval));

    let tick_dashboard = Arc::clone(&dashboard);
    let handle = scheduler.spawn(move || {
        let dashboard = Arc::clone(&tick_dashboard);
        async move {
            // The remote call blocks, keep it off the runtime threads
            let result = tokio::task::spawn_blocking(move || {
                let mut dashboard = dashboard.lock().unwrap_or_else(PoisonError::into_inner);
                dashboard.refresh(Utc::now()).map(|evaluation| {
                    let status = dashboard.monitor().latest().map_or("Unknown", |p| p.health_status.as_str());
                    (evaluation, status)
                })
            })
            .await;

            match result {
                Ok(Ok((evaluation, status))) => log::info!(
                    "refresh via {:?}: {}, {} new alerts",
                    evaluation.source,
                    status,
                    evaluation.alerts_raised
                ),
                Ok(Err(e)) => log::warn!("refresh failed: {}", e),
                Err(e) => log::warn!("refresh task panicked: {}", e),
            }
        }
    })?;

    log::info!("monitoring started, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;

    let ticks = handle.cancel().await;
    log::info!("stopped after {} refreshes", ticks);

    let mut dashboard = dashboard.lock().unwrap_or_else(PoisonError::into_inner);
    dashboard.persist()?;

    let report = dashboard.report(Utc::now().date_naive());
    let path = config.data_dir.join(report.file_name());
    std::fs::write(&path, report.to_string()).with_context(|| format!("writing {}", path.display()))?;
    log::info!("report written to {}", path.display());

    Ok(())
}
