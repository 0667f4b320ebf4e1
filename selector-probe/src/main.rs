//! Prints the snapshot of a caching selector fed by a JSON descriptor file.
//!
//! Edit the file while the watcher runs to watch refreshes pick up changes.

mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use discovery::ServiceSelector;
use discovery_core::client::FileDiscoveryClient;
use discovery_core::scheduler::TokioScheduler;
use discovery_core::{CachingServiceSelector, ServiceSelectorConfig};
use log::info;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

fn selector_config(args: &Args) -> Result<ServiceSelectorConfig> {
    let mut config = match &args.config {
        Some(path) => ServiceSelectorConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ServiceSelectorConfig::default(),
    };
    if let Some(pool) = &args.pool {
        config = config.with_pool(pool);
    }
    if let Some(ms) = args.interval_ms {
        config = config.with_refresh_interval(Duration::from_millis(ms));
    }
    Ok(config)
}

fn print_snapshot(selector: &CachingServiceSelector) -> Result<()> {
    let services = selector.select_all_services();
    let json = serde_json::to_string_pretty(&*services).context("Failed to render snapshot")?;
    println!("{}", json);
    Ok(())
}

/// Prints the snapshot every `interval` until `ticks` prints were made or
/// `shutdown` resolves.
///
/// # Returns
///
/// * The number of snapshots printed.
async fn watch<F>(
    selector: &CachingServiceSelector,
    interval: Duration,
    ticks: Option<u64>,
    shutdown: F,
) -> Result<u64>
where
    F: Future,
{
    // Give the eager refresh a moment before the first print.
    let first = time::Instant::now() + interval.min(Duration::from_millis(200));
    let mut ticker = time::interval_at(first, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut printed = 0u64;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                print_snapshot(selector)?;
                printed += 1;
                if ticks.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }
    }
    Ok(printed)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = selector_config(&args)?;
    let interval = config.refresh_interval();
    let client = Arc::new(FileDiscoveryClient::new(&args.services));
    let scheduler = Arc::new(TokioScheduler::current());

    let selector = CachingServiceSelector::new(&args.service_type, config, client, scheduler)
        .context("Invalid selector settings")?;
    info!(
        "Watching {}/{} from {}",
        selector.service_type(),
        selector.pool(),
        args.services.display()
    );
    selector.start()?;

    watch(&selector, interval, args.ticks, tokio::signal::ctrl_c()).await?;

    selector.stop();
    let stats = selector.stats();
    info!(
        "Selector stopped: {} successful, {} failed refreshes",
        stats.successes, stats.failures
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery::ServiceDescriptor;
    use discovery_core::client::InMemoryDiscoveryClient;

    fn selector(interval: Duration) -> CachingServiceSelector {
        let client = Arc::new(InMemoryDiscoveryClient::new());
        client.add_discovered_service(ServiceDescriptor::builder("apple", "pool").build());
        let config = ServiceSelectorConfig::new("pool").with_refresh_interval(interval);
        let selector = CachingServiceSelector::new(
            "apple",
            config,
            client,
            Arc::new(TokioScheduler::current()),
        )
        .unwrap();
        selector.start().unwrap();
        selector
    }

    #[tokio::test]
    async fn test_watch_stops_after_tick_limit() {
        let selector = selector(Duration::from_millis(100));

        let interval = selector.refresh_interval();
        let never = std::future::pending::<()>();

        let printed = watch(&selector, interval, Some(3), never).await.unwrap();

        assert_eq!(printed, 3);
    }

    #[tokio::test]
    async fn test_watch_stops_on_shutdown_between_ticks() {
        let selector = selector(Duration::from_secs(10));
        let shutdown = tokio::time::sleep(Duration::from_millis(500));

        let printed = watch(&selector, selector.refresh_interval(), None, shutdown)
            .await
            .unwrap();

        // One print after the startup delay, then the shutdown wins over the
        // next tick, which is ten seconds away.
        assert_eq!(printed, 1);
    }
}
