//! The agent's main loop: find log sources, follow each one once.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::AgentConfig;
use crate::discovery::discover_services;
use crate::error::AgentError;
use crate::filter::ErrorFilter;
use crate::follow::{Target, follow};
use crate::forward::Forwarder;
use crate::paths::expand_log_paths;

/// When sources are scanned.
#[derive(Debug, Clone, Copy)]
pub struct ScanSchedule {
    /// Scan again every `interval`. Otherwise scan once at startup.
    pub rescan: bool,
    pub interval: Duration,
}

/// Collect every source the config currently names.
pub async fn collect_targets(config: &AgentConfig) -> Vec<Target> {
    let mut targets = match expand_log_paths(
        &config.monitoring.log_paths,
        &config.monitoring.exclude_patterns,
    ) {
        Ok(paths) => paths.into_iter().map(Target::File).collect(),
        Err(e) => {
            warn!(error = %e, "failed to expand log paths");
            Vec::new()
        }
    };
    targets.extend(
        discover_services(&config.services)
            .await
            .into_iter()
            .map(Target::Service),
    );
    targets
}

/// Run until Ctrl-C, or until every source has ended when rescanning is off.
pub async fn run(config: AgentConfig) -> Result<(), AgentError> {
    let forwarder = Forwarder::new(
        &config.analyzer.endpoint,
        Duration::from_secs(config.analyzer.timeout_secs),
    )?;
    let filter = Arc::new(ErrorFilter::new(config.error_patterns())?);
    let schedule = ScanSchedule {
        rescan: config.discovery.enabled,
        interval: config.discovery.interval()?,
    };

    info!(endpoint = %forwarder.url(), rescan = schedule.rescan, "agent started");

    supervise(
        schedule,
        || collect_targets(&config),
        move |target| {
            let filter = Arc::clone(&filter);
            let forwarder = forwarder.clone();
            async move { follow(&target, filter, forwarder).await }
        },
        shutdown_signal(),
    )
    .await;
    Ok(())
}

/// Scan for targets on `schedule` and keep one follower running per target
/// key.
///
/// A key whose follower ends becomes eligible again on the next scan.
/// Returns when `shutdown` completes, aborting running followers, or when
/// rescanning is off and every follower has ended.
pub async fn supervise<S, SF, F, FF>(
    schedule: ScanSchedule,
    mut scan: S,
    follow: F,
    shutdown: impl Future<Output = ()>,
) where
    S: FnMut() -> SF,
    SF: Future<Output = Vec<Target>>,
    F: Fn(Target) -> FF,
    FF: Future<Output = Result<(), AgentError>> + Send + 'static,
{
    let mut ticker = tokio::time::interval(schedule.interval);
    let mut monitored: HashSet<String> = HashSet::new();
    let mut followers: JoinSet<String> = JoinSet::new();
    let mut scanned = false;

    tokio::pin!(shutdown);

    loop {
        if scanned && !schedule.rescan && followers.is_empty() {
            info!("all log sources ended");
            return;
        }
        // Shutdown wins over a tick that became due during a slow scan.
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(followers = followers.len(), "shutting down");
                followers.shutdown().await;
                return;
            }
            _ = ticker.tick(), if schedule.rescan || !scanned => {
                scanned = true;
                for target in scan().await {
                    let key = target.key();
                    if !monitored.insert(key.clone()) {
                        continue;
                    }
                    let following = follow(target);
                    followers.spawn(async move {
                        if let Err(e) = following.await {
                            error!(target = %key, error = %e, "follower failed");
                        }
                        key
                    });
                }
                if monitored.is_empty() {
                    warn!("no log sources found");
                }
            }
            Some(joined) = followers.join_next(), if !followers.is_empty() => {
                match joined {
                    Ok(key) => {
                        monitored.remove(&key);
                    }
                    Err(e) => error!(error = %e, "follower task panicked"),
                }
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
