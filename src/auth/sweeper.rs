use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::TokenIssuer;

/// Periodically drops refresh tokens past their signed expiry from the
/// valid set. Returns `None` when `interval_seconds` is 0.
pub fn spawn_sweeper(issuer: Arc<TokenIssuer>, interval_seconds: u64) -> Option<JoinHandle<()>> {
    if interval_seconds == 0 {
        return None;
    }

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match issuer.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "swept expired refresh tokens"),
                Err(e) => error!(error = %e, "refresh token sweep failed"),
            }
        }
    });
    Some(handle)
}
