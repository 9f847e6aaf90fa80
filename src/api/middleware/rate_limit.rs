//! Per-client rate limiting using token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Seconds between replenished requests.
const REPLENISH_SECONDS: u64 = 1;
const BURST_SIZE: u32 = 10;

/// Wraps `router` in a per-IP limiter.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP comes from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`; otherwise from the socket peer address, which
/// requires serving with `into_make_service_with_connect_info`.
pub fn apply<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(REPLENISH_SECONDS).burst_size(BURST_SIZE);

    if behind_proxy {
        match builder.key_extractor(SmartIpKeyExtractor).finish() {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => disabled(router),
        }
    } else {
        match builder.finish() {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => disabled(router),
        }
    }
}

fn disabled<S>(router: Router<S>) -> Router<S> {
    tracing::error!("Invalid rate limit configuration, limiter disabled");
    router
}
