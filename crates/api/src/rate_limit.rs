//! Rate limiting for the analysis endpoints
//!
//! GCRA-based per-IP limiting via tower_governor. Clients sample at ~2 fps
//! per stream (camera + screen), so the defaults replenish one request every
//! 250 ms with headroom for reconnect bursts. Requires the service to be
//! started with `into_make_service_with_connect_info::<SocketAddr>()` for IP
//! extraction.

use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config type with X-RateLimit-* response headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// One request replenished every this many milliseconds
    pub replenish_ms: u64,
    /// Requests that may be made immediately
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            replenish_ms: 250,
            burst_size: 20,
        }
    }
}

impl RateLimitConfig {
    /// Strict preset for constrained deployments
    pub fn strict() -> Self {
        Self {
            replenish_ms: 1000,
            burst_size: 5,
        }
    }
}

/// Build the shared governor config for the analysis routes
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.replenish_ms)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("rate limit parameters are non-zero"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.replenish_ms, 250);
        assert_eq!(config.burst_size, 20);
    }

    #[test]
    fn test_strict_config() {
        let config = RateLimitConfig::strict();
        assert_eq!(config.replenish_ms, 1000);
        assert_eq!(config.burst_size, 5);
    }

    #[test]
    fn test_create_governor_config() {
        let governor = create_governor_config(&RateLimitConfig::default());
        assert!(Arc::strong_count(&governor) > 0);
    }
}
