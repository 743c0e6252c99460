//! Client configuration types.

use governor::Quota;
use std::num::NonZeroU32;

/// Client-side throttle for catalog API requests.
///
/// A full audit issues one catalog request per device, so the walk is
/// throttled to stay polite towards the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,

    /// Requests allowed in a single burst
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitConfig {
    /// Create the default configuration (10 req/s, burst of 5)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 5,
        }
    }

    /// Set sustained requests per second
    #[must_use]
    pub const fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Set burst size
    #[must_use]
    pub const fn burst_size(mut self, burst: u32) -> Self {
        self.burst_size = burst;
        self
    }

    /// Governor quota for this configuration; zero values are clamped to one
    #[must_use]
    pub fn quota(&self) -> Quota {
        Quota::per_second(NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN))
    }
}
