//! Command implementations.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod probe;

use doomsday::{HttpFetcher, IpswCatalog, IpswClient, RateLimitConfig, DEFAULT_PROBE_TIMEOUT};
use std::time::Duration;

use crate::cli::args::SelectionArgs;
use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Catalog API base URL
    pub api_url: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Values loaded from the config file
    pub config: Config,
}

impl Context {
    /// Create a catalog for the configured API.
    pub fn catalog(&self, selection: &SelectionArgs) -> anyhow::Result<IpswCatalog> {
        let mut builder = IpswClient::builder().base_url(&self.api_url);

        if let Some(agent) = &self.config.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(rps) = self.config.requests_per_second {
            builder = builder.rate_limit(RateLimitConfig::new().requests_per_second(rps));
        }

        Ok(IpswCatalog::new(builder.build()?).signed_only(selection.signed_only))
    }

    /// Create a download prober honouring the given timeout.
    pub fn fetcher(&self, timeout: Option<Duration>) -> anyhow::Result<HttpFetcher> {
        let mut builder = HttpFetcher::builder().timeout(timeout);

        if let Some(agent) = &self.config.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(builder.build()?)
    }

    /// Resolve the probe timeout: flag, then config, then default; 0 means none.
    pub fn probe_timeout(&self, flag: Option<u64>) -> Option<Duration> {
        let secs = flag
            .or(self.config.probe_timeout_secs)
            .unwrap_or_else(|| DEFAULT_PROBE_TIMEOUT.as_secs());

        (secs > 0).then(|| Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(config: Config) -> Context {
        Context {
            api_url: doomsday::DEFAULT_BASE_URL.to_string(),
            output_format: OutputFormat::Pretty,
            verbose: false,
            config,
        }
    }

    #[test]
    fn timeout_precedence() {
        let config = Config {
            probe_timeout_secs: Some(5),
            ..Config::default()
        };
        assert_eq!(ctx(Config::default()).probe_timeout(None), Some(Duration::from_secs(30)));
        assert_eq!(ctx(config.clone()).probe_timeout(None), Some(Duration::from_secs(5)));
        assert_eq!(ctx(config.clone()).probe_timeout(Some(9)), Some(Duration::from_secs(9)));
        assert_eq!(ctx(config).probe_timeout(Some(0)), None);
    }

    #[test]
    fn bad_api_url_is_reported() {
        let mut context = ctx(Config::default());
        context.api_url = "::not a url::".into();
        assert!(context.catalog(&SelectionArgs::default()).is_err());
    }
}
