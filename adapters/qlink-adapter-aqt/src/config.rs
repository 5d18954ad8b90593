//! Connection and polling configuration.

use std::time::Duration;

use crate::error::{AqtError, AqtResult};

/// AQT gateway base URL.
pub const BASE_HOSTNAME: &str = "https://gateway.aqt.eu/marmot";

/// Environment variable holding the API key.
pub const TOKEN_ENV: &str = "AQT_TOKEN";

/// Environment variable overriding [`BASE_HOSTNAME`].
pub const BASE_URL_ENV: &str = "AQT_BASE_URL";

/// Bound on the job polling loop.
///
/// Polling stops with a timeout once either `timeout` has elapsed or
/// `max_polls` status queries have been made, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two status queries.
    pub interval: Duration,
    /// Wall-clock bound on the whole poll loop.
    pub timeout: Option<Duration>,
    /// Bound on the number of status queries.
    pub max_polls: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            timeout: Some(Duration::from_secs(300)),
            max_polls: None,
        }
    }
}

impl PollPolicy {
    /// Poll without any bound until the job finishes.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
            max_polls: None,
        }
    }

    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the wall-clock timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of status queries.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Whether another poll would exceed the bound.
    pub fn is_exhausted(&self, polls: u32, elapsed: Duration) -> bool {
        self.max_polls.is_some_and(|max| polls >= max)
            || self.timeout.is_some_and(|timeout| elapsed >= timeout)
    }
}

/// Configuration of an AQT device connection.
#[derive(Clone)]
pub struct AqtConfig {
    /// Explicit API key; falls back to `AQT_TOKEN` when `None`.
    pub api_key: Option<String>,
    /// Gateway base URL (without target path).
    pub base_url: String,
    /// Job polling bound.
    pub poll: PollPolicy,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for AqtConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_HOSTNAME.to_string(),
            poll: PollPolicy::default(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl AqtConfig {
    /// Default configuration with `AQT_BASE_URL` applied if set.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| BASE_HOSTNAME.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the gateway base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the polling policy.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}

impl std::fmt::Debug for AqtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AqtConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("poll", &self.poll)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Pick the explicit key, else the environment key. Empty keys count as absent.
pub fn resolve_api_key(explicit: Option<String>, env: Option<String>) -> AqtResult<String> {
    explicit
        .filter(|key| !key.is_empty())
        .or_else(|| env.filter(|key| !key.is_empty()))
        .ok_or(AqtError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key(Some("explicit".into()), Some("env".into())).unwrap();
        assert_eq!(key, "explicit");
    }

    #[test]
    fn test_env_key_fallback() {
        let key = resolve_api_key(None, Some("env".into())).unwrap();
        assert_eq!(key, "env");
        let key = resolve_api_key(Some(String::new()), Some("env".into())).unwrap();
        assert_eq!(key, "env");
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(
            resolve_api_key(None, None),
            Err(AqtError::MissingToken)
        ));
        assert!(matches!(
            resolve_api_key(Some(String::new()), Some(String::new())),
            Err(AqtError::MissingToken)
        ));
    }

    #[test]
    fn test_default_poll_policy_is_bounded() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert!(!policy.is_exhausted(1_000_000, Duration::from_secs(299)));
        assert!(policy.is_exhausted(0, Duration::from_secs(300)));
    }

    #[test]
    fn test_max_polls_bound() {
        let policy = PollPolicy::unbounded(Duration::ZERO).with_max_polls(3);
        assert!(!policy.is_exhausted(2, Duration::from_secs(3600)));
        assert!(policy.is_exhausted(3, Duration::ZERO));
    }

    #[test]
    fn test_unbounded_never_exhausts() {
        let policy = PollPolicy::unbounded(Duration::from_millis(10));
        assert!(!policy.is_exhausted(u32::MAX, Duration::from_secs(u64::from(u32::MAX))));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = AqtConfig::default().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains(BASE_HOSTNAME));
    }
}
