//! Time-to-live policy for collection writes.

use std::time::Duration;

/// How a list, set, or dictionary write treats the collection's TTL.
///
/// Without an explicit duration the client's default TTL applies. The
/// refresh flag says whether a write restarts the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTtl {
    ttl: Option<Duration>,
    refresh_ttl: bool,
}

impl CollectionTtl {
    pub fn new(ttl: Option<Duration>, refresh_ttl: bool) -> Self {
        Self { ttl, refresh_ttl }
    }

    /// Use the client's default TTL and refresh it on every write.
    pub fn from_cache_ttl() -> Self {
        Self::new(None, true)
    }

    /// Use `ttl` and refresh it on every write.
    pub fn of(ttl: Duration) -> Self {
        Self::new(Some(ttl), true)
    }

    /// Refresh only when a TTL is actually provided.
    pub fn refresh_ttl_if_provided(ttl: Option<Duration>) -> Self {
        Self::new(ttl, ttl.is_some())
    }

    pub fn with_refresh_ttl_on_updates(self) -> Self {
        Self::new(self.ttl, true)
    }

    pub fn with_no_refresh_ttl_on_updates(self) -> Self {
        Self::new(self.ttl, false)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn refresh_ttl(&self) -> bool {
        self.refresh_ttl
    }

    pub fn to_seconds(&self) -> Option<u64> {
        self.ttl.map(|t| t.as_secs())
    }

    /// Saturates at `u64::MAX`.
    pub fn to_milliseconds(&self) -> Option<u64> {
        self.ttl
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
    }

    /// The TTL a request should carry, filling in `default` when absent.
    pub(crate) fn resolve(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }
}

impl Default for CollectionTtl {
    fn default() -> Self {
        Self::from_cache_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cache_ttl() {
        let ttl = CollectionTtl::from_cache_ttl();
        assert_eq!(ttl.ttl(), None);
        assert!(ttl.refresh_ttl());
        assert_eq!(ttl, CollectionTtl::default());
        assert_eq!(ttl.to_seconds(), None);
    }

    #[test]
    fn test_of() {
        let ttl = CollectionTtl::of(Duration::from_millis(90_500));
        assert!(ttl.refresh_ttl());
        assert_eq!(ttl.to_seconds(), Some(90));
        assert_eq!(ttl.to_milliseconds(), Some(90_500));
    }

    #[test]
    fn test_to_milliseconds_saturates() {
        assert_eq!(CollectionTtl::of(Duration::MAX).to_milliseconds(), Some(u64::MAX));
        assert_eq!(
            CollectionTtl::of(Duration::from_micros(500)).to_milliseconds(),
            Some(0)
        );
    }

    #[test]
    fn test_refresh_ttl_if_provided() {
        assert!(!CollectionTtl::refresh_ttl_if_provided(None).refresh_ttl());
        assert!(CollectionTtl::refresh_ttl_if_provided(Some(Duration::from_secs(1))).refresh_ttl());
    }

    #[test]
    fn test_refresh_toggles_keep_duration() {
        let base = CollectionTtl::of(Duration::from_secs(10));
        let off = base.with_no_refresh_ttl_on_updates();
        assert!(!off.refresh_ttl());
        assert_eq!(off.ttl(), Some(Duration::from_secs(10)));
        assert_eq!(off.with_refresh_ttl_on_updates(), base);
    }

    #[test]
    fn test_resolve() {
        let default = Duration::from_secs(60);
        assert_eq!(CollectionTtl::from_cache_ttl().resolve(default), default);
        assert_eq!(
            CollectionTtl::of(Duration::from_secs(5)).resolve(default),
            Duration::from_secs(5)
        );
    }
}
