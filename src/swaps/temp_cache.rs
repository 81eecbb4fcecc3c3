/// Temporary-cache policy
///
/// Venues on this list reference accounts that drift over time (tick arrays,
/// bin arrays, ranged positions). Their routes may be reused only within a
/// short window, everything else is cached until replaced or removed.
use std::collections::HashSet;
use std::time::Duration;

/// Venues whose routing accounts change and must not be cached permanently
pub const TEMP_CACHE_DEXES: &[&str] = &[
    "Whirlpool",
    "Meteora DLMM",
    "Raydium CLMM",
    "Raydium CP",
    "Cropper",
];

pub const DEFAULT_TEMP_CACHE_DURATION: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempCachePolicy {
    labels: HashSet<String>,
    duration: Duration,
}

impl Default for TempCachePolicy {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>(), None)
    }
}

impl TempCachePolicy {
    /// Built-in labels plus `extra_labels`; `None` duration means the default.
    /// A zero duration is accepted and expires records almost immediately.
    pub fn new<I, S>(extra_labels: I, duration: Option<Duration>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: HashSet<String> = TEMP_CACHE_DEXES.iter().map(|s| s.to_string()).collect();
        labels.extend(extra_labels.into_iter().map(Into::into));
        Self {
            labels,
            duration: duration.unwrap_or(DEFAULT_TEMP_CACHE_DURATION),
        }
    }

    /// Copy of this policy with per-call additions applied
    pub fn with_overrides(&self, extra_labels: &[String], duration: Option<Duration>) -> Self {
        let mut policy = self.clone();
        policy.labels.extend(extra_labels.iter().cloned());
        if let Some(d) = duration {
            policy.duration = d;
        }
        policy
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// True if any hop goes through a temporary-cache venue
    pub fn is_temporary<S: AsRef<str>>(&self, route_labels: &[S]) -> bool {
        route_labels.iter().any(|l| self.labels.contains(l.as_ref()))
    }

    /// Expiry for a record with these labels, created at `now_ms`
    pub fn cache_until<S: AsRef<str>>(&self, route_labels: &[S], now_ms: i64) -> Option<i64> {
        if self.is_temporary(route_labels) {
            let duration_ms = i64::try_from(self.duration.as_millis()).unwrap_or(i64::MAX);
            Some(now_ms.saturating_add(duration_ms))
        } else {
            None
        }
    }
}
