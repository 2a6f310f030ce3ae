use dashmap::DashMap;
use std::time::{Duration, Instant};

// Rate limit window - tracks requests per client key
#[derive(Debug, Clone, Copy)]
pub struct RateWindow {
    pub count: u32,
    pub window_start: Instant,
}

// Returned when a key is over quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub limit: u32,
    pub window: Duration,
    pub retry_after: Duration,
}

impl RateLimited {
    // Whole seconds for Retry-After, rounded up so waiting that long lands outside the window
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.retry_after.as_secs() + u64::from(self.retry_after.subsec_nanos() > 0);
        secs.max(1)
    }
}

// Fixed quota per key per window. Owned by the app state, one per router.
pub struct RateLimiter {
    windows: DashMap<String, RateWindow>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> Result<(), RateLimited> {
        self.check_at(key, Instant::now())
    }

    // The entry guard holds the shard lock, so read-modify-write per key is atomic
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimited> {
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(RateWindow {
                count: 0,
                window_start: now,
            });

        // window expired..? start a new one
        let elapsed = now.saturating_duration_since(entry.window_start);
        if elapsed >= self.window {
            entry.count = 1;
            entry.window_start = now;
            return Ok(());
        }

        // under limit..? allow
        if entry.count < self.limit {
            entry.count += 1;
            return Ok(());
        }

        // over limit, state stays as it is
        Err(RateLimited {
            limit: self.limit,
            window: self.window,
            retry_after: self.window - elapsed,
        })
    }

    pub fn snapshot(&self, key: &str) -> Option<RateWindow> {
        self.windows.get(key).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    // Drops every window. Used by tests to isolate runs.
    pub fn reset(&self) {
        self.windows.clear();
    }
}
