//! Simulated network latency.

use std::time::Duration;

/// Kind of repository call, each with its own delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Fetch one record by id.
    Lookup,
    /// Fetch a whole collection.
    List,
    /// Filtered scan.
    Search,
    /// Create, update or delete.
    Write,
}

/// Per-operation delays applied before every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub lookup: Duration,
    pub list: Duration,
    pub search: Duration,
    pub write: Duration,
    pub enabled: bool,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            lookup: Duration::from_millis(200),
            list: Duration::from_millis(300),
            search: Duration::from_millis(400),
            write: Duration::from_millis(350),
            enabled: true,
        }
    }
}

impl Latency {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Build from millisecond values.
    pub fn from_millis(lookup: u64, list: u64, search: u64, write: u64) -> Self {
        Self {
            lookup: Duration::from_millis(lookup),
            list: Duration::from_millis(list),
            search: Duration::from_millis(search),
            write: Duration::from_millis(write),
            enabled: true,
        }
    }

    pub fn for_op(&self, op: Op) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        match op {
            Op::Lookup => self.lookup,
            Op::List => self.list,
            Op::Search => self.search,
            Op::Write => self.write,
        }
    }

    /// Sleep for the delay of `op`.
    pub async fn wait(&self, op: Op) {
        let delay = self.for_op(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let latency = Latency::default();
        assert_eq!(latency.for_op(Op::Lookup), Duration::from_millis(200));
        assert_eq!(latency.for_op(Op::Search), Duration::from_millis(400));
    }

    #[test]
    fn test_disabled() {
        assert_eq!(Latency::none().for_op(Op::Write), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_advances_clock() {
        let start = tokio::time::Instant::now();
        Latency::default().wait(Op::List).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
