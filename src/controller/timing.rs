use std::time::{Duration, Instant};

/// Fires once after input has been quiet for `delay`.
#[derive(Debug)]
pub(crate) struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the quiet period from `now`.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and report true once the deadline has passed.
    pub(crate) fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Time-boxed in-flight guard for user submissions.
///
/// The window closes after a fixed delay whether or not the fetch it guards
/// has finished.
#[derive(Debug)]
pub(crate) struct SubmitGuard {
    window: Duration,
    opened: Option<(Instant, String)>,
}

impl SubmitGuard {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            opened: None,
        }
    }

    pub(crate) fn open(&mut self, now: Instant, query: String) {
        self.opened = Some((now, query));
    }

    pub(crate) fn is_open(&self, now: Instant) -> bool {
        self.opened
            .as_ref()
            .is_some_and(|(opened_at, _)| now.duration_since(*opened_at) < self.window)
    }

    /// True when the open window guards exactly this query.
    pub(crate) fn guards(&self, query: &str) -> bool {
        self.opened
            .as_ref()
            .is_some_and(|(_, guarded)| guarded == query)
    }

    /// Close an elapsed window; true if it was open until now.
    pub(crate) fn expire(&mut self, now: Instant) -> bool {
        if self.opened.is_some() && !self.is_open(now) {
            self.opened = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn debouncer_fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(800 * MS);
        debounce.arm(t0);
        debounce.arm(t0 + 300 * MS);
        assert!(!debounce.fire_if_due(t0 + 1000 * MS));
        assert!(debounce.fire_if_due(t0 + 1100 * MS));
        assert!(!debounce.fire_if_due(t0 + 5000 * MS));
        assert!(!debounce.is_armed());
    }

    #[test]
    fn guard_closes_after_window_regardless_of_fetch() {
        let t0 = Instant::now();
        let mut guard = SubmitGuard::new(1000 * MS);
        assert!(!guard.expire(t0));
        guard.open(t0, "year=2023&page=1".to_string());
        assert!(guard.is_open(t0 + 999 * MS));
        assert!(guard.guards("year=2023&page=1"));
        assert!(!guard.expire(t0 + 999 * MS));
        assert!(guard.expire(t0 + 1000 * MS));
        assert!(!guard.is_open(t0 + 1000 * MS));
        assert!(!guard.guards("year=2023&page=1"));
    }
}
