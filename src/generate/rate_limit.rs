// Sliding-window rate limiter for generation requests
// An injectable value owned by the composition root; no global instance

use crate::generate::GenerateError;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rejects requests once `max_requests` have been recorded inside the
/// sliding `window`
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: VecDeque<Instant>,
}

impl RateLimiter {
    /// Reference configuration: 10 requests per 60-second window
    pub fn default_policy() -> Self {
        Self::new(10, Duration::from_secs(60))
    }

    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: VecDeque::new(),
        }
    }

    /// Whether a request would currently be admitted (records nothing)
    pub fn can_make_request(&mut self) -> bool {
        self.can_make_request_at(Instant::now())
    }

    /// Record a request, or fail with the cooldown in whole seconds
    pub fn check(&mut self) -> Result<(), GenerateError> {
        self.check_at(Instant::now())
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.requests.front() {
            if now.duration_since(oldest) >= self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }
    }

    pub(crate) fn can_make_request_at(&mut self, now: Instant) -> bool {
        self.prune(now);
        self.requests.len() < self.max_requests
    }

    pub(crate) fn check_at(&mut self, now: Instant) -> Result<(), GenerateError> {
        self.prune(now);
        if self.requests.len() >= self.max_requests {
            // Oldest recorded request decides when a slot frees up
            let remaining = match self.requests.front() {
                Some(&oldest) => self.window.saturating_sub(now.duration_since(oldest)),
                None => self.window,
            };
            return Err(GenerateError::RateLimitExceeded {
                retry_after_secs: remaining.as_secs_f64().ceil() as u64,
            });
        }
        self.requests.push_back(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_the_quota() {
        let mut limiter = RateLimiter::new(10, Duration::from_secs(60));
        let now = Instant::now();

        for _ in 0..10 {
            assert!(limiter.check_at(now).is_ok());
        }
        assert!(!limiter.can_make_request_at(now));
        assert!(matches!(
            limiter.check_at(now),
            Err(GenerateError::RateLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_window_elapse_frees_slots() {
        let mut limiter = RateLimiter::new(10, Duration::from_secs(60));
        let now = Instant::now();

        for _ in 0..10 {
            limiter.check_at(now).unwrap();
        }
        assert!(!limiter.can_make_request_at(now + Duration::from_secs(59)));
        assert!(limiter.can_make_request_at(now + Duration::from_secs(60)));
        assert!(limiter.check_at(now + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn test_cooldown_reports_whole_seconds() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        limiter.check_at(now).unwrap();

        match limiter.check_at(now + Duration::from_secs(10)) {
            Err(GenerateError::RateLimitExceeded { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 50);
            }
            other => panic!("expected rate limit error, got {other:?}"),
        }
    }

    #[test]
    fn test_sliding_window_is_per_request() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();

        limiter.check_at(now).unwrap();
        limiter.check_at(now + Duration::from_secs(30)).unwrap();
        // First slot frees at t=60, second at t=90
        assert!(limiter.check_at(now + Duration::from_secs(59)).is_err());
        assert!(limiter.check_at(now + Duration::from_secs(60)).is_ok());
    }
}
