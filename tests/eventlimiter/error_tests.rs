// tests/eventlimiter/error_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use event_limiter::{EventLimiter, EventLimiterError};

    #[test]
    fn duplicate_registration_fails() {
        let limiter = EventLimiter::new(TestClock::new(0.0));
        limiter.register_event("upload", 1, 15.0, true).unwrap();

        let result = limiter.register_event("upload", 5, 60.0, false);
        match result {
            Err(EventLimiterError::DuplicateEvent(key)) => assert_eq!(key, "upload"),
            other => panic!("Expected DuplicateEvent, got: {:?}", other),
        }
    }

    #[test]
    fn duplicate_registration_keeps_original_config() {
        let limiter = EventLimiter::new(TestClock::new(0.0));
        limiter.register_event("upload", 1, 15.0, true).unwrap();
        let _ = limiter.register_event("upload", 5, 60.0, false);

        let config = limiter.event_config("upload").unwrap();
        assert_eq!(config.get_max_calls(), 1);
        assert_eq!(config.get_unit_time(), 15.0);
        assert!(config.counts_invalid_calls());
    }

    #[test]
    fn duplicate_key_wins_over_invalid_config() {
        let limiter = EventLimiter::new(TestClock::new(0.0));
        limiter.register_event("upload", 1, 15.0, true).unwrap();

        let result = limiter.register_event("upload", 0, -1.0, true);
        assert!(matches!(result, Err(EventLimiterError::DuplicateEvent(_))));
    }

    #[test]
    fn unknown_event_fails() {
        let limiter = EventLimiter::new(TestClock::new(0.0));

        match limiter.check_call("upload", "a") {
            Err(EventLimiterError::UnknownEvent(key)) => assert_eq!(key, "upload"),
            other => panic!("Expected UnknownEvent, got: {:?}", other),
        }
        assert!(matches!(
            limiter.tracked_users("upload"),
            Err(EventLimiterError::UnknownEvent(_))
        ));
    }

    #[test]
    fn clock_error_propagates_in_check_call() {
        let clock = TestClock::new(0.0);
        let limiter = EventLimiter::new(clock.clone());
        limiter.register_event("upload", 1, 15.0, true).unwrap();

        clock.fail_next_call();
        let result = limiter.check_call("upload", "a");
        assert!(matches!(result, Err(EventLimiterError::Clock(_))));

        // nothing was recorded, so the retry is still a first call
        assert_eq!(limiter.tracked_users("upload").unwrap(), 0);
        assert!(limiter.check_call("upload", "a").unwrap());
    }

    #[test]
    fn clock_error_propagates_in_cleanup() {
        let clock = TestClock::new(0.0);
        let limiter = EventLimiter::new(clock.clone());
        limiter.register_event("upload", 1, 15.0, true).unwrap();
        limiter.check_call("upload", "a").unwrap();

        clock.set_time(100.0);
        clock.fail_next_call();
        assert!(matches!(
            limiter.cleanup_idle_users(0),
            Err(EventLimiterError::Clock(_))
        ));
        assert_eq!(limiter.tracked_users("upload").unwrap(), 1);
    }

    #[test]
    fn error_display_formatting() {
        let duplicate = EventLimiterError::DuplicateEvent("upload".to_string());
        assert_eq!(duplicate.to_string(), "event 'upload' is already registered");

        let unknown = EventLimiterError::UnknownEvent("upload".to_string());
        assert_eq!(unknown.to_string(), "event 'upload' is not registered");

        let clock = TestClock::new(0.0);
        let limiter = EventLimiter::new(clock.clone());
        limiter.register_event("upload", 1, 15.0, true).unwrap();
        clock.fail_next_call();
        let error_string = limiter.check_call("upload", "a").unwrap_err().to_string();
        assert!(error_string.to_lowercase().contains("clock"));
    }
}
