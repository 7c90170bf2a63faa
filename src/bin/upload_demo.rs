// src/bin/upload_demo.rs

// walks one "upload" event through a short sequence of real-time calls

use std::thread;
use std::time::Duration;

use event_limiter::{EventLimiter, EventLimiterError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), EventLimiterError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let limiter = EventLimiter::default();
    limiter.register_event("upload", 1, 15.0, true)?;

    // (delay before the call in seconds, user)
    let script = [
        (0.0, "a"),  // true
        (2.0, "a"),  // false
        (0.0, "b"),  // true
        (15.0, "a"), // true
        (0.1, "b"),  // true
        (10.0, "a"), // false
        (0.0, "b"),  // false
        (0.0, "c"),  // true
    ];

    for (delay, user) in script {
        thread::sleep(Duration::from_secs_f64(delay));
        let allowed = limiter.check_call("upload", user)?;
        info!(user, allowed, "upload");
    }

    Ok(())
}
