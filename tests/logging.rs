//! Integration tests for installing the global log subscriber.
//!
//! Lives in its own test binary because the subscriber is process-wide.

#![cfg(feature = "subscriber")]

use call_decorators::logging::{init, LogConfig};
use call_decorators::{log_call, Call, ConfigError, Failure};
use tracing::Level;

#[test]
fn test_second_init_is_rejected() {
    let config = LogConfig::default()
        .with_level(Level::WARN)
        .with_thread_names(true);

    assert!(init(&config).is_ok());
    assert!(matches!(init(&config), Err(ConfigError::Subscriber(_))));

    // decorators keep working with a subscriber installed
    let logged = log_call(|i: i64| Ok::<_, Failure>(i + 1));
    assert_eq!(logged.call(1), Ok(2));
}
