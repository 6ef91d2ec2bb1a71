//! Shared-lock demonstration.
//!
//! `type_a_message` and `send_keys` share the keyboard lock and never overlap.
//! `move_mouse` holds its own lock and runs alongside them.
//!
//! Run with: `cargo run --example uses_lock`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use call_decorators::logging::{self, LogConfig};
use call_decorators::{named, shared_lock, uses_lock, uses_lock_on, Call, Decorator};

fn device_action(name: &'static str, seconds: u64) -> impl Fn(()) + Send + Sync {
    move |_| {
        tracing::info!("Starting {name}");
        thread::sleep(Duration::from_secs(seconds));
        tracing::info!("Returning from {name}.");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env().with_thread_names(true).with_target(false))?;

    let keyboard_lock = shared_lock();
    let mouse_lock = shared_lock();

    let keyboard = uses_lock(Some(keyboard_lock))?;
    let type_a_message = Arc::new(keyboard.decorate(named(
        "type_a_message",
        device_action("type_a_message", 1),
    )));
    let send_keys = Arc::new(keyboard.decorate(named("send_keys", device_action("send_keys", 3))));
    let move_mouse = Arc::new(uses_lock_on(
        named("move_mouse", device_action("move_mouse", 5)),
        Some(mouse_lock),
    )?);

    tracing::info!("Starting threads");
    let mut handles = Vec::new();
    for i in 1..=3 {
        let f = type_a_message.clone();
        handles.push(
            thread::Builder::new()
                .name(format!("type_a_message #{i}"))
                .spawn(move || f.call(()))?,
        );
        let f = send_keys.clone();
        handles.push(
            thread::Builder::new()
                .name(format!("send_keys #{i}"))
                .spawn(move || f.call(()))?,
        );
        let f = move_mouse.clone();
        handles.push(
            thread::Builder::new()
                .name(format!("move_mouse #{i}"))
                .spawn(move || f.call(()))?,
        );
    }

    tracing::info!("Waiting for threads");
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("a worker thread panicked");
        }
    }

    tracing::info!("Threads complete.");
    Ok(())
}
