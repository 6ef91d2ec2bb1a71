//! Integration tests for the locking decorator under real thread contention.
//!
//! NOTE: All tests use #[serial] because they measure overlap between sleeping
//! threads. Running them next to each other would only add scheduling noise.

use call_decorators::{
    named, shared_lock, uses_lock, uses_lock_on, Call, ConfigError, Decorator, DecoratorEvent,
    Tracer, UsesLock,
};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

/// Tracks how many critical sections are running at once.
#[derive(Default)]
struct Occupancy {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl Occupancy {
    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

fn busy(occupancy: Arc<Occupancy>, millis: u64) -> impl Fn(()) -> u64 + Send + Sync {
    move |_| {
        occupancy.enter();
        thread::sleep(Duration::from_millis(millis));
        occupancy.leave();
        millis
    }
}

#[test]
#[serial]
fn test_shared_lock_never_overlaps() {
    let keyboard_lock = shared_lock();
    let occupancy = Arc::new(Occupancy::default());

    let guard = uses_lock(Some(keyboard_lock)).unwrap();
    let type_a_message = Arc::new(guard.decorate(named(
        "type_a_message",
        busy(occupancy.clone(), 30),
    )));
    let send_keys = Arc::new(guard.decorate(named("send_keys", busy(occupancy.clone(), 20))));

    let start = Arc::new(Barrier::new(6));
    let mut handles = Vec::new();
    for _ in 0..3 {
        let (f, barrier) = (type_a_message.clone(), start.clone());
        handles.push(thread::spawn(move || {
            barrier.wait();
            f.call(())
        }));
        let (f, barrier) = (send_keys.clone(), start.clone());
        handles.push(thread::spawn(move || {
            barrier.wait();
            f.call(())
        }));
    }

    let mut results: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort_unstable();

    assert_eq!(results, vec![20, 20, 20, 30, 30, 30]);
    assert_eq!(occupancy.peak(), 1);
}

#[test]
#[serial]
fn test_distinct_locks_run_concurrently() {
    let keyboard_lock = shared_lock();
    let mouse_lock = shared_lock();
    let occupancy = Arc::new(Occupancy::default());

    let send_keys = Arc::new(
        uses_lock_on(named("send_keys", busy(occupancy.clone(), 200)), Some(keyboard_lock)).unwrap(),
    );
    let move_mouse = Arc::new(
        uses_lock_on(named("move_mouse", busy(occupancy.clone(), 200)), Some(mouse_lock)).unwrap(),
    );

    let start = Arc::new(Barrier::new(2));
    let keys = {
        let (f, start) = (send_keys.clone(), start.clone());
        thread::spawn(move || {
            start.wait();
            f.call(())
        })
    };
    let mouse = {
        let (f, start) = (move_mouse.clone(), start.clone());
        thread::spawn(move || {
            start.wait();
            f.call(())
        })
    };

    assert_eq!(keys.join().unwrap(), 200);
    assert_eq!(mouse.join().unwrap(), 200);
    assert_eq!(occupancy.peak(), 2);
}

#[test]
#[serial]
fn test_every_call_waits_acquires_and_releases_once() {
    let lock = shared_lock();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let tracer = Tracer::with_callback(move |e| {
        events_clone.lock().unwrap().push(e.clone());
    });

    let guard = UsesLock::builder().lock(lock).tracer(tracer).build().unwrap();
    let work = Arc::new(guard.decorate(named("work", |_: ()| {
        thread::sleep(Duration::from_millis(5))
    })));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let work = work.clone();
            thread::spawn(move || work.call(()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let captured = events.lock().unwrap();
    let count = |pred: fn(&DecoratorEvent) -> bool| captured.iter().filter(|e| pred(e)).count();
    assert_eq!(captured.len(), 12);
    assert_eq!(count(|e| matches!(e, DecoratorEvent::Waiting { .. })), 4);
    assert_eq!(count(|e| matches!(e, DecoratorEvent::Acquired { .. })), 4);
    assert_eq!(count(|e| matches!(e, DecoratorEvent::Released { .. })), 4);
}

#[test]
fn test_missing_lock_is_reported_before_any_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let result = uses_lock_on(
        move |_: ()| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        },
        None,
    );

    assert_eq!(result.err(), Some(ConfigError::MissingLock));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
