//! # Call Decorators
//!
//! Wrappers that add behavior around a callable without touching its body.
//!
//! Every wrapper takes a callable with a fixed argument type (a tuple when there
//! are several arguments) and exposes the same signature through the [`Call`]
//! trait, so wrappers nest and can be turned back into closures with
//! [`Call::into_fn`].
//!
//! ## Quick Start
//!
//! ```rust
//! use call_decorators::{log_call, shared_lock, uses_lock_on, Call, Failure};
//!
//! fn double(i: i64) -> Result<i64, Failure> {
//!     Ok(i * 2)
//! }
//!
//! // Serialize calls on a lock, then log each call
//! let lock = shared_lock();
//! let locked = uses_lock_on(double, Some(lock)).unwrap();
//! let logged = log_call(locked);
//!
//! assert_eq!(logged.call(21), Ok(42));
//! assert_eq!(Call::<i64>::name(&logged), "double");
//! ```
//!
//! ## Decorators
//!
//! - [`log_call`] - log calls, returns and errors; errors pass through unchanged
//! - [`uses_lock`] / [`uses_lock_on`] - run a callable while holding a shared lock
//! - [`CategoryCollection`] - register callables, broadcast to them, query predicate violations
//! - [`default_on_fail`] / [`default_on_fail_on`] - coerce results, substitute a default on recoverable failures
//!
//! ## Observing decorators
//!
//! All records go through `tracing`. Each wrapper also accepts a [`Tracer`]
//! whose callback receives every [`DecoratorEvent`] it emits.

mod category;
mod decorator;
mod decorator_error;
mod decorator_event;
mod default_on_fail;
mod log_call;
mod tracer;
mod uses_lock;
mod value;

#[cfg(feature = "subscriber")]
pub mod logging;

pub use category::{CallAll, CategoryCollection, Registered};
pub use decorator::{named, stack, Call, Composed, Decorator, Named};
pub use decorator_error::{ConfigError, Failure, FailureKind, Recoverable};
pub use decorator_event::{DecoratorEvent, EventLevel};
pub use default_on_fail::{
    default_on_fail, default_on_fail_on, Coerced, DefaultOnFail, DefaultOnFailBuilder,
};
pub use log_call::{log_call, LogCall, LogCalls};
pub use tracer::{TraceCallback, Tracer};
pub use uses_lock::{
    lock_id, shared_lock, uses_lock, uses_lock_on, Locked, SharedLock, UsesLock, UsesLockBuilder,
};
pub use value::{TargetType, Value};
