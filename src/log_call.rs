//! Logs every call to a callable, its return value and any error it returns.
//!
//! The wrapper is purely observational: arguments and results pass through
//! untouched and errors are handed back to the caller exactly as produced.
//! A panic in the callable is logged as a failure and then resumed.
//!
//! # Examples
//!
//! ```rust
//! use call_decorators::{log_call, Call, Failure};
//!
//! fn checked_half(i: i64) -> Result<i64, Failure> {
//!     if i % 2 == 0 {
//!         Ok(i / 2)
//!     } else {
//!         Err(Failure::invalid_value(format!("{i} is odd")))
//!     }
//! }
//!
//! let logged = log_call(checked_half);
//! assert_eq!(logged.call(8), Ok(4));
//! assert!(logged.call(3).is_err());
//! ```

use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

use crate::decorator::{Call, Decorator};
use crate::decorator_event::DecoratorEvent;
use crate::tracer::{error_chain, panic_message, Tracer};

/// A callable wrapped with call logging.
#[derive(Debug, Clone)]
pub struct LogCall<F> {
    func: F,
    name: Option<String>,
    tracer: Tracer,
}

/// Wrap `func` so that its calls, returns and errors are logged.
pub fn log_call<F>(func: F) -> LogCall<F> {
    LogCall::new(func)
}

impl<F> LogCall<F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            name: None,
            tracer: Tracer::new(),
        }
    }

    /// Report `name` in log records instead of the wrapped callable's own name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_trace(mut self, callback: impl Fn(&DecoratorEvent) + Send + Sync + 'static) -> Self {
        self.tracer = Tracer::with_callback(callback);
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn inner(&self) -> &F {
        &self.func
    }
}

impl<F, A, T, E> Call<A> for LogCall<F>
where
    F: Call<A, Output = Result<T, E>>,
    T: Debug,
    E: std::error::Error + 'static,
{
    type Output = Result<T, E>;

    fn call(&self, args: A) -> Result<T, E> {
        let name = Call::<A>::name(self);
        self.tracer.emit(DecoratorEvent::Calling { name: name.clone() });

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.func.call(args))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                self.tracer.emit(DecoratorEvent::Failed {
                    name,
                    error: panic_message(&*payload),
                });
                panic::resume_unwind(payload)
            }
        };

        match outcome {
            Ok(value) => {
                self.tracer.emit(DecoratorEvent::Returning {
                    name,
                    value: format!("{value:?}"),
                });
                Ok(value)
            }
            Err(error) => {
                self.tracer.emit(DecoratorEvent::Failed {
                    name,
                    error: error_chain(&error),
                });
                Err(error)
            }
        }
    }

    fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| Call::<A>::name(&self.func))
    }
}

/// Decorator form of [`log_call`], carrying a shared tracer.
#[derive(Debug, Clone, Default)]
pub struct LogCalls {
    tracer: Tracer,
}

impl LogCalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracer(tracer: Tracer) -> Self {
        Self { tracer }
    }
}

impl<F> Decorator<F> for LogCalls {
    type Out = LogCall<F>;

    fn decorate(&self, raw: F) -> LogCall<F> {
        LogCall::new(raw).with_tracer(self.tracer.clone())
    }
}
