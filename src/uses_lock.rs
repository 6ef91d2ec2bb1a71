//! Mutual exclusion around a callable.
//!
//! Every wrapper built from the same [`SharedLock`] runs its callable while holding
//! that lock, so callables sharing a lock never overlap. Callables guarded by
//! different locks run concurrently.
//!
//! The lock is held through a scoped guard: it is released on every exit path,
//! including a panic inside the callable. A lock poisoned by such a panic is
//! recovered on the next acquisition.
//!
//! # Examples
//!
//! ```rust
//! use call_decorators::{shared_lock, uses_lock, Call, Decorator};
//!
//! let keyboard = shared_lock();
//! let guard = uses_lock(Some(keyboard.clone())).unwrap();
//!
//! let type_a_message = guard.decorate(|text: &str| text.len());
//! assert_eq!(type_a_message.call("hello"), 5);
//! ```

use std::sync::{Arc, Mutex};

use crate::decorator::{Call, Decorator};
use crate::decorator_error::ConfigError;
use crate::decorator_event::DecoratorEvent;
use crate::tracer::Tracer;

/// A mutual-exclusion primitive shared between the wrappers that must not overlap.
pub type SharedLock = Arc<Mutex<()>>;

pub fn shared_lock() -> SharedLock {
    Arc::new(Mutex::new(()))
}

/// Identity of a lock as reported in log records.
pub fn lock_id(lock: &SharedLock) -> usize {
    Arc::as_ptr(lock) as usize
}

/// A configured locking decorator; apply it with [`Decorator::decorate`].
#[derive(Debug, Clone)]
pub struct UsesLock {
    lock: SharedLock,
    tracer: Tracer,
}

#[derive(Debug, Default)]
pub struct UsesLockBuilder {
    lock: Option<SharedLock>,
    tracer: Tracer,
}

impl UsesLockBuilder {
    pub fn lock(mut self, lock: SharedLock) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingLock`] if no lock was given.
    pub fn build(self) -> Result<UsesLock, ConfigError> {
        let lock = self.lock.ok_or(ConfigError::MissingLock)?;
        Ok(UsesLock {
            lock,
            tracer: self.tracer,
        })
    }
}

impl UsesLock {
    pub fn builder() -> UsesLockBuilder {
        UsesLockBuilder::default()
    }

    pub fn lock(&self) -> &SharedLock {
        &self.lock
    }
}

impl<F> Decorator<F> for UsesLock {
    type Out = Locked<F>;

    fn decorate(&self, raw: F) -> Locked<F> {
        Locked {
            func: raw,
            lock: self.lock.clone(),
            tracer: self.tracer.clone(),
        }
    }
}

/// Pre-configure a locking decorator.
///
/// # Errors
///
/// [`ConfigError::MissingLock`] if `lock` is `None`.
pub fn uses_lock(lock: Option<SharedLock>) -> Result<UsesLock, ConfigError> {
    let mut builder = UsesLock::builder();
    if let Some(lock) = lock {
        builder = builder.lock(lock);
    }
    builder.build()
}

/// Wrap `func` with `lock` in one step.
///
/// # Errors
///
/// [`ConfigError::MissingLock`] if `lock` is `None`.
pub fn uses_lock_on<F>(func: F, lock: Option<SharedLock>) -> Result<Locked<F>, ConfigError> {
    Ok(uses_lock(lock)?.decorate(func))
}

/// A callable that runs while holding its lock.
#[derive(Debug, Clone)]
pub struct Locked<F> {
    func: F,
    lock: SharedLock,
    tracer: Tracer,
}

impl<F> Locked<F> {
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn lock(&self) -> &SharedLock {
        &self.lock
    }
}

impl<F, A> Call<A> for Locked<F>
where
    F: Call<A>,
{
    type Output = F::Output;

    fn call(&self, args: A) -> F::Output {
        let name = Call::<A>::name(self);
        let lock_id = lock_id(&self.lock);

        self.tracer.emit(DecoratorEvent::Waiting {
            name: name.clone(),
            lock_id,
        });

        let result = {
            let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
            self.tracer.emit(DecoratorEvent::Acquired {
                name: name.clone(),
                lock_id,
            });
            self.func.call(args)
        };

        self.tracer.emit(DecoratorEvent::Released { name, lock_id });
        result
    }

    fn name(&self) -> String {
        Call::<A>::name(&self.func)
    }
}
