//! Coerce a callable's result into a target type, substituting a default on failure.
//!
//! A call can fail at two points: while the callable runs and while its result
//! is converted. At either point a failure whose kind is in the configured
//! [`Recoverable`] set is logged as a warning and replaced by the default value.
//! Any other failure is returned to the caller unchanged.
//!
//! # Examples
//!
//! ```rust
//! use call_decorators::{default_on_fail, Call, Decorator, Failure, TargetType, Value};
//!
//! let to_int = default_on_fail(Some(TargetType::Int), Value::Int(1)).unwrap();
//! let function1 = to_int.decorate(|v: Value| Ok::<_, Failure>(v));
//!
//! assert_eq!(function1.call(Value::from("5")), Ok(Value::Int(5)));
//! assert_eq!(function1.call(Value::from("foo")), Ok(Value::Int(1)));
//! ```

use crate::decorator::{Call, Decorator};
use crate::decorator_error::{ConfigError, Failure, Recoverable};
use crate::decorator_event::DecoratorEvent;
use crate::tracer::Tracer;
use crate::value::{TargetType, Value};

/// A configured coercing decorator.
#[derive(Debug, Clone)]
pub struct DefaultOnFail {
    target: TargetType,
    recover: Recoverable,
    default: Value,
    tracer: Tracer,
}

#[derive(Debug, Default)]
pub struct DefaultOnFailBuilder {
    target: Option<TargetType>,
    recover: Recoverable,
    default: Value,
    tracer: Tracer,
}

impl DefaultOnFailBuilder {
    pub fn target(mut self, target: TargetType) -> Self {
        self.target = Some(target);
        self
    }

    /// Failure kinds to suppress. Defaults to every kind.
    pub fn recover(mut self, recover: Recoverable) -> Self {
        self.recover = recover;
        self
    }

    /// Value returned in place of a suppressed failure. Defaults to `Value::None`.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingTargetType`] if no target type was given.
    pub fn build(self) -> Result<DefaultOnFail, ConfigError> {
        let target = self.target.ok_or(ConfigError::MissingTargetType)?;
        Ok(DefaultOnFail {
            target,
            recover: self.recover,
            default: self.default,
            tracer: self.tracer,
        })
    }
}

impl DefaultOnFail {
    pub fn builder() -> DefaultOnFailBuilder {
        DefaultOnFailBuilder::default()
    }

    pub fn target(&self) -> TargetType {
        self.target
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

impl<F> Decorator<F> for DefaultOnFail {
    type Out = Coerced<F>;

    fn decorate(&self, raw: F) -> Coerced<F> {
        Coerced {
            func: raw,
            config: self.clone(),
        }
    }
}

/// Pre-configure a coercing decorator that recovers from every failure kind.
///
/// # Errors
///
/// [`ConfigError::MissingTargetType`] if `target` is `None`.
pub fn default_on_fail(
    target: Option<TargetType>,
    default: impl Into<Value>,
) -> Result<DefaultOnFail, ConfigError> {
    let mut builder = DefaultOnFail::builder().default_value(default);
    if let Some(target) = target {
        builder = builder.target(target);
    }
    builder.build()
}

/// Wrap `func` in one step.
///
/// # Errors
///
/// [`ConfigError::MissingTargetType`] if `target` is `None`.
pub fn default_on_fail_on<F>(
    func: F,
    target: Option<TargetType>,
    default: impl Into<Value>,
) -> Result<Coerced<F>, ConfigError> {
    Ok(default_on_fail(target, default)?.decorate(func))
}

/// A callable whose result is coerced, with recoverable failures replaced by a default.
#[derive(Debug, Clone)]
pub struct Coerced<F> {
    func: F,
    config: DefaultOnFail,
}

impl<F> Coerced<F> {
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.config.tracer = tracer;
        self
    }
}

impl<F, A> Call<A> for Coerced<F>
where
    F: Call<A, Output = Result<Value, Failure>>,
{
    type Output = Result<Value, Failure>;

    fn call(&self, args: A) -> Result<Value, Failure> {
        let config = &self.config;

        let result = match self.func.call(args) {
            Ok(result) => result,
            Err(failure) if config.recover.is_recoverable(&failure) => {
                config.tracer.emit(DecoratorEvent::ExecutionRecovered {
                    name: Call::<A>::name(self),
                    error: failure.to_string(),
                });
                return Ok(config.default.clone());
            }
            Err(failure) => return Err(failure),
        };

        let from = result.type_name();
        match result.coerce(config.target) {
            Ok(coerced) => Ok(coerced),
            Err(failure) if config.recover.is_recoverable(&failure) => {
                config.tracer.emit(DecoratorEvent::ConversionRecovered {
                    name: Call::<A>::name(self),
                    from,
                    to: config.target.name(),
                    error: failure.to_string(),
                });
                Ok(config.default.clone())
            }
            Err(failure) => Err(failure),
        }
    }

    fn name(&self) -> String {
        Call::<A>::name(&self.func)
    }
}
