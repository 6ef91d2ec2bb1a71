//! Default-on-fail demonstration.
//!
//! Demonstrates:
//! - Coercing results to int
//! - Replacing a failed conversion with the default
//! - Replacing a failed call with the default
//!
//! Run with: `cargo run --example default_on_fail`

use call_decorators::logging::{self, LogConfig};
use call_decorators::{default_on_fail, default_on_fail_on, Call, Decorator, Failure, TargetType, Value};

fn function1(i: Value) -> Result<Value, Failure> {
    Ok(i)
}

fn function2(_: ()) -> Result<Value, Failure> {
    Err(Failure::runtime("This is an error."))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env())?;

    let function1 = default_on_fail(Some(TargetType::Int), 1i64)?.decorate(function1);
    let function2 = default_on_fail_on(function2, Some(TargetType::Int), "")?;

    tracing::info!("function1(5)     --> {:?}", function1.call(call_decorators::Value::Int(5))?);
    tracing::info!("function1(\"5\")   --> {:?}", function1.call(call_decorators::Value::from("5"))?);
    tracing::info!("function1(\"foo\") --> {:?}", function1.call(call_decorators::Value::from("foo"))?);
    tracing::info!("function2        --> {:?}", function2.call(())?);

    // building without a target type fails before anything runs
    if let Err(err) = default_on_fail(None, Value::None) {
        tracing::info!("default_on_fail(None, ..) --> {err}");
    }

    Ok(())
}
