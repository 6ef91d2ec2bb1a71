//! Call logging demonstration.
//!
//! Demonstrates:
//! - Logging a call and its return value
//! - Logging an error and handing it back unchanged
//!
//! Run with: `cargo run --example log_call`

use call_decorators::logging::{self, LogConfig};
use call_decorators::{log_call, Call, Failure};

fn my_test_function(is_fail: bool) -> Result<bool, Failure> {
    tracing::info!("Inside my_test_function, where is_fail={is_fail}");
    if is_fail {
        return Err(Failure::runtime("I am a scary failure!"));
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env())?;

    let logged = log_call(my_test_function);

    logged.call(false)?;
    logged.call(false)?;

    // the error comes back exactly as my_test_function produced it
    if let Err(failure) = logged.call(true) {
        println!("Caller received: {failure}");
    }

    Ok(())
}
