//! Broadcast demonstration.
//!
//! Registers a few number actions and calls all of them with one input.
//!
//! Run with: `cargo run --example call_all`

use call_decorators::logging::{self, LogConfig};
use call_decorators::CategoryCollection;

fn double(i: &i64) -> i64 {
    i * 2
}

fn half(i: &i64) -> i64 {
    i.div_euclid(2)
}

fn add_three(i: &i64) -> i64 {
    i + 3
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env())?;

    let mut actions = CategoryCollection::new("actions");
    actions.register(double);
    actions.register(half);
    actions.register(add_three);
    actions.register_named("square", |i: &i64| i.pow(2));

    println!("{} registered: {:?}", actions.category(), actions.names());
    for input in [3, 21, 99] {
        let results: Vec<i64> = actions.call_all(&input).collect();
        println!("{input:>3} -> {results:?}");
    }

    Ok(())
}
