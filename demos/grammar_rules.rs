//! Predicate collection demonstration.
//!
//! Each rule is a predicate over a sentence; `violates` names the ones a
//! sentence breaks.
//!
//! Run with: `cargo run --example grammar_rules`

use call_decorators::logging::{self, LogConfig};
use call_decorators::CategoryCollection;

fn starts_with_a_capital(sentence: &str) -> bool {
    sentence
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn ends_with_punctuation(sentence: &str) -> bool {
    sentence
        .trim()
        .chars()
        .last()
        .is_some_and(|c| ".?!".contains(c))
}

fn i_is_capitalized(sentence: &str) -> bool {
    !sentence.split(' ').any(|word| word == "i")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env())?;

    let mut grammar_rules: CategoryCollection<str, bool> = CategoryCollection::new("grammar_rules");
    grammar_rules.register(starts_with_a_capital);
    grammar_rules.register(ends_with_punctuation);
    grammar_rules.register(i_is_capitalized);

    for sentence in ["i am someone!", "what is punctuation?", "foodle dee doodle dee"] {
        println!(
            "\"{sentence}\" violates: {}",
            grammar_rules.violates(sentence).join(", ")
        );
    }

    Ok(())
}
