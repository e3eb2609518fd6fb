//! Fuzz target for the word tokenizer.
//!
//! Tokens must come out ordered, disjoint, in bounds, and the scan must
//! never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use spellmark::tokenize;

fuzz_target!(|data: &str| {
    let total = data.chars().count();
    let mut last_end = 0;
    for token in tokenize(data) {
        assert!(token.start >= last_end);
        assert!(token.len > 0);
        last_end = token.end();
        assert!(last_end <= total);
    }
});
