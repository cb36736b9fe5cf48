//! Input normalisation

/// Splits a line into lowercase words, dropping surrounding and repeated
/// whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
