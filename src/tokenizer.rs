/// Splits a sentence into lowercase words, dropping anything without a
/// letter in it (numbers, punctuation).
pub fn preprocess(sentence: &str) -> Vec<String> {
    sentence
        .split(|c: char| !is_word_char(c))
        .map(|word| word.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|word| word.chars().any(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}
