//! Text normalization into stop-word-free tokens.
//!
//! The same tokenizer feeds cluster vocabularies and the trend walk, so a
//! term counted in one is matched identically in the other.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// English stop words removed from every token stream.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("markup pattern is valid"))
}

/// Check if a lowercase word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

/// Normalize raw text into lowercase alphanumeric tokens.
///
/// Angle-bracket fragments such as `<p class="x">` are dropped, every
/// character outside ASCII letters, digits and whitespace becomes a space,
/// and stop words are removed. Tokenizing the space-joined output again
/// yields the same tokens.
pub fn clean_and_tokenize(text: &str) -> Vec<String> {
    let stripped = markup_pattern().replace_all(text, " ");
    let normalized: String = stripped
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| !is_stop_word(t))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(clean_and_tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(clean_and_tokenize("").is_empty());
        assert!(clean_and_tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_strips_markup() {
        let tokens = clean_and_tokenize("<p class=\"lead\">Neural</p> <br/>networks");
        assert_eq!(tokens, vec!["neural", "networks"]);
    }

    #[test]
    fn test_tokenize_punctuation_splits_words() {
        let tokens = clean_and_tokenize("GPT-4o, state-of-the-art! e.g. OpenAI's");
        assert_eq!(tokens, vec!["gpt", "4o", "state", "art", "e", "g", "openai"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = clean_and_tokenize("The model is not what they wanted");
        assert_eq!(tokens, vec!["model", "wanted"]);
    }

    #[test]
    fn test_tokenize_contraction_fragments_removed() {
        let tokens = clean_and_tokenize("It doesn't work, we'll see");
        assert_eq!(tokens, vec!["work", "see"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters_become_separators() {
        let tokens = clean_and_tokenize("café naïve");
        assert_eq!(tokens, vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        let tokens = clean_and_tokenize("Released in 2024 with 70B parameters");
        assert_eq!(tokens, vec!["released", "2024", "70b", "parameters"]);
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let samples = [
            "<div>The Transformer architecture, introduced in 2017!</div>",
            "LLMs & RAG: what's next? <a href='x'>link</a>",
            "",
            "ÄÖÜ mixed-case TEXT with_underscores",
        ];
        for text in samples {
            let once = clean_and_tokenize(text);
            let twice = clean_and_tokenize(&once.join(" "));
            assert_eq!(once, twice, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("wouldn"));
        assert!(!is_stop_word("transformer"));
        assert!(!is_stop_word("ai"));
    }
}
