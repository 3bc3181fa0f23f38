use super::validate_token;

/// Longest sentence, in words, handed to the parser
pub const MAX_SENTENCE_WORDS: usize = 300;

/// Settings for turning raw transcript text into parser-ready sentences
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Words kept per sentence; the remainder is dropped
    pub max_words: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            max_words: MAX_SENTENCE_WORDS,
        }
    }
}

/// Split raw text into cleaned sentences.
///
/// `!` and `?` are treated as `.`, each sentence is capped at
/// `config.max_words` words before cleaning, and sentences with no surviving
/// tokens are omitted.
pub fn split_sentences(text: &str, config: &SplitterConfig) -> Vec<String> {
    text.split(['.', '!', '?'])
        .filter_map(|sentence| clean_sentence(sentence, config.max_words))
        .collect()
}

/// Cap and clean a single candidate sentence
pub fn clean_sentence(sentence: &str, max_words: usize) -> Option<String> {
    let tokens: Vec<String> = sentence
        .split_whitespace()
        .take(max_words)
        .filter_map(validate_token)
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        split_sentences(text, &SplitterConfig::default())
    }

    #[test]
    fn test_split_on_terminators() {
        assert_eq!(
            split("Hi there. How are you?? Fine!"),
            vec!["hi there", "how are you", "fine"]
        );
    }

    #[test]
    fn test_sentences_without_valid_tokens_are_omitted() {
        assert_eq!(split("Um. 123. [noise]. Okay"), vec!["um", "okay"]);
        assert!(split("").is_empty());
        assert!(split("...!?").is_empty());
    }

    #[test]
    fn test_long_sentences_are_truncated() {
        let long = vec!["word"; 450].join(" ");
        let sentences = split(&format!("{}. short one.", long));
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].split_whitespace().count(), MAX_SENTENCE_WORDS);
        assert_eq!(sentences[1], "short one");
    }

    #[test]
    fn test_cap_applies_before_cleaning() {
        let config = SplitterConfig { max_words: 3 };
        assert_eq!(split_sentences("one 2 three four", &config), vec!["one three"]);
    }

    #[test]
    fn test_newlines_separate_words() {
        assert_eq!(split("so\nI\tthink so"), vec!["so i think so"]);
    }
}
