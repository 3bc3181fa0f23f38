use once_cell::sync::Lazy;
use regex::Regex;

// Tokens the parser cannot handle: digits and markup-like characters
static REJECTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]|[(<\[\]&*{]").unwrap());

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ]{2,}").unwrap());

const STRIPPED_PUNCTUATION: [char; 7] = ['.', ',', ';', '?', '!', ':', '"'];

/// Contraction suffixes that are split off into their own word, in order
const CONTRACTIONS: [&str; 7] = ["'re", "'ve", "n't", "'ll", "'d", "'m", "'s"];

/// Clean a single transcript token for the parser.
///
/// Returns `None` when the token must be dropped: it contains a digit or one of
/// `( < [ ] & * {`, or nothing is left after cleaning.
pub fn validate_token(token: &str) -> Option<String> {
    if REJECTED.is_match(token) {
        return None;
    }

    let label = token.replace('_', " ");
    let mut label = MULTI_SPACE.replace_all(&label, " ").into_owned();
    label.retain(|c| !STRIPPED_PUNCTUATION.contains(&c));
    for suffix in CONTRACTIONS {
        label = label.replace(suffix, &format!(" {}", suffix));
    }
    let label = label.trim().to_lowercase();

    if label.is_empty() { None } else { Some(label) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_with_digit_is_dropped() {
        assert_eq!(validate_token("Hello,_world123!"), None);
        assert_eq!(validate_token("2020"), None);
    }

    #[test]
    fn test_markup_characters_are_dropped() {
        for token in ["(laughs)", "<noise>", "[inaudible]", "a&b", "*", "{x"] {
            assert_eq!(validate_token(token), None, "{token}");
        }
    }

    #[test]
    fn test_punctuation_and_case() {
        assert_eq!(validate_token("Hello,"), Some("hello".to_string()));
        assert_eq!(validate_token("\"Quote:\""), Some("quote".to_string()));
        assert_eq!(validate_token("wait?!"), Some("wait".to_string()));
    }

    #[test]
    fn test_underscores_become_spaces() {
        assert_eq!(validate_token("New_York"), Some("new york".to_string()));
        assert_eq!(validate_token("a__b"), Some("a b".to_string()));
    }

    #[test]
    fn test_contractions_are_split() {
        assert_eq!(validate_token("don't"), Some("do n't".to_string()));
        assert_eq!(validate_token("they're"), Some("they 're".to_string()));
        assert_eq!(validate_token("I'm"), Some("i 'm".to_string()));
        assert_eq!(validate_token("we'll"), Some("we 'll".to_string()));
        assert_eq!(validate_token("it's"), Some("it 's".to_string()));
    }

    #[test]
    fn test_empty_results_are_dropped() {
        assert_eq!(validate_token(""), None);
        assert_eq!(validate_token("..."), None);
        assert_eq!(validate_token("_"), None);
    }
}
