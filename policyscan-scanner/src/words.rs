use crate::result::WordFrequency;

#[derive(Debug, Clone)]
pub struct CounterOptions {
    /// Treat non-ASCII characters like punctuation when deciding whether a
    /// token is garbage.
    pub discard_non_ascii: bool,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            discard_non_ascii: true,
        }
    }
}

fn is_garbage(token: &str, options: &CounterOptions) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_punctuation() || (options.discard_non_ascii && !c.is_ascii()))
}

/// Case-insensitive word counts of `text`.
///
/// Tokens are split on single spaces only and upper-cased whole, so `CFC,`
/// and `CFC` are counted separately. Empty tokens and tokens made only of
/// punctuation are dropped.
pub fn count_words(text: &str, options: &CounterOptions) -> WordFrequency {
    let mut counter = WordFrequency::new();
    for word in text.split(' ') {
        if is_garbage(word, options) {
            continue;
        }
        *counter.entry(word.to_uppercase()).or_insert(0) += 1;
    }
    counter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(text: &str) -> WordFrequency {
        count_words(text, &CounterOptions::default())
    }

    #[test]
    fn test_case_folded_with_punctuation_kept() {
        let counts = count("Hello hello WORLD.");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["HELLO"], 2);
        assert_eq!(counts["WORLD."], 1);
    }

    #[test]
    fn test_punctuation_only_tokens_dropped() {
        assert!(count("--- ... !!!").is_empty());
    }

    #[test]
    fn test_embedded_punctuation_makes_distinct_keys() {
        let counts = count("CFC, cfc CFC");
        assert_eq!(counts["CFC,"], 1);
        assert_eq!(counts["CFC"], 2);
    }

    #[test]
    fn test_consecutive_spaces_tolerated() {
        let counts = count("  policy   data  ");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["POLICY"], 1);
        assert_eq!(counts["DATA"], 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(count("").is_empty());
    }

    #[test]
    fn test_non_ascii_tokens() {
        let text = "© — café";
        let counts = count(text);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["CAFÉ"], 1);

        let kept = count_words(
            text,
            &CounterOptions {
                discard_non_ascii: false,
            },
        );
        assert_eq!(kept.len(), 3);
        assert_eq!(kept["©"], 1);
        assert_eq!(kept["—"], 1);
    }

    #[test]
    fn test_whitespace_other_than_space_is_not_a_separator() {
        let counts = count("line\nbreak tab\there");
        assert_eq!(counts["LINE\nBREAK"], 1);
        assert_eq!(counts["TAB\tHERE"], 1);
    }
}
