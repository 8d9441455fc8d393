//! Utterance Normalization
//!
//! Cleans raw recognized speech before it reaches the echo filter. Speech
//! recognizers stutter: they emit "I I I want" or repeat whole phrase blocks
//! when the candidate restarts a sentence. This pass collapses exact
//! repetitions and nothing else.

/// Normalizes a final utterance: collapses stutter artifacts and restores
/// a single leading capital.
///
/// The pass is idempotent and never drops content that is not an exact
/// repeated block.
pub fn normalize(text: &str) -> String {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.to_string())
        .collect();

    if tokens.is_empty() {
        return String::new();
    }

    // Collapse immediately-adjacent identical tokens ("I I I want" -> "I want")
    let mut deduped: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if deduped.last() != Some(&token) {
            deduped.push(token);
        }
    }

    // Collapse repeated 2- and 3-word phrase blocks where the block at i
    // is immediately followed by an identical block.
    let collapsed = collapse_phrase_blocks(deduped);

    let mut result = collapsed.join(" ");
    if let Some(first) = result.get(0..1) {
        let upper = first.to_uppercase();
        result.replace_range(0..1, &upper);
    }
    result
}

fn collapse_phrase_blocks(mut tokens: Vec<String>) -> Vec<String> {
    let mut i = 0;
    while i < tokens.len() {
        let mut collapsed_here = false;
        for k in [3usize, 2] {
            if i + 2 * k <= tokens.len() && tokens[i..i + k] == tokens[i + k..i + 2 * k] {
                // Remove the second occurrence and re-check the same offset
                // so triple repeats collapse fully in one pass.
                tokens.drain(i + k..i + 2 * k);
                collapsed_here = true;
                break;
            }
        }
        if !collapsed_here {
            i += 1;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize("hello world"), "Hello world");
    }

    #[test]
    fn test_adjacent_word_stutter() {
        assert_eq!(normalize("I I I want this job"), "I want this job");
    }

    #[test]
    fn test_two_word_phrase_repeat() {
        assert_eq!(
            normalize("my background my background is in java"),
            "My background is in java"
        );
    }

    #[test]
    fn test_three_word_phrase_repeat() {
        assert_eq!(
            normalize("i worked at i worked at google for years"),
            "I worked at google for years"
        );
    }

    #[test]
    fn test_triple_repeat_collapses_fully() {
        assert_eq!(normalize("so yeah so yeah so yeah okay"), "So yeah okay");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "I I I want want this",
            "my background my background is strong",
            "clean sentence with no repeats at all",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for '{}'", input);
        }
    }

    #[test]
    fn test_non_adjacent_repeats_preserved() {
        // "good" appears twice but not as an adjacent repeated block
        assert_eq!(
            normalize("good teams build good software"),
            "Good teams build good software"
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_capitalizes_first_letter_only() {
        assert_eq!(normalize("YES THAT WAS ME"), "Yes that was me");
    }
}
