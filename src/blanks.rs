/// Derivation of fill-in-the-blank gaps from a sentence and its option list.
///
/// The sentence is tokenized on whitespace, punctuation and math-operator
/// boundaries; every token that case-insensitively equals an option becomes
/// a blank, in left-to-right order. A sentence from which no blank can be
/// derived falls back to one synthetic, non-positional blank per option.

#[derive(Debug, Clone, PartialEq)]
pub struct Blank {
    /// Canonical option text this blank expects.
    pub word: String,
    /// Byte offset of the token within the sentence.
    pub position: usize,
    /// Byte length of the token.
    pub length: usize,
    /// Punctuation immediately following the token (no operators).
    pub trailing_punctuation: String,
    pub blank_index: usize,
}

#[derive(Debug, Clone)]
pub struct BlankLayout {
    pub blanks: Vec<Blank>,
    /// False when the synthetic per-option fallback was taken; positions are
    /// then arbitrary and the sentence must not be sliced around them.
    pub positional: bool,
}

impl BlankLayout {
    pub fn correct_words(&self) -> Vec<String> {
        self.blanks.iter().map(|b| b.word.clone()).collect()
    }
}

fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\''
    )
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '=')
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || is_punctuation(c) || is_operator(c)
}

pub fn derive_blanks(sentence: &str, options: &[String]) -> BlankLayout {
    let mut blanks = Vec::new();

    if !options.is_empty() {
        let mut blank_index = 0usize;
        for (position, token) in tokens(sentence) {
            let clean = token
                .trim_end_matches(|c| is_punctuation(c) || is_operator(c))
                .to_lowercase();
            if clean.is_empty() {
                continue;
            }
            let matched = options.iter().find(|opt| opt.to_lowercase() == clean);
            if let Some(option) = matched {
                let after = &sentence[position + token.len()..];
                let trailing: String =
                    after.chars().take_while(|&c| is_punctuation(c)).collect();
                blanks.push(Blank {
                    word: option.clone(),
                    position,
                    length: token.len(),
                    trailing_punctuation: trailing,
                    blank_index,
                });
                blank_index += 1;
            }
        }
    }

    if blanks.is_empty() && !options.is_empty() {
        // Fallback policy: the sentence never names the options verbatim, so
        // give every option its own gap below the sentence instead.
        let blanks = options
            .iter()
            .enumerate()
            .map(|(i, option)| Blank {
                word: option.clone(),
                position: i * 50,
                length: option.len(),
                trailing_punctuation: String::new(),
                blank_index: i,
            })
            .collect();
        return BlankLayout {
            blanks,
            positional: false,
        };
    }

    BlankLayout {
        blanks,
        positional: true,
    }
}

/// Number of chips to materialize per option: one per blank whose word
/// matches the option, minimum one even for options that never appear.
pub fn chip_counts(layout: &BlankLayout, options: &[String]) -> Vec<usize> {
    options
        .iter()
        .map(|opt| {
            let lower = opt.to_lowercase();
            let n = layout
                .blanks
                .iter()
                .filter(|b| b.word.to_lowercase() == lower)
                .count();
            n.max(1)
        })
        .collect()
}

/// Iterate (byte_position, token) over maximal runs of non-boundary chars.
fn tokens(sentence: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in sentence.char_indices() {
        if is_boundary(c) {
            if let Some(s) = start.take() {
                out.push((s, &sentence[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &sentence[s..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn blanks_follow_sentence_order() {
        let layout = derive_blanks(
            "the quick fox jumps over the lazy dog",
            &opts(&["lazy", "quick"]),
        );
        assert!(layout.positional);
        let words: Vec<&str> = layout.blanks.iter().map(|b| b.word.as_str()).collect();
        assert_eq!(words, vec!["quick", "lazy"]);
        assert_eq!(layout.blanks[0].blank_index, 0);
        assert_eq!(layout.blanks[1].blank_index, 1);
        assert!(layout.blanks[0].position < layout.blanks[1].position);
    }

    #[test]
    fn matching_is_case_insensitive_and_canonicalizes() {
        let layout = derive_blanks("Paris is the capital", &opts(&["paris"]));
        assert_eq!(layout.blanks.len(), 1);
        // The blank carries the option text, not the sentence token.
        assert_eq!(layout.blanks[0].word, "paris");
        assert_eq!(layout.blanks[0].position, 0);
        assert_eq!(layout.blanks[0].length, 5);
    }

    #[test]
    fn punctuation_bounds_tokens() {
        let layout = derive_blanks("It is fast, very fast.", &opts(&["fast"]));
        assert_eq!(layout.blanks.len(), 2);
        assert_eq!(layout.blanks[0].trailing_punctuation, ",");
        assert_eq!(layout.blanks[1].trailing_punctuation, ".");
    }

    #[test]
    fn math_operators_bound_tokens() {
        let layout = derive_blanks("2+two=4", &opts(&["two"]));
        assert_eq!(layout.blanks.len(), 1);
        assert_eq!(layout.blanks[0].position, 2);
    }

    #[test]
    fn zero_matches_falls_back_to_one_blank_per_option() {
        let layout = derive_blanks("nothing here matches", &opts(&["alpha", "beta"]));
        assert!(!layout.positional);
        assert_eq!(layout.blanks.len(), 2);
        assert_eq!(layout.blanks[0].word, "alpha");
        assert_eq!(layout.blanks[1].word, "beta");
    }

    #[test]
    fn duplicate_words_yield_duplicate_blanks_and_chips() {
        let options = opts(&["the", "cat"]);
        let layout = derive_blanks("the cat sat on the mat", &options);
        assert_eq!(layout.blanks.len(), 3);
        assert_eq!(chip_counts(&layout, &options), vec![2, 1]);
    }

    #[test]
    fn unused_option_still_gets_one_chip() {
        let options = opts(&["cat", "dog"]);
        let layout = derive_blanks("the cat sat", &options);
        assert_eq!(layout.blanks.len(), 1);
        assert_eq!(chip_counts(&layout, &options), vec![1, 1]);
    }

    #[test]
    fn empty_options_derive_nothing() {
        let layout = derive_blanks("a sentence", &[]);
        assert!(layout.blanks.is_empty());
        assert!(layout.positional);
    }
}
