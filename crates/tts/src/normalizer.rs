/// Punctuation that survives normalization
const KEPT_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Normalize input text
///
/// Lower-cases, drops everything except alphanumerics, whitespace and
/// `. , ! ? ; :`, then collapses whitespace runs to single spaces and trims.
/// Idempotent: the output is a fixed point.
///
/// Alphanumeric follows Unicode `Alphabetic`, so dependent vowel signs in
/// Indic scripts are kept.
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(c))
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Hello,   World!!",
        "a @ b",
        "\tTabs\nand\r\nnewlines\u{00a0}too ",
        "नमस्ते दुनिया",
        "வணக்கம் உலகம்!",
        "Price: $42.50 (approx.)",
        "ΣΊΣΥΦΟΣ",
        "İstanbul",
        "emoji 🎙️ mic",
        "semi;colon:and?question",
    ];

    #[test]
    fn collapses_whitespace_and_lowercases() {
        assert_eq!(normalize("Hello,   World!!"), "hello, world!!");
        assert_eq!(normalize("  leading and trailing  "), "leading and trailing");
        assert_eq!(normalize("\tTabs\nand\r\nnewlines"), "tabs and newlines");
    }

    #[test]
    fn strips_unlisted_symbols() {
        assert_eq!(normalize("Price: $42.50 (approx.)"), "price: 42.50 approx.");
        assert_eq!(normalize("emoji 🎙 mic"), "emoji mic");
        assert_eq!(normalize("semi;colon:and?question"), "semi;colon:and?question");
    }

    #[test]
    fn dropped_symbol_between_words_leaves_one_space() {
        assert_eq!(normalize("a @ b"), "a b");
        assert_eq!(normalize("x - - y"), "x y");
    }

    #[test]
    fn keeps_indic_letters() {
        let tamil = normalize("வணக்கம் உலகம்!");
        assert!(tamil.starts_with('வ'));
        assert!(tamil.ends_with('!'));
        assert!(!normalize("नमस्ते दुनिया").is_empty());
    }

    #[test]
    fn keeps_combining_vowel_signs() {
        // U+0940 and U+0BCA are Other_Alphabetic marks
        assert_eq!(normalize("की"), "की");
        assert_eq!(normalize("கொ"), "கொ");
    }

    #[test]
    fn idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not a fixed point for {sample:?}");
        }
    }

    #[test]
    fn output_alphabet() {
        for sample in SAMPLES {
            let normalized = normalize(sample);

            assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
            assert!(!normalized.contains("  "));
            assert!(
                normalized
                    .chars()
                    .all(|c| c == ' ' || c.is_alphanumeric() || KEPT_PUNCTUATION.contains(&c)),
                "unexpected character in {normalized:?}"
            );
        }
    }
}
