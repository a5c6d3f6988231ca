//! Text canonicalization applied before vectorizing and gap analysis.

use crate::analysis::stopwords::Stopwords;

/// Canonicalizes extracted text: every character that is not an ASCII letter becomes a
/// separator, letters are lowercased, and whitespace runs collapse to a single space
/// (no leading or trailing space). With `stopwords`, tokens in the set are dropped.
///
/// Pure and total. `normalize(normalize(t)) == normalize(t)` for any `t`.
pub fn normalize(text: &str, stopwords: Option<&Stopwords>) -> String {
    let letters_only: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    letters_only
        .split_whitespace()
        .filter(|token| stopwords.map_or(true, |sw| !sw.contains(token)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace tokens of already-normalized text.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("Senior Rust/C++ Engineer, 5+ years!", None),
            "senior rust c engineer years"
        );
    }

    #[test]
    fn test_collapses_whitespace_and_newlines() {
        assert_eq!(normalize("  python \n\n\t sql   ", None), "python sql");
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(normalize("café résumé", None), "caf r sum");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize("", None), "");
        assert_eq!(normalize("123 !!! ---", None), "");
    }

    #[test]
    fn test_stopwords_removed_when_supplied() {
        let sw = Stopwords::english();
        assert_eq!(
            normalize("Python developer with SQL experience", Some(&sw)),
            "python developer sql experience"
        );
    }

    #[test]
    fn test_stopwords_kept_without_set() {
        assert_eq!(
            normalize("Python developer with SQL experience", None),
            "python developer with sql experience"
        );
    }

    #[test]
    fn test_idempotent() {
        let sw = Stopwords::english();
        let samples = [
            "JOHN SMITH\nSoftware Engineer -- Rust, Go & k8s",
            "a - b",
            "  The quick (brown) fox; jumps over... the lazy dog 42 times  ",
            "",
            "Ünïcödé and ASCII mixed: naïve façade",
        ];
        for sample in samples {
            let once = normalize(sample, None);
            assert_eq!(normalize(&once, None), once, "not idempotent for {sample:?}");

            let once = normalize(sample, Some(&sw));
            assert_eq!(normalize(&once, Some(&sw)), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Kubernetes, Docker; Terraform.";
        assert_eq!(normalize(text, None), normalize(text, None));
    }

    #[test]
    fn test_tokens_split_normalized_text() {
        let normalized = normalize("Rust and Go", None);
        assert_eq!(tokens(&normalized).collect::<Vec<_>>(), vec!["rust", "and", "go"]);
    }
}
