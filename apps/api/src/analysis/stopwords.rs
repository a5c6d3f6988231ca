//! Process-wide stopword set. Loaded once at startup and never mutated.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Standard English stopword list. Contractions appear as their alphabetic stems.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words = words
            .into_iter()
            .map(|w| w.trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads a curated list: one word per line, `#` starts a comment line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword list '{}'", path.display()))?;
        let stopwords =
            Self::from_words(raw.lines().filter(|line| !line.trim_start().starts_with('#')));
        info!(
            "Loaded {} stopwords from {}",
            stopwords.len(),
            path.display()
        );
        Ok(stopwords)
    }

    /// Curated file when configured, the built-in English list otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::english()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_contains_common_words() {
        let sw = Stopwords::english();
        assert!(sw.contains("the"));
        assert!(sw.contains("with"));
        assert!(!sw.contains("python"));
    }

    #[test]
    fn test_from_words_lowercases_and_skips_blank() {
        let sw = Stopwords::from_words(["The", "  ", "AND "]);
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
    }

    #[test]
    fn test_from_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# curated list").unwrap();
        writeln!(file, "foo").unwrap();
        writeln!(file, "Bar").unwrap();

        let sw = Stopwords::from_file(file.path()).unwrap();

        assert_eq!(sw.len(), 2);
        assert!(sw.contains("bar"));
        assert!(!sw.contains("# curated list"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let missing = Path::new("/definitely/not/here/stopwords.txt");
        assert!(Stopwords::load(Some(missing)).is_err());
    }
}
