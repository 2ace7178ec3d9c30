//! Reference word-list loading.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Load a plain-text word list (one word per line) into a lowercase set.
/// Blank lines are dropped.
pub fn load_word_set(path: &Path) -> io::Result<HashSet<String>> {
    let contents = fs::read_to_string(path)?;
    let words: HashSet<String> = contents
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect();
    tracing::debug!(path = %path.display(), words = words.len(), "loaded word list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_word_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Autism\n  sensory  \n\nDIAGNOSIS").unwrap();

        let words = load_word_set(file.path()).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains("autism"));
        assert!(words.contains("sensory"));
        assert!(words.contains("diagnosis"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_word_set(Path::new("/nonexistent/words.txt")).is_err());
    }
}
