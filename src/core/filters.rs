use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::config::FilterConfig;
use crate::error::{PreprocessError, Result};

/// Static exclusion lists read once at startup
#[derive(Debug, Clone, Default)]
pub struct FilterLists {
    /// Values never counted
    pub words: HashSet<String>,

    /// Signature prefixes dropped when filtering is enabled
    pub packages: Vec<String>,
}

impl FilterLists {
    pub fn new<W, P>(words: W, packages: P) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn load<W: AsRef<Path>, P: AsRef<Path>>(words_file: W, packages_file: P) -> Result<Self> {
        let words = read_list(words_file.as_ref())?;
        let packages = read_list(packages_file.as_ref())?;

        debug!("Loaded {} filtered words and {} filtered packages", words.len(), packages.len());

        Ok(Self::new(words, packages))
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::load(&config.words_file, &config.packages_file)
    }
}

fn read_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| PreprocessError::FilterList {
        path: path.to_path_buf(),
        source,
    })?;

    // An empty prefix would match every signature
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Decides whether an extracted value carries too little information to count
#[derive(Debug, Clone)]
pub struct ValueFilter {
    words: HashSet<String>,
}

impl ValueFilter {
    pub fn new(lists: &FilterLists) -> Self {
        Self { words: lists.words.clone() }
    }

    pub fn excludes(&self, value: &str) -> bool {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => true,
            (Some(c), None) if c.is_alphabetic() => true,
            _ => self.words.contains(value),
        }
    }
}

/// Drops test and assertion signatures, and signatures of excluded packages
#[derive(Debug, Clone)]
pub struct SignatureFilter {
    enabled: bool,
    packages: Vec<String>,
}

impl SignatureFilter {
    pub fn new(enabled: bool, lists: &FilterLists) -> Self {
        Self {
            enabled,
            packages: lists.packages.clone(),
        }
    }

    pub fn should_drop(&self, signature: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let lowered = signature.to_lowercase();
        if lowered.contains("test") || lowered.contains("assert") {
            return true;
        }

        self.packages.iter().any(|package| signature.starts_with(package.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> FilterLists {
        FilterLists::new(["null", "true", "x"], ["org.junit", "org.mockito."])
    }

    #[test]
    fn test_value_filter_policy() {
        let filter = ValueFilter::new(&lists());

        assert!(filter.excludes(""));
        assert!(filter.excludes("a"));
        assert!(filter.excludes("é"));
        assert!(!filter.excludes("ab"));
        assert!(!filter.excludes("7"));
        assert!(!filter.excludes("-"));
        assert!(filter.excludes("null"));
        assert!(!filter.excludes("Null"));
    }

    #[test]
    fn test_signature_filter_disabled_keeps_everything() {
        let filter = SignatureFilter::new(false, &lists());

        assert!(!filter.should_drop("com.example.TestFoo.bar()"));
        assert!(!filter.should_drop("org.junit.Assert.assertEquals(Object,Object)"));
    }

    #[test]
    fn test_signature_filter_enabled() {
        let filter = SignatureFilter::new(true, &lists());

        assert!(filter.should_drop("com.example.TestFoo.bar()"));
        assert!(filter.should_drop("com.example.Foo.assertEquals()"));
        assert!(filter.should_drop("com.example.Foo.ASSERTthat()"));
        assert!(filter.should_drop("org.mockito.Mockito.when(Object)"));
        assert!(filter.should_drop("org.junitx.Helper.run()"));
        assert!(!filter.should_drop("com.example.Foo.bar(int)"));
        assert!(!filter.should_drop("com.org.junit.Foo.bar()"));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let packages = dir.path().join("packages.txt");
        std::fs::write(&words, "null\n  none  \n\n").unwrap();
        std::fs::write(&packages, "org.junit\n\n").unwrap();

        let lists = FilterLists::load(&words, &packages).unwrap();
        assert_eq!(lists.words.len(), 2);
        assert!(lists.words.contains("none"));
        assert_eq!(lists.packages, vec!["org.junit".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FilterLists::load(dir.path().join("a.txt"), dir.path().join("b.txt")).unwrap_err();
        assert!(matches!(err, PreprocessError::FilterList { .. }));
    }
}
