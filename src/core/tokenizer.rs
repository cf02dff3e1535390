use std::collections::BTreeMap;
use regex::Regex;

/// Splits method signatures into lower-case identifier words
pub struct SignatureTokenizer {
    separator_regex: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Space,
    Other,
}

impl SignatureTokenizer {
    pub fn new() -> Self {
        Self {
            separator_regex: Regex::new(r"[0-9<>$.,:()\[\]]")
                .expect("Invalid signature separator regex"),
        }
    }

    /// Occurrence count of each token of the signature, parameter list excluded
    pub fn tokenize(&self, signature: &str) -> BTreeMap<String, u64> {
        let head = signature.split('(').next().unwrap_or_default();
        let mut counts = BTreeMap::new();

        for token in self.separator_regex
            .split(head)
            .flat_map(split_identifier)
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
        {
            *counts.entry(token).or_insert(0) += 1;
        }

        counts
    }
}

impl Default for SignatureTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn split_identifier(piece: &str) -> Vec<&str> {
    if piece.contains('_') {
        piece.split('_').collect()
    } else {
        split_camel_case(piece)
    }
}

/// Split on character class changes; `XMLParser` yields `XML`, `Parser`
fn split_camel_case(piece: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut parts = Vec::new();
    if chars.is_empty() {
        return parts;
    }

    let mut start = 0;
    let mut current = classify(chars[0].1);

    for i in 1..chars.len() {
        let class = classify(chars[i].1);
        if class == current {
            continue;
        }

        if current == CharClass::Upper && class == CharClass::Lower {
            // The last capital of an upper-case run starts the next word
            let word_start = i - 1;
            if word_start > start {
                parts.push(&piece[chars[start].0..chars[word_start].0]);
                start = word_start;
            }
        } else {
            parts.push(&piece[chars[start].0..chars[i].0]);
            start = i;
        }
        current = class;
    }

    parts.push(&piece[chars[start].0..]);
    parts
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}
