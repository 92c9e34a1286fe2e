//! Identifier naming: validation, case conversion, pluralisation.
//!
//! Every helper here is deterministic and total over ASCII identifiers.
//! [`CaseVariants`] derives all spellings once so that callers never
//! recompute (and never disagree about) a name's casing.

use serde::Serialize;

use crate::domain::error::DomainError;

/// A name rendered in every casing convention the mutators and templates use.
///
/// Invariant: all variants denote the same logical identifier; they are
/// derived together from one canonical name and never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CaseVariants {
    original: String,
    upper_camel: String,
    lower_camel: String,
    snake: String,
    kebab: String,
}

impl CaseVariants {
    /// Derive all variants from a canonical name.
    ///
    /// # Errors
    /// `InvalidName` when `name` is empty or not an ASCII identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let original = name.into();
        validate_identifier(&original)?;

        let words = split_words(&original);
        Ok(Self {
            upper_camel: to_pascal_case(&words),
            lower_camel: to_camel_case(&words),
            snake: words.join("_"),
            kebab: words.join("-"),
            original,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// `MyQuery`
    pub fn upper_camel(&self) -> &str {
        &self.upper_camel
    }

    /// `myQuery`
    pub fn lower_camel(&self) -> &str {
        &self.lower_camel
    }

    /// `my_query`
    pub fn snake(&self) -> &str {
        &self.snake
    }

    /// `my-query`
    pub fn kebab(&self) -> &str {
        &self.kebab
    }
}

impl std::fmt::Display for CaseVariants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

/// Check that `name` is a non-empty ASCII identifier starting with a letter.
pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid("must start with an ASCII letter"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(invalid(&format!("contains '{bad}'")));
    }
    Ok(())
}

/// English plural of a lower-, kebab- or camel-case word.
///
/// Covers the suffix rules that matter for generated command labels:
/// `-y` after a consonant, sibilants, and the plain `-s` case. A word that
/// already ends in a plural `-s` is returned unchanged.
pub(crate) fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();

    if lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    format!("{word}s")
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn to_pascal_case(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

fn to_camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lower-case words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
/// 4. **Digit to upper:** `v1Beta` → split between `1` and `B`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        // Rule 1
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_ascii_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            // Rules 2 and 4
            if (c.is_ascii_lowercase() || c.is_ascii_digit()) && next.is_ascii_uppercase() {
                current.push(c);
                words.push(current.to_ascii_lowercase());
                current.clear();
                continue;
            }

            // Rule 3
            if c.is_ascii_uppercase()
                && next.is_ascii_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_ascii_lowercase())
            {
                current.push(c);
                words.push(current.to_ascii_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_ascii_lowercase());
    }

    words
}
