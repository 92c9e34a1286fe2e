//! Import deduplication by exact text.
//!
//! Imports are relocated rather than skipped: an import already in the file
//! is cut out and handed back for reinsertion at the canonical marker. That
//! keeps the final file at exactly one copy of each import no matter how
//! many runs asked for it.

/// `import "{path}";`
pub fn import_statement(path: &str) -> String {
    format!("import \"{path}\";")
}

/// Remove every verbatim occurrence of each candidate from `content`.
///
/// Returns the filtered content and the candidates to reinsert, first-seen
/// order, without repeats. A line holding only the statement is removed
/// together with its line ending, `\n` or `\r\n`.
pub fn dedup<S: AsRef<str>>(content: &str, candidates: &[S]) -> (String, Vec<String>) {
    let mut filtered = content.to_string();
    let mut remaining: Vec<String> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let statement = candidate.as_ref();
        if statement.is_empty() || remaining.iter().any(|r| r == statement) {
            continue;
        }

        if filtered.contains(statement) {
            filtered = filtered.replace(&format!("{statement}\r\n"), "");
            filtered = filtered.replace(&format!("{statement}\n"), "");
            filtered = filtered.replace(statement, "");
        }
        remaining.push(statement.to_string());
    }

    (filtered, remaining)
}
