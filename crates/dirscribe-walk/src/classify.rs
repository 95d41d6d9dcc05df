//! Text eligibility for content consumers.

use std::path::Path;

use mime_guess::mime;

use dirscribe_core::ExclusionRules;

/// Extensions always treated as text, whatever the content-type table says.
const TEXT_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".html", ".css", ".json", ".md", ".txt", ".rs", ".py", ".toml",
    ".yaml", ".yml", ".sh", ".c", ".h", ".cpp", ".hpp", ".go", ".java", ".sql", ".ini", ".cfg",
];

/// Whether a file should have its content read as text.
///
/// Excluded suffixes are never eligible. Known source and text extensions
/// always are. Anything else is eligible when its guessed content type is
/// `text/*`.
pub fn is_text_eligible(path: &Path, exclusions: &ExclusionRules) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if exclusions.excludes_file(&name) {
        return false;
    }
    if TEXT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return true;
    }
    mime_guess::from_path(path)
        .first()
        .is_some_and(|guess| guess.type_() == mime::TEXT)
}
