//! Filename sanitization helpers

/// Sanitize filename to prevent path traversal and invalid characters.
///
/// Directory components are dropped, traversal attempts and degenerate
/// names collapse to `"file"` instead of failing: a hostile filename is
/// not a reason to reject an otherwise valid payload.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if filename_only.contains("..") {
        return "file".to_string();
    }

    let sanitized: String = filename_only
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return "file".to_string();
    }

    truncate_preserving_extension(&sanitized, MAX_FILENAME_LENGTH)
}

/// Cap a filename's length by shortening the stem; the extension survives
/// so receipts and object keys keep their file type.
fn truncate_preserving_extension(filename: &str, max_len: usize) -> String {
    if filename.chars().count() <= max_len {
        return filename.to_string();
    }

    let (stem, suffix) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            (stem, format!(".{}", ext))
        }
        _ => (filename, String::new()),
    };

    let stem_budget = max_len.saturating_sub(suffix.chars().count());
    let stem: String = stem.chars().take(stem_budget).collect();

    if stem.is_empty() {
        return "file".to_string();
    }

    format!("{}{}", stem, suffix)
}

/// Lowercased extension of a filename, empty when it has none.
pub fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
