use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A document ready for the assistant: display name plus extracted text.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

/// Flatten page text: line breaks inside a page become spaces, pages
/// (separated by form feeds) are joined by a blank line.
pub fn extract_text(raw: &str) -> String {
    raw.split('\x0c')
        .map(|page| {
            page.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Read a plain-text or Markdown document from disk.
pub fn load(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let text = extract_text(&raw);
    tracing::info!(name = %name, chars = text.len(), "loaded document");
    Ok(Document { name, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pages_and_lines() {
        let raw = "First line\nsecond line\n\x0cPage two\n  indented\n";
        assert_eq!(extract_text(raw), "First line second line\n\nPage two indented");
    }

    #[test]
    fn test_blank_pages_dropped() {
        assert_eq!(extract_text("\x0c\n\x0cOnly\x0c"), "Only");
        assert_eq!(extract_text(""), "");
    }

    #[test]
    fn test_load_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groundwork.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "Nothing can be conceived\nas good without limitation").unwrap();
        let doc = load(&path).unwrap();
        assert_eq!(doc.name, "groundwork.txt");
        assert_eq!(doc.text, "Nothing can be conceived as good without limitation");
    }

    #[test]
    fn test_load_missing() {
        let err = load(Path::new("missing/doc.txt")).unwrap_err();
        assert!(err.to_string().contains("missing/doc.txt"));
    }
}
