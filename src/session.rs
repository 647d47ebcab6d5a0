use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assistant::{Assistant, Task, TextGenerator};

pub const AWAITING_UPLOAD: &str = "Awaiting Upload";

/// Which text the reader is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Original,
    Summary,
    Translation,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Original => "Original",
            View::Summary => "Summary",
            View::Translation => "Translation",
        }
    }
}

/// Per-user state: the loaded file, cached assistant output and the active view.
#[derive(Clone, Debug)]
pub struct Session {
    pub file_name: Option<String>,
    pub file_text: Option<String>,
    pub summary: Option<String>,
    pub translation: Option<String>,
    pub viewing: Option<View>,
    pub status: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            file_name: None,
            file_text: None,
            summary: None,
            translation: None,
            viewing: None,
            status: AWAITING_UPLOAD.to_string(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document. Returns `false` when the same file is already loaded.
    pub fn load_document(&mut self, name: &str, text: String) -> bool {
        if self.file_name.as_deref() == Some(name) {
            return false;
        }
        self.file_name = Some(name.to_string());
        self.file_text = Some(text);
        self.summary = None;
        self.translation = None;
        self.status = format!("File Uploaded: {name}");
        self.viewing = Some(View::Original);
        true
    }

    pub fn show_original(&mut self) {
        if self.file_text.is_some() {
            self.viewing = Some(View::Original);
        }
    }

    pub fn text_of(&self, view: View) -> Option<&str> {
        match view {
            View::Original => self.file_text.as_deref(),
            View::Summary => self.summary.as_deref(),
            View::Translation => self.translation.as_deref(),
        }
    }

    /// Text of the active view.
    pub fn current_text(&self) -> Option<&str> {
        self.viewing.and_then(|v| self.text_of(v))
    }

    /// Show the summary, generating it from the viewed text on first use.
    pub fn summarize<G: TextGenerator>(&mut self, assistant: &Assistant<G>) -> Result<()> {
        if self.file_text.is_none() {
            bail!("no document loaded");
        }
        if self.summary.is_none() {
            let source = self
                .current_text()
                .or(self.file_text.as_deref())
                .unwrap_or_default()
                .to_string();
            self.summary = Some(assistant.run(Task::Summarize, &source)?);
        }
        self.viewing = Some(View::Summary);
        Ok(())
    }

    /// Show the translation, translating the viewed text on first use.
    pub fn translate<G: TextGenerator>(&mut self, assistant: &Assistant<G>) -> Result<()> {
        let Some(view) = self.viewing else {
            bail!("nothing to translate");
        };
        if self.translation.is_none() {
            let source = self.text_of(view).unwrap_or_default().to_string();
            self.translation = Some(assistant.run(Task::Translate, &source)?);
        }
        self.viewing = Some(View::Translation);
        Ok(())
    }

    /// `{file stem}.md`, the name downloads are written under. The stem ends at the
    /// first dot; a name starting with a dot keeps the whole name as its stem.
    pub fn download_name(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let stem = name.split('.').next().filter(|s| !s.is_empty()).unwrap_or(name);
        Some(format!("{stem}.md"))
    }

    /// Write the active view to `dir` and return the written path.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let (Some(text), Some(name)) = (self.current_text(), self.download_name()) else {
            bail!("nothing to download");
        };
        let path = dir.join(name);
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "downloaded view");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::tests::Recorder;

    fn loaded() -> Session {
        let mut s = Session::new();
        s.load_document("kant.txt", "Good will".to_string());
        s
    }

    #[test]
    fn test_defaults() {
        let s = Session::new();
        assert_eq!(s.status, AWAITING_UPLOAD);
        assert!(s.viewing.is_none());
        assert!(s.current_text().is_none());
    }

    #[test]
    fn test_load_resets_cache() {
        let mut s = loaded();
        s.summary = Some("old".into());
        s.translation = Some("vecchio".into());
        assert!(!s.load_document("kant.txt", "ignored".into()));
        assert_eq!(s.summary.as_deref(), Some("old"));

        assert!(s.load_document("hume.txt", "Impressions".into()));
        assert!(s.summary.is_none() && s.translation.is_none());
        assert_eq!(s.status, "File Uploaded: hume.txt");
        assert_eq!(s.viewing, Some(View::Original));
        assert_eq!(s.current_text(), Some("Impressions"));
    }

    #[test]
    fn test_summary_is_cached() {
        let recorder = Recorder::default();
        let assistant = Assistant::new(&recorder);
        let mut s = loaded();

        s.summarize(&assistant).unwrap();
        assert_eq!(s.viewing, Some(View::Summary));
        assert_eq!(s.current_text(), Some("generated #1"));
        s.show_original();
        s.summarize(&assistant).unwrap();
        assert_eq!(recorder.calls.borrow().len(), 1);
        assert_eq!(recorder.calls.borrow()[0].1, "Summarize the following text: Good will");
    }

    #[test]
    fn test_translate_uses_viewed_text() {
        let recorder = Recorder::default();
        let assistant = Assistant::new(&recorder);
        let mut s = loaded();
        s.summarize(&assistant).unwrap();
        s.translate(&assistant).unwrap();

        assert_eq!(s.viewing, Some(View::Translation));
        assert_eq!(
            recorder.calls.borrow()[1].1,
            "Translate the following text: generated #1"
        );
        s.translate(&assistant).unwrap();
        assert_eq!(recorder.calls.borrow().len(), 2);
    }

    #[test]
    fn test_actions_need_a_document() {
        let recorder = Recorder::default();
        let assistant = Assistant::new(&recorder);
        let mut s = Session::new();
        assert!(s.summarize(&assistant).is_err());
        assert!(s.translate(&assistant).is_err());
        s.show_original();
        assert!(s.viewing.is_none());
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_download_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let s = loaded();
        assert_eq!(s.download_name().as_deref(), Some("kant.md"));
        let path = s.download(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("kant.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Good will");
        assert!(Session::new().download(dir.path()).is_err());
    }

    #[test]
    fn test_download_name_stems() {
        let mut s = Session::new();
        s.load_document("critique.of.pure.reason.txt", "x".to_string());
        assert_eq!(s.download_name().as_deref(), Some("critique.md"));
        s.load_document(".notes", "x".to_string());
        assert_eq!(s.download_name().as_deref(), Some(".notes.md"));
    }
}
