//! Uploaded reference files and the excerpts forwarded to the model.
//!
//! File content is opaque here: it is stored base64-encoded exactly as read
//! and only ever truncated for inclusion in a prompt.

use crate::error::{HandoverError, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

/// Coarse file kind shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
}

/// A file uploaded by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub id: String,
    pub name: String,
    /// Declared type as reported at upload time.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Base64-encoded file bytes.
    pub content: String,
    pub mime_type: String,
}

impl SourceFile {
    /// Encodes `bytes` and assigns a fresh id.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            file_type: mime_type.clone(),
            content: BASE64_STANDARD.encode(bytes),
            mime_type,
        }
    }

    pub fn kind(&self) -> FileKind {
        if self.mime_type.starts_with("image/") {
            FileKind::Image
        } else {
            FileKind::Document
        }
    }

    /// Upper-cased subtype of the declared type, `FILE` when there is none.
    pub fn type_label(&self) -> String {
        self.file_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("file")
            .to_uppercase()
    }

    pub fn is_text(&self) -> bool {
        self.mime_type.starts_with("text/")
    }

    /// Decodes the stored content.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        Ok(BASE64_STANDARD.decode(&self.content)?)
    }

    /// The prompt excerpt for this file, capped at `max_chars` characters.
    ///
    /// Text files contribute their decoded text; everything else contributes
    /// its encoded content.
    pub fn excerpt(&self, max_chars: usize) -> FileExcerpt {
        let decoded = if self.is_text() {
            self.bytes()
                .ok()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        } else {
            None
        };
        let body = decoded.as_deref().unwrap_or(&self.content);

        FileExcerpt {
            name: self.name.clone(),
            text: truncate_chars(body, max_chars).to_string(),
        }
    }
}

/// A named, truncated slice of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExcerpt {
    pub name: String,
    pub text: String,
}

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Checks a file name against an extension allow-list (case-insensitive).
pub fn is_allowed_extension(name: &str, allowed: &[String]) -> bool {
    let Some((stem, extension)) = name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty() && allowed.iter().any(|a| a.eq_ignore_ascii_case(extension))
}

/// The set of files currently available to both model calls, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_all(&mut self, files: impl IntoIterator<Item = SourceFile>) -> usize {
        let before = self.files.len();
        self.files.extend(files);
        self.files.len() - before
    }

    pub fn remove(&mut self, id: &str) -> Result<SourceFile> {
        let position = self
            .files
            .iter()
            .position(|file| file.id == id)
            .ok_or_else(|| HandoverError::not_found("file", id))?;
        Ok(self.files.remove(position))
    }

    pub fn list(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn excerpts(&self, max_chars: usize) -> Vec<FileExcerpt> {
        self.files.iter().map(|file| file.excerpt(max_chars)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["pdf", "txt", "png"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_bytes_encodes_base64() {
        let file = SourceFile::from_bytes("manual.txt", "text/plain", b"hello world");
        assert_eq!(file.content, "aGVsbG8gd29ybGQ=");
        assert_eq!(file.bytes().unwrap(), b"hello world");
        assert!(!file.id.is_empty());
    }

    #[test]
    fn test_text_excerpt_uses_decoded_text() {
        let file = SourceFile::from_bytes("manual.txt", "text/plain", b"hello world");
        assert_eq!(file.excerpt(5).text, "hello");
        assert_eq!(file.excerpt(100).text, "hello world");
        assert_eq!(file.excerpt(5).name, "manual.txt");
    }

    #[test]
    fn test_binary_excerpt_uses_encoded_content() {
        let file = SourceFile::from_bytes("report.pdf", "application/pdf", b"%PDF-1.7 body");
        let excerpt = file.excerpt(8);
        assert_eq!(excerpt.text, &file.content[..8]);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("가나다라", 2), "가나");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_kind_and_label() {
        let image = SourceFile::from_bytes("a.png", "image/png", b"x");
        assert_eq!(image.kind(), FileKind::Image);
        assert_eq!(image.type_label(), "PNG");

        let mut doc = SourceFile::from_bytes("a.bin", "", b"x");
        assert_eq!(doc.kind(), FileKind::Document);
        assert_eq!(doc.type_label(), "FILE");

        doc.file_type = "application/".to_string();
        assert_eq!(doc.type_label(), "FILE");
    }

    #[test]
    fn test_allow_list() {
        assert!(is_allowed_extension("manual.TXT", &allowed()));
        assert!(is_allowed_extension("scan.final.png", &allowed()));
        assert!(!is_allowed_extension("script.sh", &allowed()));
        assert!(!is_allowed_extension("README", &allowed()));
        assert!(!is_allowed_extension(".txt", &allowed()));
    }

    #[test]
    fn test_source_set_add_remove() {
        let mut set = SourceSet::new();
        let a = SourceFile::from_bytes("a.txt", "text/plain", b"a");
        let b = SourceFile::from_bytes("b.txt", "text/plain", b"b");
        let a_id = a.id.clone();

        assert_eq!(set.add_all(vec![a, b]), 2);
        let removed = set.remove(&a_id).unwrap();
        assert_eq!(removed.name, "a.txt");
        assert_eq!(set.len(), 1);
        assert_eq!(set.list()[0].name, "b.txt");

        assert!(set.remove(&a_id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_excerpts_keep_upload_order() {
        let mut set = SourceSet::new();
        set.add_all(vec![
            SourceFile::from_bytes("1.txt", "text/plain", b"first"),
            SourceFile::from_bytes("2.txt", "text/plain", b"second"),
        ]);
        let names: Vec<_> = set.excerpts(3).into_iter().map(|e| (e.name, e.text)).collect();
        assert_eq!(
            names,
            vec![
                ("1.txt".to_string(), "fir".to_string()),
                ("2.txt".to_string(), "sec".to_string())
            ]
        );
    }
}
