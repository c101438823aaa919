//! Candidate files offered for upload.

use bytes::Bytes;

/// File payload as handed over by the file-access collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Raw bytes, fully resident in memory.
    Bytes(Bytes),
    /// The collaborator failed to read the file (I/O fault on its side).
    /// The scanner treats this conservatively as a scan failure.
    Unavailable,
}

/// One file offered for upload. Transient: exists only for the duration of
/// an admission run and is discarded once the batch is stored or abandoned.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    pub content: FileContent,
}

impl CandidateFile {
    /// Candidate with resident content; the size is taken from the payload.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size_bytes: data.len() as u64,
            content: FileContent::Bytes(data),
        }
    }

    /// Candidate whose content could not be read. The reported size is
    /// whatever the file-selection metadata claimed.
    pub fn unavailable(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content: FileContent::Unavailable,
        }
    }

    /// Extension derived from the name: the substring after the last `.`,
    /// lower-cased, with a leading dot. A name with no dot has no extension
    /// and can never match an allow-list entry.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
    }

    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.content {
            FileContent::Bytes(data) => Some(data),
            FileContent::Unavailable => None,
        }
    }

    /// Decoded text content, if the payload is valid UTF-8. Binary assets
    /// (images, audio) return `None` and bypass content scanning.
    pub fn text(&self) -> Option<&str> {
        self.bytes().and_then(|data| std::str::from_utf8(data).ok())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.content, FileContent::Unavailable)
    }
}
