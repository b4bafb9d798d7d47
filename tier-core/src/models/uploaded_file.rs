use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Reference to a file attached in the upload branch of the data-entry step.
///
/// Only the reference is kept. The file content is never opened or checked,
/// so a `.csv` or `.json` extension is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl UploadedFile {
    /// Builds a reference from a path. The display name is the final path
    /// component, or the whole path when it has none.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            path,
            size_bytes: None,
        }
    }

    pub fn with_size(
        mut self,
        size_bytes: u64,
    ) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }
}

impl fmt::Display for UploadedFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.size_bytes {
            Some(size) => write!(f, "{} ({} bytes)", self.name, size),
            None => f.write_str(&self.name),
        }
    }
}
