//! Email inbox on disk: a directory of `.txt` files, one body per file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::InboxError;

/// One email read from disk.
#[derive(Debug, Clone)]
pub struct EmailFile {
    pub path: PathBuf,
    pub content: String,
}

impl EmailFile {
    /// First `max_chars` characters of the body, for logging.
    pub fn preview(&self, max_chars: usize) -> String {
        self.content.chars().take(max_chars).collect()
    }
}

/// Read every `*.txt` file directly inside `dir`, sorted by path.
///
/// Subdirectories and other extensions are skipped. Files must be UTF-8.
pub async fn load_emails(dir: &Path) -> Result<Vec<EmailFile>, InboxError> {
    let read_dir_err = |source| InboxError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        let path = entry.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if is_txt && entry.file_type().await.map_err(read_dir_err)?.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    info!(count = paths.len(), dir = %dir.display(), "Found email files");

    let mut emails = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| InboxError::ReadFile {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = content.len(), "Read email");
        emails.push(EmailFile { path, content });
    }
    Ok(emails)
}
