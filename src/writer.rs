use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{runtime_error, Record, RecorderErr, RecorderResult};
use sea_recorder_runtime::spawn_blocking;

#[derive(Debug, Clone)]
/// Appends records to a JSON Lines file.
///
/// The file is opened in append mode, written and closed on every call, so it is always
/// consistent in between writes and can be rotated or inspected externally. The blocking write
/// runs on the runtime's blocking pool.
pub struct RecordWriter {
    path: Arc<PathBuf>,
}

impl RecordWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. Resolves once the line has been handed to the OS, or failed.
    pub async fn append(&self, record: &Record) -> RecorderResult<()> {
        let mut line = serde_json::to_string(record).map_err(RecorderErr::Json)?;
        line.push('\n');
        let path = self.path.clone();
        spawn_blocking(move || append_line(&path, line.as_bytes()))
            .await
            .map_err(runtime_error)?
    }
}

fn append_line(path: &Path, line: &[u8]) -> RecorderResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(RecorderErr::IoError)?;
    file.write_all(line).map_err(RecorderErr::IoError)
}
