//! JSONL transcript writer for answer events.
//!
//! Each [`AnswerEvent`] becomes one JSON line: the payload fields plus
//! `type` and `timestamp`. The file is opened in append mode so restarts
//! extend the same transcript.

use serde_json::{Map, Value};
use sma_application::ports::answer_logger::{AnswerEvent, AnswerLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line.
pub struct JsonlAnswerLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAnswerLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; answering must not
    /// depend on the transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: AnswerEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => Map::from_iter([("data".to_string(), other)]),
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl AnswerLogger for JsonlAnswerLogger {
    fn log(&self, event: AnswerEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock()
            && let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush())
        {
            warn!("Transcript write to {} failed: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlAnswerLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
