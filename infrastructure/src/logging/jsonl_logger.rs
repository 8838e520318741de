//! JSONL transcript writer for dialogue events.
//!
//! Each [`ConversationEvent`] becomes a single JSON line carrying `type`,
//! `seq` and `timestamp` next to the event's own fields:
//!
//! ```text
//! {"type":"turn_appended","seq":3,"timestamp":"...","index":2,"speaker":"Socrates",...}
//! ```

use agora_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Sink {
    writer: BufWriter<File>,
    seq: u64,
}

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex`; every line is flushed as it is written.
pub struct JsonlConversationLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create (or truncate) the transcript file, creating parent
    /// directories as needed.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;

        Ok(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = Map::new();
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert("seq".to_string(), Value::from(seq));
        record.insert("timestamp".to_string(), Value::from(timestamp));
        match event.payload {
            Value::Object(fields) => record.extend(fields),
            Value::Null => {}
            other => {
                record.insert("data".to_string(), other);
            }
        }
        Value::Object(record)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let record = Self::record(event, sink.seq);
        sink.seq += 1;

        let result = serde_json::to_writer(&mut sink.writer, &record)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(sink.writer))
            .and_then(|_| sink.writer.flush());
        if let Err(e) = result {
            warn!("Could not write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialogue.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(
            "turn_appended",
            serde_json::json!({
                "index": 0,
                "role": "user",
                "speaker": "Inquirer",
                "content": "I'm stuck deciding between two job offers.",
                "markdown": false
            }),
        ));
        logger.log(ConversationEvent::new(
            "act_transition",
            serde_json::json!({"from": "Act1_Clarify", "to": "Act2_Discuss"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }

        assert_eq!(records[0]["type"], "turn_appended");
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[0]["speaker"], "Inquirer");
        assert_eq!(records[0]["markdown"], false);

        assert_eq!(records[1]["type"], "act_transition");
        assert_eq!(records[1]["seq"], 1);
        assert_eq!(records[1]["to"], "Act2_Discuss");
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(
            "note",
            serde_json::json!("just a string"),
        ));
        logger.log(ConversationEvent::new("dialogue_complete", Value::Null));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "just a string");
        assert_eq!(records[1]["type"], "dialogue_complete");
        assert!(records[1].get("data").is_none());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("t.jsonl");

        let logger = JsonlConversationLogger::create(&path).unwrap();
        assert_eq!(logger.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_error_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlConversationLogger::create(blocker.join("t.jsonl")).is_err());
    }
}
