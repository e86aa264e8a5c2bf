#![allow(dead_code)]
use sea_recorder::Json;
use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

pub fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos();
    std::env::temp_dir().join(format!("sea-recorder-{name}-{nanos}.jsonl"))
}

pub fn read_lines(path: &Path) -> Vec<Json> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            assert!(content.is_empty() || content.ends_with('\n'));
            content
                .lines()
                .map(|line| serde_json::from_str(line).expect("Not a JSON line"))
                .collect()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => panic!("{e:?}"),
    }
}

pub fn received_at(line: &Json) -> &str {
    line["received_at"].as_str().expect("received_at missing")
}
