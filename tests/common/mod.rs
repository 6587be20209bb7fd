#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use dotenv_shells::{Basic, ParseError, Shell};

/// Build a lookup table from string pairs.
pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Basic decoder that only knows `HOME=/home/me`.
pub fn basic() -> Basic<HashMap<String, String>> {
    Basic::new(vars(&[("HOME", "/home/me")]))
}

pub fn parse(line: &str) -> Result<(String, String), ParseError> {
    basic().parse_line(line)
}

/// Assert `line` decodes to `(key, value)`.
pub fn assert_line(line: &str, key: &str, value: &str) {
    let (k, v) = parse(line).unwrap_or_else(|e| panic!("line {line:?}: {e}"));
    assert_eq!(k, key, "key of line {line:?}");
    assert_eq!(v, value, "value of line {line:?}");
}

/// Write `content` to a fresh file under the system temp directory.
pub fn temp_env_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dotenv-shells-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write temp file");
    path
}
