pub mod check;
pub mod markdown;
pub mod tree;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One screencast frame. Only `text` matters for narration; the remaining
/// fields drive the on-screen editor state and are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub selected_file: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub scroll_line: u32,
    #[serde(default)]
    pub highlights: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

#[derive(Debug, thiserror::Error)]
pub enum FrameDocError {
    #[error("frame {frame}: missing required field \"{field}\"")]
    MissingField { frame: usize, field: &'static str },
    #[error("no frames found in document")]
    Empty,
}

pub fn load(path: &Path) -> anyhow::Result<Vec<Frame>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read frames at {}", path.display()))?;
    let frames: Vec<Frame> = serde_json::from_str(&raw)
        .with_context(|| format!("parse frames at {}", path.display()))?;
    Ok(frames)
}

pub fn to_json(frames: &[Frame]) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(frames).context("serialize frames")?;
    out.push('\n');
    Ok(out)
}
