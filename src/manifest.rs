use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Index of the clips produced by one `generate` run, written into the
/// output directory next to the WAV files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    pub sample_rate: u32,
    pub clips: Vec<ClipEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipEntry {
    pub index: usize,
    pub file: String,
    pub text: String,
    pub duration_ms: u64,
}

impl Manifest {
    pub fn write(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let mut raw = serde_json::to_string_pretty(self).context("serialize manifest")?;
        raw.push('\n');
        fs::write(&path, raw).with_context(|| format!("write manifest at {}", path.display()))?;
        Ok(path)
    }

    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read manifest at {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parse manifest at {}", path.display()))
    }
}
