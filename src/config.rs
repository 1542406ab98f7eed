use crate::frames::check::DEFAULT_MAX_CODE_LINES;
use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tts: TtsConfig,
    /// Frames JSON consumed by `generate` when no path is given on the CLI.
    #[serde(default)]
    pub frames_path: Option<PathBuf>,
    /// Directory `generate` writes WAV files into.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub cache_max_mb: Option<u64>,
    #[serde(default)]
    pub cache_max_entries: Option<usize>,
    /// Code line budget enforced by `check`.
    #[serde(default)]
    pub max_code_lines: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default = "default_allow_downloads")]
    pub allow_downloads: bool,
    #[serde(default)]
    pub pocket_tts: PocketTtsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PocketTtsConfig {
    pub variant: Option<String>,
    pub voice: Option<String>,
    pub use_metal: Option<bool>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::project_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config at {}", path.display()))?;
        config.apply_defaults();
        Ok(config)
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Self::default();
        fs::write(&path, serde_json::to_string_pretty(&config)?)?;
        Ok(path)
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.config_dir().join("frame-narrator").join("config.json"))
    }

    pub fn default_cache_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.cache_dir().join("frame-narrator"))
    }

    pub fn cache_limits(&self) -> (u64, usize) {
        let max_mb = self.cache_max_mb.unwrap_or(100);
        let max_entries = self.cache_max_entries.unwrap_or(1000);
        (max_mb * 1024 * 1024, max_entries)
    }

    pub fn frames_path(&self) -> PathBuf {
        self.frames_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("frames.json"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("audio"))
    }

    pub fn max_code_lines(&self) -> usize {
        self.max_code_lines.unwrap_or(DEFAULT_MAX_CODE_LINES)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(backend) = &self.tts.backend {
            match backend.as_str() {
                "pocket-tts" => {}
                _ => bail!("unsupported backend: {backend}"),
            }
        }

        if let Some(max_mb) = self.cache_max_mb {
            if max_mb == 0 {
                bail!("cache_max_mb must be greater than 0");
            }
        }

        if let Some(max_entries) = self.cache_max_entries {
            if max_entries == 0 {
                bail!("cache_max_entries must be greater than 0");
            }
        }

        if let Some(max_code_lines) = self.max_code_lines {
            if max_code_lines == 0 {
                bail!("max_code_lines must be greater than 0");
            }
        }

        Ok(())
    }

    fn apply_defaults(&mut self) {
        if self.tts.pocket_tts.variant.is_none() {
            self.tts.pocket_tts.variant = Some("b6369a24".to_string());
        }

        if self.tts.pocket_tts.voice.is_none() {
            self.tts.pocket_tts.voice = Some("eponine".to_string());
        }

        if self.tts.pocket_tts.use_metal.is_none() {
            self.tts.pocket_tts.use_metal = Some(false);
        }

        if self.cache_max_mb.is_none() {
            self.cache_max_mb = Some(100);
        }

        if self.cache_max_entries.is_none() {
            self.cache_max_entries = Some(1000);
        }
    }

    fn project_path() -> Option<PathBuf> {
        Some(PathBuf::from("frame-narrator.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tts: TtsConfig::default(),
            frames_path: None,
            output_dir: None,
            cache_dir: None,
            cache_max_mb: Some(100),
            cache_max_entries: Some(1000),
            max_code_lines: None,
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            backend: Some("pocket-tts".to_string()),
            voice: None,
            allow_downloads: default_allow_downloads(),
            pocket_tts: PocketTtsConfig {
                variant: Some("b6369a24".to_string()),
                voice: Some("eponine".to_string()),
                use_metal: Some(false),
            },
        }
    }
}

fn default_allow_downloads() -> bool {
    true
}
