pub mod pocket;
pub mod provider;

use crate::audio::cache::ClipCache;
use crate::config::Config;
use anyhow::Context;
use provider::TtsSession;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_BACKEND: &str = "pocket-tts";

/// An open synthesis session plus the clip cache. The model and voice state
/// are loaded exactly once, when the narrator is opened.
pub struct Narrator {
    session: Box<dyn TtsSession>,
    cache: ClipCache,
    backend_name: String,
    settings_json: String,
}

impl Narrator {
    pub fn open(config: &Config, backend_override: &Option<String>) -> anyhow::Result<Self> {
        let backend_name = backend_override
            .clone()
            .or_else(|| config.tts.backend.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

        let backend = provider::select_backend(&backend_name)?;
        let session = backend
            .open_session(&config.tts)
            .with_context(|| format!("open {backend_name} session"))?;

        let cache_dir = config.default_cache_dir()?;
        let (max_size_bytes, max_entries) = config.cache_limits();
        let settings_json = serde_json::to_string(&config.tts).context("serialize tts config")?;

        Ok(Self {
            session,
            cache: ClipCache::new(cache_dir, max_size_bytes, max_entries),
            backend_name,
            settings_json,
        })
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.session.sample_rate()
    }

    /// Synthesize one narration text, consulting the clip cache first.
    pub fn synthesize(&self, text: &str) -> anyhow::Result<Vec<u8>> {
        let key = ClipCache::key(&self.backend_name, text, &self.settings_json);
        if let Some(bytes) = self.cache.get(&key) {
            tracing::debug!(key = %key, "clip cache hit");
            return Ok(bytes);
        }

        let audio = self
            .session
            .synthesize(text)
            .with_context(|| format!("synthesize with {}", self.backend_name))?;

        if let Err(err) = self.cache.put(&key, &audio) {
            tracing::debug!(error = ?err, "cache write failed");
        }

        Ok(audio)
    }
}

#[derive(Debug, Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelsInfo {
    pub backends: Vec<BackendInfo>,
    pub cache_dir: Option<PathBuf>,
}

pub fn models_info() -> anyhow::Result<ModelsInfo> {
    let config = Config::load()?;
    let cache_dir = config.default_cache_dir().ok();

    let backends = vec![BackendInfo {
        name: DEFAULT_BACKEND.to_string(),
        available: cfg!(feature = "pocket-tts-backend"),
    }];

    Ok(ModelsInfo {
        backends,
        cache_dir,
    })
}
