use crate::config::TtsConfig;
use anyhow::bail;

use super::pocket::PocketTtsBackend;

/// A synthesis backend. Opening a session loads the model and resolves the
/// voice conditioning state once; the session is then reused for every clip
/// in a run.
pub trait TtsBackend: Send + Sync {
    fn name(&self) -> &str;
    fn open_session(&self, config: &TtsConfig) -> anyhow::Result<Box<dyn TtsSession>>;
}

pub trait TtsSession {
    fn sample_rate(&self) -> u32;
    /// Synthesize one narration text into a complete WAV container.
    fn synthesize(&self, text: &str) -> anyhow::Result<Vec<u8>>;
}

pub fn select_backend(name: &str) -> anyhow::Result<Box<dyn TtsBackend>> {
    match name {
        "pocket-tts" => {
            #[cfg(feature = "pocket-tts-backend")]
            {
                Ok(Box::new(PocketTtsBackend::new()))
            }
            #[cfg(not(feature = "pocket-tts-backend"))]
            {
                bail!("pocket-tts backend not enabled; rebuild with --features pocket-tts-backend")
            }
        }
        _ => bail!("unknown backend: {name}"),
    }
}
