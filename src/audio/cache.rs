use anyhow::Context;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::PathBuf;

/// On-disk cache of synthesized narration clips. Entries are WAV files named
/// by a blake3 key over the backend, the narration text, and the serialized
/// TTS settings, so a changed voice or variant never resurfaces stale audio.
#[derive(Debug, Clone)]
pub struct ClipCache {
    dir: PathBuf,
    max_size_bytes: u64,
    max_entries: usize,
}

impl ClipCache {
    pub fn new(dir: PathBuf, max_size_bytes: u64, max_entries: usize) -> Self {
        Self {
            dir,
            max_size_bytes,
            max_entries,
        }
    }

    pub fn key(backend: &str, text: &str, config_json: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(backend.as_bytes());
        hasher.update(b"\0");
        hasher.update(text.as_bytes());
        hasher.update(b"\0");
        hasher.update(config_json.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        let bytes = fs::read(&path).ok()?;
        // Touch so pruning treats this entry as recently used
        let _ = set_file_mtime(&path, FileTime::now());
        Some(bytes)
    }

    pub fn put(&self, key: &str, audio: &[u8]) -> anyhow::Result<()> {
        if audio.is_empty() || audio.len() as u64 > self.max_size_bytes {
            return Ok(());
        }

        fs::create_dir_all(&self.dir).context("create cache dir")?;
        let path = self.entry_path(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        fs::write(&tmp, audio).context("write cache temp")?;
        fs::rename(&tmp, &path).context("rename cache file")?;

        self.prune()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.wav"))
    }

    /// Evict oldest entries until both the size and entry limits hold.
    fn prune(&self) -> anyhow::Result<()> {
        if !self.dir.is_dir() {
            return Ok(());
        }

        let mut entries = Vec::new();
        let mut total_size = 0u64;
        for entry in fs::read_dir(&self.dir).context("read cache dir")? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("wav") {
                continue;
            }
            let meta = entry.metadata()?;
            total_size += meta.len();
            entries.push((path, FileTime::from_last_modification_time(&meta), meta.len()));
        }

        entries.sort_by_key(|(_, mtime, _)| *mtime);

        let mut count = entries.len();
        for (path, _, size) in entries {
            if total_size <= self.max_size_bytes && count <= self.max_entries {
                break;
            }
            let _ = fs::remove_file(&path);
            total_size = total_size.saturating_sub(size);
            count -= 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_and_miss() {
        let dir = tempdir().unwrap();
        let cache = ClipCache::new(dir.path().to_path_buf(), 1024 * 1024, 100);
        let key = ClipCache::key("pocket-tts", "hello", "{}");

        assert!(cache.get(&key).is_none());
        cache.put(&key, b"RIFFdata").unwrap();
        assert_eq!(cache.get(&key).unwrap(), b"RIFFdata");
    }

    #[test]
    fn keys_depend_on_settings() {
        let a = ClipCache::key("pocket-tts", "hello", r#"{"voice":"eponine"}"#);
        let b = ClipCache::key("pocket-tts", "hello", r#"{"voice":"alba"}"#);
        assert_ne!(a, b);
    }

    #[test]
    fn entry_limit_evicts_oldest() {
        let dir = tempdir().unwrap();
        let cache = ClipCache::new(dir.path().to_path_buf(), 1024 * 1024, 1);
        let first = ClipCache::key("pocket-tts", "one", "{}");
        let second = ClipCache::key("pocket-tts", "two", "{}");

        cache.put(&first, b"one").unwrap();
        cache.put(&second, b"two").unwrap();

        let remaining = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("wav"))
            .count();
        assert_eq!(remaining, 1);
    }
}
