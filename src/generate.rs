use crate::audio::wav;
use crate::config::Config;
use crate::frames;
use crate::manifest::{ClipEntry, Manifest};
use crate::tts::Narrator;
use anyhow::Context;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub frames: PathBuf,
    pub output_dir: PathBuf,
    pub backend: Option<String>,
    pub force: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateSummary {
    pub total: usize,
    pub generated: usize,
    pub skipped: usize,
}

/// Narrate every frame in order: frame i becomes `frame-{i:03}.wav` in the
/// output directory, at the model's sample rate. Any failure aborts the run.
pub fn run(config: &Config, options: &GenerateOptions) -> anyhow::Result<GenerateSummary> {
    let frames = frames::load(&options.frames)?;

    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("create output dir {}", options.output_dir.display()))?;

    println!("Loading TTS model...");
    let narrator = Narrator::open(config, &options.backend)?;

    let total = frames.len();
    let mut generated = 0;
    let mut skipped = 0;
    let mut clips = Vec::with_capacity(total);

    for (index, frame) in frames.iter().enumerate() {
        let filename = format!("frame-{index:03}.wav");
        let path = options.output_dir.join(&filename);

        if !options.force && path.metadata().is_ok_and(|meta| meta.len() > 0) {
            println!("[{}/{}] {} exists, skipping.", index + 1, total, filename);
            let duration_ms = fs::read(&path)
                .ok()
                .and_then(|bytes| wav::probe(&bytes).ok())
                .map(|info| info.duration_ms)
                .unwrap_or(0);
            clips.push(ClipEntry {
                index,
                file: filename,
                text: frame.text.clone(),
                duration_ms,
            });
            skipped += 1;
            continue;
        }

        let audio = narrator
            .synthesize(&frame.text)
            .with_context(|| format!("narrate frame {index}"))?;
        fs::write(&path, &audio).with_context(|| format!("write {}", path.display()))?;

        let info = wav::probe(&audio).with_context(|| format!("inspect {filename}"))?;
        clips.push(ClipEntry {
            index,
            file: filename.clone(),
            text: frame.text.clone(),
            duration_ms: info.duration_ms,
        });
        generated += 1;
        println!("[{}/{}] Generated {}", index + 1, total, filename);
    }

    let manifest = Manifest {
        generated_at: Utc::now(),
        backend: narrator.backend_name().to_string(),
        voice: config
            .tts
            .voice
            .clone()
            .or_else(|| config.tts.pocket_tts.voice.clone()),
        sample_rate: narrator.sample_rate(),
        clips,
    };
    manifest.write(&options.output_dir)?;

    Ok(GenerateSummary {
        total,
        generated,
        skipped,
    })
}
