pub mod audio;
pub mod cli;
pub mod config;
pub mod frames;
pub mod generate;
pub mod manifest;
pub mod sanitize;
pub mod tts;

use anyhow::Context;
use cli::{Cli, Commands};
use config::Config;
use std::fs;
use std::path::PathBuf;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate_cmd(args),
        Commands::Parse(args) => parse_cmd(args),
        Commands::Check(args) => check_cmd(args),
        Commands::Sanitize(args) => sanitize_cmd(args),
        Commands::Preview(args) => preview_cmd(args),
        Commands::Models(args) => models_cmd(args),
        Commands::Config(args) => config_cmd(args),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate_cmd(args: cli::GenerateArgs) -> anyhow::Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(voice) = args.voice {
        config.tts.voice = Some(voice);
    }

    let options = generate::GenerateOptions {
        frames: args.frames.unwrap_or_else(|| config.frames_path()),
        output_dir: args.output.unwrap_or_else(|| config.output_dir()),
        backend: args.backend,
        force: args.force,
    };

    let summary = generate::run(&config, &options)?;
    println!(
        "Done: {} generated, {} skipped ({} frames).",
        summary.generated, summary.skipped, summary.total
    );
    Ok(())
}

fn parse_cmd(args: cli::ParseArgs) -> anyhow::Result<()> {
    let src = fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let parsed = frames::markdown::parse_document(&src)
        .with_context(|| format!("parse {}", args.input.display()))?;
    let json = frames::to_json(&parsed)?;

    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {} frames to {}", parsed.len(), path.display());
        }
        None => print!("{json}"),
    }
    Ok(())
}

fn check_cmd(args: cli::CheckArgs) -> anyhow::Result<()> {
    let config = Config::load().context("load config")?;
    let max_code_lines = args.max_code_lines.unwrap_or_else(|| config.max_code_lines());

    let src = fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;

    // Sanitize first so the report reflects what will actually be spoken
    let (sanitized, substitutions) = sanitize::sanitize_document(&src);
    let src = if sanitized != src {
        fs::write(&args.input, &sanitized)
            .with_context(|| format!("write {}", args.input.display()))?;
        tracing::debug!(substitutions, "sanitized document before checking");
        sanitized
    } else {
        src
    };

    let report = frames::check::check_document(&src, max_code_lines);

    for error in &report.doc_errors {
        println!("{error} ✗");
    }
    for frame in &report.frames {
        if frame.errors.is_empty() {
            println!("Frame {}: ✓", frame.number);
        } else {
            println!("Frame {}: ✗  → {}", frame.number, frame.errors.join(", "));
        }
    }

    if !report.passed() {
        anyhow::bail!("frame check failed");
    }
    Ok(())
}

fn sanitize_cmd(args: cli::SanitizeArgs) -> anyhow::Result<()> {
    let src = fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let (result, substitutions) = sanitize::sanitize_document(&src);

    if result == src {
        println!("No changes needed: {}", args.input.display());
        return Ok(());
    }

    fs::write(&args.input, &result)
        .with_context(|| format!("write {}", args.input.display()))?;
    let noun = if substitutions == 1 {
        "substitution"
    } else {
        "substitutions"
    };
    println!(
        "Sanitized: {} ({substitutions} TTS {noun} made)",
        args.input.display()
    );
    Ok(())
}

fn preview_cmd(args: cli::PreviewArgs) -> anyhow::Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(voice) = args.voice {
        config.tts.voice = Some(voice);
    }
    let text = args.text.unwrap_or_else(|| "Hello world".to_string());

    println!("Loading TTS model...");
    let narrator = tts::Narrator::open(&config, &args.backend)?;
    let audio = narrator.synthesize(&text).context("tts synthesis")?;

    let path = args.output.unwrap_or_else(|| PathBuf::from("preview.wav"));
    fs::write(&path, &audio).with_context(|| format!("write {}", path.display()))?;

    let info = audio::wav::probe(&audio)?;
    println!(
        "Wrote {} ({} ms at {} Hz)",
        path.display(),
        info.duration_ms,
        info.sample_rate
    );
    Ok(())
}

fn models_cmd(args: cli::ModelsArgs) -> anyhow::Result<()> {
    let info = tts::models_info()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Available backends:");
    for backend in info.backends {
        let status = if backend.available {
            "available"
        } else {
            "unavailable"
        };
        println!("- {} ({})", backend.name, status);
    }

    if let Some(cache_dir) = info.cache_dir {
        println!("Cache dir: {}", cache_dir.display());
    }

    Ok(())
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = Config::init_default()?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    if args.show {
        let config = Config::load()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let config = Config::load()?;
        config.validate()?;
        println!("Config OK");
        return Ok(());
    }

    let path = Config::default_path()?;
    println!("{}", path.display());
    Ok(())
}
