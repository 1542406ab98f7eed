use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "frame-narrator",
    version,
    about = "Generate narration audio for code screencast frames"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize one WAV per frame from a frames JSON file
    Generate(GenerateArgs),
    /// Convert an authored frames.md document into frames JSON
    Parse(ParseArgs),
    /// Sanitize and validate an authored frames.md document
    Check(CheckArgs),
    /// Rewrite narration text in a frames.md document for speech
    Sanitize(SanitizeArgs),
    /// Synthesize a single text to audition the configured voice
    Preview(PreviewArgs),
    /// List synthesis backends
    Models(ModelsArgs),
    /// Inspect or initialize the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(value_name = "FRAMES", help = "Frames JSON file (default: frames.json)")]
    pub frames: Option<PathBuf>,

    #[arg(short, long, value_name = "DIR", help = "Output directory (default: audio)")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Voice name or local voice file")]
    pub voice: Option<String>,

    #[arg(long, help = "Override TTS backend")]
    pub backend: Option<String>,

    #[arg(long, help = "Regenerate clips whose output file already exists")]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[arg(value_name = "FRAMES_MD", help = "Authored frames markdown document")]
    pub input: PathBuf,

    #[arg(short, long, value_name = "PATH", help = "Write JSON here instead of stdout")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(value_name = "FRAMES_MD", help = "Authored frames markdown document")]
    pub input: PathBuf,

    #[arg(long, value_name = "N", help = "Code line budget per frame")]
    pub max_code_lines: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SanitizeArgs {
    #[arg(value_name = "FRAMES_MD", help = "Authored frames markdown document")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[arg(long, help = "Text to synthesize")]
    pub text: Option<String>,

    #[arg(long, help = "Voice name or local voice file")]
    pub voice: Option<String>,

    #[arg(long, help = "Override TTS backend")]
    pub backend: Option<String>,

    #[arg(long, value_name = "PATH", help = "Output file (default: preview.wav)")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,
}
