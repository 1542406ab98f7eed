use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = frame_narrator::cli::Cli::parse();
    frame_narrator::run(cli)
}
