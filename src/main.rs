use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cmdpal::app::{run, PaletteKind, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "cmdpal", version, about = "Fuzzy command palette demo editor")]
struct Cli {
    #[arg(long, help = "Append match scores to palette subtitles")]
    debug: bool,

    #[arg(long, value_name = "PATH", help = "Config file (default ~/.config/cmdpal/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "JSON asset manifest (prefabs and scenes) listed by the Open palette")]
    manifest: Option<PathBuf>,

    #[arg(long, value_name = "open|commands", value_parser = PaletteKind::parse, help = "Palette to open at startup")]
    palette: Option<PaletteKind>,

    #[arg(long, help = "Hide prefab assets, as the editor does while playing")]
    play_mode: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(RunOptions {
        config_path: cli.config,
        manifest_path: cli.manifest,
        debug_scores: cli.debug,
        play_mode: cli.play_mode,
        initial_palette: cli.palette,
    })
}
