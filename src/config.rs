//! Command line and logging setup

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use env_logger::{Env, Target};

#[derive(Debug, Clone, Parser)]
#[command(name = "flappy-blossom", version, about)]
pub struct Cli {
    /// Directory searched for character.png, obstacle.png and sound cues
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub assets: PathBuf,

    /// Seed for gap placement; random when omitted
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Never open the audio device
    #[arg(long)]
    pub mute: bool,

    /// Synthesize a tone for cues with no sound file
    #[arg(long)]
    pub synth_cues: bool,

    /// Write log output here instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Install the global logger. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder
        .try_init()
        .wrap_err("installing logger")
}
