use clap::Parser;
use color_eyre::config::HookBuilder;
use color_eyre::eyre::{Result, WrapErr};

use flappy_blossom::app::App;
use flappy_blossom::assets::Assets;
use flappy_blossom::audio::SoundBoard;
use flappy_blossom::config::{Cli, init_logging};
use flappy_blossom::sim::Physics;
use flappy_blossom::terminal::{self, TerminalGuard};

fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default().try_into_hooks()?;
    eyre_hook.install()?;
    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        terminal::restore();
        panic_hook(info);
    }));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_hooks()?;
    init_logging(&cli)?;

    let seed = cli.seed();
    log::info!("seed {seed}, assets from {}", cli.assets.display());

    // Load before taking over the screen so the log lines stay readable
    let physics = Physics::default();
    let character_size = (
        physics.bird_width.round() as u32,
        physics.bird_height.round() as u32,
    );
    let assets = Assets::load(&cli.assets, character_size);
    let sounds = if cli.mute {
        log::info!("muted");
        SoundBoard::silent()
    } else {
        SoundBoard::open(&cli.assets, cli.synth_cues)
    };

    let mut guard = TerminalGuard::enter().wrap_err("setting up terminal")?;
    let size = guard.size()?;
    let mut app = App::new(seed, assets, sounds, size);
    app.run(guard.out())?;
    Ok(())
}
