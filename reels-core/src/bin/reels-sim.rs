use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use reels_config::{ConfigLoad, ConfigLoader};
use reels_core::sim::{Journal, SimSurface, SimVideo};
use reels_core::{
    CardIndex, CarouselEvent, ClickTarget, PointerId, PointerInput,
    ReelsCarousel,
};

#[derive(Parser, Debug)]
#[command(
    name = "reels-sim",
    about = "Drive the reels carousel against an in-memory host"
)]
struct Cli {
    /// Number of cards in the strip
    #[arg(long, default_value_t = 6)]
    cards: usize,
    /// Card width (px)
    #[arg(long, default_value_t = 200.0)]
    width: f64,
    /// Card height (px)
    #[arg(long, default_value_t = 356.0)]
    height: f64,
    /// Track gap (px)
    #[arg(long, default_value_t = 16.0)]
    gap: f64,
    /// Animation frames to run
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Time between frames (ms)
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// TOML overrides; falls back to $REELS_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,
    /// Drag the strip by this many px halfway through the run
    #[arg(long, allow_negative_numbers = true)]
    drag: Option<f64>,
    /// Click the play button of this card before the first frame
    #[arg(long)]
    play: Option<usize>,
    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("reels_core", LevelFilter::Info)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigLoad> {
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader
            .load_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => loader.load_from_env().context("loading $REELS_CONFIG"),
    }
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let load = load_config(cli.config.as_ref())?;
    if let Some(source) = &load.source {
        log::info!("config loaded from {}", source.display());
    }

    let journal = Journal::new();
    let surface = SimSurface::new(cli.cards, cli.width, cli.height, cli.gap)
        .with_journal(journal.clone());
    let videos = (0..cli.cards)
        .map(|i| Some(SimVideo::new(CardIndex(i), &journal, 12.0)))
        .collect();
    let mut reels = ReelsCarousel::setup(surface, videos, load.config)
        .context("reel markup missing (no cards?)")?;

    if let Some(card) = cli.play {
        let playback =
            reels.update(CarouselEvent::Click(ClickTarget::PlayButton(
                CardIndex(card),
            )));
        log::info!("play {card}: {playback:?}");
    }

    let pointer = PointerId(1);
    let start_x = cli.width / 2.0;
    let mut ts = 0.0;
    for frame in 0..cli.frames {
        if frame == cli.frames / 2
            && let Some(dx) = cli.drag
        {
            reels.update(CarouselEvent::PointerDown(PointerInput::primary(
                pointer, start_x,
            )));
            reels.update(CarouselEvent::PointerMove(PointerInput::primary(
                pointer,
                start_x + dx,
            )));
            reels.update(CarouselEvent::PointerUp(PointerInput::primary(
                pointer,
                start_x + dx,
            )));
        }
        reels.update(CarouselEvent::Frame(ts));
        ts += cli.frame_ms;
    }

    let positions: Vec<Option<f64>> = (0..reels.card_count())
        .map(|i| reels.surface().card_offset(CardIndex(i)))
        .collect();
    let activated = reels.activated_cards();

    if cli.json {
        let report = serde_json::json!({
            "layout": reels.layout(),
            "motion": reels.motion_state().name(),
            "activated": activated,
            "card_positions": positions,
            "journal": journal.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("motion:    {}", reels.motion_state().name());
        println!("offset:    {:.2}", reels.offset());
        println!(
            "step:      {:.2} (total {:.2})",
            reels.layout().step,
            reels.layout().total
        );
        println!("activated: {activated:?}");
        for (i, x) in positions.iter().enumerate() {
            match x {
                Some(x) => println!("  card#{i}: {x:>9.2}"),
                None => println!("  card#{i}: (not laid out)"),
            }
        }
    }

    reels.destroy();
    Ok(())
}
