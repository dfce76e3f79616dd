//! Barkane - Entry Point
//!
//! Plays a music list through the audio manager while tracking play time on
//! the first profile slot.
//!
//! Usage: `barkane [playlist] [seconds]`

use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use barkane::audio::AudioManager;
use barkane::data::{load_audio_config, AUDIO_CONFIG_PATH};
use barkane::save;

/// Target frames per second for the update loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);
const DEFAULT_RUN_SECONDS: u64 = 10;
const PROFILE_SLOT: u8 = 0;

fn main() -> Result<()> {
    // Log to file so playback output stays clean
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("barkane.log")
        .context("Failed to open barkane.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Barkane v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let playlist = args.next();
    let seconds = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("Invalid duration: {}", arg))?,
        None => DEFAULT_RUN_SECONDS,
    };

    let config = load_audio_config(Path::new(AUDIO_CONFIG_PATH));
    let mut audio = AudioManager::with_default_backend(config);
    let mut profile = save::load_or_create_profile(PROFILE_SLOT, "Player")
        .with_context(|| format!("Refusing to overwrite unreadable profile slot {}", PROFILE_SLOT))?;

    match playlist {
        Some(name) => audio.play_list(&name),
        None => audio.start(),
    }

    let started = Instant::now();
    let run_for = Duration::from_secs(seconds);
    while started.elapsed() < run_for {
        let frame_start = Instant::now();

        audio.update();

        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    profile.add_play_time(started.elapsed().as_secs_f32());
    save::save_profile(&mut profile, PROFILE_SLOT)?;

    println!(
        "{}: {:.0}s played",
        profile.profile_name, profile.play_time_in_seconds
    );
    log::info!("Barkane shut down cleanly");
    Ok(())
}
