use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod constants;
mod controller;
mod input;
mod layout;
mod media;
mod slide;
mod stage;
mod state;
mod texture_loader;
mod view;

use crate::constants::*;
use crate::controller::Presentation;
use crate::media::RaylibMediaPlayer;
use crate::slide::SLIDES;
use crate::stage::Stage;
use crate::texture_loader::load_slide_textures;

#[derive(Parser)]
#[command(name = "narrated-slideshow")]
#[command(about = "Full-window slideshow with narrated slides", long_about = None)]
struct Cli {
    /// Directory holding the slide images and narration tracks
    #[arg(value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// Initial window width
    #[arg(long, default_value_t = RENDER_WIDTH / 3 * 2)]
    width: i32,

    /// Initial window height
    #[arg(long, default_value_t = RENDER_HEIGHT / 3 * 2)]
    height: i32,

    /// Narration volume (0.0 to 1.0)
    #[arg(long, default_value_t = 1.0)]
    volume: f32,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Log level comes from RUST_LOG, e.g. RUST_LOG=debug
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    info!("Assets: {:?}", cli.assets);

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("Rompiendo la sociología espontánea")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let audio = if cli.mute {
        info!("Audio disabled, narration will not play");
        None
    } else {
        match RaylibAudio::init_audio_device() {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("No audio device, narration will not play: {:?}", e);
                None
            }
        }
    };
    let media = RaylibMediaPlayer::new(audio.as_ref(), cli.assets.clone(), cli.volume);

    // --- Load Slides ---
    let textures = load_slide_textures(&mut rl, &thread, &cli.assets, &SLIDES)?;
    let mut stage = Stage::new(textures);
    let mut presentation = Presentation::new(&SLIDES, media)?;

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {}", e))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        for stimulus in stage.poll(&rl, presentation.view()) {
            presentation.dispatch(stimulus);
        }
        presentation.update(dt);
        stage.update(dt, presentation.view());

        // --- Render each frame into fixed size "framebuffer" ---
        let view = presentation.view();
        let slides = presentation.slides();
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            stage.draw(&mut d, view, slides);
        });

        // Draw the vertically flipped framebuffer scaled to the window
        let mut d2 = rl.begin_drawing(&thread);

        let sw = d2.get_screen_width() as f32;
        let sh = d2.get_screen_height() as f32;

        d2.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE
        );
    }

    info!("Window closed");
    Ok(())
}
