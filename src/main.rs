mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::ops::ControlFlow;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use archery::config::{Args, GameConfig, Timing};
use archery::context::{ContextSwitcher, Instruction, ModeName};
use archery::input::{translate, KeyTracker, RawInput};
use archery::scenery::Backdrop;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("create log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Drain the terminal events gathered since the last frame into one batch,
/// hand it to the active mode, draw, and sleep out the rest of the frame.
fn frame_loop<W: Write>(
    out: &mut W,
    switcher: &mut ContextSwitcher,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    timing: &Timing,
) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs(1) / timing.fps();
    let mut tracker = KeyTracker::new(keyboard_enhanced, timing.hold_frames());
    let mut rng = thread_rng();
    let (width, height) = terminal::size()?;
    let mut backdrop = Backdrop::generate(width, height, &mut rng);

    loop {
        let frame_start = Instant::now();

        let mut raw = Vec::new();
        let mut close_requested = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(key_event) => match translate(&key_event) {
                    RawInput::Key(key, kind) => raw.push((key, kind)),
                    RawInput::CloseRequested => close_requested = true,
                    RawInput::Ignored => {}
                },
                Event::Resize(w, h) => backdrop = Backdrop::generate(w, h, &mut rng),
                _ => {}
            }
        }
        if close_requested {
            switcher.apply(Instruction::Switch(ModeName::Quit));
        }

        let inputs = tracker.frame(&raw);
        if let ControlFlow::Break(()) = switcher.update(&inputs)? {
            info!("quit");
            return Ok(());
        }

        display::render(out, switcher, &backdrop)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = GameConfig::from_args(&args)?;
    init_logging(&args)?;
    info!(
        fps = config.timing.fps(),
        charge_frames = config.timing.charge_frames(),
        cooldown_frames = config.timing.cooldown_frames(),
        hold_frames = config.timing.hold_frames(),
        gravity = config.gravity,
        "starting"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events so the bow can be drawn by holding Space.
    // Terminals without the kitty protocol fall back to KeyTracker's hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut switcher = ContextSwitcher::new(config);
    let result = frame_loop(&mut out, &mut switcher, &rx, keyboard_enhanced, &config.timing);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "fatal");
    }
    result
}
