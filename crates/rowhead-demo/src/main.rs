#![forbid(unsafe_code)]

//! rowhead demo.
//!
//! Builds an editor holding sample text, attaches a line-number gutter, and
//! lets a background thread keep appending words while the main thread runs
//! paint cycles whenever the gutter reports a change. The final frame is
//! written to stdout as ANSI text.

mod app;
mod cli;
mod sample;

use std::io;
use std::path::Path;
use std::process;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rowhead_core::geometry::Size;
use rowhead_gutter::GutterConfig;
use rowhead_render::present::write_ansi;
use rowhead_text::TextSurface;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{DemoWindow, lock};
use crate::sample::{Lcg, WORD_LIMIT, load_words, sample_text};

const APPEND_INTERVAL: Duration = Duration::from_millis(5);
const IDLE_POLL: Duration = Duration::from_millis(50);

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run(opts: &cli::Opts) -> io::Result<()> {
    let parsed = GutterConfig::from_env();
    for err in &parsed.errors {
        warn!(%err, "ignoring gutter setting");
    }
    let config = if parsed.config.validate().is_ok() {
        parsed.config
    } else {
        GutterConfig::default()
    };

    let words = load_words(Path::new(&opts.words_path), WORD_LIMIT);
    let mut rng = Lcg::new(opts.seed);
    let text = sample_text(&words, &mut rng);

    let surface = Arc::new(Mutex::new(TextSurface::new(&text).with_wrap(opts.wrap)));
    let mut window = DemoWindow::new(
        Arc::clone(&surface),
        config,
        Size::new(opts.width, opts.height),
    );
    if let Some(caret) = opts.caret {
        lock(&surface).set_caret(caret);
    }

    let (wake_tx, wake_rx) = mpsc::channel();
    window.gutter().set_waker(move || {
        let _ = wake_tx.send(());
    });

    let writer = {
        let surface = Arc::clone(&surface);
        let appends = opts.appends;
        let mut rng = Lcg::new(opts.seed.wrapping_add(1));
        thread::spawn(move || {
            for i in 0..appends {
                let Some(word) = words.get(i % words.len().max(1)) else {
                    break;
                };
                let piece = if rng.below(sample::LINE_BREAK_ODDS) == 0 {
                    format!("\n{word}")
                } else {
                    format!(" {word}")
                };
                if let Err(err) = lock(&surface).append(&piece) {
                    warn!(%err, "background append failed");
                    break;
                }
                thread::sleep(APPEND_INTERVAL);
            }
        })
    };

    window.paint_cycle();
    loop {
        match wake_rx.recv_timeout(IDLE_POLL) {
            Ok(()) => {
                if let Some(report) = window.paint_cycle()
                    && report.is_stale()
                {
                    warn!(?report, "gutter frame incomplete");
                }
            }
            Err(RecvTimeoutError::Timeout) if writer.is_finished() => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    if writer.join().is_err() {
        warn!("background writer panicked");
    }
    window.paint_cycle();

    let editor = lock(&surface);
    info!(
        frames = window.frames(),
        lines = editor.document().line_count(),
        chars = editor.document().len_chars(),
        "demo finished"
    );
    drop(editor);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_ansi(window.buffer(), &mut out)
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging(&opts.log_filter);

    if let Err(err) = run(&opts) {
        eprintln!("rowhead-demo: {err}");
        process::exit(1);
    }
}
