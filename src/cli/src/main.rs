//! CLI for event-throttle.
//!
//! Replays a recorded page event trace through throttled scroll and pointer
//! handlers and reports how many events were collapsed.

use clap::Parser;
use event_throttle::{replay_file, ReplayError, ReplaySummary, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Event Throttle - Replay page event traces through throttled handlers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON-lines event trace.
    #[arg(long)]
    trace: PathBuf,

    /// Path to the config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Throttle window in milliseconds, overriding the config file.
    #[arg(long, env = "EVENT_THROTTLE_WINDOW_MS")]
    window_ms: Option<u64>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let json = args.json;

    match run(args).await {
        Ok(summary) => {
            if json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        error!(error = %e, "Failed to serialize summary");
                        return ExitCode::from(2);
                    }
                }
            } else {
                print_summary(&summary);
            }
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Replay failed");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr in compact form, filtered by `RUST_LOG` (default "info"),
/// so `--json` output on stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ReplaySummary, ReplayError> {
    let mut settings = Settings::load(Some(&args.config))?;
    if let Some(window_ms) = args.window_ms {
        settings = settings.with_window_ms(window_ms)?;
    }
    replay_file(&args.trace, &settings).await
}

/// Prints the final replay summary.
fn print_summary(summary: &ReplaySummary) {
    println!("\nSummary:");
    println!("  Events replayed: {}", summary.events);
    println!("  Trace span: {}ms", summary.trace_span_ms);
    println!("  Window: {}ms", summary.window_ms);
    println!(
        "  Scroll: {} received, {} applied, {} collapsed",
        summary.scroll.received,
        summary.scroll.applied,
        summary.scroll.collapsed()
    );
    println!(
        "  Pointer: {} received, {} applied, {} collapsed",
        summary.pointer.received,
        summary.pointer.applied,
        summary.pointer.collapsed()
    );
    println!("  Applied directly: {}", summary.direct);

    let page = &summary.page;
    println!("\nPage:");
    println!("  Scroll offset: {}", page.scroll_offset);
    println!("  Nav scrolled: {}", page.nav_scrolled);
    println!("  Menu open: {}", page.menu_open);
    println!("  Revealed: {}", page.revealed.join(", "));
    if let Some(glow) = page.glow {
        println!("  Glow: {}, {}", glow.left, glow.top);
    }
    println!(
        "  Submit button: {}{}",
        page.submit_label,
        if page.submit_disabled { " (disabled)" } else { "" }
    );
}
