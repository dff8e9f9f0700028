use anyhow::{Context, Result};
use clap::error::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use claude_dashboard::cache::{UsageCache, default_cache_path};
use claude_dashboard::cli::Args;
use claude_dashboard::colors::warning_glyph;
use claude_dashboard::composer::render_statusline;
use claude_dashboard::config::Config;
use claude_dashboard::utils::read_stdin;

fn setup_logging(debug: bool) {
    let filter = match std::env::var("CLAUDE_DASHBOARD_LOG") {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::new(directive),
        _ if debug => EnvFilter::new("claude_dashboard=debug"),
        _ => return,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn parse_args() -> Args {
    match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        // A statusline must still print something when launched with bad flags.
        Err(e) => {
            eprintln!("{e}");
            Args::default()
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let mut config = Config::load(args.config.as_deref());
    if let Some(plan) = args.plan {
        config.plan = plan;
    }

    let stdin = read_stdin().context("read stdin")?;
    let cache_path = args.cache_file.clone().unwrap_or_else(default_cache_path);
    let cache = UsageCache::with_defaults(cache_path);
    Ok(render_statusline(&stdin, &config, &cache))
}

fn main() {
    let args = parse_args();
    setup_logging(args.debug);

    let line = match panic::catch_unwind(AssertUnwindSafe(|| run(&args))) {
        Ok(Ok(line)) if !line.is_empty() => line,
        Ok(Ok(_)) => warning_glyph(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "statusline failed");
            warning_glyph()
        }
        Err(_) => warning_glyph(),
    };
    println!("{line}");
}
