use std::path::PathBuf;

use crate::config::Plan;

#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Single-line statusline for Claude Code")]
pub struct Args {
    /// Config file. Defaults to ~/.claude/claude-dashboard.local.json
    #[arg(long, env = "CLAUDE_DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Shared usage cache file. Defaults to <tmp>/claude-dashboard-cache.json
    #[arg(long, env = "CLAUDE_DASHBOARD_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Subscription plan: pro|max (overrides the config file)
    #[arg(long, value_enum)]
    pub plan: Option<Plan>,

    /// Debug mode: log cache, credential and git decisions to stderr
    #[arg(long, env = "CLAUDE_DASHBOARD_DEBUG")]
    pub debug: bool,
}
