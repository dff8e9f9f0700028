//! Status line composition.
//!
//! Widgets fetch concurrently on scoped threads (their work is mostly waiting
//! on subprocesses and the network), then the fragments are joined in a fixed
//! order regardless of which fetch finished first.

use std::thread;

use tracing::{debug, warn};

use crate::cache::UsageCache;
use crate::colors::{separator, warning_glyph};
use crate::config::Config;
use crate::models::HookJson;
use crate::widgets::{
    ContextUsageWidget, ModelWidget, ProjectInfoWidget, RateLimitsWidget, StatusWidget,
    WidgetContext,
};

pub struct Composer<'a> {
    widgets: Vec<StatusWidget<'a>>,
}

impl<'a> Composer<'a> {
    /// Model, context usage, rate limits, project info.
    pub fn new(cache: &'a UsageCache) -> Self {
        Self::with_widgets(vec![
            StatusWidget::Model(ModelWidget::default()),
            StatusWidget::ContextUsage(ContextUsageWidget),
            StatusWidget::RateLimits(RateLimitsWidget::new(cache)),
            StatusWidget::ProjectInfo(ProjectInfoWidget),
        ])
    }

    pub fn with_widgets(widgets: Vec<StatusWidget<'a>>) -> Self {
        Self { widgets }
    }

    /// Joined fragments of every widget that had something to show. Empty when
    /// none did.
    pub fn compose(&self, ctx: &WidgetContext<'_>) -> String {
        let fragments: Vec<Option<String>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .widgets
                .iter()
                .map(|widget| (widget.id(), scope.spawn(move || widget.resolve(ctx))))
                .collect();
            handles
                .into_iter()
                .map(|(id, handle)| match handle.join() {
                    Ok(fragment) => {
                        debug!(widget = id, shown = fragment.is_some(), "widget resolved");
                        fragment
                    }
                    Err(_) => {
                        warn!(widget = id, "widget panicked");
                        None
                    }
                })
                .collect()
        });

        fragments
            .into_iter()
            .flatten()
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(&separator())
    }
}

/// Parses the stdin snapshot and renders the full line. Never returns an empty
/// string: unparseable input or an empty composition yields the warning glyph.
pub fn render_statusline(stdin: &[u8], config: &Config, cache: &UsageCache) -> String {
    let input: HookJson = match serde_json::from_slice(stdin) {
        Ok(input) => input,
        Err(e) => {
            debug!(error = %e, "stdin is not a valid session snapshot");
            return warning_glyph();
        }
    };
    let ctx = WidgetContext::new(&input, config);
    let line = Composer::new(cache).compose(&ctx);
    if line.is_empty() { warning_glyph() } else { line }
}
