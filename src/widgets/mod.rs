//! Status widgets.
//!
//! A widget resolves its own data ([`Widget::get_data`]) and turns it into a
//! text fragment ([`Widget::render`]). `get_data` may touch the filesystem,
//! spawn bounded subprocesses or consult the usage cache, and maps every
//! failure to `None` or a partial value. `render` is a pure function of the
//! data and the read-only context.
//!
//! The set of widgets is closed; [`StatusWidget`] is the one type the
//! composer deals with.

pub mod context_usage;
pub mod model;
pub mod project_info;
pub mod rate_limits;

pub use context_usage::{ContextUsageData, ContextUsageWidget};
pub use model::{EffortLevel, ModelData, ModelWidget};
pub use project_info::{ProjectInfoData, ProjectInfoWidget};
pub use rate_limits::{RateLimitsData, RateLimitsWidget};

use crate::config::Config;
use crate::i18n::{self, Translations};
use crate::models::HookJson;

/// Read-only inputs shared by every widget for one render.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    pub input: &'a HookJson,
    pub config: &'a Config,
    pub translations: &'static Translations,
}

impl<'a> WidgetContext<'a> {
    pub fn new(input: &'a HookJson, config: &'a Config) -> Self {
        Self {
            input,
            config,
            translations: i18n::translations(config.language),
        }
    }
}

pub trait Widget {
    type Data;

    fn id(&self) -> &'static str;

    /// `None` means there is nothing to show, not that something failed loudly.
    fn get_data(&self, ctx: &WidgetContext<'_>) -> Option<Self::Data>;

    fn render(&self, data: &Self::Data, ctx: &WidgetContext<'_>) -> String;
}

fn resolve_with<W: Widget>(widget: &W, ctx: &WidgetContext<'_>) -> Option<String> {
    let data = widget.get_data(ctx)?;
    Some(widget.render(&data, ctx))
}

pub enum StatusWidget<'a> {
    Model(ModelWidget),
    ContextUsage(ContextUsageWidget),
    RateLimits(RateLimitsWidget<'a>),
    ProjectInfo(ProjectInfoWidget),
}

impl StatusWidget<'_> {
    pub fn id(&self) -> &'static str {
        match self {
            StatusWidget::Model(w) => w.id(),
            StatusWidget::ContextUsage(w) => w.id(),
            StatusWidget::RateLimits(w) => w.id(),
            StatusWidget::ProjectInfo(w) => w.id(),
        }
    }

    /// Fetches and renders; `None` when the widget has nothing to show.
    pub fn resolve(&self, ctx: &WidgetContext<'_>) -> Option<String> {
        match self {
            StatusWidget::Model(w) => resolve_with(w, ctx),
            StatusWidget::ContextUsage(w) => resolve_with(w, ctx),
            StatusWidget::RateLimits(w) => resolve_with(w, ctx),
            StatusWidget::ProjectInfo(w) => resolve_with(w, ctx),
        }
    }
}
