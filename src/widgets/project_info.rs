//! Working directory name plus git branch, dirty marker and upstream drift.

use std::path::Path;

use super::{Widget, WidgetContext};
use crate::colors::{Color, paint};
use crate::git::read_git_info;
use crate::models::GitInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfoData {
    pub dir_name: String,
    /// Branch name, suffixed with `*` when the tree has uncommitted changes.
    pub git_branch: Option<String>,
    pub ahead: Option<usize>,
    pub behind: Option<usize>,
}

impl ProjectInfoData {
    pub fn from_git(dir_name: String, git: GitInfo) -> Self {
        let git_branch = git.branch.map(|branch| {
            if git.is_clean == Some(false) {
                format!("{branch}*")
            } else {
                branch
            }
        });
        Self {
            dir_name,
            git_branch,
            ahead: git.ahead,
            behind: git.behind,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectInfoWidget;

fn dir_name(dir: &str) -> String {
    Path::new(dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string())
}

impl Widget for ProjectInfoWidget {
    type Data = ProjectInfoData;

    fn id(&self) -> &'static str {
        "projectInfo"
    }

    fn get_data(&self, ctx: &WidgetContext<'_>) -> Option<ProjectInfoData> {
        let dir = ctx.input.current_dir()?;
        let git = read_git_info(Path::new(dir));
        Some(ProjectInfoData::from_git(dir_name(dir), git))
    }

    fn render(&self, data: &ProjectInfoData, _ctx: &WidgetContext<'_>) -> String {
        let mut out = paint(&format!("📁 {}", data.dir_name), Color::Blue);

        if let Some(branch) = data.git_branch.as_deref() {
            let mut indicators = String::new();
            if let Some(ahead) = data.ahead.filter(|n| *n > 0) {
                indicators.push_str(&format!("↑{ahead}"));
            }
            if let Some(behind) = data.behind.filter(|n| *n > 0) {
                indicators.push_str(&format!("↓{behind}"));
            }
            let label = if indicators.is_empty() {
                format!("({branch})")
            } else {
                format!("({branch} {indicators})")
            };
            out.push(' ');
            out.push_str(&paint(&label, Color::Magenta));
        }
        out
    }
}
