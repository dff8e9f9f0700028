/// Result of the independent git probes for one working directory.
///
/// Each field is filled by its own time-bounded query; `None` means that query
/// failed or timed out, not that the answer is negative.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: Option<String>,
    pub is_clean: Option<bool>,
    pub ahead: Option<usize>,
    pub behind: Option<usize>,
}
