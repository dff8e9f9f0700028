pub mod git;
pub mod hook;
pub mod ratelimit;

pub use git::GitInfo;
pub use hook::{CurrentUsage, HookJson};
pub use ratelimit::{UsageLimits, UsageWindow};
