//! OAuth access-token lookup.
//!
//! Claude Code keeps its OAuth credentials either in the macOS Keychain or in
//! `.credentials.json` under the Claude config directory. Both hold the same
//! JSON document:
//!
//! ```json
//! { "claudeAiOauth": { "accessToken": "..." } }
//! ```
//!
//! [`CredentialResolver`] walks an ordered list of [`CredentialSource`]s and
//! returns the first token found. A source that errors for any reason is
//! skipped; the resolver itself never fails.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::process::output_with_timeout;
use crate::utils::{claude_config_dir_override, claude_home};

pub const TOKEN_ENV_VAR: &str = "CLAUDE_CODE_OAUTH_TOKEN";
pub const KEYCHAIN_SERVICE: &str = "Claude Code-credentials";
pub const CREDENTIALS_FILE: &str = ".credentials.json";
const KEYCHAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Anything that can hand out a bearer token for the usage endpoint.
pub trait TokenProvider: Send + Sync {
    fn resolve(&self) -> Option<String>;
}

/// One step in the credential chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Raw token in an environment variable.
    Env(String),
    /// macOS Keychain generic password holding the credentials JSON.
    Keychain {
        service: String,
        account: Option<String>,
    },
    /// Credentials JSON file.
    File(PathBuf),
}

impl CredentialSource {
    pub fn read(&self) -> Option<String> {
        match self {
            CredentialSource::Env(var) => env::var(var).ok().and_then(non_empty),
            CredentialSource::Keychain { service, account } => {
                let mut cmd = Command::new("security");
                cmd.args(["find-generic-password", "-s", service.as_str()]);
                if let Some(account) = account {
                    cmd.args(["-a", account.as_str()]);
                }
                cmd.arg("-w");
                let raw = output_with_timeout(&mut cmd, KEYCHAIN_TIMEOUT)?;
                access_token_from_json(&raw)
            }
            CredentialSource::File(path) => {
                let raw = fs::read_to_string(path).ok()?;
                access_token_from_json(&raw)
            }
        }
    }
}

/// Ordered credential chain.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    sources: Vec<CredentialSource>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<CredentialSource>) -> Self {
        Self { sources }
    }

    /// The chain for the host platform: env override, then the Keychain on
    /// macOS, then the credentials files.
    pub fn platform_default() -> Self {
        let mut sources = vec![CredentialSource::Env(TOKEN_ENV_VAR.to_string())];

        if cfg!(target_os = "macos") {
            sources.push(CredentialSource::Keychain {
                service: keychain_service_name(claude_config_dir_override().as_deref()),
                account: env::var("USER").ok().and_then(non_empty),
            });
        }

        if let Some(dir) = claude_config_dir_override() {
            sources.push(CredentialSource::File(PathBuf::from(dir).join(CREDENTIALS_FILE)));
        }
        if let Some(home) = claude_home() {
            let path = home.join(CREDENTIALS_FILE);
            if !sources.contains(&CredentialSource::File(path.clone())) {
                sources.push(CredentialSource::File(path));
            }
        }

        Self { sources }
    }

    pub fn sources(&self) -> &[CredentialSource] {
        &self.sources
    }
}

impl TokenProvider for CredentialResolver {
    fn resolve(&self) -> Option<String> {
        self.sources.iter().find_map(|source| {
            let token = source.read();
            debug!(source = ?source, found = token.is_some(), "credential lookup");
            token
        })
    }
}

/// Keychain service name. Claude Code appends the first 8 hex digits of
/// `sha256(CLAUDE_CONFIG_DIR)` when a custom config dir is in use.
pub fn keychain_service_name(config_dir: Option<&str>) -> String {
    match config_dir {
        Some(dir) => {
            let digest = Sha256::digest(dir.as_bytes());
            let suffix: String = format!("{:x}", digest).chars().take(8).collect();
            format!("{KEYCHAIN_SERVICE}-{suffix}")
        }
        None => KEYCHAIN_SERVICE.to_string(),
    }
}

fn access_token_from_json(raw: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    json.get("claudeAiOauth")
        .and_then(|v| v.get("accessToken"))
        .and_then(|v| v.as_str())
        .and_then(|s| non_empty(s.to_string()))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_creds(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_nested_access_token() {
        let dir = TempDir::new().unwrap();
        let path = write_creds(&dir, "c.json", r#"{"claudeAiOauth":{"accessToken":" tok-1 "}}"#);
        assert_eq!(CredentialSource::File(path).read().as_deref(), Some("tok-1"));
    }

    #[test]
    fn malformed_or_missing_fields_are_skipped() {
        let dir = TempDir::new().unwrap();
        let bad_json = write_creds(&dir, "bad.json", "{not json");
        let no_field = write_creds(&dir, "nofield.json", r#"{"claudeAiOauth":{}}"#);
        let empty = write_creds(&dir, "empty.json", r#"{"claudeAiOauth":{"accessToken":""}}"#);
        let good = write_creds(&dir, "good.json", r#"{"claudeAiOauth":{"accessToken":"t"}}"#);

        let resolver = CredentialResolver::new(vec![
            CredentialSource::File(dir.path().join("missing.json")),
            CredentialSource::File(bad_json),
            CredentialSource::File(no_field),
            CredentialSource::File(empty),
            CredentialSource::File(good),
        ]);
        assert_eq!(resolver.resolve().as_deref(), Some("t"));
    }

    #[test]
    fn empty_chain_resolves_nothing() {
        assert!(CredentialResolver::new(Vec::new()).resolve().is_none());
    }

    #[test]
    fn missing_keychain_tool_falls_through() {
        let dir = TempDir::new().unwrap();
        let good = write_creds(&dir, "good.json", r#"{"claudeAiOauth":{"accessToken":"file"}}"#);
        let resolver = CredentialResolver::new(vec![
            CredentialSource::Keychain {
                service: "statusline-test-service-that-does-not-exist".into(),
                account: None,
            },
            CredentialSource::File(good),
        ]);
        assert_eq!(resolver.resolve().as_deref(), Some("file"));
    }

    #[test]
    #[serial]
    fn env_source_wins_when_set() {
        let dir = TempDir::new().unwrap();
        let good = write_creds(&dir, "good.json", r#"{"claudeAiOauth":{"accessToken":"file"}}"#);
        let var = "CLAUDE_DASHBOARD_TEST_TOKEN";
        let resolver = CredentialResolver::new(vec![
            CredentialSource::Env(var.into()),
            CredentialSource::File(good),
        ]);

        // SAFETY: Test runs serially, no concurrent env access
        unsafe { env::set_var(var, "from-env") };
        assert_eq!(resolver.resolve().as_deref(), Some("from-env"));
        unsafe { env::set_var(var, "   ") };
        assert_eq!(resolver.resolve().as_deref(), Some("file"));
        unsafe { env::remove_var(var) };
    }

    #[test]
    fn keychain_service_suffix_tracks_config_dir() {
        assert_eq!(keychain_service_name(None), "Claude Code-credentials");
        let a = keychain_service_name(Some("/a"));
        let b = keychain_service_name(Some("/b"));
        assert!(a.starts_with("Claude Code-credentials-"));
        assert_eq!(a.len(), "Claude Code-credentials-".len() + 8);
        assert_ne!(a, b);
    }
}
