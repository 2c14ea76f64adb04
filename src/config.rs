use std::path::{Path, PathBuf};

use crate::error::Result;

pub const API_ROOT: &str = "https://v3.openstates.org";
pub const API_KEY_ENV_VAR: &str = "OPENSTATES_API_KEY";
pub const API_ROOT_ENV_VAR: &str = "OPENSTATES_API_ROOT";
pub const RC_ENV_VAR: &str = "OPENSTATES_RC";

pub fn default_user_agent() -> String {
    format!("openstates-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings a [`Client`](crate::Client) is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, typically `https://v3.openstates.org`.
    pub root: String,
    /// Sent as `X-Api-Key`. Requests go out unauthenticated without one.
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            root: API_ROOT.to_string(),
            api_key: None,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    key: Option<String>,
}

/// Resolves configuration from (in order) explicit arguments, environment
/// variables, then the first `.openstatesrc` found.
pub(crate) fn load_config(root: Option<String>, api_key: Option<String>) -> Result<ClientConfig> {
    let env_root = std::env::var(API_ROOT_ENV_VAR).ok();
    let env_key = std::env::var(API_KEY_ENV_VAR).ok();
    resolve(root.or(env_root), api_key.or(env_key), &rc_candidates())
}

fn resolve(
    mut root: Option<String>,
    mut api_key: Option<String>,
    rc_candidates: &[PathBuf],
) -> Result<ClientConfig> {
    if root.is_none() || api_key.is_none() {
        if let Some(rc_path) = rc_candidates.iter().find(|p| p.exists()) {
            tracing::debug!("reading configuration from {}", rc_path.display());
            let cfg = read_rc(rc_path)?;
            if root.is_none() {
                root = cfg.url;
            }
            if api_key.is_none() {
                api_key = cfg.key;
            }
        }
    }

    Ok(ClientConfig {
        root: root
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| API_ROOT.to_string()),
        api_key: api_key.filter(|k| !k.trim().is_empty()),
        user_agent: default_user_agent(),
    })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // `key:` may be followed by its value on the next line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            if !line.contains(':') {
                cfg.assign(pk, strip_quotes(line));
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if !matches!(k, "url" | "key") {
                continue;
            }
            if v.is_empty() {
                pending_key = Some(k);
            } else {
                cfg.assign(k, v);
            }
        }
    }

    cfg
}

impl RcConfig {
    fn assign(&mut self, key: &str, value: &str) {
        match key {
            "url" => self.url = Some(value.to_string()),
            "key" => self.key = Some(value.to_string()),
            _ => {}
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    if let Ok(p) = std::env::var(RC_ENV_VAR) {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".openstatesrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".openstatesrc"));
    }
    v
}
