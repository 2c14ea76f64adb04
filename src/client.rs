use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::fmt;
use std::time::Duration;

use crate::config::{API_KEY_ENV_VAR, ClientConfig, default_user_agent, load_config};
use crate::data::{Data, convert_timestamps};
use crate::error::{Result, error_for_status};
use crate::params::Params;
use crate::util::join_path;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Blocking client for the Open States v3 API.
///
/// Holds the session configuration (root, API key, User-Agent). It is
/// `Clone`, but mutating one instance does not affect its clones.
#[derive(Clone)]
pub struct Client {
    root: String,
    api_key: Option<String>,
    user_agent: String,

    timeout: Option<Duration>,
    page_delay: Duration,

    http: HttpClient,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("root", &self.root)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}

impl Client {
    /// Creates a client using `OPENSTATES_API_KEY` / `OPENSTATES_API_ROOT`
    /// and/or `.openstatesrc`.
    ///
    /// This is equivalent to `Client::new(None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit `root`/`api_key` arguments
    /// - environment variables `OPENSTATES_API_ROOT` / `OPENSTATES_API_KEY`
    /// - config file from `OPENSTATES_RC` or `.openstatesrc`
    pub fn new(root: Option<String>, api_key: Option<String>) -> Result<Self> {
        let cfg = load_config(root, api_key)?;
        Self::with_config(cfg)
    }

    pub fn with_config(cfg: ClientConfig) -> Result<Self> {
        if cfg.api_key.is_none() {
            tracing::warn!("No API key found, set {}", API_KEY_ENV_VAR);
        }

        let http = HttpClient::builder().build()?;

        Ok(Self {
            root: cfg.root,
            api_key: cfg.api_key,
            user_agent: cfg.user_agent,
            timeout: None,
            page_delay: Duration::from_secs(1),
            http,
        })
    }

    /// Per-request timeout. Without one the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pause between page requests in bulk bill search (default 1s).
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Appends `suffix` to the default User-Agent
    /// (e.g. `openstates-rs/0.1.0 my-app/2.1`).
    pub fn set_user_agent(&mut self, suffix: &str) {
        self.user_agent = format!("{} {}", default_user_agent(), suffix);
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// GETs `{root}/{path}` and returns the JSON body with timestamps parsed.
    ///
    /// 404 maps to [`Error::NotFound`](crate::Error::NotFound); any other
    /// non-2xx status maps to [`Error::Api`](crate::Error::Api).
    pub fn get(&self, path: &str, params: &Params) -> Result<Data> {
        let url = join_path(&self.root, path);
        let query = params.to_query();
        tracing::debug!("GET {} {:?}", url, query);

        let mut req = self
            .http
            .get(&url)
            .query(&query)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.as_str());
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key.as_str());
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send()?;
        let status = resp.status();
        let request_url = resp.url().to_string();

        if !status.is_success() {
            tracing::error!("API error: {} for {}", status, request_url);
            let body = resp.text().unwrap_or_default();
            return Err(error_for_status(status, &request_url, body));
        }

        let text = resp.text()?;
        let data: Data = serde_json::from_str(&text)?;
        Ok(convert_timestamps(data))
    }
}
