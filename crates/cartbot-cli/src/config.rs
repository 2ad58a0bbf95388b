use anyhow::Context;
use cartbot_commerce::CommerceConfig;
use cartbot_conversation::ConversationConfig;
use cartbot_messenger::MessengerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "cartbot.toml";

/// Contents of `cartbot.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CartbotConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub messenger: MessengerConfig,
    #[serde(default)]
    pub commerce: CommerceConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub session: SessionBackend,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where sender sessions are kept, from the `[session]` table.
///
/// ```toml
/// [session]
/// backend = "redis"
/// url = "redis://:password@localhost:6379"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SessionBackend {
    /// Lost on restart.
    Memory,
    /// One file per key under `data_dir`.
    File {
        /// Directory holding the session files.
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    /// Shared Redis server.
    Redis {
        /// Connection URL, e.g. `redis://:password@host:6379/0`.
        url: String,
    },
}

impl Default for SessionBackend {
    fn default() -> Self {
        Self::File {
            data_dir: default_data_dir(),
        }
    }
}

impl SessionBackend {
    /// One-line description for logs and `check-config`. Never shows a
    /// Redis password.
    pub fn describe(&self) -> String {
        match self {
            Self::Memory => "memory".to_string(),
            Self::File { data_dir } => format!("file ({})", data_dir.display()),
            Self::Redis { url } => format!("redis ({})", redact_password(url)),
        }
    }
}

/// Replace the userinfo part of `url` (`user:password@`) with `***@`.
fn redact_password(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/sessions")
}

impl CartbotConfig {
    /// Read `path`, or the default file when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply environment overrides: `PORT`, `PAGE_ACCESS_TOKEN`,
    /// `VERIFY_TOKEN`, `APP_SECRET`, `REDIS_URL`.
    ///
    /// A non-empty `REDIS_URL` selects the Redis backend.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port:?}"))?;
        }
        if let Some(token) = lookup("PAGE_ACCESS_TOKEN") {
            self.messenger.page_access_token = token;
        }
        if let Some(token) = lookup("VERIFY_TOKEN") {
            self.messenger.verify_token = token;
        }
        if let Some(secret) = lookup("APP_SECRET") {
            self.messenger.app_secret = (!secret.is_empty()).then_some(secret);
        }
        if let Some(url) = lookup("REDIS_URL").filter(|url| !url.trim().is_empty()) {
            self.session = SessionBackend::Redis { url };
        }
        Ok(())
    }

    /// Settings `serve` cannot run without.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut missing = Vec::new();
        if self.messenger.page_access_token.is_empty() {
            missing.push("messenger.page_access_token (PAGE_ACCESS_TOKEN)");
        }
        if self.messenger.verify_token.is_empty() {
            missing.push("messenger.verify_token (VERIFY_TOKEN)");
        }
        if matches!(&self.session, SessionBackend::Redis { url } if url.trim().is_empty()) {
            missing.push("session.url (REDIS_URL)");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Missing required settings: {}", missing.join(", "))
        }
    }
}
