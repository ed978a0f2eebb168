use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.raindrop.io/rest/v1";
const CONFIG_FILENAME: &str = "raindrop-mcp.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Stdio,
    Server,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Stdio => "stdio",
            Mode::Server => "server",
        })
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Mode::Stdio),
            "server" | "http" => Ok(Mode::Server),
            other => Err(format!("Invalid MODE: {other}. Must be 'stdio' or 'server'")),
        }
    }
}

/// Settings for the outbound Raindrop API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaindropConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for RaindropConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub port: u16,
    pub raindrop: RaindropConfig,
    /// Problems found while loading; reported by `validate`.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Stdio,
            port: 8080,
            raindrop: RaindropConfig::default(),
            warnings: Vec::new(),
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    raindrop: FileRaindrop,
}

#[derive(Debug, Default, Deserialize)]
struct FileRaindrop {
    base_url: Option<String>,
    token: Option<String>,
    timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Defaults, then the TOML file (if any), then process environment.
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        if let Some(path) = find_config_file() {
            cfg.apply_file(&path);
        }
        cfg.apply_env();
        cfg
    }

    fn apply_file(&mut self, path: &Path) {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read config file, ignoring it");
                self.warnings.push(format!("could not read {}: {e}", path.display()));
                return;
            }
        };
        match toml::from_str::<FileConfig>(&contents) {
            Ok(file) => {
                tracing::debug!(?path, "Loaded config file");
                self.merge_file(file);
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to parse config file, ignoring it");
                self.warnings.push(format!("could not parse {}: {e}", path.display()));
            }
        }
    }

    fn merge_file(&mut self, file: FileConfig) {
        if let Some(mode) = file.mode {
            self.set_mode(&mode);
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        let r = file.raindrop;
        if let Some(base) = r.base_url.filter(|b| !b.trim().is_empty()) {
            self.raindrop.base_url = base;
        }
        if let Some(token) = r.token.filter(|t| !t.trim().is_empty()) {
            self.raindrop.token = Some(token);
        }
        if let Some(ms) = r.timeout_ms {
            self.raindrop.timeout_ms = ms;
        }
        if let Some(ms) = r.connect_timeout_ms {
            self.raindrop.connect_timeout_ms = ms;
        }
    }

    fn apply_env(&mut self) {
        if let Some(mode) = non_empty_env("MODE") {
            self.set_mode(&mode);
        }
        if let Some(port) = non_empty_env("PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => self.warnings.push(format!("Invalid PORT: {port}")),
            }
        }
        if let Some(token) = non_empty_env("RAINDROP_TOKEN") {
            self.raindrop.token = Some(token);
        }
        if let Some(base) = non_empty_env("RAINDROP_API_BASE") {
            self.raindrop.base_url = base;
        }
        if let Some(ms) = non_empty_env("RAINDROP_TIMEOUT_MS").and_then(|s| s.parse().ok()) {
            self.raindrop.timeout_ms = ms;
        }
        if let Some(ms) =
            non_empty_env("RAINDROP_CONNECT_TIMEOUT_MS").and_then(|s| s.parse().ok())
        {
            self.raindrop.connect_timeout_ms = ms;
        }
    }

    fn set_mode(&mut self, raw: &str) {
        match raw.parse() {
            Ok(m) => self.mode = m,
            Err(e) => self.warnings.push(e),
        }
    }

    /// Problems that would keep the server from being useful.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = self.warnings.clone();
        if self.raindrop.token.is_none() {
            problems.push("RAINDROP_TOKEN is not set".to_string());
        }
        if reqwest::Url::parse(&self.raindrop.base_url).is_err() {
            problems.push(format!("Invalid RAINDROP_API_BASE: {}", self.raindrop.base_url));
        }
        if self.mode == Mode::Server && self.port == 0 {
            problems.push("PORT cannot be 0".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// `RAINDROP_MCP_CONFIG` if set, else `./raindrop-mcp.toml` when present.
fn find_config_file() -> Option<PathBuf> {
    if let Some(explicit) = non_empty_env("RAINDROP_MCP_CONFIG") {
        return Some(PathBuf::from(explicit));
    }
    let local = PathBuf::from(CONFIG_FILENAME);
    local.is_file().then_some(local)
}

/// Token with all but the last four characters hidden.
pub fn mask_token(token: &str) -> String {
    let n = token.chars().count();
    if n <= 4 {
        return "*".repeat(n);
    }
    let tail: String = token.chars().skip(n - 4).collect();
    format!("{}{}", "*".repeat(n - 4), tail)
}
