use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub dhcp: DhcpConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Poll interval the page uses between /api refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_wan_if")]
    pub wan_if: String,
    #[serde(default = "default_lan_if")]
    pub lan_if: String,
    #[serde(default = "default_ping_ip")]
    pub ping_ip: String,
    #[serde(default = "default_ping_dns")]
    pub ping_dns: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DhcpConfig {
    /// Lease file path, or "auto" to probe the well-known locations.
    #[serde(default = "default_lease_file")]
    pub lease_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    /// How many journal lines to request per /api/logs call.
    #[serde(default = "default_log_limit")]
    pub limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_refresh_secs() -> u64 {
    5
}

fn default_wan_if() -> String {
    "wlan0".to_string()
}

fn default_lan_if() -> String {
    "eth0".to_string()
}

fn default_ping_ip() -> String {
    "8.8.8.8".to_string()
}

fn default_ping_dns() -> String {
    "google.com".to_string()
}

fn default_lease_file() -> String {
    "auto".to_string()
}

fn default_log_limit() -> u32 {
    200
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wan_if: default_wan_if(),
            lan_if: default_lan_if(),
            ping_ip: default_ping_ip(),
            ping_dns: default_ping_dns(),
        }
    }
}

impl Default for DhcpConfig {
    fn default() -> Self {
        Self {
            lease_file: default_lease_file(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            limit: default_log_limit(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by CONFIG_FILE (default "config.toml").
    /// A missing file yields the built-in defaults; a file that exists but
    /// fails to parse or validate is a startup error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path, "no config file; using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("read {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.dashboard.refresh_secs > 0,
            "dashboard.refresh_secs must be > 0, got {}",
            self.dashboard.refresh_secs
        );
        anyhow::ensure!(
            !self.network.wan_if.is_empty(),
            "network.wan_if must be non-empty"
        );
        anyhow::ensure!(
            !self.network.lan_if.is_empty(),
            "network.lan_if must be non-empty"
        );
        anyhow::ensure!(
            !self.network.ping_ip.is_empty(),
            "network.ping_ip must be non-empty"
        );
        anyhow::ensure!(
            !self.network.ping_dns.is_empty(),
            "network.ping_dns must be non-empty"
        );
        anyhow::ensure!(self.logs.limit > 0, "logs.limit must be > 0");
        Ok(())
    }
}
