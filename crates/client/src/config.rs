use roborally_core::AssetPaths;

pub const DEFAULT_HOST: &str = "localhost:5000";
pub const HOST_ENV: &str = "ROBORALLY_HOST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host[:port]` serving both the API and the card images.
    pub host: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_host(std::env::var(HOST_ENV).ok())
    }

    pub fn from_host(host: Option<String>) -> Self {
        match host.map(|value| value.trim().to_string()) {
            Some(host) if !host.is_empty() => Self { host },
            _ => Self::default(),
        }
    }

    pub fn api_base(&self) -> String {
        format!("http://{}/api", self.host)
    }

    pub fn assets(&self) -> AssetPaths {
        AssetPaths::for_host(&self.host)
    }
}
