use std::env;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_values(env::var("HOST").ok(), env::var("PORT").ok().as_deref())
    }

    pub fn from_values(host: Option<String>, port: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            host: host.filter(|h| !h.is_empty()).unwrap_or(defaults.host),
            port: port
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
