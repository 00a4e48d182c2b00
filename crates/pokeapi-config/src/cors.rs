use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_value(env::var("ALLOWED_ORIGINS").ok().as_deref())
    }

    pub fn from_value(raw: Option<&str>) -> Self {
        let allowed_origins = raw
            .unwrap_or("http://localhost:3000,http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// `*` anywhere in the list opens CORS to every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
