use std::env;
use std::fmt;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Supabase,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "supabase" => Some(Self::Supabase),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Supabase => "supabase",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let supabase_url = env::var("SUPABASE_URL")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_URL not set, using empty value");
                String::new()
            });

        let supabase_anon_key = env::var("SUPABASE_ANON_PUBLIC_KEY")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                String::new()
            });

        let default_backend = if supabase_url.is_empty() {
            StoreBackend::Memory
        } else {
            StoreBackend::Supabase
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                warn!("Unknown STORE_BACKEND '{}', using {}", value, default_backend);
                default_backend
            }),
            Err(_) => default_backend,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|value| match value.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("PORT '{}' is not a valid port, using default", value);
                    None
                }
            })
            .unwrap_or(8000);

        let config = Self {
            store_backend,
            supabase_url,
            supabase_anon_key,
            host,
            port,
        };

        if config.store_backend == StoreBackend::Memory {
            warn!("Using in-memory document store - data will not survive a restart");
        } else if !config.is_supabase_configured() {
            warn!("Supabase store selected but not fully configured - missing environment variables");
        }

        config
    }

    /// Config for an in-process store; used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }

    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
